//! Remote-driven browser shell.
//!
//! The pointer engine in the `pointer` crate turns remote input into cursor
//! moves, clicks and prompts. This crate hosts it: [`shell`] settles the
//! engine's actions against persisted [`services`], [`config`] reads the
//! environment, and [`replay`] drives the whole shell from a scenario file
//! against a simulated page.

pub mod config;
pub mod replay;
pub mod services;
pub mod shell;
