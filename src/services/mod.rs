//! Shell services: persisted stores and URL helpers.
//!
//! ARCHITECTURE
//! ============
//! Each store owns one JSON file in the data directory and is owned by the
//! shell. Stores never fail outward: unreadable files start from defaults
//! and failed writes are logged, so a storage problem cannot block input.

pub mod favorites;
pub mod history;
pub mod persistence;
pub mod search;
pub mod settings;
