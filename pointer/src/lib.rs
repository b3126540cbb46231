//! Pointer engine for a remote-driven web browser.
//!
//! The device has no pointing hardware: a small indirect touch surface and a
//! few buttons drive a virtual cursor over an embedded web content surface.
//! This crate owns the platform-independent part of that: converting touch
//! samples into cursor motion, mapping the cursor into page coordinates,
//! probing and clicking page elements through scripts, and routing remote
//! presses. The host draws the cursor, presents [`prompt::Prompt`]s and
//! applies the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Remote event router and the [`engine::Engine`] state |
//! | [`cursor`] | Touch-delta tracking and the bounded cursor |
//! | [`viewport`] | Screen-to-content coordinate mapping |
//! | [`bridge`] | Content surface capability and scripted element queries |
//! | [`script`] | Typed scripts and their JavaScript source |
//! | [`mode`] | Cursor/Scroll mode state machine |
//! | [`hit`] | Top bar layout and overlay hit-testing |
//! | [`input`] | Remote presses, gestures and touch events |
//! | [`prompt`] | Presentation requests and presenter choices |
//! | [`consts`] | Shared constants (screen size, hit margins, text scale limits) |

pub mod bridge;
pub mod consts;
pub mod cursor;
pub mod engine;
pub mod hit;
pub mod input;
pub mod mode;
pub mod prompt;
pub mod script;
pub mod viewport;
