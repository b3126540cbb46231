//! Input model: remote buttons, gestures and touch events.
//!
//! The remote has a clickable touch surface (Select), Menu and Play/Pause.
//! Arrow presses are reported by the platform but carry no meaning here.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::viewport::Point;

/// A discrete button press on the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemotePress {
    /// Menu button: back, or exit at the root.
    Menu,
    /// Clicking the touch surface.
    Select,
    /// Play/Pause button.
    PlayPause,
    /// Edge taps on the touch surface. Ignored.
    Up,
    Down,
    Left,
    Right,
}

/// Where a double tap was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleTap {
    /// Double click of the touch surface: switch mode.
    TouchSurface,
    /// Double press of Play/Pause: open the advanced menu.
    PlayPause,
}

/// Raw event stream consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    TouchBegan,
    TouchMoved { x: f64, y: f64 },
    Press { button: RemotePress },
    DoubleTap { target: DoubleTap },
}

impl InputEvent {
    #[must_use]
    pub fn touch_moved(location: Point) -> Self {
        Self::TouchMoved { x: location.x, y: location.y }
    }
}
