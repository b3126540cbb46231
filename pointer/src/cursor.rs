//! Virtual cursor: touch-delta tracking and the bounded cursor position.

#[cfg(test)]
#[path = "cursor_test.rs"]
mod cursor_test;

use serde::{Deserialize, Serialize};

use crate::viewport::{Point, ScreenSize};

/// Converts absolute samples from the indirect touch surface into deltas.
///
/// The first sample after [`reset`](Self::reset) only establishes a
/// baseline, so picking up a finger anywhere on the surface never makes
/// the cursor jump.
#[derive(Debug, Clone, Default)]
pub struct TouchDeltaTracker {
    last: Option<Point>,
}

impl TouchDeltaTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous sample. Called when a new touch begins.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Record `location` and return the delta since the previous sample.
    pub fn on_touch_moved(&mut self, location: Point) -> Point {
        let delta = match self.last {
            Some(last) => location.delta_from(last),
            None => Point::default(),
        };
        self.last = Some(location);
        delta
    }
}

/// Cursor image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    /// Arrow shown over inert content.
    #[default]
    Default,
    /// Hand shown over links and inputs.
    Pointer,
}

/// Absolute cursor position, visibility and glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorState {
    position: Point,
    visible: bool,
    glyph: Glyph,
    screen: ScreenSize,
}

impl CursorState {
    /// A visible default cursor at the centre of `screen`.
    #[must_use]
    pub fn new(screen: ScreenSize) -> Self {
        Self { position: screen.center(), visible: true, glyph: Glyph::Default, screen }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn glyph(&self) -> Glyph {
        self.glyph
    }

    #[must_use]
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Move by `(dx, dy)`.
    ///
    /// Each axis moves only if its new value stays within the screen;
    /// an out-of-bounds axis keeps its previous value rather than
    /// snapping to the edge. Returns whether the position changed.
    pub fn apply_delta(&mut self, dx: f64, dy: f64) -> bool {
        let before = self.position;

        let x = self.position.x + dx;
        if (0.0..=self.screen.width).contains(&x) {
            self.position.x = x;
        }
        let y = self.position.y + dy;
        if (0.0..=self.screen.height).contains(&y) {
            self.position.y = y;
        }

        self.position != before
    }

    /// Choose between the pointer and default glyph. Returns whether it changed.
    pub fn set_glyph(&mut self, pointer: bool) -> bool {
        let glyph = if pointer { Glyph::Pointer } else { Glyph::Default };
        let changed = self.glyph != glyph;
        self.glyph = glyph;
        changed
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
