//! Screen/content coordinate model and the screen-to-content projection.
//!
//! The content surface sits below the top navigation bar and renders its
//! page at a zoom that is generally not 1:1, so a cursor position has to be
//! shifted by the bar height and divided by the scale factor before it can
//! be handed to the scripted bridge.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// An integer point in content logical pixels, as taken by the bridge scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentPoint {
    pub x: i64,
    pub y: i64,
}

impl ContentPoint {
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Geometry of the content surface at the moment of a mapping.
///
/// `frame_width` is the on-screen width in points, `content_width` the
/// logical width the page reports for itself, and `overlay_offset` the
/// height consumed by the top bar (0 when the bar is hidden).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub frame_width: f64,
    pub content_width: i64,
    pub overlay_offset: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(frame_width: f64, content_width: i64, overlay_offset: f64) -> Self {
        Self { frame_width, content_width, overlay_offset }
    }

    /// Ratio of on-screen width to logical width, or `None` when the page
    /// has not reported a usable width.
    #[must_use]
    pub fn scale(&self) -> Option<f64> {
        if self.content_width <= 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let scale = self.frame_width / self.content_width as f64;
        (scale.is_finite() && scale > 0.0).then_some(scale)
    }

    /// Project a screen point into content space.
    #[must_use]
    pub fn project(&self, screen: Point) -> Projection {
        let local_y = screen.y - self.overlay_offset;
        if local_y < 0.0 {
            return Projection::Overlay;
        }
        let Some(scale) = self.scale() else {
            return Projection::Unscaled;
        };
        #[allow(clippy::cast_possible_truncation)]
        let point = ContentPoint { x: (screen.x / scale) as i64, y: (local_y / scale) as i64 };
        Projection::Content(point)
    }

    /// Content point under `screen`, or `None` when the point is over the
    /// overlay or the scale is unavailable.
    #[must_use]
    pub fn to_content_point(&self, screen: Point) -> Option<ContentPoint> {
        self.project(screen).content()
    }
}

/// Outcome of projecting a screen point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// The point lies above the content surface, over the top bar.
    Overlay,
    /// The page has not reported a positive layout width.
    Unscaled,
    /// The point maps to this content coordinate.
    Content(ContentPoint),
}

impl Projection {
    #[must_use]
    pub fn content(self) -> Option<ContentPoint> {
        match self {
            Self::Content(point) => Some(point),
            Self::Overlay | Self::Unscaled => None,
        }
    }
}

/// Screen dimensions the cursor is confined to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self { width: crate::consts::SCREEN_WIDTH, height: crate::consts::SCREEN_HEIGHT }
    }
}

impl ScreenSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point { x: self.width / 2.0, y: self.height / 2.0 }
    }
}
