//! Top navigation bar geometry and overlay hit-testing.
//!
//! The bar is drawn over the top of the screen ahead of the content
//! surface. Its controls are fixed rectangles in screen space; back and menu
//! get extra slop because they sit at the edges where the cursor is hard to
//! place precisely.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::consts::{BACK_INFLATE_Y, MENU_INFLATE};
use crate::viewport::Point;

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Grow by `dx` on the left and right and `dy` on the top and bottom.
    #[must_use]
    pub fn inflate(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x - dx, y: self.y - dy, width: self.width + 2.0 * dx, height: self.height + 2.0 * dy }
    }
}

/// A control on the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayTarget {
    Back,
    Refresh,
    Forward,
    Home,
    UrlBar,
    FullscreenToggle,
    Menu,
}

/// Control rectangles of the top bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayLayout {
    /// Height the bar takes from the top of the screen.
    pub height: f64,
    pub back: Rect,
    pub refresh: Rect,
    pub forward: Rect,
    pub home: Rect,
    pub url_bar: Rect,
    pub fullscreen: Rect,
    pub menu: Rect,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            height: 140.0,
            back: Rect::new(40.0, 40.0, 60.0, 60.0),
            forward: Rect::new(120.0, 40.0, 60.0, 60.0),
            refresh: Rect::new(200.0, 40.0, 60.0, 60.0),
            home: Rect::new(280.0, 40.0, 60.0, 60.0),
            url_bar: Rect::new(380.0, 40.0, 1160.0, 60.0),
            fullscreen: Rect::new(1580.0, 40.0, 60.0, 60.0),
            menu: Rect::new(1800.0, 40.0, 60.0, 60.0),
        }
    }
}

impl OverlayLayout {
    /// The control under `p`, checked in priority order.
    #[must_use]
    pub fn hit(&self, p: Point) -> Option<OverlayTarget> {
        let candidates = [
            (self.back.inflate(0.0, BACK_INFLATE_Y), OverlayTarget::Back),
            (self.refresh, OverlayTarget::Refresh),
            (self.forward, OverlayTarget::Forward),
            (self.home, OverlayTarget::Home),
            (self.url_bar, OverlayTarget::UrlBar),
            (self.fullscreen, OverlayTarget::FullscreenToggle),
            (self.menu.inflate(MENU_INFLATE, MENU_INFLATE), OverlayTarget::Menu),
        ];
        candidates.into_iter().find(|(rect, _)| rect.contains(p)).map(|(_, target)| target)
    }
}

/// The top bar: its layout and whether it is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopBar {
    pub layout: OverlayLayout,
    pub visible: bool,
}

impl Default for TopBar {
    fn default() -> Self {
        Self { layout: OverlayLayout::default(), visible: true }
    }
}

impl TopBar {
    #[must_use]
    pub fn new(layout: OverlayLayout, visible: bool) -> Self {
        Self { layout, visible }
    }

    /// Vertical offset the bar imposes on the content surface.
    #[must_use]
    pub fn offset(&self) -> f64 {
        if self.visible { self.layout.height } else { 0.0 }
    }

    /// Whether `p` falls on the visible bar.
    #[must_use]
    pub fn covers(&self, p: Point) -> bool {
        self.visible && p.y >= 0.0 && p.y < self.layout.height
    }

    /// Flip visibility and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}
