//! Interaction mode state machine.
//!
//! The device is either driving a virtual cursor (`Cursor`) or handing the
//! touch surface to the content's native scrolling (`Scroll`). There is one
//! transition, [`ModeController::toggle`], and each state fully determines
//! which of scrolling, content touch forwarding and the cursor glyph are on.
//!
//! Every transition bumps a generation counter. Hit-test probes capture the
//! generation when they start; a probe that finishes after a toggle is
//! discarded so it cannot repaint the glyph for a mode that has since ended.

#[cfg(test)]
#[path = "mode_test.rs"]
mod mode_test;

use serde::{Deserialize, Serialize};

/// The exclusive interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The virtual cursor drives clicks.
    #[default]
    Cursor,
    /// Input passes through to native scrolling.
    Scroll,
}

impl Mode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Cursor => Self::Scroll,
            Self::Scroll => Self::Cursor,
        }
    }

    /// Surface and cursor configuration implied by this mode.
    #[must_use]
    pub fn flags(self) -> SurfaceFlags {
        match self {
            Self::Cursor => SurfaceFlags { scroll_enabled: false, content_touch_enabled: false, glyph_visible: true },
            Self::Scroll => SurfaceFlags { scroll_enabled: true, content_touch_enabled: true, glyph_visible: false },
        }
    }
}

/// What a mode switches on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceFlags {
    /// Native scrolling of the content surface.
    pub scroll_enabled: bool,
    /// Direct touch forwarding into the content.
    pub content_touch_enabled: bool,
    /// Whether the cursor glyph is drawn.
    pub glyph_visible: bool,
}

/// Token tying a hit-test probe to the mode generation it started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTicket {
    generation: u64,
}

/// Owner of the current [`Mode`].
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
    generation: u64,
}

impl ModeController {
    /// A controller in `Cursor` mode at generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn is_cursor(&self) -> bool {
        self.mode == Mode::Cursor
    }

    #[must_use]
    pub fn flags(&self) -> SurfaceFlags {
        self.mode.flags()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switch to the other mode and return the flags to apply.
    pub fn toggle(&mut self) -> SurfaceFlags {
        self.mode = self.mode.toggled();
        self.generation = self.generation.wrapping_add(1);
        self.mode.flags()
    }

    /// Start a probe in the current generation.
    #[must_use]
    pub fn ticket(&self) -> ProbeTicket {
        ProbeTicket { generation: self.generation }
    }

    /// Whether a probe result may still be applied: no transition has
    /// happened since it started and the cursor is the active mode.
    #[must_use]
    pub fn accepts(&self, ticket: ProbeTicket) -> bool {
        ticket.generation == self.generation && self.is_cursor()
    }
}
