//! Shared numeric constants for the pointer crate.

// ── Screen ──────────────────────────────────────────────────────

/// Default screen width in points.
pub const SCREEN_WIDTH: f64 = 1920.0;

/// Default screen height in points.
pub const SCREEN_HEIGHT: f64 = 1080.0;

// ── Overlay hit-testing ─────────────────────────────────────────

/// Vertical slop added above and below the back button.
pub const BACK_INFLATE_Y: f64 = 8.0;

/// Slop added on every side of the menu button.
pub const MENU_INFLATE: f64 = 100.0;

// ── Text scale ──────────────────────────────────────────────────

/// Smallest accepted text-size-adjust percentage.
pub const TEXT_SCALE_MIN: i32 = 50;

/// Largest accepted text-size-adjust percentage.
pub const TEXT_SCALE_MAX: i32 = 200;

// ── Form fields ─────────────────────────────────────────────────

/// Element `type` values that open a text-input prompt when clicked.
pub const FORM_FIELD_TYPES: [&str; 13] = [
    "date",
    "datetime",
    "datetime-local",
    "email",
    "month",
    "number",
    "password",
    "search",
    "tel",
    "text",
    "time",
    "url",
    "week",
];

/// Placeholder shown when a field declares none.
pub const DEFAULT_FIELD_PLACEHOLDER: &str = "Text Input";
