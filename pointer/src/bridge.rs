//! The content surface capability and the synchronous scripted bridge.
//!
//! DESIGN
//! ======
//! [`ContentSurface`] is everything the core needs from the embedded web
//! renderer: navigation, geometry, scroll/touch switches and script
//! evaluation. [`ContentBridge`] layers the point-based queries on top and
//! owns the error policy: a failed, mistyped or element-less evaluation
//! becomes the operation's absent value and is only logged.
//!
//! BLOCKING
//! ========
//! Evaluation is synchronous with no timeout and no cancellation. A slow or
//! hung script stalls the whole input pipeline, because every touch and
//! button event is processed on the same thread in arrival order.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use std::borrow::Cow;

use serde_json::Value;
use tracing::debug;

use crate::script::Script;
use crate::viewport::ContentPoint;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("content surface unavailable")]
    Unavailable,
    #[error("script evaluation failed: {0}")]
    Evaluation(String),
}

// =============================================================================
// SURFACE CAPABILITY
// =============================================================================

/// The embedded content renderer, addressed only through this interface.
pub trait ContentSurface {
    /// Start loading `url`. The caller has already inserted a scheme.
    fn load(&mut self, url: &str);
    fn reload(&mut self);
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;

    /// URL of the current request, if any page has been requested.
    fn current_url(&self) -> Option<String>;

    /// On-screen width of the surface in points.
    fn frame_width(&self) -> f64;

    /// Evaluate a script and return its raw result. Blocks until done.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects or fails to run the script.
    fn evaluate(&mut self, script: &Script<'_>) -> Result<Value, ScriptError>;

    fn set_scroll_enabled(&mut self, enabled: bool);
    fn set_touch_forwarding(&mut self, enabled: bool);
    fn scales_page_to_fit(&self) -> bool;
    fn set_scales_page_to_fit(&mut self, enabled: bool);

    fn has_request(&self) -> bool {
        self.current_url().is_some()
    }
}

/// Prefix `http://` when `input` names no scheme.
#[must_use]
pub fn with_default_scheme(input: &str) -> Cow<'_, str> {
    if input.contains("://") {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("http://{input}"))
    }
}

// =============================================================================
// BRIDGE
// =============================================================================

/// Point-based queries and commands against a [`ContentSurface`].
pub struct ContentBridge<'s, S: ContentSurface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: ContentSurface + ?Sized> ContentBridge<'s, S> {
    pub fn new(surface: &'s mut S) -> Self {
        Self { surface }
    }

    fn eval(&mut self, script: &Script<'_>) -> Option<Value> {
        match self.surface.evaluate(script) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(error = %e, script = script.name(), "script evaluation failed");
                None
            }
        }
    }

    fn eval_string(&mut self, script: &Script<'_>) -> Option<String> {
        match self.eval(script)? {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => {
                debug!(script = script.name(), result = %other, "non-string script result");
                None
            }
        }
    }

    fn eval_flag(&mut self, script: &Script<'_>) -> bool {
        self.eval_string(script).is_some_and(|s| s == "true")
    }

    /// Lower-cased `type` of the element at `at`.
    pub fn hit_test_type(&mut self, at: ContentPoint) -> Option<String> {
        self.eval_string(&Script::ElementType(at)).map(|t| t.to_lowercase())
    }

    /// A property of the element at `at`, stringified.
    pub fn attribute(&mut self, name: &str, at: ContentPoint) -> Option<String> {
        self.eval_string(&Script::ElementProperty { name, at })
    }

    pub fn is_clickable(&mut self, at: ContentPoint) -> bool {
        self.eval_flag(&Script::IsClickable(at))
    }

    pub fn has_form_submit(&mut self, at: ContentPoint) -> bool {
        self.eval_flag(&Script::HasFormSubmit(at))
    }

    pub fn click(&mut self, at: ContentPoint) {
        self.eval(&Script::Click(at));
    }

    /// Assign `value` to the field at `at`, submitting its form if asked.
    pub fn set_value(&mut self, at: ContentPoint, value: &str, submit: bool) {
        self.eval(&Script::SetValue { at, value, submit });
    }

    pub fn document_title(&mut self) -> String {
        self.eval_string(&Script::DocumentTitle).unwrap_or_default()
    }

    /// Logical page width, or 0 when it cannot be read.
    pub fn viewport_width(&mut self) -> i64 {
        match self.eval(&Script::ViewportWidth) {
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            #[allow(clippy::cast_possible_truncation)]
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
            _ => 0,
        }
    }

    /// Apply a text-size-adjust percentage, already clamped by settings.
    pub fn set_text_scale(&mut self, percent: i32) {
        self.eval(&Script::TextScale(percent));
    }
}
