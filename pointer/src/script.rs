//! Typed scripts evaluated against the content surface.
//!
//! Every query or command the core sends to the page is a [`Script`] value.
//! Its `Display` impl renders the JavaScript source, so surface
//! implementations only forward text to their engine and never splice
//! coordinates or user strings themselves. String operands are emitted as
//! JSON string literals, which are valid JavaScript literals with every
//! quote and control character escaped.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::fmt;

use crate::viewport::ContentPoint;

/// A script the bridge can evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script<'a> {
    /// The `type` property of the element at the point.
    ElementType(ContentPoint),
    /// A named property of the element at the point, stringified.
    ElementProperty { name: &'a str, at: ContentPoint },
    /// Whether the element or an ancestor is a link or input.
    IsClickable(ContentPoint),
    /// Whether the element's form declares an `onsubmit` handler.
    HasFormSubmit(ContentPoint),
    /// Dispatch a click on the element at the point.
    Click(ContentPoint),
    /// Assign a field value and optionally submit its form.
    SetValue { at: ContentPoint, value: &'a str, submit: bool },
    /// `document.title`.
    DocumentTitle,
    /// `window.innerWidth`.
    ViewportWidth,
    /// Apply a text-size-adjust percentage to the body.
    TextScale(i32),
}

impl Script<'_> {
    /// Short name used in log fields.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ElementType(_) => "element_type",
            Self::ElementProperty { .. } => "element_property",
            Self::IsClickable(_) => "is_clickable",
            Self::HasFormSubmit(_) => "has_form_submit",
            Self::Click(_) => "click",
            Self::SetValue { .. } => "set_value",
            Self::DocumentTitle => "document_title",
            Self::ViewportWidth => "viewport_width",
            Self::TextScale(_) => "text_scale",
        }
    }

    /// The JavaScript source for this script.
    #[must_use]
    pub fn source(&self) -> String {
        self.to_string()
    }
}

/// Quote `raw` as a JavaScript string literal.
#[must_use]
pub fn string_literal(raw: &str) -> String {
    serde_json::Value::from(raw).to_string()
}

/// Wrap `body` in an IIFE with `el` bound to the element at `at`.
fn at_element(f: &mut fmt::Formatter<'_>, at: ContentPoint, body: &str) -> fmt::Result {
    write!(f, "(function(){{var el=document.elementFromPoint({}, {});{body}}})()", at.x, at.y)
}

impl fmt::Display for Script<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ElementType(at) => {
                at_element(f, at, "return el && typeof el.type === 'string' ? el.type : null;")
            }
            Self::ElementProperty { name, at } => {
                let body = format!(
                    "if(!el){{return null;}}var v=el[{}];return v === undefined || v === null ? null : String(v);",
                    string_literal(name)
                );
                at_element(f, at, &body)
            }
            Self::IsClickable(at) => at_element(f, at, "return el ? String(el.closest('a, input') !== null) : null;"),
            Self::HasFormSubmit(at) => {
                at_element(f, at, "return el && el.form ? String(el.form.hasAttribute('onsubmit')) : null;")
            }
            Self::Click(at) => at_element(f, at, "if(el){el.click();}return null;"),
            Self::SetValue { at, value, submit } => {
                let submit = if submit { "if(el.form){el.form.submit();}" } else { "" };
                let body = format!("if(!el){{return null;}}el.value={};{submit}return null;", string_literal(value));
                at_element(f, at, &body)
            }
            Self::DocumentTitle => f.write_str("document.title"),
            Self::ViewportWidth => f.write_str("String(window.innerWidth)"),
            Self::TextScale(percent) => write!(
                f,
                "(function(){{var body=document.getElementsByTagName('body')[0];if(body){{body.style.webkitTextSizeAdjust='{percent}%';}}return null;}})()"
            ),
        }
    }
}
