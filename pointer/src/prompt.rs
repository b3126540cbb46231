//! Presentation requests and the choices they can come back with.
//!
//! The core never builds UI. It issues a [`Prompt`] naming what should be
//! shown, and the presenter later reports at most one [`Choice`] (or a plain
//! dismissal). Menu-style prompts list their available choices through
//! [`Prompt::choices`]; text-entry prompts build theirs from the entered
//! text.

#[cfg(test)]
#[path = "prompt_test.rs"]
mod prompt_test;

use serde::{Deserialize, Serialize};

use crate::viewport::ContentPoint;

/// Keyboard layout hint for a text prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyboard {
    #[default]
    Default,
    Url,
    Email,
    NumbersAndPunctuation,
}

impl Keyboard {
    /// Layout suited to an input element of `field_type`.
    #[must_use]
    pub fn for_field(field_type: &str) -> Self {
        match field_type {
            "url" => Self::Url,
            "email" => Self::Email,
            "tel" | "number" | "date" | "datetime" | "datetime-local" => Self::NumbersAndPunctuation,
            _ => Self::Default,
        }
    }
}

/// Text entry on behalf of a form field in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFieldPrompt {
    /// Content point of the field; the choice writes back here.
    pub target: ContentPoint,
    /// Lower-cased `type` of the field.
    pub field_type: String,
    pub title: String,
    pub placeholder: String,
    pub current_value: String,
    pub keyboard: Keyboard,
    /// Mask the entered text.
    pub secure: bool,
    /// The field's form has a submit handler, so a Submit choice is offered.
    pub offers_submit: bool,
}

impl TextFieldPrompt {
    /// Keep the entered text in the field.
    #[must_use]
    pub fn done(&self, value: impl Into<String>) -> Choice {
        Choice::SetField { at: self.target, value: value.into(), submit: false }
    }

    /// Keep the entered text and submit the form, when offered.
    #[must_use]
    pub fn submit(&self, value: impl Into<String>) -> Option<Choice> {
        self.offers_submit
            .then(|| Choice::SetField { at: self.target, value: value.into(), submit: true })
    }
}

/// An entry of a favorites or history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub label: String,
    pub url: String,
}

/// A named presentation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "prompt", rename_all = "snake_case")]
pub enum Prompt {
    QuickMenu { can_go_forward: bool, has_request: bool },
    AdvancedMenu { top_bar_visible: bool, mobile_mode: bool, scales_page_to_fit: bool },
    UrlInput,
    Favorites { items: Vec<ListItem>, current_url: String, current_title: String },
    DeleteFavorite { items: Vec<ListItem> },
    AddFavorite { url: String, suggested_title: String },
    History { items: Vec<ListItem> },
    TextInput(TextFieldPrompt),
    LoadError { message: String, request_url: Option<String>, can_reload: bool },
    ExitConfirmation,
    UsageGuide { dont_show_on_launch: bool },
}

impl Prompt {
    /// Short name used in log fields.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::QuickMenu { .. } => "quick_menu",
            Self::AdvancedMenu { .. } => "advanced_menu",
            Self::UrlInput => "url_input",
            Self::Favorites { .. } => "favorites",
            Self::DeleteFavorite { .. } => "delete_favorite",
            Self::AddFavorite { .. } => "add_favorite",
            Self::History { .. } => "history",
            Self::TextInput(_) => "text_input",
            Self::LoadError { .. } => "load_error",
            Self::ExitConfirmation => "exit_confirmation",
            Self::UsageGuide { .. } => "usage_guide",
        }
    }

    /// Choices that need no typed input, in presentation order.
    #[must_use]
    pub fn choices(&self) -> Vec<Choice> {
        match self {
            Self::QuickMenu { can_go_forward, has_request } => {
                let mut out = Vec::new();
                if *can_go_forward {
                    out.push(Choice::GoForward);
                }
                out.push(Choice::OpenUrlInput);
                if *has_request {
                    out.push(Choice::Reload);
                }
                out
            }
            Self::AdvancedMenu { .. } => vec![
                Choice::ShowFavorites,
                Choice::ShowHistory,
                Choice::GoHome,
                Choice::SetHomePage,
                Choice::ToggleMobileMode,
                Choice::ToggleTopBar,
                Choice::ToggleScaling,
                Choice::IncreaseTextSize,
                Choice::DecreaseTextSize,
                Choice::ClearCache,
                Choice::ClearCookies,
                Choice::ShowUsageGuide,
            ],
            Self::Favorites { items, .. } => {
                let mut out: Vec<Choice> = (0..items.len()).map(Choice::OpenFavorite).collect();
                if !items.is_empty() {
                    out.push(Choice::PromptDeleteFavorite);
                }
                out.push(Choice::PromptAddFavorite);
                out
            }
            Self::DeleteFavorite { items } => (0..items.len()).map(Choice::DeleteFavorite).collect(),
            Self::History { items } => {
                let mut out = Vec::new();
                if !items.is_empty() {
                    out.push(Choice::ClearHistory);
                }
                out.extend((0..items.len()).map(Choice::OpenHistory));
                out
            }
            Self::LoadError { request_url, can_reload, .. } => {
                let mut out = Vec::new();
                if request_url.as_deref().is_some_and(|u| !u.is_empty()) {
                    out.push(Choice::SearchFailedPage);
                }
                out.push(if *can_reload { Choice::Reload } else { Choice::ShowQuickMenu });
                out
            }
            Self::ExitConfirmation => vec![Choice::Exit],
            Self::UsageGuide { dont_show_on_launch } => vec![Choice::SetHintsOnLaunch(*dont_show_on_launch)],
            Self::UrlInput | Self::AddFavorite { .. } | Self::TextInput(_) => Vec::new(),
        }
    }
}

/// A presenter's answer to a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "choice", content = "with", rename_all = "snake_case")]
pub enum Choice {
    GoBack,
    GoForward,
    Reload,
    GoHome,
    ShowQuickMenu,
    OpenUrlInput,
    GoToUrl(String),
    Search(String),
    ShowFavorites,
    ShowHistory,
    SetHomePage,
    ToggleMobileMode,
    ToggleTopBar,
    ToggleScaling,
    IncreaseTextSize,
    DecreaseTextSize,
    ClearCache,
    ClearCookies,
    ShowUsageGuide,
    OpenFavorite(usize),
    PromptAddFavorite,
    AddFavorite { url: String, title: String },
    PromptDeleteFavorite,
    DeleteFavorite(usize),
    OpenHistory(usize),
    ClearHistory,
    SetField { at: ContentPoint, value: String, submit: bool },
    SearchFailedPage,
    /// Show hints on launch when `true`.
    SetHintsOnLaunch(bool),
    Exit,
}
