//! Browser settings and their store.

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

use std::path::{Path, PathBuf};

use pointer::consts::{TEXT_SCALE_MAX, TEXT_SCALE_MIN};
use serde::{Deserialize, Serialize};

use super::persistence::{load_or, save_logged};

pub const DEFAULT_HOMEPAGE: &str = "https://www.google.com";
pub const DEFAULT_TEXT_SCALE: i32 = 100;
pub const TEXT_SCALE_STEP: i32 = 5;

pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

const FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub homepage: String,
    pub mobile_mode: bool,
    pub scales_pages_to_fit: bool,
    text_font_size: i32,
    pub show_top_bar: bool,
    pub dont_show_hints_on_launch: bool,
    pub saved_url_to_reopen: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            homepage: DEFAULT_HOMEPAGE.to_string(),
            mobile_mode: false,
            scales_pages_to_fit: false,
            text_font_size: DEFAULT_TEXT_SCALE,
            show_top_bar: true,
            dont_show_hints_on_launch: false,
            saved_url_to_reopen: None,
        }
    }
}

impl Settings {
    /// Defaults with a different first-launch homepage.
    #[must_use]
    pub fn with_homepage(homepage: impl Into<String>) -> Self {
        Self { homepage: homepage.into(), ..Self::default() }
    }

    /// Text-size-adjust percentage, always within the accepted range even
    /// if the file on disk says otherwise.
    #[must_use]
    pub fn text_scale(&self) -> i32 {
        self.text_font_size.clamp(TEXT_SCALE_MIN, TEXT_SCALE_MAX)
    }

    pub fn set_text_scale(&mut self, percent: i32) {
        self.text_font_size = percent.clamp(TEXT_SCALE_MIN, TEXT_SCALE_MAX);
    }

    pub fn increase_text_scale(&mut self) {
        self.set_text_scale(self.text_scale() + TEXT_SCALE_STEP);
    }

    pub fn decrease_text_scale(&mut self) {
        self.set_text_scale(self.text_scale() - TEXT_SCALE_STEP);
    }

    #[must_use]
    pub fn user_agent(&self) -> &'static str {
        if self.mobile_mode { MOBILE_USER_AGENT } else { DESKTOP_USER_AGENT }
    }
}

/// Settings backed by `settings.json` in the data directory.
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load settings from `dir`. A fresh or unreadable store starts from
    /// `defaults`.
    pub fn open(dir: &Path, defaults: Settings) -> Self {
        let path = dir.join(FILE_NAME);
        let settings = load_or(&path, defaults);
        Self { path, settings }
    }

    #[must_use]
    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Mutate the settings and persist the result.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Settings) -> R) -> R {
        let out = f(&mut self.settings);
        save_logged(&self.path, &self.settings);
        out
    }
}
