//! Shell configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;

use pointer::hit::OverlayLayout;
use pointer::viewport::ScreenSize;

use crate::services::search::DEFAULT_SEARCH_URL;
use crate::services::settings::DEFAULT_HOMEPAGE;

pub const DEFAULT_DATA_DIR: &str = "./aerotv-data";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid AEROTV_SCREEN '{0}' (expected WIDTHxHEIGHT with positive sizes)")]
    InvalidScreen(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub data_dir: PathBuf,
    pub screen: ScreenSize,
    /// Homepage for a first launch; saved settings take precedence.
    pub homepage: String,
    pub search_url: String,
    /// Top bar geometry. Not read from the environment.
    pub layout: OverlayLayout,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            screen: ScreenSize::default(),
            homepage: DEFAULT_HOMEPAGE.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            layout: OverlayLayout::default(),
        }
    }
}

impl ShellConfig {
    /// Build typed shell config from environment variables.
    ///
    /// Optional:
    /// - `AEROTV_DATA_DIR`: default `./aerotv-data`
    /// - `AEROTV_SCREEN`: `WIDTHxHEIGHT`, default `1920x1080`
    /// - `AEROTV_HOMEPAGE`: default `https://www.google.com`
    /// - `AEROTV_SEARCH_URL`: query is appended, default Google search
    ///
    /// # Errors
    ///
    /// Returns an error if `AEROTV_SCREEN` is set but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let data_dir = std::env::var("AEROTV_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let screen = match std::env::var("AEROTV_SCREEN") {
            Ok(raw) => parse_screen(&raw)?,
            Err(_) => defaults.screen,
        };
        let homepage = env_non_empty("AEROTV_HOMEPAGE").unwrap_or(defaults.homepage);
        let search_url = env_non_empty("AEROTV_SEARCH_URL").unwrap_or(defaults.search_url);

        Ok(Self { data_dir, screen, homepage, search_url, layout: defaults.layout })
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `WIDTHxHEIGHT`, e.g. `1920x1080`.
///
/// # Errors
///
/// Returns an error unless both sides are positive finite numbers.
pub fn parse_screen(raw: &str) -> Result<ScreenSize, ConfigError> {
    let invalid = || ConfigError::InvalidScreen(raw.to_string());
    let (w, h) = raw.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: f64 = w.trim().parse().map_err(|_| invalid())?;
    let height: f64 = h.trim().parse().map_err(|_| invalid())?;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(invalid());
    }
    Ok(ScreenSize::new(width, height))
}
