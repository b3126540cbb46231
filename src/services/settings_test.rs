use super::*;

use std::fs;

// =============================================================================
// Settings
// =============================================================================

#[test]
fn defaults_match_first_launch() {
    let s = Settings::default();
    assert_eq!(s.homepage, "https://www.google.com");
    assert!(!s.mobile_mode);
    assert!(!s.scales_pages_to_fit);
    assert_eq!(s.text_scale(), 100);
    assert!(s.show_top_bar);
    assert!(!s.dont_show_hints_on_launch);
    assert_eq!(s.saved_url_to_reopen, None);
}

#[test]
fn text_scale_steps_by_five() {
    let mut s = Settings::default();
    s.increase_text_scale();
    assert_eq!(s.text_scale(), 105);
    s.decrease_text_scale();
    s.decrease_text_scale();
    assert_eq!(s.text_scale(), 95);
}

#[test]
fn text_scale_is_clamped() {
    let mut s = Settings::default();
    s.set_text_scale(500);
    assert_eq!(s.text_scale(), 200);
    s.increase_text_scale();
    assert_eq!(s.text_scale(), 200);
    s.set_text_scale(-3);
    assert_eq!(s.text_scale(), 50);
    s.decrease_text_scale();
    assert_eq!(s.text_scale(), 50);
}

#[test]
fn out_of_range_file_value_reads_clamped() {
    let s: Settings = serde_json::from_str(r#"{"text_font_size": 10}"#).unwrap();
    assert_eq!(s.text_scale(), 50);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let s: Settings = serde_json::from_str(r#"{"mobile_mode": true}"#).unwrap();
    assert!(s.mobile_mode);
    assert_eq!(s.homepage, DEFAULT_HOMEPAGE);
    assert!(s.show_top_bar);
}

#[test]
fn user_agent_follows_mobile_mode() {
    let mut s = Settings::default();
    assert_eq!(s.user_agent(), DESKTOP_USER_AGENT);
    s.mobile_mode = true;
    assert_eq!(s.user_agent(), MOBILE_USER_AGENT);
}

// =============================================================================
// SettingsStore
// =============================================================================

#[test]
fn fresh_store_uses_given_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let defaults = Settings { homepage: "https://start.example/".into(), ..Settings::default() };
    let store = SettingsStore::open(dir.path(), defaults);
    assert_eq!(store.get().homepage, "https://start.example/");
}

#[test]
fn update_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = SettingsStore::open(dir.path(), Settings::default());
    store.update(|s| {
        s.mobile_mode = true;
        s.increase_text_scale();
    });

    let reopened = SettingsStore::open(dir.path(), Settings::default());
    assert!(reopened.get().mobile_mode);
    assert_eq!(reopened.get().text_scale(), 105);
}

#[test]
fn update_returns_closure_result() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = SettingsStore::open(dir.path(), Settings::default());
    let taken = store.update(|s| {
        s.saved_url_to_reopen = Some("https://a.example/".into());
        s.saved_url_to_reopen.take()
    });
    assert_eq!(taken.as_deref(), Some("https://a.example/"));
    assert_eq!(store.get().saved_url_to_reopen, None);
}

#[test]
fn corrupt_file_reads_as_configured_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("settings.json"), "garbage").unwrap();
    let store = SettingsStore::open(dir.path(), Settings::with_homepage("https://start.example/"));
    assert_eq!(store.get().homepage, "https://start.example/");
    assert_eq!(store.get(), &Settings::with_homepage("https://start.example/"));
}
