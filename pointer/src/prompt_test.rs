use super::*;

fn field(offers_submit: bool) -> TextFieldPrompt {
    TextFieldPrompt {
        target: ContentPoint { x: 12, y: 34 },
        field_type: "text".into(),
        title: "text".into(),
        placeholder: "Text Input".into(),
        current_value: String::new(),
        keyboard: Keyboard::Default,
        secure: false,
        offers_submit,
    }
}

fn items(n: usize) -> Vec<ListItem> {
    (0..n).map(|i| ListItem { label: format!("item {i}"), url: format!("https://example.com/{i}") }).collect()
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn keyboard_for_url_and_email() {
    assert_eq!(Keyboard::for_field("url"), Keyboard::Url);
    assert_eq!(Keyboard::for_field("email"), Keyboard::Email);
}

#[test]
fn keyboard_for_numeric_types() {
    for t in ["tel", "number", "date", "datetime", "datetime-local"] {
        assert_eq!(Keyboard::for_field(t), Keyboard::NumbersAndPunctuation, "{t}");
    }
}

#[test]
fn keyboard_defaults_for_everything_else() {
    for t in ["text", "password", "search", "month", "week", "time", ""] {
        assert_eq!(Keyboard::for_field(t), Keyboard::Default, "{t}");
    }
}

// =============================================================
// TextFieldPrompt
// =============================================================

#[test]
fn done_writes_without_submit() {
    let choice = field(true).done("hello");
    assert_eq!(choice, Choice::SetField { at: ContentPoint { x: 12, y: 34 }, value: "hello".into(), submit: false });
}

#[test]
fn submit_only_when_offered() {
    assert_eq!(field(false).submit("x"), None);
    assert_eq!(
        field(true).submit("x"),
        Some(Choice::SetField { at: ContentPoint { x: 12, y: 34 }, value: "x".into(), submit: true })
    );
}

// =============================================================
// Prompt::choices
// =============================================================

#[test]
fn quick_menu_hides_forward_and_reload_when_unavailable() {
    let p = Prompt::QuickMenu { can_go_forward: false, has_request: false };
    assert_eq!(p.choices(), vec![Choice::OpenUrlInput]);
}

#[test]
fn quick_menu_full() {
    let p = Prompt::QuickMenu { can_go_forward: true, has_request: true };
    assert_eq!(p.choices(), vec![Choice::GoForward, Choice::OpenUrlInput, Choice::Reload]);
}

#[test]
fn advanced_menu_lists_settings_actions() {
    let p = Prompt::AdvancedMenu { top_bar_visible: true, mobile_mode: false, scales_page_to_fit: true };
    let choices = p.choices();
    assert!(choices.contains(&Choice::ToggleMobileMode));
    assert!(choices.contains(&Choice::ClearCookies));
    assert!(choices.contains(&Choice::ShowUsageGuide));
    assert!(!choices.contains(&Choice::Exit));
}

#[test]
fn favorites_offer_delete_only_when_non_empty() {
    let empty = Prompt::Favorites { items: vec![], current_url: String::new(), current_title: String::new() };
    assert_eq!(empty.choices(), vec![Choice::PromptAddFavorite]);

    let two = Prompt::Favorites { items: items(2), current_url: String::new(), current_title: String::new() };
    assert_eq!(
        two.choices(),
        vec![Choice::OpenFavorite(0), Choice::OpenFavorite(1), Choice::PromptDeleteFavorite, Choice::PromptAddFavorite]
    );
}

#[test]
fn delete_favorite_indexes_every_item() {
    let p = Prompt::DeleteFavorite { items: items(3) };
    assert_eq!(p.choices(), vec![Choice::DeleteFavorite(0), Choice::DeleteFavorite(1), Choice::DeleteFavorite(2)]);
}

#[test]
fn history_clear_comes_first() {
    let p = Prompt::History { items: items(1) };
    assert_eq!(p.choices(), vec![Choice::ClearHistory, Choice::OpenHistory(0)]);
    assert!(Prompt::History { items: vec![] }.choices().is_empty());
}

#[test]
fn load_error_with_request_offers_search_and_reload() {
    let p = Prompt::LoadError {
        message: "offline".into(),
        request_url: Some("https://example.com/".into()),
        can_reload: true,
    };
    assert_eq!(p.choices(), vec![Choice::SearchFailedPage, Choice::Reload]);
}

#[test]
fn load_error_without_request_offers_url_entry() {
    let p = Prompt::LoadError { message: "bad".into(), request_url: None, can_reload: false };
    assert_eq!(p.choices(), vec![Choice::ShowQuickMenu]);
}

#[test]
fn exit_confirmation_offers_exit() {
    assert_eq!(Prompt::ExitConfirmation.choices(), vec![Choice::Exit]);
}

#[test]
fn text_entry_prompts_have_no_fixed_choices() {
    assert!(Prompt::UrlInput.choices().is_empty());
    assert!(Prompt::TextInput(field(true)).choices().is_empty());
}

// =============================================================
// Serde
// =============================================================

#[test]
fn choice_parses_adjacently_tagged() {
    let c: Choice = serde_json::from_str(r#"{"choice":"go_to_url","with":"example.com"}"#).unwrap();
    assert_eq!(c, Choice::GoToUrl("example.com".into()));
    let c: Choice = serde_json::from_str(r#"{"choice":"exit"}"#).unwrap();
    assert_eq!(c, Choice::Exit);
}

#[test]
fn prompt_name_matches_tag() {
    let p = Prompt::QuickMenu { can_go_forward: false, has_request: true };
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["prompt"], p.name());
}
