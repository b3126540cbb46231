use super::*;

// =============================================================================
// Helpers
// =============================================================================

const SCENARIO: &str = r#"{
    "pages": {
        "https://home.example/": {
            "title": "Home",
            "content_width": 960,
            "elements": [
                { "rect": [400, 150, 600, 250], "type": "email", "title": "Sign in", "clickable": true }
            ]
        },
        "https://docs.example/": { "title": "Docs" }
    },
    "steps": [
        { "step": "launch" },
        { "step": "dismiss" },
        { "step": "input", "event": { "kind": "press", "button": "select" } },
        { "step": "choose", "choice": { "choice": "set_field", "with": { "at": { "x": 480, "y": 200 }, "value": "me@example.com", "submit": false } } },
        { "step": "choose", "choice": { "choice": "go_to_url", "with": "docs.example" } },
        { "step": "dismiss" },
        { "step": "input", "event": { "kind": "double_tap", "target": "touch_surface" } }
    ]
}"#;

fn config(dir: &Path) -> ShellConfig {
    ShellConfig { data_dir: dir.to_path_buf(), homepage: "https://home.example/".into(), ..ShellConfig::default() }
}

fn scenario(steps: Vec<Step>) -> Scenario {
    let mut parsed: Scenario = serde_json::from_str(SCENARIO).unwrap();
    parsed.steps = steps;
    parsed
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn scenario_json_parses() {
    let parsed: Scenario = serde_json::from_str(SCENARIO).unwrap();
    assert_eq!(parsed.pages.len(), 2);
    assert_eq!(parsed.pages["https://docs.example/"].content_width, 980);
    assert_eq!(parsed.pages["https://home.example/"].elements[0].kind, "email");
    assert_eq!(parsed.steps[0], Step::Launch);
    assert_eq!(parsed.steps[4], Step::Choose { choice: Choice::GoToUrl("docs.example".into()) });
}

#[test]
fn load_scenario_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_scenario(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ReplayError::Io { .. }));
}

#[test]
fn load_scenario_reports_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"steps": [{"step": "jump"}]}"#).unwrap();
    assert!(matches!(load_scenario(&path).unwrap_err(), ReplayError::Json(_)));
}

// =============================================================================
// Runner
// =============================================================================

#[test]
fn run_replays_every_step() {
    let dir = tempfile::tempdir().unwrap();
    let scenario: Scenario = serde_json::from_str(SCENARIO).unwrap();
    let report = run(&config(dir.path()), scenario);

    assert_eq!(report.url.as_deref(), Some("http://docs.example"));
    assert_eq!(report.mode, Mode::Scroll);
    assert_eq!(report.glyph, Glyph::Default);
    assert!(!report.terminated);
    assert_eq!(report.text_scale, 100);
    assert_eq!(report.history, ["https://home.example/"]);
    assert_eq!(
        report.transcript,
        [
            "present usage_guide [set_hints_on_launch]",
            "present text_input []",
            "present load_error [search_failed_page, reload]",
            "mode scroll",
        ]
    );
}

#[test]
fn text_prompt_carries_field_details() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_for(&config(dir.path()), &scenario(Vec::new()));
    apply_step(&mut shell, Step::Launch);
    apply_step(&mut shell, Step::Dismiss);
    apply_step(&mut shell, Step::Input { event: InputEvent::Press { button: pointer::input::RemotePress::Select } });

    let Some(Prompt::TextInput(prompt)) = shell.presenter().last_prompt() else {
        panic!("expected a text prompt");
    };
    assert_eq!(prompt.title, "Sign in");
    assert_eq!(prompt.placeholder, "Text Input");
    assert!(!prompt.secure);
}

#[test]
fn written_value_lands_in_the_page() {
    let dir = tempfile::tempdir().unwrap();
    let mut shell = shell_for(&config(dir.path()), &scenario(Vec::new()));
    apply_step(&mut shell, Step::Launch);
    let at = ContentPoint::new(480, 200);
    apply_step(&mut shell, Step::Choose { choice: Choice::SetField { at, value: "a@b.c".into(), submit: false } });

    let surface = shell.engine().surface().unwrap();
    assert_eq!(surface.field_value(at), Some("a@b.c"));
    assert!(surface.submissions().is_empty());
}

#[test]
fn forced_failure_presents_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let steps = vec![
        Step::Launch,
        Step::Dismiss,
        Step::FailLoad { code: -1009, message: "The Internet connection appears to be offline.".into() },
    ];
    let report = run(&config(dir.path()), scenario(steps));

    assert!(report.modal_presented);
    assert_eq!(report.transcript.last().map(String::as_str), Some("present load_error [search_failed_page, reload]"));
}

#[test]
fn exit_skips_remaining_steps() {
    let dir = tempfile::tempdir().unwrap();
    let steps = vec![
        Step::Launch,
        Step::Dismiss,
        Step::Input { event: InputEvent::Press { button: pointer::input::RemotePress::Menu } },
        Step::Choose { choice: Choice::Exit },
        Step::Choose { choice: Choice::GoToUrl("docs.example".into()) },
    ];
    let report = run(&config(dir.path()), scenario(steps));

    assert!(report.terminated);
    assert_eq!(report.url.as_deref(), Some("https://home.example/"));
    assert_eq!(report.transcript.last().map(String::as_str), Some("terminate"));
}

#[test]
fn screen_override_changes_cursor_start() {
    let dir = tempfile::tempdir().unwrap();
    let mut parsed = scenario(Vec::new());
    parsed.screen = Some(ScreenSize::new(1280.0, 720.0));
    let report = run(&config(dir.path()), parsed);
    assert_eq!(report.cursor, Point::new(640.0, 360.0));
}

#[test]
fn factory_surfaces_share_pages_but_not_history() {
    let parsed = scenario(Vec::new());
    let mut factory = ReplayFactory::new(parsed.pages, 1920.0);
    let mut first = factory.create("ua-1", false).unwrap();
    first.load("https://home.example/");
    let second = factory.create("ua-2", true).unwrap();

    assert!(first.has_request());
    assert!(!second.has_request());
    assert!(second.has_page("https://home.example/"));
    assert!(second.scales_page_to_fit());
    assert_eq!(factory.created(), ["ua-1", "ua-2"]);
}

#[test]
fn failing_factory_creates_nothing() {
    let mut factory = ReplayFactory::new(BTreeMap::new(), 1920.0).failing();
    assert!(factory.create("ua", false).is_none());
    assert!(factory.created().is_empty());
}

#[test]
fn surface_without_document_rejects_scripts() {
    let mut surface = ReplaySurface::new(BTreeMap::new(), "ua", 1920.0, false);
    assert_eq!(surface.evaluate(&Script::DocumentTitle), Err(ScriptError::Unavailable));

    surface.load("https://missing.example/");
    assert!(matches!(surface.evaluate(&Script::DocumentTitle), Err(ScriptError::Evaluation(_))));
}
