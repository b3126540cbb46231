//! Scenario replay: drives the shell against a simulated content surface.
//!
//! DESIGN
//! ======
//! A scenario is a JSON file with a set of pages and a list of steps. Pages
//! are keyed by the exact URL the engine loads and hold rectangles in
//! content pixels that answer the bridge scripts the way a real page would.
//! Steps are raw input events, presenter choices, dismissals and forced
//! load failures. After every step a pending navigation is settled: known
//! URLs finish loading, unknown ones fail as an unresolvable host.
//!
//! The run ends with a [`Report`] of the final engine and store state plus
//! a transcript of everything the presenter was asked to do.

#[cfg(test)]
#[path = "replay_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pointer::bridge::{ContentSurface, ScriptError};
use pointer::cursor::Glyph;
use pointer::engine::Action;
use pointer::hit::OverlayLayout;
use pointer::input::InputEvent;
use pointer::mode::Mode;
use pointer::prompt::{Choice, Prompt};
use pointer::script::Script;
use pointer::viewport::{ContentPoint, Point, ScreenSize};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::ShellConfig;
use crate::shell::{Presenter, Shell, SurfaceFactory};

/// Error code reported for a URL the scenario has no page for.
pub const HOST_NOT_FOUND: i64 = -1003;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("cannot read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// SCENARIO
// =============================================================================

/// An element on a simulated page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageElement {
    /// `[left, top, right, bottom]` in content pixels, right and bottom exclusive.
    pub rect: [i64; 4],
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub placeholder: String,
    pub value: String,
    pub clickable: bool,
    pub has_submit: bool,
    /// Clicking navigates here.
    pub href: Option<String>,
}

impl PageElement {
    fn contains(&self, at: ContentPoint) -> bool {
        let [left, top, right, bottom] = self.rect;
        at.x >= left && at.x < right && at.y >= top && at.y < bottom
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub title: String,
    /// Logical width the page reports; 0 means it never reports one.
    pub content_width: i64,
    pub elements: Vec<PageElement>,
}

impl Default for Page {
    fn default() -> Self {
        Self { title: String::new(), content_width: 980, elements: Vec::new() }
    }
}

impl Page {
    fn element(&self, at: ContentPoint) -> Option<&PageElement> {
        self.elements.iter().find(|e| e.contains(at))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Launch,
    Input { event: InputEvent },
    Choose { choice: Choice },
    Dismiss,
    FailLoad { code: i64, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub screen: Option<ScreenSize>,
    #[serde(default)]
    pub layout: Option<OverlayLayout>,
    #[serde(default)]
    pub pages: BTreeMap<String, Page>,
    pub steps: Vec<Step>,
}

/// Read and parse a scenario file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid scenario.
pub fn load_scenario(path: &Path) -> Result<Scenario, ReplayError> {
    let raw = fs::read_to_string(path).map_err(|source| ReplayError::Io { path: path.to_path_buf(), source })?;
    Ok(serde_json::from_str(&raw)?)
}

// =============================================================================
// SIMULATED SURFACE
// =============================================================================

pub struct ReplaySurface {
    pages: BTreeMap<String, Page>,
    user_agent: String,
    frame_width: f64,
    current: Option<String>,
    back: Vec<String>,
    forward: Vec<String>,
    pending: Option<String>,
    follow: Option<String>,
    scroll_enabled: bool,
    touch_forwarding: bool,
    scales_page_to_fit: bool,
    text_scale: Option<i32>,
    submissions: Vec<String>,
}

impl ReplaySurface {
    #[must_use]
    pub fn new(pages: BTreeMap<String, Page>, user_agent: &str, frame_width: f64, scales_page_to_fit: bool) -> Self {
        Self {
            pages,
            user_agent: user_agent.to_string(),
            frame_width,
            current: None,
            back: Vec::new(),
            forward: Vec::new(),
            pending: None,
            follow: None,
            scroll_enabled: false,
            touch_forwarding: false,
            scales_page_to_fit,
            text_scale: None,
            submissions: Vec::new(),
        }
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[must_use]
    pub fn has_page(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    #[must_use]
    pub fn text_scale(&self) -> Option<i32> {
        self.text_scale
    }

    #[must_use]
    pub fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    #[must_use]
    pub fn touch_forwarding(&self) -> bool {
        self.touch_forwarding
    }

    /// Values of fields whose forms were submitted, in order.
    #[must_use]
    pub fn submissions(&self) -> &[String] {
        &self.submissions
    }

    /// Value currently held by the element at `at` on the current page.
    #[must_use]
    pub fn field_value(&self, at: ContentPoint) -> Option<&str> {
        self.page().and_then(|p| p.element(at)).map(|e| e.value.as_str())
    }

    /// The navigation started since the last call, if any. A followed
    /// link navigates here, after the click has been fully handled.
    pub fn take_pending(&mut self) -> Option<String> {
        if let Some(href) = self.follow.take() {
            self.navigate(&href);
        }
        self.pending.take()
    }

    fn page(&self) -> Option<&Page> {
        self.current.as_ref().and_then(|url| self.pages.get(url))
    }

    fn navigate(&mut self, url: &str) {
        if let Some(previous) = self.current.replace(url.to_string()) {
            self.back.push(previous);
        }
        self.forward.clear();
        self.pending = Some(url.to_string());
    }

    fn element_answer(&self, at: ContentPoint, f: impl FnOnce(&PageElement) -> Value) -> Value {
        self.page().and_then(|p| p.element(at)).map_or(Value::Null, f)
    }
}

fn flag(b: bool) -> Value {
    Value::String(b.to_string())
}

impl ContentSurface for ReplaySurface {
    fn load(&mut self, url: &str) {
        self.navigate(url);
    }

    fn reload(&mut self) {
        self.pending.clone_from(&self.current);
    }

    fn go_back(&mut self) {
        if let Some(previous) = self.back.pop() {
            if let Some(current) = self.current.replace(previous.clone()) {
                self.forward.push(current);
            }
            self.pending = Some(previous);
        }
    }

    fn go_forward(&mut self) {
        if let Some(next) = self.forward.pop() {
            if let Some(current) = self.current.replace(next.clone()) {
                self.back.push(current);
            }
            self.pending = Some(next);
        }
    }

    fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    fn current_url(&self) -> Option<String> {
        self.current.clone()
    }

    fn frame_width(&self) -> f64 {
        self.frame_width
    }

    fn evaluate(&mut self, script: &Script<'_>) -> Result<Value, ScriptError> {
        debug!(script = script.name(), source = %script.source(), "evaluate");
        if self.current.is_none() {
            return Err(ScriptError::Unavailable);
        }
        let Some(page) = self.page() else {
            return Err(ScriptError::Evaluation("document failed to load".into()));
        };

        let answer = match *script {
            Script::ElementType(at) => self.element_answer(at, |e| Value::String(e.kind.clone())),
            Script::ElementProperty { name, at } => self.element_answer(at, |e| match name {
                "title" => Value::String(e.title.clone()),
                "placeholder" => Value::String(e.placeholder.clone()),
                "value" => Value::String(e.value.clone()),
                _ => Value::Null,
            }),
            Script::IsClickable(at) => flag(page.element(at).is_some_and(|e| e.clickable)),
            Script::HasFormSubmit(at) => flag(page.element(at).is_some_and(|e| e.has_submit)),
            Script::DocumentTitle => Value::String(page.title.clone()),
            Script::ViewportWidth => Value::String(page.content_width.to_string()),
            Script::Click(at) => {
                let href = page.element(at).and_then(|e| e.href.clone());
                if let Some(href) = href {
                    info!(%href, "link followed");
                    self.follow = Some(href);
                }
                Value::Null
            }
            Script::SetValue { at, value, submit } => {
                let url = self.current.clone().unwrap_or_default();
                let element = self.pages.get_mut(&url).and_then(|p| p.elements.iter_mut().find(|e| e.contains(at)));
                if let Some(element) = element {
                    element.value = value.to_string();
                    if submit {
                        self.submissions.push(value.to_string());
                    }
                }
                Value::Null
            }
            Script::TextScale(percent) => {
                self.text_scale = Some(percent);
                Value::Null
            }
        };
        Ok(answer)
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    fn set_touch_forwarding(&mut self, enabled: bool) {
        self.touch_forwarding = enabled;
    }

    fn scales_page_to_fit(&self) -> bool {
        self.scales_page_to_fit
    }

    fn set_scales_page_to_fit(&mut self, enabled: bool) {
        self.scales_page_to_fit = enabled;
    }
}

/// Hands out [`ReplaySurface`]s over the scenario's pages.
pub struct ReplayFactory {
    pages: BTreeMap<String, Page>,
    frame_width: f64,
    created: Vec<String>,
    cookies_cleared: usize,
    cache_cleared: usize,
    fail_creation: bool,
}

impl ReplayFactory {
    #[must_use]
    pub fn new(pages: BTreeMap<String, Page>, frame_width: f64) -> Self {
        Self { pages, frame_width, created: Vec::new(), cookies_cleared: 0, cache_cleared: 0, fail_creation: false }
    }

    /// Make every later [`SurfaceFactory::create`] call fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail_creation = true;
        self
    }

    /// User agents of every surface created so far.
    #[must_use]
    pub fn created(&self) -> &[String] {
        &self.created
    }

    #[must_use]
    pub fn cookies_cleared(&self) -> usize {
        self.cookies_cleared
    }

    #[must_use]
    pub fn cache_cleared(&self) -> usize {
        self.cache_cleared
    }
}

impl SurfaceFactory for ReplayFactory {
    type Surface = ReplaySurface;

    fn create(&mut self, user_agent: &str, scales_page_to_fit: bool) -> Option<ReplaySurface> {
        if self.fail_creation {
            return None;
        }
        self.created.push(user_agent.to_string());
        Some(ReplaySurface::new(self.pages.clone(), user_agent, self.frame_width, scales_page_to_fit))
    }

    fn clear_cookies(&mut self) {
        self.cookies_cleared += 1;
    }

    fn clear_cache(&mut self) {
        self.cache_cleared += 1;
    }
}

// =============================================================================
// TRANSCRIPT PRESENTER
// =============================================================================

/// Presenter that records what it was asked to show.
#[derive(Debug, Default)]
pub struct Transcript {
    pub lines: Vec<String>,
    pub prompts: Vec<Prompt>,
    pub terminated: bool,
}

impl Transcript {
    /// The most recently presented prompt.
    #[must_use]
    pub fn last_prompt(&self) -> Option<&Prompt> {
        self.prompts.last()
    }
}

impl Presenter for Transcript {
    fn present(&mut self, prompt: &Prompt) {
        let choices: Vec<String> = prompt
            .choices()
            .iter()
            .filter_map(|c| serde_json::to_value(c).ok())
            .filter_map(|v| v.get("choice").and_then(Value::as_str).map(str::to_string))
            .collect();
        self.lines.push(format!("present {} [{}]", prompt.name(), choices.join(", ")));
        self.prompts.push(prompt.clone());
    }

    fn dismiss(&mut self) {
        self.lines.push("dismiss".into());
    }

    fn terminate(&mut self) {
        self.lines.push("terminate".into());
        self.terminated = true;
    }

    fn render(&mut self, action: &Action) {
        match action {
            Action::GlyphChanged(glyph) => self.lines.push(format!("glyph {glyph:?}").to_lowercase()),
            Action::ModeChanged(mode) => self.lines.push(format!("mode {mode:?}").to_lowercase()),
            Action::TopBarToggled(visible) => self.lines.push(format!("top_bar {visible}")),
            other => debug!(action = ?other, "render"),
        }
    }
}

// =============================================================================
// RUNNER
// =============================================================================

/// Final state after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub url: Option<String>,
    pub cursor: Point,
    pub glyph: Glyph,
    pub mode: Mode,
    pub top_bar_visible: bool,
    pub modal_presented: bool,
    pub terminated: bool,
    pub mobile_mode: bool,
    pub text_scale: i32,
    pub history: Vec<String>,
    pub favorites: Vec<String>,
    pub transcript: Vec<String>,
}

pub type ReplayShell = Shell<ReplayFactory, Transcript>;

/// Build a shell for `scenario` on top of `config`.
#[must_use]
pub fn shell_for(config: &ShellConfig, scenario: &Scenario) -> ReplayShell {
    let mut config = config.clone();
    if let Some(screen) = scenario.screen {
        config.screen = screen;
    }
    if let Some(layout) = scenario.layout {
        config.layout = layout;
    }
    let factory = ReplayFactory::new(scenario.pages.clone(), config.screen.width);
    Shell::open(&config, factory, Transcript::default())
}

/// Apply one step, then settle the navigation it started.
pub fn apply_step(shell: &mut ReplayShell, step: Step) {
    match step {
        Step::Launch => shell.launch(),
        Step::Input { event } => shell.handle(event),
        Step::Choose { choice } => shell.choose(choice),
        Step::Dismiss => shell.dismissed(),
        Step::FailLoad { code, message } => shell.load_failed(code, &message),
    }
    settle(shell);
}

/// Finish or fail the pending navigation, if any.
pub fn settle(shell: &mut ReplayShell) {
    let Some(url) = shell.engine_mut().surface_mut().and_then(ReplaySurface::take_pending) else {
        return;
    };
    if shell.engine().surface().is_some_and(|s| s.has_page(&url)) {
        shell.load_finished();
    } else {
        shell.load_failed(HOST_NOT_FOUND, "A server with the specified hostname could not be found.");
    }
}

/// Replay every step of `scenario`, stopping early on exit.
#[must_use]
pub fn run(config: &ShellConfig, scenario: Scenario) -> Report {
    let mut shell = shell_for(config, &scenario);
    let total = scenario.steps.len();
    for (index, step) in scenario.steps.into_iter().enumerate() {
        if shell.is_terminated() {
            info!(skipped = total - index, "exit confirmed, remaining steps skipped");
            break;
        }
        apply_step(&mut shell, step);
    }
    report(&shell)
}

#[must_use]
pub fn report(shell: &ReplayShell) -> Report {
    let engine = shell.engine();
    Report {
        url: engine.surface().and_then(ContentSurface::current_url),
        cursor: engine.cursor().position(),
        glyph: engine.cursor().glyph(),
        mode: engine.mode(),
        top_bar_visible: engine.top_bar().visible,
        modal_presented: engine.is_modal_presented(),
        terminated: shell.is_terminated(),
        mobile_mode: shell.settings().mobile_mode,
        text_scale: shell.settings().text_scale(),
        history: shell.history().list().iter().map(|e| e.url.clone()).collect(),
        favorites: shell.favorites().list().iter().map(|f| f.url.clone()).collect(),
        transcript: shell.presenter().lines.clone(),
    }
}
