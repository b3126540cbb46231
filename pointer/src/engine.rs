//! Remote event router: the pointer engine.
//!
//! ARCHITECTURE
//! ============
//! [`Engine`] owns the cursor, the interaction mode, the top bar and the
//! content surface, and turns every [`InputEvent`] into state changes plus a
//! list of [`Action`]s for the host. The host draws the cursor, presents
//! prompts and owns everything stored on disk; the engine never blocks on the
//! presenter and never reads settings.
//!
//! ROUTING
//! =======
//! - Menu and Play/Pause dismiss a presented modal before anything else.
//! - Menu goes back in history when it can, otherwise asks to exit.
//! - Play/Pause opens the quick menu.
//! - Select is ignored while a modal is up or in `Scroll` mode. In `Cursor`
//!   mode it hits the top bar when the cursor is on it, otherwise it clicks
//!   the content and opens a text prompt when a form field was hit.
//! - Arrow presses do nothing.
//!
//! Touch movement always moves the cursor. The glyph probe only runs in
//! `Cursor` mode, with a loaded request, while the cursor is over content.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, info};

use crate::bridge::{ContentBridge, ContentSurface, with_default_scheme};
use crate::consts::{DEFAULT_FIELD_PLACEHOLDER, FORM_FIELD_TYPES};
use crate::cursor::{CursorState, Glyph, TouchDeltaTracker};
use crate::hit::{OverlayTarget, TopBar};
use crate::input::{DoubleTap, InputEvent, RemotePress};
use crate::mode::{Mode, ModeController, ProbeTicket};
use crate::prompt::{Choice, Keyboard, Prompt, TextFieldPrompt};
use crate::viewport::{ContentPoint, Point, Projection, ScreenSize, Viewport};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Redraw the cursor at this screen position.
    CursorMoved(Point),
    GlyphChanged(Glyph),
    /// The mode switched; the surface flags are already applied.
    ModeChanged(Mode),
    Present(Prompt),
    /// Close whatever modal is presented, as a cancel.
    DismissModal,
    /// Load the configured homepage.
    GoHome,
    /// Open the advanced menu, which needs the host's settings.
    AdvancedMenuRequested,
    /// The top bar was shown (`true`) or hidden.
    TopBarToggled(bool),
    /// The user confirmed exit.
    Terminate,
}

/// A glyph probe in flight: where it looks and which mode generation it
/// belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub ticket: ProbeTicket,
    pub at: ContentPoint,
}

/// Core pointer engine over a content surface `S`.
///
/// The surface is optional: between a surface teardown and its replacement
/// every content query answers absent and navigation does nothing.
pub struct Engine<S: ContentSurface> {
    surface: Option<S>,
    cursor: CursorState,
    touch: TouchDeltaTracker,
    mode: ModeController,
    top_bar: TopBar,
    modal: bool,
}

impl<S: ContentSurface> Engine<S> {
    /// A fresh engine in `Cursor` mode with the cursor centred on `screen`.
    pub fn new(surface: Option<S>, screen: ScreenSize, top_bar: TopBar) -> Self {
        let mut engine = Self {
            surface,
            cursor: CursorState::new(screen),
            touch: TouchDeltaTracker::new(),
            mode: ModeController::new(),
            top_bar,
            modal: false,
        };
        engine.apply_mode_flags();
        engine
    }

    /// Swap in a new surface. Cursor and mode start over; the previous
    /// surface is handed back for teardown.
    pub fn replace_surface(&mut self, surface: Option<S>) -> Option<S> {
        let old = std::mem::replace(&mut self.surface, surface);
        self.cursor = CursorState::new(self.cursor.screen());
        self.touch.reset();
        self.mode = ModeController::new();
        self.apply_mode_flags();
        info!(has_surface = self.surface.is_some(), "content surface replaced");
        old
    }

    fn apply_mode_flags(&mut self) {
        let flags = self.mode.flags();
        self.cursor.set_visible(flags.glyph_visible);
        if let Some(surface) = self.surface.as_mut() {
            surface.set_scroll_enabled(flags.scroll_enabled);
            surface.set_touch_forwarding(flags.content_touch_enabled);
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Scripted access to the surface, if one is attached.
    pub fn bridge(&mut self) -> Option<ContentBridge<'_, S>> {
        self.surface.as_mut().map(ContentBridge::new)
    }

    #[must_use]
    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    #[must_use]
    pub fn top_bar(&self) -> &TopBar {
        &self.top_bar
    }

    #[must_use]
    pub fn is_modal_presented(&self) -> bool {
        self.modal
    }

    /// Current screen-to-content mapping. `None` without a surface.
    pub fn viewport(&mut self) -> Option<Viewport> {
        let offset = self.top_bar.offset();
        let surface = self.surface.as_mut()?;
        let frame_width = surface.frame_width();
        let content_width = ContentBridge::new(surface).viewport_width();
        Some(Viewport::new(frame_width, content_width, offset))
    }

    // --- Input ---

    /// Route one input event.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::TouchBegan => {
                self.on_touch_began();
                Vec::new()
            }
            InputEvent::TouchMoved { x, y } => self.on_touch_moved(Point::new(x, y)),
            InputEvent::Press { button } => self.on_press(button),
            InputEvent::DoubleTap { target } => self.on_double_tap(target),
        }
    }

    pub fn on_touch_began(&mut self) {
        self.touch.reset();
    }

    /// Move the cursor by the touch delta, then refresh the glyph. Touches
    /// belong to the modal while one is presented; the cursor stays put and
    /// the next sample after it closes starts a fresh baseline.
    pub fn on_touch_moved(&mut self, location: Point) -> Vec<Action> {
        if self.modal {
            self.touch.reset();
            return Vec::new();
        }
        let delta = self.touch.on_touch_moved(location);
        let mut actions = Vec::new();
        if self.cursor.apply_delta(delta.x, delta.y) {
            actions.push(Action::CursorMoved(self.cursor.position()));
        }

        if let Some(probe) = self.begin_probe() {
            let clickable = self.bridge().is_some_and(|mut b| b.is_clickable(probe.at));
            actions.extend(self.finish_probe(probe, clickable));
        }
        actions
    }

    /// Start a glyph probe at the cursor, if one applies right now.
    pub fn begin_probe(&mut self) -> Option<Probe> {
        if !self.mode.is_cursor() {
            return None;
        }
        if !self.surface.as_ref().is_some_and(ContentSurface::has_request) {
            return None;
        }
        let position = self.cursor.position();
        if self.top_bar.covers(position) {
            return None;
        }
        let at = self.viewport()?.project(position).content()?;
        Some(Probe { ticket: self.mode.ticket(), at })
    }

    /// Apply a probe result unless the mode changed since it started.
    pub fn finish_probe(&mut self, probe: Probe, clickable: bool) -> Option<Action> {
        if !self.mode.accepts(probe.ticket) {
            debug!(at = ?probe.at, "stale probe discarded");
            return None;
        }
        self.cursor.set_glyph(clickable).then(|| Action::GlyphChanged(self.cursor.glyph()))
    }

    pub fn on_press(&mut self, press: RemotePress) -> Vec<Action> {
        match press {
            RemotePress::Menu | RemotePress::PlayPause if self.modal => {
                self.modal = false;
                vec![Action::DismissModal]
            }
            RemotePress::Menu => {
                if self.surface.as_ref().is_some_and(ContentSurface::can_go_back) {
                    self.go_back();
                    Vec::new()
                } else {
                    vec![self.present(Prompt::ExitConfirmation)]
                }
            }
            RemotePress::PlayPause => {
                let menu = self.quick_menu();
                vec![self.present(menu)]
            }
            RemotePress::Select => {
                if self.modal || !self.mode.is_cursor() {
                    return Vec::new();
                }
                self.click()
            }
            RemotePress::Up | RemotePress::Down | RemotePress::Left | RemotePress::Right => Vec::new(),
        }
    }

    pub fn on_double_tap(&mut self, tap: DoubleTap) -> Vec<Action> {
        if self.modal {
            return Vec::new();
        }
        match tap {
            DoubleTap::TouchSurface => self.toggle_mode(),
            DoubleTap::PlayPause => vec![Action::AdvancedMenuRequested],
        }
    }

    /// Switch between `Cursor` and `Scroll` and apply the new flags.
    pub fn toggle_mode(&mut self) -> Vec<Action> {
        let flags = self.mode.toggle();
        if let Some(surface) = self.surface.as_mut() {
            surface.set_scroll_enabled(flags.scroll_enabled);
            surface.set_touch_forwarding(flags.content_touch_enabled);
        }
        self.cursor.set_visible(flags.glyph_visible);

        let mode = self.mode.mode();
        info!(?mode, "interaction mode changed");
        let mut actions = vec![Action::ModeChanged(mode)];
        if mode == Mode::Scroll && self.cursor.set_glyph(false) {
            actions.push(Action::GlyphChanged(Glyph::Default));
        }
        actions
    }

    fn click(&mut self) -> Vec<Action> {
        let position = self.cursor.position();
        if self.top_bar.covers(position) {
            return self.click_overlay(position);
        }

        let Some(viewport) = self.viewport() else {
            return Vec::new();
        };
        let at = match viewport.project(position) {
            Projection::Content(at) => at,
            projection => {
                debug!(?projection, "click outside content");
                return Vec::new();
            }
        };

        let Some(prompt) = self.bridge().and_then(|mut bridge| {
            bridge.click(at);
            text_field_prompt(&mut bridge, at)
        }) else {
            return Vec::new();
        };
        vec![self.present(Prompt::TextInput(prompt))]
    }

    fn click_overlay(&mut self, position: Point) -> Vec<Action> {
        let Some(target) = self.top_bar.layout.hit(position) else {
            return Vec::new();
        };
        debug!(?target, "top bar hit");
        match target {
            OverlayTarget::Back => {
                self.go_back();
                Vec::new()
            }
            OverlayTarget::Forward => {
                self.go_forward();
                Vec::new()
            }
            OverlayTarget::Refresh => {
                self.reload();
                Vec::new()
            }
            OverlayTarget::Home => vec![Action::GoHome],
            OverlayTarget::UrlBar => vec![self.present(Prompt::UrlInput)],
            OverlayTarget::FullscreenToggle => vec![self.toggle_top_bar()],
            OverlayTarget::Menu => vec![Action::AdvancedMenuRequested],
        }
    }

    // --- Presentation ---

    /// Mark a modal as presented and wrap `prompt` for the host.
    pub fn present(&mut self, prompt: Prompt) -> Action {
        debug!(prompt = prompt.name(), "presenting");
        self.modal = true;
        Action::Present(prompt)
    }

    /// The host closed the presented modal, by choice or cancel.
    pub fn prompt_closed(&mut self) {
        self.modal = false;
    }

    /// Fulfil a choice that needs nothing beyond the surface and the top
    /// bar. Returns `None` for choices the host handles itself.
    pub fn apply_choice(&mut self, choice: &Choice) -> Option<Vec<Action>> {
        let actions = match choice {
            Choice::GoBack => {
                self.go_back();
                Vec::new()
            }
            Choice::GoForward => {
                self.go_forward();
                Vec::new()
            }
            Choice::Reload => {
                self.reload();
                Vec::new()
            }
            Choice::SetField { at, value, submit } => {
                self.set_field(*at, value, *submit);
                Vec::new()
            }
            Choice::OpenUrlInput => vec![self.present(Prompt::UrlInput)],
            Choice::ShowQuickMenu => {
                let menu = self.quick_menu();
                vec![self.present(menu)]
            }
            Choice::ToggleTopBar => vec![self.toggle_top_bar()],
            Choice::Exit => vec![Action::Terminate],
            _ => return None,
        };
        Some(actions)
    }

    #[must_use]
    pub fn quick_menu(&self) -> Prompt {
        let surface = self.surface.as_ref();
        Prompt::QuickMenu {
            can_go_forward: surface.is_some_and(ContentSurface::can_go_forward),
            has_request: surface.is_some_and(ContentSurface::has_request),
        }
    }

    // --- Navigation ---

    /// Load `url`, inserting `http://` when it names no scheme.
    pub fn load(&mut self, url: &str) {
        if let Some(surface) = self.surface.as_mut() {
            let url = with_default_scheme(url);
            info!(url = %url, "loading");
            surface.load(&url);
        }
    }

    pub fn reload(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.reload();
        }
    }

    pub fn go_back(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.go_back();
        }
    }

    pub fn go_forward(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.go_forward();
        }
    }

    /// Write a prompt's text back into the page field at `at`.
    pub fn set_field(&mut self, at: ContentPoint, value: &str, submit: bool) {
        if let Some(mut bridge) = self.bridge() {
            bridge.set_value(at, value, submit);
        }
    }

    pub fn apply_text_scale(&mut self, percent: i32) {
        if let Some(mut bridge) = self.bridge() {
            bridge.set_text_scale(percent);
        }
    }

    pub fn toggle_top_bar(&mut self) -> Action {
        Action::TopBarToggled(self.top_bar.toggle())
    }
}

/// Build the text prompt for the form field at `at`, if there is one.
fn text_field_prompt<S: ContentSurface + ?Sized>(
    bridge: &mut ContentBridge<'_, S>,
    at: ContentPoint,
) -> Option<TextFieldPrompt> {
    let field_type = bridge.hit_test_type(at)?;
    if !FORM_FIELD_TYPES.contains(&field_type.as_str()) {
        return None;
    }

    let title = bridge.attribute("title", at).filter(|t| !t.is_empty()).unwrap_or_else(|| field_type.clone());
    let placeholder = bridge
        .attribute("placeholder", at)
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_FIELD_PLACEHOLDER.to_owned());
    let current_value = bridge.attribute("value", at).unwrap_or_default();
    let offers_submit = bridge.has_form_submit(at);

    Some(TextFieldPrompt {
        target: at,
        keyboard: Keyboard::for_field(&field_type),
        secure: field_type == "password",
        field_type,
        title,
        placeholder,
        current_value,
        offers_submit,
    })
}
