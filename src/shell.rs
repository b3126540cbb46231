//! Browser shell: owns the engine, the stores and the presenter.
//!
//! ARCHITECTURE
//! ============
//! The platform layer feeds the shell three kinds of events: raw input
//! ([`Shell::handle`]), the presenter's answer to a prompt
//! ([`Shell::choose`] / [`Shell::dismissed`]) and page load outcomes
//! ([`Shell::load_finished`] / [`Shell::load_failed`]). Every engine
//! [`Action`] is settled here: prompts go to the [`Presenter`], home and
//! the advanced menu are resolved against the settings, and exit is
//! forwarded as a terminate request.
//!
//! SURFACE LIFECYCLE
//! =================
//! The content surface comes from a [`SurfaceFactory`]. Switching between
//! mobile and desktop rendering throws the surface away: the current URL
//! is saved for reopening, cookies and cache are cleared, a surface with
//! the other user agent is created, and the launch sequence runs again.

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;

use pointer::bridge::ContentSurface;
use pointer::engine::{Action, Engine};
use pointer::hit::TopBar;
use pointer::input::InputEvent;
use pointer::prompt::{Choice, ListItem, Prompt};
use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::services::favorites::FavoritesStore;
use crate::services::history::HistoryStore;
use crate::services::search::{failed_page_search_url, search_url};
use crate::services::settings::{Settings, SettingsStore};

/// Navigation error codes that are never shown: a cancelled load and a
/// frame load interrupted by a policy change.
pub const SILENT_LOAD_ERRORS: [i64; 2] = [-999, -204];

/// Creates content surfaces and owns the state they share.
pub trait SurfaceFactory {
    type Surface: ContentSurface;

    /// A new surface, or `None` when the platform cannot create one. The
    /// shell keeps running without content in that case.
    fn create(&mut self, user_agent: &str, scales_page_to_fit: bool) -> Option<Self::Surface>;
    fn clear_cookies(&mut self);
    fn clear_cache(&mut self);
}

/// Shows prompts and draws engine state. Answers come back through
/// [`Shell::choose`] or [`Shell::dismissed`].
pub trait Presenter {
    fn present(&mut self, prompt: &Prompt);
    fn dismiss(&mut self);
    fn terminate(&mut self);

    /// Cursor, glyph, mode and top bar updates.
    fn render(&mut self, _action: &Action) {}
}

pub struct Shell<F: SurfaceFactory, P: Presenter> {
    engine: Engine<F::Surface>,
    factory: F,
    presenter: P,
    settings: SettingsStore,
    favorites: FavoritesStore,
    history: HistoryStore,
    search_base: String,
    failed_request: Option<String>,
    guide_shown: bool,
    terminated: bool,
}

impl<F: SurfaceFactory, P: Presenter> Shell<F, P> {
    /// Open the stores under the configured data directory and create the
    /// first surface. Call [`launch`](Self::launch) once the host is ready.
    pub fn open(config: &ShellConfig, mut factory: F, presenter: P) -> Self {
        let settings = SettingsStore::open(&config.data_dir, Settings::with_homepage(config.homepage.clone()));
        let favorites = FavoritesStore::open(&config.data_dir);
        let history = HistoryStore::open(&config.data_dir);

        let s = settings.get();
        let surface = factory.create(s.user_agent(), s.scales_pages_to_fit);
        if surface.is_none() {
            warn!("content surface creation failed");
        }
        let top_bar = TopBar::new(config.layout, s.show_top_bar);
        let engine = Engine::new(surface, config.screen, top_bar);
        info!(data_dir = %config.data_dir.display(), mobile_mode = s.mobile_mode, "shell opened");

        Self {
            engine,
            factory,
            presenter,
            settings,
            favorites,
            history,
            search_base: config.search_url.clone(),
            failed_request: None,
            guide_shown: false,
            terminated: false,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn engine(&self) -> &Engine<F::Surface> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<F::Surface> {
        &mut self.engine
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        self.settings.get()
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Whether exit was confirmed.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    fn current_url(&self) -> Option<String> {
        self.engine.surface().and_then(ContentSurface::current_url).filter(|u| !u.is_empty())
    }

    fn document_title(&mut self) -> String {
        self.engine.bridge().map(|mut b| b.document_title()).unwrap_or_default()
    }

    // --- Lifecycle ---

    /// Reopen the URL saved across a surface switch, or go home when
    /// nothing is loaded. Shows the usage guide once per session unless
    /// the user turned it off.
    pub fn launch(&mut self) {
        let saved = self.settings.get().saved_url_to_reopen.clone().filter(|u| !u.is_empty());
        if let Some(url) = saved {
            self.settings.update(|s| s.saved_url_to_reopen = None);
            info!(%url, "reopening saved url");
            self.engine.load(&url);
        } else if !self.engine.surface().is_some_and(ContentSurface::has_request) {
            self.go_home();
        }

        if !self.settings.get().dont_show_hints_on_launch && !self.guide_shown {
            self.guide_shown = true;
            self.present(Prompt::UsageGuide { dont_show_on_launch: false });
        }
    }

    /// A page finished loading: apply the text scale and record the visit.
    pub fn load_finished(&mut self) {
        self.failed_request = None;
        self.engine.apply_text_scale(self.settings.get().text_scale());

        let Some(url) = self.current_url() else {
            return;
        };
        let title = self.document_title();
        if self.history.add(&url, &title) {
            debug!(%url, "visit recorded");
        }
    }

    /// A navigation failed with a platform error code.
    pub fn load_failed(&mut self, code: i64, message: &str) {
        if SILENT_LOAD_ERRORS.contains(&code) {
            debug!(code, "ignoring interrupted load");
            return;
        }
        let request_url = self.current_url();
        let can_reload = self.engine.surface().is_some_and(ContentSurface::has_request);
        info!(code, error = message, url = ?request_url, "load failed");

        self.failed_request.clone_from(&request_url);
        self.present(Prompt::LoadError { message: message.to_string(), request_url, can_reload });
    }

    // --- Events ---

    pub fn handle(&mut self, event: InputEvent) {
        let actions = self.engine.handle(event);
        self.process(actions);
    }

    /// The presenter closed its prompt without a choice.
    pub fn dismissed(&mut self) {
        self.engine.prompt_closed();
    }

    /// The presenter closed its prompt with `choice`.
    pub fn choose(&mut self, choice: Choice) {
        debug!(?choice, "choice");
        self.engine.prompt_closed();
        if let Some(actions) = self.engine.apply_choice(&choice) {
            self.process(actions);
            return;
        }

        match choice {
            Choice::GoToUrl(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    self.engine.load(text);
                }
            }
            Choice::Search(query) => {
                let query = query.trim();
                if !query.is_empty() {
                    let url = search_url(&self.search_base, query);
                    self.engine.load(&url);
                }
            }
            Choice::SearchFailedPage => {
                if let Some(failed) = self.failed_request.take() {
                    let url = failed_page_search_url(&self.search_base, &failed);
                    self.engine.load(&url);
                }
            }
            Choice::GoHome => self.go_home(),
            Choice::SetHomePage => {
                if let Some(url) = self.current_url() {
                    info!(%url, "homepage set");
                    self.settings.update(|s| s.homepage = url);
                }
            }
            Choice::ShowFavorites => {
                let prompt = Prompt::Favorites {
                    items: self.favorite_items(),
                    current_url: self.current_url().unwrap_or_default(),
                    current_title: self.document_title(),
                };
                self.present(prompt);
            }
            Choice::PromptAddFavorite => {
                let prompt = Prompt::AddFavorite {
                    url: self.current_url().unwrap_or_default(),
                    suggested_title: self.document_title(),
                };
                self.present(prompt);
            }
            Choice::AddFavorite { url, title } => {
                if !url.trim().is_empty() {
                    self.favorites.add(url.trim(), title.trim());
                }
            }
            Choice::OpenFavorite(index) => {
                if let Some(url) = self.favorites.get(index).map(|f| f.url.clone()) {
                    self.engine.load(&url);
                }
            }
            Choice::PromptDeleteFavorite => {
                let prompt = Prompt::DeleteFavorite { items: self.favorite_items() };
                self.present(prompt);
            }
            Choice::DeleteFavorite(index) => {
                if let Some(removed) = self.favorites.remove_at(index) {
                    info!(url = %removed.url, "favorite removed");
                }
            }
            Choice::ShowHistory => {
                let items = self
                    .history
                    .list()
                    .iter()
                    .map(|e| ListItem {
                        label: if e.title.is_empty() { e.url.clone() } else { e.title.clone() },
                        url: e.url.clone(),
                    })
                    .collect();
                self.present(Prompt::History { items });
            }
            Choice::OpenHistory(index) => {
                if let Some(url) = self.history.get(index).map(|e| e.url.clone()) {
                    self.engine.load(&url);
                }
            }
            Choice::ClearHistory => self.history.clear(),
            Choice::ToggleMobileMode => self.toggle_mobile_mode(),
            Choice::ToggleScaling => self.toggle_scaling(),
            Choice::IncreaseTextSize => {
                let percent = self.settings.update(|s| {
                    s.increase_text_scale();
                    s.text_scale()
                });
                self.engine.apply_text_scale(percent);
            }
            Choice::DecreaseTextSize => {
                let percent = self.settings.update(|s| {
                    s.decrease_text_scale();
                    s.text_scale()
                });
                self.engine.apply_text_scale(percent);
            }
            Choice::ClearCache => {
                self.factory.clear_cache();
                self.engine.reload();
            }
            Choice::ClearCookies => {
                self.factory.clear_cookies();
                self.engine.reload();
            }
            Choice::ShowUsageGuide => {
                let dont_show_on_launch = self.settings.get().dont_show_hints_on_launch;
                self.present(Prompt::UsageGuide { dont_show_on_launch });
            }
            Choice::SetHintsOnLaunch(show) => self.settings.update(|s| s.dont_show_hints_on_launch = !show),
            // Fulfilled by the engine above.
            Choice::GoBack
            | Choice::GoForward
            | Choice::Reload
            | Choice::SetField { .. }
            | Choice::OpenUrlInput
            | Choice::ShowQuickMenu
            | Choice::ToggleTopBar
            | Choice::Exit => {}
        }
    }

    // --- Internals ---

    fn process(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::Present(ref prompt) => self.presenter.present(prompt),
                Action::DismissModal => self.presenter.dismiss(),
                Action::GoHome => self.go_home(),
                Action::AdvancedMenuRequested => {
                    let menu = self.advanced_menu();
                    self.present(menu);
                }
                Action::TopBarToggled(visible) => {
                    self.settings.update(|s| s.show_top_bar = visible);
                    self.presenter.render(&action);
                }
                Action::Terminate => {
                    info!("exit confirmed");
                    self.terminated = true;
                    self.presenter.terminate();
                }
                Action::CursorMoved(_) | Action::GlyphChanged(_) | Action::ModeChanged(_) => {
                    self.presenter.render(&action);
                }
            }
        }
    }

    fn present(&mut self, prompt: Prompt) {
        let action = self.engine.present(prompt);
        self.process(vec![action]);
    }

    fn advanced_menu(&self) -> Prompt {
        let settings = self.settings.get();
        Prompt::AdvancedMenu {
            top_bar_visible: self.engine.top_bar().visible,
            mobile_mode: settings.mobile_mode,
            scales_page_to_fit: self.engine.surface().is_some_and(ContentSurface::scales_page_to_fit),
        }
    }

    fn favorite_items(&self) -> Vec<ListItem> {
        self.favorites.list().iter().map(|f| ListItem { label: f.title.clone(), url: f.url.clone() }).collect()
    }

    fn go_home(&mut self) {
        let homepage = self.settings.get().homepage.clone();
        self.engine.load(&homepage);
    }

    fn toggle_scaling(&mut self) {
        let enabled = !self.engine.surface().is_some_and(ContentSurface::scales_page_to_fit);
        self.settings.update(|s| s.scales_pages_to_fit = enabled);
        if let Some(surface) = self.engine.surface_mut() {
            surface.set_scales_page_to_fit(enabled);
        }
        self.engine.reload();
    }

    fn toggle_mobile_mode(&mut self) {
        if let Some(url) = self.current_url() {
            self.settings.update(|s| s.saved_url_to_reopen = Some(url));
        }
        let mobile_mode = self.settings.update(|s| {
            s.mobile_mode = !s.mobile_mode;
            s.mobile_mode
        });

        self.factory.clear_cookies();
        self.factory.clear_cache();
        let s = self.settings.get();
        let surface = self.factory.create(s.user_agent(), s.scales_pages_to_fit);
        if surface.is_none() {
            warn!(mobile_mode, "content surface creation failed");
        }
        drop(self.engine.replace_surface(surface));
        info!(mobile_mode, "content surface recreated");

        let cursor = self.engine.cursor();
        let reset = [
            Action::ModeChanged(self.engine.mode()),
            Action::GlyphChanged(cursor.glyph()),
            Action::CursorMoved(cursor.position()),
        ];
        for action in &reset {
            self.presenter.render(action);
        }
        self.launch();
    }
}
