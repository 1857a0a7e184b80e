use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use jiff::Zoned;
use ratatui::Frame;
use ratatui::widgets::ListState;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::api::{ApiService, Section};
use crate::config::AppConfig;
use crate::internal::i18n::{self, Language};
use crate::internal::models::{Article, FetchState};
use crate::internal::navigation::{
    HistoryEvent, NavigateOptions, NavigationDispatcher, Route, ScrollOffset, ScrollPosition,
    ScrollPositionCache, ScrollRestore, ScrollRestorer,
};
use crate::internal::preferences::{Preferences, Theme};
use crate::internal::time_window::WindowFilter;

/// Application view modes.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ViewMode {
    List,
    Article,
}

/// Actions/messages sent through the app action channel.
#[derive(Debug, Clone)]
pub enum Action {
    Quit,
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    Enter,
    Back,
    Forward,
    NextSection,
    PrevSection,
    GoToSection(Section),
    CycleWindow,
    ClearWindow,
    ToggleTheme,
    ToggleLanguage,
    ToggleHelp,
    OpenBrowser,
    Refresh,
    LoadArticles(Section),
    ArticlesLoaded(Section, Vec<Article>),
    LoadFailed(Section, String),
    ArticleLoaded(Article),
    RestoreScroll(ScrollRestore),
    Error(String),
}

impl From<ScrollRestore> for Action {
    fn from(restore: ScrollRestore) -> Self {
        Action::RestoreScroll(restore)
    }
}

/// Short-lived message in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    shown_at: Instant,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            shown_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
            shown_at: Instant::now(),
        }
    }

    fn should_dismiss(&self) -> bool {
        let timeout = match self.is_error {
            true => Duration::from_secs(8),
            false => Duration::from_secs(3),
        };
        self.shown_at.elapsed() > timeout
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub app_version: String,
    pub config: AppConfig,
    pub api_service: Arc<ApiService>,
    pub preferences: Preferences,
    pub language: Language,
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub route: Route,
    /// Section of the list being shown, or the one an article was opened from.
    pub current_section: Section,
    pub articles: HashMap<Section, Vec<Article>>,
    pub fetch_state: HashMap<Section, FetchState>,
    pub filters: HashMap<Section, WindowFilter>,
    /// Indices into the current section's articles that pass its filter.
    pub visible: Vec<usize>,
    pub list_state: ListState,
    pub article: Option<Article>,
    pub article_loading: bool,
    pub article_scroll: u16,
    pub show_help: bool,
    pub status: Option<StatusMessage>,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
    dispatcher: NavigationDispatcher,
    restorer: ScrollRestorer<Action>,
}

impl App {
    pub fn with_parts(config: AppConfig, preferences: Preferences) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let api_service = Arc::new(ApiService::with_options(
            config.api_base_url.clone(),
            config.cache_ttl(),
            config.logging.enable_performance_metrics,
        ));

        // One cache shared by the dispatcher (writes) and the restorer (reads)
        let scroll_cache = ScrollPositionCache::new();
        let start = Route::Section(Section::Latest);
        let dispatcher = NavigationDispatcher::new(scroll_cache.clone(), start);
        let restorer = ScrollRestorer::new(scroll_cache, config.settle_delay(), action_tx.clone());

        // Every section starts from the configured window
        let filters = Section::iter()
            .map(|s| (s, WindowFilter::new(config.default_window)))
            .collect();

        tracing::info!(
            api = %config.api_base_url,
            settle_delay_ms = config.settle_delay_ms,
            default_window = ?config.default_window,
            "App config"
        );

        Self {
            running: true,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            language: preferences.language(),
            theme: preferences.theme(),
            config,
            api_service,
            preferences,
            view_mode: ViewMode::List,
            route: start,
            current_section: Section::Latest,
            articles: HashMap::new(),
            fetch_state: HashMap::new(),
            filters,
            visible: Vec::new(),
            list_state: ListState::default(),
            article: None,
            article_loading: false,
            article_scroll: 0,
            show_help: false,
            status: None,
            action_tx,
            action_rx,
            dispatcher,
            restorer,
        }
    }

    pub fn dispatcher(&self) -> &NavigationDispatcher {
        &self.dispatcher
    }

    pub fn restorer(&self) -> &ScrollRestorer<Action> {
        &self.restorer
    }

    pub fn t(&self, key: &'static str) -> &'static str {
        i18n::t(self.language, key)
    }

    pub fn current_filter(&self) -> WindowFilter {
        self.filters
            .get(&self.current_section)
            .copied()
            .unwrap_or_default()
    }

    pub fn current_articles(&self) -> &[Article] {
        self.articles
            .get(&self.current_section)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn current_fetch_state(&self) -> FetchState {
        self.fetch_state
            .get(&self.current_section)
            .copied()
            .unwrap_or_default()
    }

    pub fn selected_article(&self) -> Option<&Article> {
        let row = self.list_state.selected()?;
        let index = *self.visible.get(row)?;
        self.current_articles().get(index)
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        // Kick off the first fetch for the start route
        self.enter_current_route();

        // ~60 FPS input polling
        let mut event_interval = tokio::time::interval(Duration::from_millis(16));

        loop {
            if self.status.as_ref().is_some_and(StatusMessage::should_dismiss) {
                self.status = None;
            }

            tui.draw(|f| self.ui(f))?;

            // Wait for either a key event or an action from a background task
            tokio::select! {
                _ = event_interval.tick() => {
                    if event::poll(Duration::from_millis(0))?
                        && let Event::Key(key) = event::read()?
                        && key.kind == KeyEventKind::Press
                    {
                        self.handle_key_event(key);
                    }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await;
                }
            }

            if !self.running {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
                self.show_help = false;
            }
            // Swallow other keys while help is shown
            return;
        }

        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::NavigateDown,
            KeyCode::Char('k') | KeyCode::Up => Action::NavigateUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Enter => Action::Enter,
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => Action::Back,
            KeyCode::Right | KeyCode::Char('l') => Action::Forward,
            KeyCode::Tab => Action::NextSection,
            KeyCode::BackTab => Action::PrevSection,
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                match Section::iter().nth(index) {
                    Some(section) => Action::GoToSection(section),
                    None => return,
                }
            }
            KeyCode::Char('f') => Action::CycleWindow,
            KeyCode::Char('F') => Action::ClearWindow,
            KeyCode::Char('t') => Action::ToggleTheme,
            KeyCode::Char('i') => Action::ToggleLanguage,
            KeyCode::Char('o') => Action::OpenBrowser,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('?') => Action::ToggleHelp,
            _ => return,
        };
        let _ = self.action_tx.send(action);
    }

    #[tracing::instrument(skip(self, action))]
    pub async fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NavigateUp => self.move_selection(-1, false),
            Action::NavigateDown => self.move_selection(1, false),
            Action::PageUp => self.move_selection(-i64::from(self.config.page_size), true),
            Action::PageDown => self.move_selection(i64::from(self.config.page_size), true),
            Action::Enter => self.open_selected(),
            // History traversal: no scroll is saved, restoration is scheduled
            Action::Back => {
                let event = self.dispatcher.go_back();
                self.after_traversal(event);
            }
            Action::Forward => {
                let event = self.dispatcher.go_forward();
                self.after_traversal(event);
            }
            // Tab changes are push navigation like opening an article
            Action::NextSection => self.step_section(1),
            Action::PrevSection => self.step_section(-1),
            Action::GoToSection(section) => {
                if self.route != Route::Section(section) {
                    self.navigate_to(Route::Section(section), NavigateOptions::default());
                }
            }
            // Filter changes reset the selection to the top of the new subset
            Action::CycleWindow => {
                self.filters
                    .entry(self.current_section)
                    .or_default()
                    .cycle();
                self.list_state.select(Some(0));
                self.refresh_visible();
            }
            Action::ClearWindow => {
                self.filters
                    .entry(self.current_section)
                    .or_default()
                    .select(None);
                self.list_state.select(Some(0));
                self.refresh_visible();
            }
            // Preferences are saved as soon as they change
            Action::ToggleTheme => {
                self.theme = self.theme.toggle();
                if let Err(e) = self.preferences.set_theme(self.theme) {
                    tracing::error!("Failed to save theme preference: {e:#}");
                    self.status = Some(StatusMessage::error(format!("{e:#}")));
                }
            }
            Action::ToggleLanguage => {
                self.language = self.language.toggle();
                if let Err(e) = self.preferences.set_language(self.language) {
                    tracing::error!("Failed to save language preference: {e:#}");
                    self.status = Some(StatusMessage::error(format!("{e:#}")));
                }
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::OpenBrowser => self.open_in_browser(),
            Action::Refresh => {
                // Drop the cached list so the reload hits the backend
                self.api_service.invalidate(self.current_section);
                self.fetch_state
                    .insert(self.current_section, FetchState::Idle);
                let _ = self
                    .action_tx
                    .send(Action::LoadArticles(self.current_section));
            }
            // Background fetch results
            Action::LoadArticles(section) => self.load_articles(section),
            Action::ArticlesLoaded(section, articles) => {
                tracing::info!(%section, count = articles.len(), "articles loaded");
                self.articles.insert(section, articles);
                self.fetch_state.insert(section, FetchState::Loaded);
                if section == self.current_section {
                    self.refresh_visible();
                }
            }
            Action::LoadFailed(section, message) => {
                tracing::error!(%section, "{}", message);
                self.fetch_state.insert(section, FetchState::Failed);
                self.status = Some(StatusMessage::error(self.t("status.failed")));
            }
            Action::ArticleLoaded(article) => {
                // The user may have moved on while the fetch was in flight
                if self.route == Route::Article(article.id) {
                    self.article = Some(article);
                }
                self.article_loading = false;
            }
            Action::RestoreScroll(restore) => self.apply_restore(restore),
            Action::Error(message) => {
                tracing::error!("{}", message);
                self.article_loading = false;
                self.status = Some(StatusMessage::error(message));
            }
        }
    }

    /// Push navigation: checkpoint the current view's offset, change route,
    /// show the new view from the top.
    fn navigate_to(&mut self, route: Route, options: NavigateOptions) {
        let offset = self.scroll_offset();
        self.dispatcher.navigate(&offset, route, options);
        // A pending restore belongs to the page being left.
        self.restorer.cancel();
        self.enter_current_route();
    }

    fn after_traversal(&mut self, event: Option<HistoryEvent>) {
        if let Some(event) = event {
            self.enter_current_route();
            self.restorer.on_history_event(&event);
        }
    }

    /// Sync view state with the dispatcher's current entry, scrolled to top.
    fn enter_current_route(&mut self) {
        let path = self.dispatcher.current_path().clone();
        let Some(route) = Route::from_path(&path) else {
            tracing::warn!(path = %path, "no view for route");
            return;
        };
        self.route = route;

        match route {
            Route::Section(section) => {
                // Lists open at the top; a traversal restores the offset later
                self.view_mode = ViewMode::List;
                self.current_section = section;
                self.article = None;
                self.list_state.select(Some(0));
                *self.list_state.offset_mut() = 0;
                self.refresh_visible();
                self.ensure_loaded(section);
            }
            Route::Article(id) => {
                self.view_mode = ViewMode::Article;
                self.article_scroll = 0;
                // Prefer the article carried in the history state, fetch by id otherwise
                let from_state = self
                    .dispatcher
                    .current()
                    .state
                    .clone()
                    .and_then(|state| serde_json::from_value::<Article>(state).ok())
                    .filter(|article| article.id == id);
                match from_state {
                    Some(article) => {
                        self.article = Some(article);
                        self.article_loading = false;
                    }
                    None => {
                        self.article = None;
                        self.load_article(id);
                    }
                }
            }
        }
    }

    fn apply_restore(&mut self, restore: ScrollRestore) {
        if &restore.path != self.dispatcher.current_path() {
            tracing::debug!(path = %restore.path, "stale scroll restore ignored");
            return;
        }

        match self.view_mode {
            ViewMode::List => {
                // Best effort: only as far as the rows present now.
                let Some(last) = self.visible.len().checked_sub(1) else {
                    return;
                };
                self.list_state
                    .select(Some((restore.offset as usize).min(last)));
            }
            ViewMode::Article => {
                self.article_scroll = u16::try_from(restore.offset).unwrap_or(u16::MAX);
            }
        }
        tracing::debug!(path = %restore.path, offset = restore.offset, "scroll restored");
    }

    fn ensure_loaded(&mut self, section: Section) {
        match self.fetch_state.get(&section).copied().unwrap_or_default() {
            FetchState::Idle | FetchState::Failed => {
                let _ = self.action_tx.send(Action::LoadArticles(section));
            }
            FetchState::Loading | FetchState::Loaded => {}
        }
    }

    fn load_articles(&mut self, section: Section) {
        // One fetch per section at a time
        if self.fetch_state.get(&section) == Some(&FetchState::Loading) {
            return;
        }
        self.fetch_state.insert(section, FetchState::Loading);

        let api = self.api_service.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match api.fetch_articles(section).await {
                Ok(articles) => Action::ArticlesLoaded(section, articles),
                Err(e) => Action::LoadFailed(section, format!("{e:#}")),
            };
            let _ = tx.send(action);
        });
    }

    fn load_article(&mut self, id: u64) {
        self.article_loading = true;

        let api = self.api_service.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match api.fetch_article(id).await {
                Ok(article) => Action::ArticleLoaded(article),
                Err(e) => Action::Error(format!("{e:#}")),
            };
            let _ = tx.send(action);
        });
    }

    fn refresh_visible(&mut self) {
        let now = Zoned::now();
        let filter = self.current_filter();
        self.visible = filter.apply(self.current_articles(), &now);

        match self.visible.len().checked_sub(1) {
            None => self.list_state.select(None),
            Some(last) => {
                let row = self.list_state.selected().unwrap_or(0).min(last);
                self.list_state.select(Some(row));
            }
        }
    }

    /// Move the list selection, or scroll the article reader, by `delta` rows.
    /// Single steps wrap around the list; page jumps stop at the ends.
    fn move_selection(&mut self, delta: i64, paging: bool) {
        match self.view_mode {
            ViewMode::List => {
                if self.visible.is_empty() {
                    return;
                }
                let last = self.visible.len() as i64 - 1;
                let current = self.list_state.selected().unwrap_or(0) as i64;
                let next = current + delta;
                let next = match paging {
                    false if next < 0 => last,
                    false if next > last => 0,
                    _ => next.clamp(0, last),
                };
                self.list_state.select(Some(next as usize));
            }
            ViewMode::Article => {
                let next = i64::from(self.article_scroll) + delta;
                self.article_scroll = next.clamp(0, i64::from(u16::MAX)) as u16;
            }
        }
    }

    fn step_section(&mut self, delta: isize) {
        let sections: Vec<Section> = Section::iter().collect();
        let current = sections
            .iter()
            .position(|s| *s == self.current_section)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(sections.len() as isize) as usize;
        self.navigate_to(Route::Section(sections[next]), NavigateOptions::default());
    }

    /// Open the selected article, passing it along as the history state.
    fn open_selected(&mut self) {
        if self.view_mode != ViewMode::List {
            return;
        }
        let Some(article) = self.selected_article().cloned() else {
            return;
        };

        let options = match serde_json::to_value(&article) {
            Ok(state) => NavigateOptions::with_state(state),
            Err(e) => {
                tracing::warn!("Failed to attach article state: {e}");
                NavigateOptions::default()
            }
        };
        self.navigate_to(Route::Article(article.id), options);
    }

    fn open_in_browser(&mut self) {
        let url = match self.view_mode {
            ViewMode::Article => self.article.as_ref().and_then(|a| a.url.clone()),
            ViewMode::List => self.selected_article().and_then(|a| a.url.clone()),
        };
        match url {
            Some(url) => match open::that(&url) {
                Ok(()) => self.status = Some(StatusMessage::info(url)),
                Err(e) => {
                    tracing::error!("Failed to open {}: {}", url, e);
                    self.status = Some(StatusMessage::error(format!("Failed to open {url}: {e}")));
                }
            },
            None => self.status = Some(StatusMessage::info(self.t("status.no_url"))),
        }
    }

    pub fn ui(&mut self, f: &mut Frame) {
        super::view::draw(self, f);
    }
}

impl ScrollPosition for App {
    fn scroll_offset(&self) -> ScrollOffset {
        match self.view_mode {
            ViewMode::List => self.list_state.selected().unwrap_or(0) as ScrollOffset,
            ViewMode::Article => ScrollOffset::from(self.article_scroll),
        }
    }
}
