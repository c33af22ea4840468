use crate::api::MarketDataProvider;
use crate::config::Config;
use crate::pages::{
    compare, details, fetch_coins, search::SearchStatus, ComparePage, DetailsPage, HomePage,
    ListPage, PageEvent, Remote, SearchPage,
};
use crate::search::{SearchController, SearchOptions};
use crate::ui::dialogs::help::HelpOverlay;
use crate::ui::input::{InputMode, InputState, Route, TextTarget};
use crate::ui::views::{
    CompareView, DetailsView, HomeView, ListView, SearchView, ViewRenderer, ViewState,
};
use crate::ui::widgets::{NavBar, NoticeLine, SearchBox, SearchDropdown};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Position, Rect},
    Frame, Terminal,
};
use std::future::Future;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Width of the navigation search box
const NAV_SEARCH_WIDTH: u16 = 34;

/// Screen regions shared by drawing and mouse hit-testing
struct Screen {
    nav: Rect,
    search_box: Rect,
    content: Rect,
    notice: Rect,
}

fn screen_layout(area: Rect) -> Screen {
    let [top, content, notice] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);
    let [nav, search_box] =
        Layout::horizontal([Constraint::Min(20), Constraint::Length(NAV_SEARCH_WIDTH)])
            .areas(top);
    Screen {
        nav,
        search_box,
        content,
        notice,
    }
}

pub struct App {
    config: Config,
    provider: Arc<dyn MarketDataProvider>,
    input: InputState,
    nav_search: SearchController,
    home: HomePage,
    list: ListPage,
    details: DetailsPage,
    compare: ComparePage,
    search_page: SearchPage,
    event_tx: mpsc::Sender<PageEvent>,
    event_rx: mpsc::Receiver<PageEvent>,
    last_area: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, provider: Arc<dyn MarketDataProvider>, start: Route) -> Self {
        let (event_tx, event_rx) = mpsc::channel::<PageEvent>(100);
        let nav_search = SearchController::new(
            Arc::clone(&provider),
            SearchOptions::dropdown(&config.search),
        );
        let search_page = SearchPage::new(Arc::clone(&provider), &config.search, "");

        let mut app = Self {
            home: HomePage::new(config.ui.home_coins),
            list: ListPage::new(config.ui.list_coins),
            details: DetailsPage::new(""),
            compare: ComparePage::new(&config.compare, config.ui.compare_coins),
            input: InputState::new(Route::Home),
            nav_search,
            search_page,
            provider,
            config,
            event_tx,
            event_rx,
            last_area: Rect::default(),
            should_quit: false,
        };
        if start != Route::Home {
            app.input.navigate(start);
        }
        app.open_route();
        app
    }

    /// Start the comparison with these coins instead of the configured ones
    pub fn compare_with(mut self, ids: Vec<String>) -> Self {
        if !ids.is_empty() {
            self.compare.replace_selection(ids);
            self.open_route();
        }
        self
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = self.config.ui.tick_rate();
        info!("Starting on {}", self.input.route.title());

        // Main loop
        let result = loop {
            self.tick();

            match terminal.draw(|f| self.draw(f)) {
                Ok(frame) => self.last_area = frame.area,
                Err(e) => break Err(e.into()),
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key)
                    }
                    Ok(Event::Mouse(mouse)) => self.handle_mouse(mouse),
                    Ok(_) => {}
                    Err(e) => break Err(e.into()),
                },
                Ok(false) => {}
                Err(e) => break Err(e.into()),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    /// Apply everything that finished since the last frame
    fn tick(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.event_rx.try_recv() {
            changed |= self.handle_page_event(event);
        }
        changed |= self.nav_search.poll();
        changed |= self.search_page.poll();
        changed
    }

    fn handle_page_event(&mut self, event: PageEvent) -> bool {
        let applied = match event {
            PageEvent::HomeCoins(loaded) => self.home.apply(loaded),
            PageEvent::ListCoins(loaded) => self.list.apply(loaded),
            PageEvent::Detail(loaded) => self.details.apply_detail(loaded),
            PageEvent::DetailHistory(loaded) => self.details.apply_history(loaded),
            PageEvent::CompareCoins(loaded) => self.compare.apply_coins(loaded),
            PageEvent::CompareChart(loaded) => self.compare.apply_chart(loaded),
        };
        if !applied {
            debug!("Dropped superseded page result");
        }
        applied
    }

    /// Run a fetch in the background and deliver its result to the loop
    fn spawn<F, Fut>(&self, fetch: F)
    where
        F: FnOnce(Arc<dyn MarketDataProvider>) -> Fut,
        Fut: Future<Output = PageEvent> + Send + 'static,
    {
        let task = fetch(Arc::clone(&self.provider));
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            if tx.send(task.await).await.is_err() {
                debug!("UI loop gone, dropping page result");
            }
        });
    }

    fn load_home(&mut self) {
        let request = self.home.request();
        self.spawn(move |p| async move {
            PageEvent::HomeCoins(fetch_coins(p.as_ref(), request).await)
        });
    }

    fn load_list(&mut self) {
        let request = self.list.request();
        self.spawn(move |p| async move {
            PageEvent::ListCoins(fetch_coins(p.as_ref(), request).await)
        });
    }

    fn load_details(&mut self, id: &str) {
        self.details.show(id);
        let (detail, history) = self.details.request();
        self.spawn(move |p| async move {
            PageEvent::Detail(details::fetch_detail(p.as_ref(), detail).await)
        });
        self.spawn(move |p| async move {
            PageEvent::DetailHistory(details::fetch_history(p.as_ref(), history).await)
        });
    }

    fn load_history(&mut self, request: details::HistoryRequest) {
        self.spawn(move |p| async move {
            PageEvent::DetailHistory(details::fetch_history(p.as_ref(), request).await)
        });
    }

    fn load_compare_coins(&mut self) {
        let request = self.compare.request_coins();
        self.spawn(move |p| async move {
            PageEvent::CompareCoins(fetch_coins(p.as_ref(), request).await)
        });
    }

    fn load_chart(&mut self, request: Option<compare::ChartRequest>) {
        if let Some(request) = request {
            self.spawn(move |p| async move {
                PageEvent::CompareChart(compare::fetch_chart(p.as_ref(), request).await)
            });
        }
    }

    /// Trigger whatever the current route still needs
    fn open_route(&mut self) {
        match self.input.route.clone() {
            Route::Home => {
                if needs_load(self.home.coins()) {
                    self.load_home();
                }
            }
            Route::Coins => {
                if needs_load(self.list.coins()) {
                    self.load_list();
                }
            }
            Route::Coin(id) => {
                if self.details.id() != id || needs_load(self.details.detail()) {
                    self.load_details(&id);
                }
            }
            Route::Compare => {
                if needs_load(self.compare.coins()) {
                    self.load_compare_coins();
                }
                if needs_load(self.compare.chart()) {
                    let request = self.compare.request_chart();
                    self.load_chart(request);
                }
            }
            Route::Search(query) => {
                if !query.is_empty() && query != self.search_page.search().query() {
                    self.search_page.search_mut().set_query(&query);
                }
            }
        }
    }

    fn navigate(&mut self, route: Route) {
        self.input.clear_notice();
        if self.input.navigate(route) {
            debug!("Navigated to {}", self.input.route.title());
            self.open_route();
        }
    }

    fn back(&mut self) {
        self.input.clear_notice();
        if self.input.back() {
            self.open_route();
        }
    }

    fn toggle_compare(&mut self, id: &str) {
        match self.compare.toggle(id) {
            Ok(request) => {
                let name = self.compare.display_name(id);
                let notice = if self.compare.selection().contains(id) {
                    format!("Added {} to comparison", name)
                } else {
                    format!("Removed {} from comparison", name)
                };
                self.input.set_notice(notice);
                self.load_chart(request);
            }
            Err(e) => {
                warn!("Cannot toggle {}: {}", id, e);
                self.input.set_notice(e.to_string());
            }
        }
    }

    fn open_coin(&mut self, id: String) {
        self.navigate(Route::Coin(id));
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input.mode {
            InputMode::Help => self.input.close(),
            InputMode::Editing(TextTarget::NavSearch) => self.handle_nav_search_key(key),
            InputMode::Editing(TextTarget::ListFilter) => match key.code {
                KeyCode::Char(c) => self.list.push_filter_char(c),
                KeyCode::Backspace => self.list.pop_filter_char(),
                KeyCode::Enter | KeyCode::Esc => self.input.close(),
                _ => {}
            },
            InputMode::Editing(TextTarget::SearchPage) => match key.code {
                KeyCode::Char(c) => self.search_page.search_mut().push_char(c),
                KeyCode::Backspace => self.search_page.search_mut().backspace(),
                KeyCode::Enter | KeyCode::Esc | KeyCode::Down => self.input.close(),
                _ => {}
            },
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_nav_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.nav_search.blur();
                self.input.close();
            }
            KeyCode::Enter => {
                let target = match self.nav_search.selected_result() {
                    Some(result) if self.nav_search.is_open() => {
                        Some(Route::Coin(result.id.clone()))
                    }
                    _ => {
                        let query = self.nav_search.query().trim();
                        (!query.is_empty()).then(|| Route::Search(query.to_string()))
                    }
                };
                if let Some(route) = target {
                    self.nav_search.clear();
                    self.input.close();
                    self.navigate(route);
                }
            }
            KeyCode::Down => self.nav_search.select_next(),
            KeyCode::Up => self.nav_search.select_prev(),
            KeyCode::Backspace => self.nav_search.backspace(),
            KeyCode::Char(c) => self.nav_search.push_char(c),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.input.show_help();
                return;
            }
            KeyCode::Char('/') => {
                self.input.start_editing(TextTarget::NavSearch);
                self.nav_search.focus();
                return;
            }
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(route) = Route::from_shortcut(c) {
                    self.navigate(route);
                }
                return;
            }
            KeyCode::Esc | KeyCode::Backspace => {
                self.back();
                return;
            }
            _ => {}
        }

        match self.input.route.clone() {
            Route::Home => match key.code {
                KeyCode::Down => self.home.select_next(),
                KeyCode::Up => self.home.select_prev(),
                KeyCode::Enter => {
                    if let Some(coin) = self.home.selected_coin() {
                        let id = coin.id.clone();
                        self.open_coin(id);
                    }
                }
                KeyCode::Char(' ') => {
                    if let Some(id) = self.home.selected_coin().map(|c| c.id.clone()) {
                        self.toggle_compare(&id);
                    }
                }
                _ => {}
            },
            Route::Coins => match key.code {
                KeyCode::Down => self.list.select_next(),
                KeyCode::Up => self.list.select_prev(),
                KeyCode::Enter => {
                    if let Some(coin) = self.list.selected_coin() {
                        let id = coin.id.clone();
                        self.open_coin(id);
                    }
                }
                KeyCode::Char('f') => self.input.start_editing(TextTarget::ListFilter),
                KeyCode::Char('s') => self.list.cycle_sort(),
                KeyCode::Char('r') => {
                    let (key, _) = self.list.sort();
                    self.list.sort_by(key);
                }
                KeyCode::Char(' ') => {
                    if let Some(id) = self.list.selected_coin().map(|c| c.id.clone()) {
                        self.toggle_compare(&id);
                    }
                }
                _ => {}
            },
            Route::Coin(id) => match key.code {
                KeyCode::Left | KeyCode::Right => {
                    let current = self.details.timeframe();
                    let next = if key.code == KeyCode::Right {
                        current.next()
                    } else {
                        current.prev()
                    };
                    if let Some(request) = self.details.set_timeframe(next) {
                        self.load_history(request);
                    }
                }
                KeyCode::Char(' ') => self.toggle_compare(&id),
                _ => {}
            },
            Route::Compare => match key.code {
                KeyCode::Down => self.compare.cursor_next(),
                KeyCode::Up => self.compare.cursor_prev(),
                KeyCode::Enter => {
                    if let Some(id) = self.compare.cursor_coin().map(|c| c.id.clone()) {
                        self.open_coin(id);
                    }
                }
                KeyCode::Char(' ') => {
                    if let Some(id) = self.compare.cursor_coin().map(|c| c.id.clone()) {
                        self.toggle_compare(&id);
                    }
                }
                KeyCode::Left | KeyCode::Right => {
                    let current = self.compare.timeframe();
                    let next = if key.code == KeyCode::Right {
                        current.next()
                    } else {
                        current.prev()
                    };
                    let request = self.compare.set_timeframe(next);
                    self.load_chart(request);
                }
                _ => {}
            },
            Route::Search(_) => match (self.search_page.status(), key.code) {
                (_, KeyCode::Char('e')) => {
                    self.input.start_editing(TextTarget::SearchPage)
                }
                (SearchStatus::Results, KeyCode::Down) => {
                    self.search_page.search_mut().select_next()
                }
                (SearchStatus::Results, KeyCode::Up) => {
                    self.search_page.search_mut().select_prev()
                }
                (SearchStatus::Results, KeyCode::Enter) => {
                    if let Some(result) = self.search_page.search().selected_result() {
                        let id = result.id.clone();
                        self.open_coin(id);
                    }
                }
                (SearchStatus::Prompt, KeyCode::Right) => self.search_page.next_suggestion(),
                (SearchStatus::Prompt, KeyCode::Left) => self.search_page.prev_suggestion(),
                (SearchStatus::Prompt, KeyCode::Enter) => self.search_page.use_suggestion(),
                _ => {}
            },
        }
    }

    /// Where the navigation dropdown is drawn, if it is showing
    fn dropdown_area(&self, screen: &Screen) -> Option<Rect> {
        let showing = self.nav_search.is_open()
            || (self.input.is_editing(TextTarget::NavSearch) && self.nav_search.is_loading());
        if !showing {
            return None;
        }
        let dropdown = SearchDropdown::new(self.nav_search.results(), 0, false);
        let bottom = screen.notice.y;
        let y = screen.search_box.bottom();
        let height = dropdown.height().min(bottom.saturating_sub(y));
        Some(Rect::new(
            screen.search_box.x,
            y,
            screen.search_box.width,
            height,
        ))
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);
        let screen = screen_layout(self.last_area);

        if screen.search_box.contains(position) {
            self.input.start_editing(TextTarget::NavSearch);
            self.nav_search.focus();
            return;
        }

        if let Some(dropdown) = self.dropdown_area(&screen) {
            if dropdown.contains(position) {
                let row = mouse.row.saturating_sub(dropdown.y + 1) as usize;
                if let Some(result) = self.nav_search.results().get(row) {
                    let id = result.id.clone();
                    self.nav_search.clear();
                    self.input.close();
                    self.open_coin(id);
                }
                return;
            }
        }

        // Click landed outside the search widget
        self.nav_search.blur();
        if self.input.is_editing(TextTarget::NavSearch) {
            self.input.close();
        }
    }

    fn draw(&self, f: &mut Frame) {
        let screen = screen_layout(f.area());

        f.render_widget(NavBar::new(&self.input.route), screen.nav);
        f.render_widget(
            SearchBox::new(
                self.nav_search.query(),
                self.input.is_editing(TextTarget::NavSearch),
            )
            .placeholder("/ search coins")
            .loading(self.nav_search.is_loading()),
            screen.search_box,
        );

        let state = ViewState {
            input: &self.input,
            home: &self.home,
            list: &self.list,
            details: &self.details,
            compare: &self.compare,
            search: &self.search_page,
        };
        match self.input.route {
            Route::Home => HomeView::new().render(f, screen.content, &state),
            Route::Coins => ListView::new().render(f, screen.content, &state),
            Route::Coin(_) => DetailsView::new().render(f, screen.content, &state),
            Route::Compare => CompareView::new().render(f, screen.content, &state),
            Route::Search(_) => SearchView::new().render(f, screen.content, &state),
        }

        f.render_widget(
            NoticeLine::new(self.input.notice(), self.input.can_go_back()),
            screen.notice,
        );

        if let Some(area) = self.dropdown_area(&screen) {
            f.render_widget(
                SearchDropdown::new(
                    self.nav_search.results(),
                    self.nav_search.selected(),
                    self.nav_search.is_loading(),
                ),
                area,
            );
        }

        if self.input.is_help() {
            f.render_widget(HelpOverlay::new(), f.area());
        }
    }
}

/// Nothing usable yet and no request in flight
fn needs_load<T>(remote: &Remote<T>) -> bool {
    matches!(remote, Remote::Idle | Remote::Unavailable)
}
