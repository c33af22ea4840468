use super::debounce::Debouncer;
use crate::api::MarketDataProvider;
use crate::config::SearchConfig;
use crate::data::SearchResult;
use crate::freshness::{RequestSequence, RequestToken};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Observable state of a search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// Query too short, nothing requested
    Idle,
    /// Debounce elapsed and the request is in flight
    Searching,
    /// Results for the current query, possibly empty
    Ready(Vec<SearchResult>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub debounce: Duration,
    /// Queries with fewer characters stay idle
    pub min_chars: usize,
    /// Cap on exposed results, `None` for unbounded
    pub limit: Option<usize>,
}

impl SearchOptions {
    /// Inline dropdown in the navigation bar
    pub fn dropdown(config: &SearchConfig) -> Self {
        Self {
            debounce: config.debounce(),
            min_chars: config.dropdown_min_chars,
            limit: Some(config.dropdown_limit),
        }
    }

    /// Dedicated search page
    pub fn full_page(config: &SearchConfig) -> Self {
        Self {
            debounce: config.debounce(),
            min_chars: config.page_min_chars,
            limit: None,
        }
    }
}

#[derive(Debug)]
enum SearchEvent {
    Started(RequestToken),
    Finished {
        token: RequestToken,
        results: Vec<SearchResult>,
    },
}

/// Debounced, last-writer-wins search over a [`MarketDataProvider`].
pub struct SearchController {
    provider: Arc<dyn MarketDataProvider>,
    options: SearchOptions,
    query: String,
    state: SearchState,
    open: bool,
    selected: usize,
    debouncer: Debouncer,
    sequence: RequestSequence,
    event_tx: mpsc::UnboundedSender<SearchEvent>,
    event_rx: mpsc::UnboundedReceiver<SearchEvent>,
}

impl SearchController {
    pub fn new(provider: Arc<dyn MarketDataProvider>, options: SearchOptions) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            provider,
            debouncer: Debouncer::new(options.debounce),
            options,
            query: String::new(),
            state: SearchState::Idle,
            open: false,
            selected: 0,
            sequence: RequestSequence::new(),
            event_tx,
            event_rx,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Searching)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SearchState::Idle)
    }

    /// Whether results should be displayed (dropdown variant)
    pub fn is_open(&self) -> bool {
        self.open && !self.is_idle()
    }

    /// Current results, already bounded by the variant's limit
    pub fn results(&self) -> &[SearchResult] {
        match &self.state {
            SearchState::Ready(results) => results,
            _ => &[],
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.results().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.results().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    fn is_searchable(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.options.min_chars
    }

    /// Replace the query text.
    ///
    /// Short queries go idle immediately; anything else (re)starts the
    /// debounce timer.
    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();

        if !self.is_searchable(text) {
            self.go_idle();
            return;
        }

        let token = self.sequence.issue();
        let query = self.query.trim().to_string();
        let provider = Arc::clone(&self.provider);
        let tx = self.event_tx.clone();

        self.debouncer.schedule(async move {
            debug!("Searching for {:?}", query);
            let _ = tx.send(SearchEvent::Started(token));
            let results = provider.search_coins(&query).await;
            let _ = tx.send(SearchEvent::Finished { token, results });
        });
    }

    pub fn push_char(&mut self, c: char) {
        let mut text = self.query.clone();
        text.push(c);
        self.set_query(&text);
    }

    pub fn backspace(&mut self) {
        let mut text = self.query.clone();
        text.pop();
        self.set_query(&text);
    }

    /// Empty the query and drop results without waiting for the timer
    pub fn clear(&mut self) {
        self.query.clear();
        self.go_idle();
    }

    /// Focus left the widget: hide results but keep the query
    pub fn blur(&mut self) {
        self.open = false;
    }

    /// Focus returned: show results again if the query still qualifies
    pub fn focus(&mut self) {
        self.open = self.is_searchable(&self.query);
    }

    fn go_idle(&mut self) {
        self.debouncer.cancel();
        self.sequence.invalidate();
        self.state = SearchState::Idle;
        self.open = false;
        self.selected = 0;
    }

    fn apply(&mut self, event: SearchEvent) -> bool {
        match event {
            SearchEvent::Started(token) if self.sequence.is_current(token) => {
                self.state = SearchState::Searching;
                true
            }
            SearchEvent::Finished { token, mut results } if self.sequence.is_current(token) => {
                if let Some(limit) = self.options.limit {
                    results.truncate(limit);
                }
                debug!("Search {:?} returned {} results", self.query, results.len());
                self.state = SearchState::Ready(results);
                self.open = true;
                self.selected = 0;
                true
            }
            _ => {
                debug!("Discarding stale search event");
                false
            }
        }
    }

    /// Apply every event that has already arrived. Returns true if state
    /// changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.event_rx.try_recv() {
            changed |= self.apply(event);
        }
        changed
    }

    /// Wait for the next event and apply it. Returns true if state changed.
    #[cfg(test)]
    pub(crate) async fn wait(&mut self) -> bool {
        match self.event_rx.recv().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }
}
