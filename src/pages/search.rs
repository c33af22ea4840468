use super::step_cursor;
use crate::api::MarketDataProvider;
use crate::config::SearchConfig;
use crate::search::{SearchController, SearchOptions, SearchState};
use std::sync::Arc;

/// Terms offered before anything has been typed
pub const SUGGESTIONS: [&str; 4] = ["Bitcoin", "Ethereum", "Cardano", "Solana"];

/// Shortcuts shown under the results: `(id, name, ticker)`
pub const POPULAR: [(&str, &str, &str); 6] = [
    ("bitcoin", "Bitcoin", "BTC"),
    ("ethereum", "Ethereum", "ETH"),
    ("ripple", "XRP", "XRP"),
    ("cardano", "Cardano", "ADA"),
    ("solana", "Solana", "SOL"),
    ("dogecoin", "Dogecoin", "DOGE"),
];

/// What the results area should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Query too short: show suggestions
    Prompt,
    Searching,
    Results,
    NoResults,
}

/// Full-page search with unbounded results
pub struct SearchPage {
    search: SearchController,
    suggestion: usize,
}

impl SearchPage {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        config: &SearchConfig,
        initial_query: &str,
    ) -> Self {
        let mut search = SearchController::new(provider, SearchOptions::full_page(config));
        search.set_query(initial_query);
        Self {
            search,
            suggestion: 0,
        }
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchController {
        &mut self.search
    }

    pub fn status(&self) -> SearchStatus {
        match self.search.state() {
            SearchState::Idle => SearchStatus::Prompt,
            SearchState::Searching => SearchStatus::Searching,
            SearchState::Ready(results) if results.is_empty() => SearchStatus::NoResults,
            SearchState::Ready(_) => SearchStatus::Results,
        }
    }

    pub fn suggestion(&self) -> usize {
        self.suggestion
    }

    pub fn next_suggestion(&mut self) {
        self.suggestion = step_cursor(self.suggestion, SUGGESTIONS.len(), true);
    }

    pub fn prev_suggestion(&mut self) {
        self.suggestion = step_cursor(self.suggestion, SUGGESTIONS.len(), false);
    }

    /// Search for the highlighted suggestion term
    pub fn use_suggestion(&mut self) {
        if let Some(term) = SUGGESTIONS.get(self.suggestion) {
            self.search.set_query(term);
        }
    }

    /// Apply any search results that have arrived
    pub fn poll(&mut self) -> bool {
        self.search.poll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{search_hit, MockProvider};

    fn page(provider: &Arc<MockProvider>, query: &str) -> SearchPage {
        SearchPage::new(provider.clone(), &SearchConfig::default(), query)
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_query_searches() {
        let provider = Arc::new(
            MockProvider::new().with_search_results((0..12).map(search_hit).collect()),
        );
        let mut page = page(&provider, "bitcoin");

        page.search_mut().wait().await;
        assert_eq!(page.status(), SearchStatus::Searching);
        page.search_mut().wait().await;
        assert_eq!(page.status(), SearchStatus::Results);
        assert_eq!(page.search().results().len(), 12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_characters_search_on_full_page() {
        let provider = Arc::new(MockProvider::new());
        let mut page = page(&provider, "");
        assert_eq!(page.status(), SearchStatus::Prompt);

        page.search_mut().set_query("sh");
        page.search_mut().wait().await;
        page.search_mut().wait().await;
        assert_eq!(provider.queries(), vec!["sh"]);
        assert_eq!(page.status(), SearchStatus::NoResults);
    }

    #[tokio::test(start_paused = true)]
    async fn test_suggestion_sets_query() {
        let provider = Arc::new(MockProvider::new());
        let mut page = page(&provider, "");

        page.prev_suggestion();
        assert_eq!(page.suggestion(), 3);
        page.use_suggestion();
        assert_eq!(page.search().query(), "Solana");

        page.search_mut().wait().await;
        page.search_mut().wait().await;
        assert_eq!(provider.queries(), vec!["Solana"]);
    }
}
