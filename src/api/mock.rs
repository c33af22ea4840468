//! In-memory provider for exercising controllers without the network.

use super::MarketDataProvider;
use crate::data::{CoinDetail, CoinSummary, PricePoint, PriceSeries, SearchResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MockProvider {
    pub coins: Vec<CoinSummary>,
    pub details: HashMap<String, CoinDetail>,
    pub histories: HashMap<String, PriceSeries>,
    pub delays: HashMap<String, Duration>,
    pub search_results: Vec<SearchResult>,
    pub search_delay: Option<Duration>,
    search_calls: AtomicUsize,
    history_calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coins(mut self, coins: Vec<CoinSummary>) -> Self {
        self.coins = coins;
        self
    }

    pub fn with_history(mut self, id: &str, series: PriceSeries) -> Self {
        self.histories.insert(id.to_string(), series);
        self
    }

    pub fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    pub fn with_detail(mut self, detail: CoinDetail) -> Self {
        self.details.insert(detail.summary.id.clone(), detail);
        self
    }

    pub fn with_search_results(mut self, results: Vec<SearchResult>) -> Self {
        self.search_results = results;
        self
    }

    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = Some(delay);
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn list_coins(&self, limit: u32) -> Vec<CoinSummary> {
        self.coins.iter().take(limit as usize).cloned().collect()
    }

    async fn coin_details(&self, id: &str) -> Option<CoinDetail> {
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        self.details.get(id).cloned()
    }

    async fn price_history(&self, id: &str, _days: u32) -> PriceSeries {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        self.histories.get(id).cloned().unwrap_or_default()
    }

    async fn search_coins(&self, query: &str) -> Vec<SearchResult> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut q) = self.queries.lock() {
            q.push(query.to_string());
        }
        if let Some(delay) = self.search_delay {
            tokio::time::sleep(delay).await;
        }
        self.search_results.clone()
    }
}

pub fn coin(id: &str, name: &str, symbol: &str, rank: u32) -> CoinSummary {
    CoinSummary {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        rank: Some(rank),
        price: None,
        market_cap: None,
        total_volume: None,
        change_24h: None,
        image: String::new(),
    }
}

pub fn search_hit(i: usize) -> SearchResult {
    SearchResult {
        id: format!("coin-{}", i),
        name: format!("Coin {}", i),
        symbol: format!("C{}", i),
        thumb: String::new(),
        rank: Some(i as u32 + 1),
    }
}

/// Hourly series starting at `start_ms`
pub fn hourly_series(start_ms: i64, values: &[f64]) -> PriceSeries {
    PriceSeries::from_prices(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| PricePoint::new(start_ms + i as i64 * 3_600_000, *v))
            .collect(),
    )
}
