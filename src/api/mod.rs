pub mod models;
pub mod rest;

#[cfg(test)]
pub mod mock;

pub use rest::{CoinGeckoClient, DEFAULT_BASE_URL};

use crate::data::{CoinDetail, CoinSummary, PriceSeries, SearchResult};
use async_trait::async_trait;

/// Read-only market data source.
///
/// Every operation resolves to a usable value: failures are logged by the
/// implementation and surface to callers only as "no data" (an empty list,
/// `None`, or an empty series).
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Up to `limit` coins ordered by descending market cap
    async fn list_coins(&self, limit: u32) -> Vec<CoinSummary>;

    async fn coin_details(&self, id: &str) -> Option<CoinDetail>;

    /// History over the last `days` days
    async fn price_history(&self, id: &str, days: u32) -> PriceSeries;

    /// Matches in provider order, unbounded
    async fn search_coins(&self, query: &str) -> Vec<SearchResult>;
}
