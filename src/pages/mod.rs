//! Per-page view models.
//!
//! Every load goes through three steps: `request` stamps a token and marks
//! the page loading, an async `fetch` runs against the provider, and `apply`
//! commits the result only if its token is still current. The app spawns
//! the fetch and routes the result back through a [`PageEvent`].

pub mod compare;
pub mod details;
pub mod home;
pub mod list;
pub mod search;

pub use compare::{ChartRequest, ComparePage};
pub use details::{DetailRequest, DetailsPage, HistoryRequest, StatRow};
pub use home::HomePage;
pub use list::{ListPage, SortDirection, SortKey};
pub use search::SearchPage;

use crate::api::MarketDataProvider;
use crate::chart::ChartSeries;
use crate::compare::ComparisonChart;
use crate::data::{CoinDetail, CoinSummary};
use crate::freshness::RequestToken;

/// Lifecycle of one remotely loaded value
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Remote<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// The request settled without usable data
    Unavailable,
}

impl<T> Remote<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Remote::Unavailable)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Remote::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// A fetch result stamped with the token it was requested under
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub token: RequestToken,
    pub data: T,
}

/// Market listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinsRequest {
    pub token: RequestToken,
    pub limit: u32,
}

pub async fn fetch_coins(
    provider: &dyn MarketDataProvider,
    request: CoinsRequest,
) -> Loaded<Vec<CoinSummary>> {
    Loaded {
        token: request.token,
        data: provider.list_coins(request.limit).await,
    }
}

/// Results delivered back to the UI loop
#[derive(Debug, Clone)]
pub enum PageEvent {
    HomeCoins(Loaded<Vec<CoinSummary>>),
    ListCoins(Loaded<Vec<CoinSummary>>),
    Detail(Loaded<Option<CoinDetail>>),
    DetailHistory(Loaded<ChartSeries>),
    CompareCoins(Loaded<Vec<CoinSummary>>),
    CompareChart(Loaded<ComparisonChart>),
}

/// Wrap-around cursor movement over `len` rows
pub(crate) fn step_cursor(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (cursor + 1) % len
    } else {
        (cursor + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_cursor() {
        assert_eq!(step_cursor(0, 0, true), 0);
        assert_eq!(step_cursor(2, 3, true), 0);
        assert_eq!(step_cursor(0, 3, false), 2);
    }

    #[test]
    fn test_remote_accessors() {
        let loading: Remote<u8> = Remote::Loading;
        assert!(loading.is_loading());
        assert_eq!(loading.ready(), None);
        assert_eq!(Remote::Ready(3).ready(), Some(&3));
        assert!(Remote::<u8>::Unavailable.is_unavailable());
    }
}
