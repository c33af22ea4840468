use super::{Loaded, Remote};
use crate::api::MarketDataProvider;
use crate::chart::{downsample, ChartSeries};
use crate::data::{CoinDetail, Timeframe};
use crate::format;
use crate::freshness::{RequestSequence, RequestToken};
use tracing::debug;

/// One labeled statistic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub name: &'static str,
    pub value: String,
}

impl StatRow {
    fn new(name: &'static str, value: String) -> Self {
        Self { name, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub token: RequestToken,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub token: RequestToken,
    pub id: String,
    pub timeframe: Timeframe,
}

pub async fn fetch_detail(
    provider: &dyn MarketDataProvider,
    request: DetailRequest,
) -> Loaded<Option<CoinDetail>> {
    Loaded {
        token: request.token,
        data: provider.coin_details(&request.id).await,
    }
}

/// Fetch the history and reduce it to chart points for the timeframe
pub async fn fetch_history(
    provider: &dyn MarketDataProvider,
    request: HistoryRequest,
) -> Loaded<ChartSeries> {
    let series = provider
        .price_history(&request.id, request.timeframe.days())
        .await;
    Loaded {
        token: request.token,
        data: downsample(&series, request.timeframe),
    }
}

/// One coin: statistics, about text, links and a price chart
#[derive(Debug)]
pub struct DetailsPage {
    id: String,
    timeframe: Timeframe,
    detail: Remote<CoinDetail>,
    history: Remote<ChartSeries>,
    detail_sequence: RequestSequence,
    history_sequence: RequestSequence,
}

impl DetailsPage {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timeframe: Timeframe::SevenDays,
            detail: Remote::Idle,
            history: Remote::Idle,
            detail_sequence: RequestSequence::new(),
            history_sequence: RequestSequence::new(),
        }
    }

    /// Switch to another coin. Results still in flight for the previous
    /// coin are dropped.
    pub fn show(&mut self, id: impl Into<String>) {
        self.id = id.into();
        self.timeframe = Timeframe::SevenDays;
        self.detail = Remote::Idle;
        self.history = Remote::Idle;
        self.detail_sequence.invalidate();
        self.history_sequence.invalidate();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn detail(&self) -> &Remote<CoinDetail> {
        &self.detail
    }

    pub fn history(&self) -> &Remote<ChartSeries> {
        &self.history
    }

    /// Load the detail record and the history for the current timeframe
    pub fn request(&mut self) -> (DetailRequest, HistoryRequest) {
        self.detail = Remote::Loading;
        let detail = DetailRequest {
            token: self.detail_sequence.issue(),
            id: self.id.clone(),
        };
        (detail, self.request_history())
    }

    pub fn request_history(&mut self) -> HistoryRequest {
        self.history = Remote::Loading;
        HistoryRequest {
            token: self.history_sequence.issue(),
            id: self.id.clone(),
            timeframe: self.timeframe,
        }
    }

    /// Switch timeframe. Returns the history request to run, if it changed.
    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> Option<HistoryRequest> {
        if timeframe == self.timeframe {
            return None;
        }
        self.timeframe = timeframe;
        Some(self.request_history())
    }

    pub fn apply_detail(&mut self, loaded: Loaded<Option<CoinDetail>>) -> bool {
        if !self.detail_sequence.is_current(loaded.token) {
            return false;
        }
        self.detail = match loaded.data {
            Some(detail) => Remote::Ready(detail),
            None => Remote::Unavailable,
        };
        true
    }

    pub fn apply_history(&mut self, loaded: Loaded<ChartSeries>) -> bool {
        if !self.history_sequence.is_current(loaded.token) {
            debug!("Dropping stale history for {}", self.id);
            return false;
        }
        self.history = if loaded.data.is_empty() {
            Remote::Unavailable
        } else {
            Remote::Ready(loaded.data)
        };
        true
    }

    pub fn general_stats(&self) -> Vec<StatRow> {
        let Some(detail) = self.detail.ready() else {
            return Vec::new();
        };
        let s = &detail.summary;
        let m = &detail.market;
        vec![
            StatRow::new("Rank", format::rank(s.rank)),
            StatRow::new("Current Price", format::usd(s.price)),
            StatRow::new("Market Cap", format::usd(s.market_cap)),
            StatRow::new("24h Trading Volume", format::usd(m.total_volume)),
            StatRow::new("All-Time High", format::usd(m.ath)),
            StatRow::new("ATH Date", format::date(m.ath_date)),
        ]
    }

    pub fn additional_stats(&self) -> Vec<StatRow> {
        let Some(detail) = self.detail.ready() else {
            return Vec::new();
        };
        let m = &detail.market;
        let ticker = detail.summary.ticker();
        vec![
            StatRow::new("Price Change (24h)", format::percent(m.change_24h)),
            StatRow::new("Price Change (7d)", format::percent(m.change_7d)),
            StatRow::new("Price Change (30d)", format::percent(m.change_30d)),
            StatRow::new("Price Change (1y)", format::percent(m.change_1y)),
            StatRow::new("Circulating Supply", format::supply(m.circulating_supply, &ticker)),
            StatRow::new("Total Supply", format::supply(m.total_supply, &ticker)),
        ]
    }

    pub fn about(&self) -> Option<&str> {
        self.detail
            .ready()
            .map(|d| d.description.as_str())
            .filter(|d| !d.is_empty())
    }

    pub fn links(&self) -> Vec<(String, String)> {
        self.detail
            .ready()
            .map(|d| d.links.labeled())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{coin, hourly_series, MockProvider};
    use crate::data::{CoinLinks, MarketMetrics};
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::time::Duration;

    fn bitcoin() -> CoinDetail {
        let mut summary = coin("bitcoin", "Bitcoin", "btc", 1);
        summary.price = Some(dec!(43250.5));
        summary.market_cap = Some(dec!(850000000000));
        CoinDetail {
            summary,
            description: "Peer-to-peer cash.".to_string(),
            market: MarketMetrics {
                total_volume: Some(dec!(21000000000)),
                change_24h: Some(dec!(2.346)),
                circulating_supply: Some(dec!(19600000)),
                ..MarketMetrics::default()
            },
            links: CoinLinks {
                homepage: Some("https://bitcoin.org".into()),
                ..CoinLinks::default()
            },
        }
    }

    fn provider() -> MockProvider {
        let values: Vec<f64> = (0..169).map(|i| 40_000.0 + i as f64).collect();
        MockProvider::new()
            .with_detail(bitcoin())
            .with_history("bitcoin", hourly_series(1_704_067_200_000, &values))
    }

    #[tokio::test]
    async fn test_loads_detail_and_history() {
        let provider = provider();
        let mut page = DetailsPage::new("bitcoin");
        assert_eq!(page.timeframe(), Timeframe::SevenDays);

        let (detail, history) = page.request();
        assert!(page.detail().is_loading());
        assert!(page.apply_detail(fetch_detail(&provider, detail).await));
        assert!(page.apply_history(fetch_history(&provider, history).await));

        // 169 hourly points at stride 24
        assert_eq!(page.history().ready().map(ChartSeries::len), Some(8));
        assert_eq!(page.about(), Some("Peer-to-peer cash."));
        assert_eq!(page.links()[0].0, "Official Website");
    }

    #[tokio::test]
    async fn test_stats_fall_back_to_na() {
        let provider = provider();
        let mut page = DetailsPage::new("bitcoin");
        let (detail, _) = page.request();
        page.apply_detail(fetch_detail(&provider, detail).await);

        let general = page.general_stats();
        assert_eq!(general[0], StatRow::new("Rank", "#1".into()));
        assert_eq!(general[1].value, "$43,250.50");
        assert_eq!(general[4].value, "N/A");
        assert_eq!(general[5].value, "N/A");

        let additional = page.additional_stats();
        assert_eq!(additional[0].value, "+2.35%");
        assert_eq!(additional[3].value, "N/A");
        assert_eq!(additional[4].value, "19,600,000 BTC");
    }

    #[tokio::test]
    async fn test_missing_coin_is_unavailable() {
        let provider = MockProvider::new();
        let mut page = DetailsPage::new("nope");
        let (detail, history) = page.request();
        page.apply_detail(fetch_detail(&provider, detail).await);
        page.apply_history(fetch_history(&provider, history).await);

        assert!(page.detail().is_unavailable());
        assert!(page.history().is_unavailable());
        assert!(page.general_stats().is_empty());
    }

    #[tokio::test]
    async fn test_switching_coin_drops_previous_results() {
        let provider = provider();
        let mut page = DetailsPage::new("bitcoin");
        let (detail, history) = page.request();

        page.show("ethereum");
        assert_eq!(page.id(), "ethereum");
        assert!(!page.apply_detail(fetch_detail(&provider, detail).await));
        assert!(!page.apply_history(fetch_history(&provider, history).await));
        assert_eq!(page.detail(), &Remote::Idle);
    }

    #[test]
    fn test_same_timeframe_is_noop() {
        let mut page = DetailsPage::new("bitcoin");
        assert!(page.set_timeframe(Timeframe::SevenDays).is_none());
        let request = page.set_timeframe(Timeframe::OneDay);
        assert_eq!(request.map(|r| r.timeframe), Some(Timeframe::OneDay));
        assert!(page.history().is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_timeframe_change_keeps_latest() {
        let provider = Arc::new(provider().with_delay("bitcoin", Duration::from_secs(1)));
        let mut page = DetailsPage::new("bitcoin");

        let slow = page.request_history();
        let latest = page.set_timeframe(Timeframe::OneDay).unwrap();

        let (stale, fresh) = tokio::join!(
            fetch_history(provider.as_ref(), slow),
            fetch_history(provider.as_ref(), latest)
        );
        assert!(page.apply_history(fresh));
        assert!(!page.apply_history(stale));
        // 1d stride is 6: 169 points -> 29
        assert_eq!(page.history().ready().map(ChartSeries::len), Some(29));
    }
}
