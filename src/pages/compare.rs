use super::{step_cursor, CoinsRequest, Loaded, Remote};
use crate::api::MarketDataProvider;
use crate::compare::{
    load_comparison, ComparedCoin, ComparisonChart, ComparisonSelection, SelectionError,
    PALETTE,
};
use crate::config::CompareConfig;
use crate::data::{CoinSummary, Timeframe};
use crate::freshness::{RequestSequence, RequestToken};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub token: RequestToken,
    pub coins: Vec<ComparedCoin>,
    pub timeframe: Timeframe,
    pub target_points: usize,
}

pub async fn fetch_chart(
    provider: &dyn MarketDataProvider,
    request: ChartRequest,
) -> Loaded<ComparisonChart> {
    let chart = load_comparison(
        provider,
        &request.coins,
        request.timeframe,
        request.target_points,
    )
    .await;
    Loaded {
        token: request.token,
        data: chart,
    }
}

/// Side-by-side price history for a handful of coins
#[derive(Debug)]
pub struct ComparePage {
    coin_limit: u32,
    target_points: usize,
    coins: Remote<Vec<CoinSummary>>,
    cursor: usize,
    selection: ComparisonSelection,
    timeframe: Timeframe,
    chart: Remote<ComparisonChart>,
    coins_sequence: RequestSequence,
    chart_sequence: RequestSequence,
}

impl ComparePage {
    pub fn new(config: &CompareConfig, coin_limit: u32) -> Self {
        Self {
            coin_limit,
            target_points: config.target_points,
            coins: Remote::Idle,
            cursor: 0,
            // One palette colour per line
            selection: ComparisonSelection::from_ids(
                config.default_selection.iter().cloned(),
                config.max_selection.clamp(1, PALETTE.len()),
            ),
            timeframe: Timeframe::ThirtyDays,
            chart: Remote::Idle,
            coins_sequence: RequestSequence::new(),
            chart_sequence: RequestSequence::new(),
        }
    }

    /// Replace the default selection, e.g. from the command line
    pub fn with_selection<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = ComparisonSelection::from_ids(ids, self.selection.max());
        self
    }

    /// Swap in a new selection, dropping any chart still loading for the old one
    pub fn replace_selection<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = ComparisonSelection::from_ids(ids, self.selection.max());
        self.chart_sequence.invalidate();
        self.chart = Remote::Idle;
    }

    pub fn coins(&self) -> &Remote<Vec<CoinSummary>> {
        &self.coins
    }

    pub fn selection(&self) -> &ComparisonSelection {
        &self.selection
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn chart(&self) -> &Remote<ComparisonChart> {
        &self.chart
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_coin(&self) -> Option<&CoinSummary> {
        self.coins.ready().and_then(|c| c.get(self.cursor))
    }

    pub fn cursor_next(&mut self) {
        let len = self.coins.ready().map(Vec::len).unwrap_or(0);
        self.cursor = step_cursor(self.cursor, len, true);
    }

    pub fn cursor_prev(&mut self) {
        let len = self.coins.ready().map(Vec::len).unwrap_or(0);
        self.cursor = step_cursor(self.cursor, len, false);
    }

    pub fn request_coins(&mut self) -> CoinsRequest {
        self.coins = Remote::Loading;
        CoinsRequest {
            token: self.coins_sequence.issue(),
            limit: self.coin_limit,
        }
    }

    pub fn apply_coins(&mut self, loaded: Loaded<Vec<CoinSummary>>) -> bool {
        if !self.coins_sequence.is_current(loaded.token) {
            return false;
        }
        self.coins = if loaded.data.is_empty() {
            Remote::Unavailable
        } else {
            Remote::Ready(loaded.data)
        };
        self.cursor = 0;
        self.relabel_chart();
        true
    }

    /// Name chart lines after the loaded coins; a chart requested before the
    /// list arrived only knows ids.
    fn relabel_chart(&mut self) {
        let Remote::Ready(coins) = &self.coins else {
            return;
        };
        let Remote::Ready(chart) = &mut self.chart else {
            return;
        };
        for dataset in &mut chart.datasets {
            if let Some(coin) = coins.iter().find(|c| c.id == dataset.id) {
                dataset.label = coin.name.clone();
            }
        }
    }

    /// Display name for `id`, falling back to the id itself
    pub fn display_name(&self, id: &str) -> String {
        self.coins
            .ready()
            .and_then(|coins| coins.iter().find(|c| c.id == id))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Rebuild the chart for the current selection and timeframe.
    ///
    /// An empty selection clears the chart and cancels any load in flight.
    pub fn request_chart(&mut self) -> Option<ChartRequest> {
        if self.selection.is_empty() {
            self.chart_sequence.invalidate();
            self.chart = Remote::Idle;
            return None;
        }
        self.chart = Remote::Loading;
        let coins = self
            .selection
            .ids()
            .iter()
            .map(|id| ComparedCoin::new(id.clone(), self.display_name(id)))
            .collect();
        Some(ChartRequest {
            token: self.chart_sequence.issue(),
            coins,
            timeframe: self.timeframe,
            target_points: self.target_points,
        })
    }

    /// Add or remove a coin, then rebuild the chart
    pub fn toggle(&mut self, id: &str) -> Result<Option<ChartRequest>, SelectionError> {
        let selected = self.selection.toggle(id)?;
        info!(
            "{} {} for comparison",
            if selected { "Selected" } else { "Deselected" },
            id
        );
        Ok(self.request_chart())
    }

    pub fn toggle_cursor(&mut self) -> Result<Option<ChartRequest>, SelectionError> {
        match self.cursor_coin().map(|c| c.id.clone()) {
            Some(id) => self.toggle(&id),
            None => Ok(None),
        }
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> Option<ChartRequest> {
        if timeframe == self.timeframe {
            return None;
        }
        self.timeframe = timeframe;
        self.request_chart()
    }

    pub fn apply_chart(&mut self, loaded: Loaded<ComparisonChart>) -> bool {
        if !self.chart_sequence.is_current(loaded.token) {
            return false;
        }
        self.chart = if loaded.data.labels.is_empty() {
            Remote::Unavailable
        } else {
            Remote::Ready(loaded.data)
        };
        self.relabel_chart();
        true
    }
}
