use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single `(timestamp, value)` sample. Timestamps are milliseconds since
/// the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: i64,
    pub value: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Historical market data for one coin, ascending by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub prices: Vec<PricePoint>,
    pub market_caps: Vec<PricePoint>,
    pub total_volumes: Vec<PricePoint>,
}

impl PriceSeries {
    /// The well-formed "no data" value returned when a fetch fails
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_prices(prices: Vec<PricePoint>) -> Self {
        Self {
            prices,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().map(|p| p.value)
    }

    /// Price of the latest sample at or before `timestamp`.
    ///
    /// Returns `None` when the series starts after `timestamp`.
    pub fn price_at_or_before(&self, timestamp: i64) -> Option<f64> {
        let idx = self.prices.partition_point(|p| p.timestamp <= timestamp);
        idx.checked_sub(1).map(|i| self.prices[i].value)
    }

    /// Lowest and highest price in the series
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.prices.iter().map(|p| p.value);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}
