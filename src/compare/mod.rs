//! Multi-coin comparison: concurrent history fetches merged onto one axis.

pub mod selection;

pub use selection::{ComparisonSelection, SelectionError};

use crate::api::MarketDataProvider;
use crate::chart::{decimate, format_label, value_bounds};
use crate::data::{PricePoint, PriceSeries, Timeframe};
use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

/// Line color as RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SeriesColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Dataset colors, cycled by selection index
pub const PALETTE: [SeriesColor; 5] = [
    SeriesColor::rgb(53, 162, 235),
    SeriesColor::rgb(255, 99, 132),
    SeriesColor::rgb(75, 192, 192),
    SeriesColor::rgb(255, 159, 64),
    SeriesColor::rgb(153, 102, 255),
];

pub fn palette_color(index: usize) -> SeriesColor {
    PALETTE[index % PALETTE.len()]
}

/// Coin to plot: id plus display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparedCoin {
    pub id: String,
    pub name: String,
}

impl ComparedCoin {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonDataset {
    pub id: String,
    pub label: String,
    pub color: SeriesColor,
    /// One slot per shared label; `None` where the coin has no data
    pub values: Vec<Option<f64>>,
}

impl ComparisonDataset {
    /// True when the coin contributed no data (e.g. its fetch failed)
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonChart {
    pub labels: Vec<String>,
    pub datasets: Vec<ComparisonDataset>,
}

impl ComparisonChart {
    pub fn bounds(&self) -> Option<(f64, f64)> {
        value_bounds(
            self.datasets
                .iter()
                .flat_map(|d| d.values.iter().filter_map(|v| *v)),
        )
    }
}

/// Stride that keeps roughly `target_points` points per line
pub fn comparison_stride(len: usize, target_points: usize) -> usize {
    (len / target_points.max(1)).max(1)
}

/// Price of `series` at `timestamp`: the latest sample at or before it, or
/// the first sample when the series starts less than one step later.
fn resample_at(series: &PriceSeries, timestamp: i64) -> Option<f64> {
    if let Some(v) = series.price_at_or_before(timestamp) {
        return Some(v);
    }
    let first = series.prices.first()?;
    let step = series
        .prices
        .get(1)
        .map(|p| p.timestamp - first.timestamp)
        .unwrap_or(0);
    (first.timestamp - timestamp <= step).then_some(first.value)
}

/// Merge fetched histories into one chart.
///
/// `series[i]` belongs to `coins[i]`. The label axis comes from the first
/// non-empty series; every other series is resampled onto its timestamps.
pub fn assemble(
    coins: &[ComparedCoin],
    series: &[PriceSeries],
    timeframe: Timeframe,
    target_points: usize,
) -> ComparisonChart {
    let reference = series.iter().position(|s| !s.is_empty());

    let axis: Vec<PricePoint> = match reference {
        Some(idx) => {
            let prices = &series[idx].prices;
            decimate(prices, comparison_stride(prices.len(), target_points))
        }
        None => Vec::new(),
    };

    let style = timeframe.comparison_label_style();
    let labels = axis.iter().map(|p| format_label(p.timestamp, style)).collect();

    let datasets = coins
        .iter()
        .enumerate()
        .map(|(i, coin)| {
            let values = match series.get(i) {
                Some(_) if Some(i) == reference => axis.iter().map(|p| Some(p.value)).collect(),
                Some(s) if !s.is_empty() => {
                    axis.iter().map(|p| resample_at(s, p.timestamp)).collect()
                }
                _ => vec![None; axis.len()],
            };
            ComparisonDataset {
                id: coin.id.clone(),
                label: coin.name.clone(),
                color: palette_color(i),
                values,
            }
        })
        .collect();

    ComparisonChart { labels, datasets }
}

/// Fetch every coin's history concurrently and wait for all of them.
///
/// A failed fetch yields an empty series in its slot.
pub async fn fetch_histories(
    provider: &dyn MarketDataProvider,
    ids: &[String],
    days: u32,
) -> Vec<PriceSeries> {
    let requests = ids.iter().map(|id| provider.price_history(id, days));
    let results = join_all(requests).await;

    for (id, series) in ids.iter().zip(&results) {
        if series.is_empty() {
            warn!("No price history for {} over {}d", id, days);
        }
    }
    results
}

/// Fan out, fan in, then build the chart
pub async fn load_comparison(
    provider: &dyn MarketDataProvider,
    coins: &[ComparedCoin],
    timeframe: Timeframe,
    target_points: usize,
) -> ComparisonChart {
    let ids: Vec<String> = coins.iter().map(|c| c.id.clone()).collect();
    let series = fetch_histories(provider, &ids, timeframe.days()).await;
    let chart = assemble(coins, &series, timeframe, target_points);
    debug!(
        "Comparison of {} coins over {} built with {} points",
        coins.len(),
        timeframe,
        chart.labels.len()
    );
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{hourly_series, MockProvider};
    use std::sync::Arc;
    use std::time::Duration;

    const START: i64 = 1_704_067_200_000;

    fn coins(ids: &[&str]) -> Vec<ComparedCoin> {
        ids.iter().map(|id| ComparedCoin::new(*id, id.to_uppercase())).collect()
    }

    fn ramp(n: usize, base: f64) -> PriceSeries {
        let values: Vec<f64> = (0..n).map(|i| base + i as f64).collect();
        hourly_series(START, &values)
    }

    #[test]
    fn test_stride() {
        assert_eq!(comparison_stride(0, 50), 1);
        assert_eq!(comparison_stride(49, 50), 1);
        assert_eq!(comparison_stride(100, 50), 2);
        assert_eq!(comparison_stride(169, 50), 3);
        assert_eq!(comparison_stride(2161, 50), 43);
    }

    #[test]
    fn test_aligned_series() {
        let series = vec![ramp(100, 0.0), ramp(100, 1000.0)];
        let chart = assemble(&coins(&["a", "b"]), &series, Timeframe::ThirtyDays, 50);

        assert_eq!(chart.labels.len(), 50);
        assert_eq!(chart.datasets.len(), 2);
        assert_eq!(chart.datasets[0].values[1], Some(2.0));
        assert_eq!(chart.datasets[1].values[1], Some(1002.0));
        assert_eq!(chart.datasets[0].label, "A");
        assert_eq!(chart.datasets[0].color, PALETTE[0]);
        assert_eq!(chart.datasets[1].color, PALETTE[1]);
    }

    #[test]
    fn test_failed_coin_is_empty_dataset() {
        let series = vec![ramp(60, 0.0), PriceSeries::empty(), ramp(60, 5.0)];
        let chart = assemble(&coins(&["a", "b", "c"]), &series, Timeframe::OneDay, 50);

        assert_eq!(chart.datasets.len(), 3);
        assert!(!chart.datasets[0].is_empty());
        assert!(chart.datasets[1].is_empty());
        assert_eq!(chart.datasets[1].values.len(), chart.labels.len());
        assert!(!chart.datasets[2].is_empty());
    }

    #[test]
    fn test_failed_first_coin_uses_next_series_for_axis() {
        let series = vec![PriceSeries::empty(), ramp(10, 1.0)];
        let chart = assemble(&coins(&["a", "b"]), &series, Timeframe::SevenDays, 50);
        assert_eq!(chart.labels.len(), 10);
        assert!(chart.datasets[0].is_empty());
        assert_eq!(chart.datasets[1].values[0], Some(1.0));
        assert_eq!(chart.labels[0], "Mon 00:00");
    }

    #[test]
    fn test_all_failed() {
        let series = vec![PriceSeries::empty(), PriceSeries::empty()];
        let chart = assemble(&coins(&["a", "b"]), &series, Timeframe::OneYear, 50);
        assert!(chart.labels.is_empty());
        assert_eq!(chart.datasets.len(), 2);
        assert_eq!(chart.bounds(), None);
    }

    #[test]
    fn test_misaligned_series_resampled_by_time() {
        // Reference is hourly; the other coin is sampled every two hours and
        // starts 30 minutes late.
        let reference = ramp(6, 0.0);
        let sparse = PriceSeries::from_prices(vec![
            PricePoint::new(START + 1_800_000, 10.0),
            PricePoint::new(START + 1_800_000 + 7_200_000, 20.0),
            PricePoint::new(START + 1_800_000 + 14_400_000, 30.0),
        ]);
        let chart = assemble(
            &coins(&["a", "b"]),
            &[reference, sparse],
            Timeframe::OneDay,
            50,
        );
        assert_eq!(
            chart.datasets[1].values,
            vec![Some(10.0), Some(10.0), Some(10.0), Some(20.0), Some(20.0), Some(30.0)]
        );
    }

    #[test]
    fn test_late_series_leaves_gap() {
        let reference = ramp(4, 0.0);
        let late = hourly_series(START + 3 * 3_600_000 + 60_000, &[7.0, 8.0]);
        let chart = assemble(&coins(&["a", "b"]), &[reference, late], Timeframe::OneDay, 50);
        assert_eq!(chart.datasets[1].values, vec![None, None, None, Some(7.0)]);
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(5), PALETTE[0]);
        assert_eq!(palette_color(7), PALETTE[2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fan_in_waits_for_every_fetch() {
        let provider = Arc::new(
            MockProvider::new()
                .with_history("bitcoin", ramp(100, 40_000.0))
                .with_history("ethereum", ramp(100, 2_000.0))
                .with_delay("bitcoin", Duration::from_secs(1))
                .with_delay("ethereum", Duration::from_secs(2))
                // "dogecoin" has no history: the fetch fails after 3s
                .with_delay("dogecoin", Duration::from_secs(3)),
        );

        let task_provider = Arc::clone(&provider);
        let handle = tokio::spawn(async move {
            load_comparison(
                task_provider.as_ref(),
                &coins(&["bitcoin", "ethereum", "dogecoin"]),
                Timeframe::ThirtyDays,
                50,
            )
            .await
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        // All three requests are out before any completes
        assert_eq!(provider.history_calls(), 3);

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert!(!handle.is_finished());

        let chart = handle.await.unwrap();
        assert_eq!(chart.datasets.len(), 3);
        assert!(!chart.datasets[0].is_empty());
        assert!(!chart.datasets[1].is_empty());
        assert!(chart.datasets[2].is_empty());
        assert_eq!(chart.labels.len(), 50);
    }
}
