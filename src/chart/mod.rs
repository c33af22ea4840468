//! Turns raw price series into chart-ready, labeled points.

use crate::data::{LabelStyle, PricePoint, PriceSeries, Timeframe};
use chrono::{TimeZone, Utc};
use serde::Serialize;

/// Decimated series with one label per value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Values paired with their index, as plotted on the x axis
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        value_bounds(self.values.iter().copied())
    }
}

/// Format a millisecond timestamp in UTC
pub fn format_label(timestamp_ms: i64, style: LabelStyle) -> String {
    match Utc.timestamp_millis_opt(timestamp_ms).single() {
        Some(t) => t.format(style.pattern()).to_string(),
        None => String::new(),
    }
}

/// Keep every `stride`-th item, starting with the first
pub fn decimate<T: Clone>(items: &[T], stride: usize) -> Vec<T> {
    items.iter().step_by(stride.max(1)).cloned().collect()
}

/// Decimate and label a series for the single-coin chart.
///
/// Input order is preserved. An empty series yields an empty chart series.
pub fn downsample(series: &PriceSeries, timeframe: Timeframe) -> ChartSeries {
    downsample_points(&series.prices, timeframe.stride(), timeframe.label_style())
}

pub fn downsample_points(points: &[PricePoint], stride: usize, style: LabelStyle) -> ChartSeries {
    let kept = decimate(points, stride);
    ChartSeries {
        labels: kept.iter().map(|p| format_label(p.timestamp, style)).collect(),
        values: kept.iter().map(|p| p.value).collect(),
    }
}

/// Min and max over finite values, padded by 5% so lines don't touch the frame
pub fn value_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let padding = if max > min {
        (max - min) * 0.05
    } else {
        (max.abs() * 0.05).max(1e-9)
    };
    Some((min - padding, max + padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly(n: usize) -> PriceSeries {
        PriceSeries::from_prices(
            (0..n)
                .map(|i| PricePoint::new(1_704_067_200_000 + i as i64 * 3_600_000, i as f64))
                .collect(),
        )
    }

    #[test]
    fn test_output_length_is_ceil_of_len_over_stride() {
        for tf in Timeframe::ALL {
            for len in [0usize, 1, 5, 6, 7, 24, 25, 89, 90, 91, 365, 1825] {
                let out = downsample(&hourly(len), tf);
                let stride = tf.stride();
                assert_eq!(out.len(), len.div_ceil(stride), "{:?} len={}", tf, len);
                assert_eq!(out.labels.len(), out.values.len());
            }
        }
    }

    #[test]
    fn test_order_preserved_and_first_point_kept() {
        let out = downsample(&hourly(30), Timeframe::OneDay);
        assert_eq!(out.values, vec![0.0, 6.0, 12.0, 18.0, 24.0]);
    }

    #[test]
    fn test_empty_input() {
        let out = downsample(&PriceSeries::empty(), Timeframe::ThirtyDays);
        assert!(out.is_empty());
        assert!(out.labels.is_empty());
        assert_eq!(out.bounds(), None);
    }

    #[test]
    fn test_idempotent() {
        let series = hourly(100);
        assert_eq!(
            downsample(&series, Timeframe::SevenDays),
            downsample(&series, Timeframe::SevenDays)
        );
    }

    #[test]
    fn test_label_styles() {
        // 2024-01-01T13:05:00Z, a Monday
        let ts = 1_704_114_300_000;
        assert_eq!(format_label(ts, LabelStyle::HourMinute), "13:05");
        assert_eq!(format_label(ts, LabelStyle::WeekdayTime), "Mon 13:05");
        assert_eq!(format_label(ts, LabelStyle::MonthDay), "Jan 1");
        assert_eq!(format_label(ts, LabelStyle::MonthYear), "Jan 2024");
    }

    #[test]
    fn test_labels_follow_timeframe() {
        let series = hourly(1);
        assert_eq!(downsample(&series, Timeframe::OneDay).labels, vec!["00:00"]);
        assert_eq!(downsample(&series, Timeframe::SevenDays).labels, vec!["00:00"]);
        assert_eq!(downsample(&series, Timeframe::ThirtyDays).labels, vec!["Jan 1"]);
        assert_eq!(downsample(&series, Timeframe::OneYear).labels, vec!["Jan 2024"]);
        assert_eq!(downsample(&series, Timeframe::FiveYears).labels, vec!["Jan 2024"]);
    }

    #[test]
    fn test_value_bounds_padding() {
        let (lo, hi) = value_bounds([10.0, 20.0].into_iter()).unwrap();
        assert!((lo - 9.5).abs() < 1e-9);
        assert!((hi - 20.5).abs() < 1e-9);

        let (lo, hi) = value_bounds([5.0, f64::NAN].into_iter()).unwrap();
        assert!(lo < 5.0 && hi > 5.0);
    }
}
