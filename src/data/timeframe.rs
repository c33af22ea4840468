use serde::{Deserialize, Serialize};
use std::fmt;

/// Chart horizon selectable in the UI.
///
/// Each timeframe fixes both the `days` query parameter sent to the market
/// data API and the stride used when decimating the returned series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "1y")]
    OneYear,
    #[default]
    #[serde(rename = "5y")]
    FiveYears,
}

/// How chart labels are rendered for a timeframe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// `14:05`
    HourMinute,
    /// `Mon 14:05`
    WeekdayTime,
    /// `Jan 5`
    MonthDay,
    /// `Jan 2024`
    MonthYear,
}

impl LabelStyle {
    pub fn pattern(self) -> &'static str {
        match self {
            LabelStyle::HourMinute => "%H:%M",
            LabelStyle::WeekdayTime => "%a %H:%M",
            LabelStyle::MonthDay => "%b %-d",
            LabelStyle::MonthYear => "%b %Y",
        }
    }
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::OneDay,
        Timeframe::SevenDays,
        Timeframe::ThirtyDays,
        Timeframe::OneYear,
        Timeframe::FiveYears,
    ];

    /// Parse a timeframe token. Unknown tokens map to five years.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "1d" => Timeframe::OneDay,
            "7d" => Timeframe::SevenDays,
            "30d" => Timeframe::ThirtyDays,
            "1y" => Timeframe::OneYear,
            _ => Timeframe::FiveYears,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Timeframe::OneDay => "1d",
            Timeframe::SevenDays => "7d",
            Timeframe::ThirtyDays => "30d",
            Timeframe::OneYear => "1y",
            Timeframe::FiveYears => "5y",
        }
    }

    /// Label shown on the timeframe selector
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::OneDay => "24h",
            other => other.token(),
        }
    }

    /// Number of days of history requested from the API
    pub fn days(self) -> u32 {
        match self {
            Timeframe::OneDay => 1,
            Timeframe::SevenDays => 7,
            Timeframe::ThirtyDays => 30,
            Timeframe::OneYear => 365,
            Timeframe::FiveYears => 1825,
        }
    }

    /// Keep every Nth point when charting a single series
    pub fn stride(self) -> usize {
        match self {
            Timeframe::OneDay => 6,
            Timeframe::SevenDays => 24,
            Timeframe::ThirtyDays => 5,
            Timeframe::OneYear => 30,
            Timeframe::FiveYears => 90,
        }
    }

    /// Label format for the single-coin chart
    pub fn label_style(self) -> LabelStyle {
        match self {
            Timeframe::OneDay | Timeframe::SevenDays => LabelStyle::HourMinute,
            Timeframe::ThirtyDays => LabelStyle::MonthDay,
            Timeframe::OneYear | Timeframe::FiveYears => LabelStyle::MonthYear,
        }
    }

    /// Label format for the comparison chart, which spells out the weekday
    /// on the seven day view.
    pub fn comparison_label_style(self) -> LabelStyle {
        match self {
            Timeframe::OneDay => LabelStyle::HourMinute,
            Timeframe::SevenDays => LabelStyle::WeekdayTime,
            Timeframe::ThirtyDays => LabelStyle::MonthDay,
            Timeframe::OneYear | Timeframe::FiveYears => LabelStyle::MonthYear,
        }
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a raw timeframe token to its `(days, stride)` pair.
pub fn timeframe_params(token: &str) -> (u32, usize) {
    let tf = Timeframe::from_token(token);
    (tf.days(), tf.stride())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tokens() {
        assert_eq!(timeframe_params("1d"), (1, 6));
        assert_eq!(timeframe_params("7d"), (7, 24));
        assert_eq!(timeframe_params("30d"), (30, 5));
        assert_eq!(timeframe_params("1y"), (365, 30));
        assert_eq!(timeframe_params("5y"), (1825, 90));
    }

    #[test]
    fn test_unknown_token_falls_back_to_five_years() {
        for token in ["", "2w", "90d", "max", "1Y5"] {
            assert_eq!(Timeframe::from_token(token), Timeframe::FiveYears);
            assert_eq!(timeframe_params(token), (1825, 90));
        }
    }

    #[test]
    fn test_token_round_trip() {
        for tf in Timeframe::ALL {
            assert_eq!(Timeframe::from_token(tf.token()), tf);
        }
    }

    #[test]
    fn test_cycling() {
        assert_eq!(Timeframe::OneDay.next(), Timeframe::SevenDays);
        assert_eq!(Timeframe::FiveYears.next(), Timeframe::OneDay);
        assert_eq!(Timeframe::OneDay.prev(), Timeframe::FiveYears);
    }

    #[test]
    fn test_selector_labels() {
        assert_eq!(Timeframe::OneDay.label(), "24h");
        assert_eq!(Timeframe::OneYear.label(), "1y");
    }
}
