//! Display formatting for money, percentages, supplies and dates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub const NOT_AVAILABLE: &str = "N/A";

/// Insert `,` every three digits of the integer part
pub fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// `$1,234.56`; sub-dollar prices keep up to six decimals
pub fn usd_value(value: Decimal) -> String {
    let dp = if value.abs() >= Decimal::ONE { 2 } else { 6 };
    let rounded = value.round_dp(dp);
    let text = if dp == 2 {
        format!("{:.2}", rounded)
    } else {
        rounded.normalize().to_string()
    };
    format!("${}", group_thousands(&text))
}

pub fn usd(value: Option<Decimal>) -> String {
    value.map(usd_value).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `$1.23T`, `$45.60B`, `$7.89M`; smaller values fall back to [`usd_value`]
pub fn usd_compact(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };
    let units = [
        (Decimal::from(1_000_000_000_000u64), "T"),
        (Decimal::from(1_000_000_000u64), "B"),
        (Decimal::from(1_000_000u64), "M"),
    ];
    for (scale, suffix) in units {
        if value.abs() >= scale {
            return format!("${:.2}{}", (value / scale).round_dp(2), suffix);
        }
    }
    usd_value(value)
}

/// `+1.23%` / `-4.50%`
pub fn percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) if v >= Decimal::ZERO => format!("+{:.2}%", v.round_dp(2)),
        Some(v) => format!("{:.2}%", v.round_dp(2)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Whole units with thousands separators and the ticker appended
pub fn supply(value: Option<Decimal>, ticker: &str) -> String {
    match value {
        Some(v) => format!("{} {}", group_thousands(&v.round().to_string()), ticker),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn date(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn rank(value: Option<u32>) -> String {
    value
        .map(|r| format!("#{}", r))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
