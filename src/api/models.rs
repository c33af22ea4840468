//! CoinGecko v3 response shapes and their conversion into domain types.

use crate::data::{
    strip_html, CoinDetail, CoinLinks, CoinSummary, MarketMetrics, PricePoint, PriceSeries,
    SearchResult,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Row of `/coins/markets`
#[derive(Debug, Clone, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<Decimal>,
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<Decimal>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<Decimal>,
}

impl From<CoinMarket> for CoinSummary {
    fn from(m: CoinMarket) -> Self {
        Self {
            id: m.id,
            name: m.name,
            symbol: m.symbol,
            rank: m.market_cap_rank,
            price: m.current_price,
            market_cap: m.market_cap,
            total_volume: m.total_volume,
            change_24h: m.price_change_percentage_24h,
            image: m.image.unwrap_or_default(),
        }
    }
}

/// `{ "usd": ... }` map; other quote currencies are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsdQuote {
    #[serde(default)]
    pub usd: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsdDate {
    #[serde(default)]
    pub usd: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub en: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub current_price: UsdQuote,
    #[serde(default)]
    pub market_cap: UsdQuote,
    #[serde(default)]
    pub total_volume: UsdQuote,
    #[serde(default)]
    pub ath: UsdQuote,
    #[serde(default)]
    pub ath_date: UsdDate,
    #[serde(default)]
    pub price_change_percentage_24h: Option<Decimal>,
    #[serde(default)]
    pub price_change_percentage_7d: Option<Decimal>,
    #[serde(default)]
    pub price_change_percentage_30d: Option<Decimal>,
    #[serde(default)]
    pub price_change_percentage_1y: Option<Decimal>,
    #[serde(default)]
    pub circulating_supply: Option<Decimal>,
    #[serde(default)]
    pub total_supply: Option<Decimal>,
    #[serde(default)]
    pub max_supply: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReposUrl {
    #[serde(default)]
    pub github: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub homepage: Vec<String>,
    #[serde(default)]
    pub blockchain_site: Vec<String>,
    #[serde(default)]
    pub subreddit_url: Option<String>,
    #[serde(default)]
    pub repos_url: ReposUrl,
}

/// Response of `/coins/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct CoinResponse {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub image: ImageSet,
    #[serde(default)]
    pub description: Description,
    #[serde(default)]
    pub market_data: MarketData,
    #[serde(default)]
    pub links: Links,
}

fn non_empty(s: Option<&String>) -> Option<String> {
    s.map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string)
}

impl From<CoinResponse> for CoinDetail {
    fn from(r: CoinResponse) -> Self {
        let md = r.market_data;
        let image = r
            .image
            .large
            .or(r.image.small)
            .or(r.image.thumb)
            .unwrap_or_default();

        let summary = CoinSummary {
            id: r.id,
            name: r.name,
            symbol: r.symbol,
            rank: r.market_cap_rank,
            price: md.current_price.usd,
            market_cap: md.market_cap.usd,
            total_volume: md.total_volume.usd,
            change_24h: md.price_change_percentage_24h,
            image,
        };

        let market = MarketMetrics {
            total_volume: md.total_volume.usd,
            ath: md.ath.usd,
            ath_date: md.ath_date.usd,
            circulating_supply: md.circulating_supply,
            total_supply: md.total_supply,
            max_supply: md.max_supply,
            change_24h: md.price_change_percentage_24h,
            change_7d: md.price_change_percentage_7d,
            change_30d: md.price_change_percentage_30d,
            change_1y: md.price_change_percentage_1y,
        };

        let links = CoinLinks {
            homepage: non_empty(r.links.homepage.first()),
            explorers: r
                .links
                .blockchain_site
                .iter()
                .take(3)
                .filter_map(|s| non_empty(Some(s)))
                .collect(),
            subreddit: non_empty(r.links.subreddit_url.as_ref()),
            github: non_empty(r.links.repos_url.github.first()),
        };

        Self {
            summary,
            description: strip_html(r.description.en.as_deref().unwrap_or_default()),
            market,
            links,
        }
    }
}

/// Response of `/coins/{id}/market_chart`.
///
/// Each entry is `[timestamp_ms, value]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<(f64, Option<f64>)>,
    #[serde(default)]
    pub market_caps: Vec<(f64, Option<f64>)>,
    #[serde(default)]
    pub total_volumes: Vec<(f64, Option<f64>)>,
}

fn points(raw: Vec<(f64, Option<f64>)>) -> Vec<PricePoint> {
    raw.into_iter()
        .filter_map(|(t, v)| v.map(|v| PricePoint::new(t as i64, v)))
        .collect()
}

impl From<MarketChartResponse> for PriceSeries {
    fn from(r: MarketChartResponse) -> Self {
        Self {
            prices: points(r.prices),
            market_caps: points(r.market_caps),
            total_volumes: points(r.total_volumes),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}

impl From<SearchCoin> for SearchResult {
    fn from(c: SearchCoin) -> Self {
        Self {
            id: c.id,
            name: c.name,
            symbol: c.symbol,
            thumb: c.thumb.unwrap_or_default(),
            rank: c.market_cap_rank,
        }
    }
}

/// Response of `/search`. Exchanges, categories and NFTs are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub coins: Vec<SearchCoin>,
}
