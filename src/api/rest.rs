//! CoinGecko REST API client
//!
//! Implements the four public read endpoints the dashboard needs.

use crate::api::models::{CoinMarket, CoinResponse, MarketChartResponse, SearchResponse};
use crate::api::MarketDataProvider;
use crate::config::ApiConfig;
use crate::data::{CoinDetail, CoinSummary, PriceSeries, SearchResult};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Request, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

/// Public CoinGecko v3 endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Quote currency for every price request
const VS_CURRENCY: &str = "usd";

/// CoinGecko REST API client
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: Url,
}

impl CoinGeckoClient {
    /// Create a new client against `base_url`
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("API base URL cannot carry a path: {}", base_url));
        }

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, &config.user_agent)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn build_request(&self, segments: &[&str], params: &[(&str, String)]) -> Result<Request> {
        let url = self.endpoint(segments)?;
        self.client
            .get(url)
            .query(params)
            .build()
            .context("Failed to build request")
    }

    /// Make a public GET request and decode the JSON body
    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, String)],
    ) -> Result<T> {
        let request = self.build_request(segments, params)?;
        let url = request.url().to_string();

        debug!("CoinGecko request: {}", url);

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("CoinGecko response: {} - {}", status, truncate(&body, 200));

        if !status.is_success() {
            return Err(anyhow!("API request failed with status {}: {}", status, truncate(&body, 200)));
        }

        serde_json::from_str(&body).with_context(|| format!("Malformed response from {}", url))
    }

    fn list_params(limit: u32) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", VS_CURRENCY.to_string()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", limit.to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
        ]
    }

    fn details_params() -> Vec<(&'static str, String)> {
        vec![
            ("localization", "false".to_string()),
            ("tickers", "false".to_string()),
            ("market_data", "true".to_string()),
            ("community_data", "false".to_string()),
            ("developer_data", "false".to_string()),
            ("sparkline", "false".to_string()),
        ]
    }

    fn history_params(days: u32) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", VS_CURRENCY.to_string()),
            ("days", days.to_string()),
        ]
    }

    /// Top `limit` coins by market capitalization
    pub async fn fetch_coins(&self, limit: u32) -> Result<Vec<CoinSummary>> {
        let rows: Vec<CoinMarket> = self
            .get(&["coins", "markets"], &Self::list_params(limit))
            .await?;
        info!("Fetched {} coins", rows.len());
        Ok(rows.into_iter().map(CoinSummary::from).collect())
    }

    /// Full detail for one coin
    pub async fn fetch_coin(&self, id: &str) -> Result<CoinDetail> {
        let resp: CoinResponse = self.get(&["coins", id], &Self::details_params()).await?;
        Ok(resp.into())
    }

    /// Price, market cap and volume history for `days` days
    pub async fn fetch_history(&self, id: &str, days: u32) -> Result<PriceSeries> {
        let resp: MarketChartResponse = self
            .get(&["coins", id, "market_chart"], &Self::history_params(days))
            .await?;
        let series = PriceSeries::from(resp);
        debug!("Fetched {} price points for {} over {}d", series.len(), id, days);
        Ok(series)
    }

    /// Free-text search over coin names and symbols
    pub async fn fetch_search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let resp: SearchResponse = self
            .get(&["search"], &[("query", query.to_string())])
            .await?;
        Ok(resp.coins.into_iter().map(SearchResult::from).collect())
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoClient {
    async fn list_coins(&self, limit: u32) -> Vec<CoinSummary> {
        match self.fetch_coins(limit).await {
            Ok(coins) => coins,
            Err(e) => {
                error!("Error fetching cryptocurrencies list: {:#}", e);
                Vec::new()
            }
        }
    }

    async fn coin_details(&self, id: &str) -> Option<CoinDetail> {
        match self.fetch_coin(id).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                error!("Error fetching {} details: {:#}", id, e);
                None
            }
        }
    }

    async fn price_history(&self, id: &str, days: u32) -> PriceSeries {
        match self.fetch_history(id, days).await {
            Ok(series) => series,
            Err(e) => {
                error!("Error fetching {} history: {:#}", id, e);
                PriceSeries::empty()
            }
        }
    }

    async fn search_coins(&self, query: &str) -> Vec<SearchResult> {
        match self.fetch_search(query).await {
            Ok(results) => results,
            Err(e) => {
                error!("Error searching cryptocurrencies for {:?}: {:#}", query, e);
                Vec::new()
            }
        }
    }
}

fn truncate(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CoinGeckoClient {
        CoinGeckoClient::new(DEFAULT_BASE_URL, "cryptoverse-test").unwrap()
    }

    #[test]
    fn test_list_request() {
        let req = client()
            .build_request(&["coins", "markets"], &CoinGeckoClient::list_params(10))
            .unwrap();
        assert_eq!(
            req.url().as_str(),
            "https://api.coingecko.com/api/v3/coins/markets?vs_currency=usd&order=market_cap_desc&per_page=10&page=1&sparkline=false"
        );
    }

    #[test]
    fn test_details_request() {
        let req = client()
            .build_request(&["coins", "bitcoin"], &CoinGeckoClient::details_params())
            .unwrap();
        assert_eq!(req.url().path(), "/api/v3/coins/bitcoin");
        assert_eq!(
            req.url().query(),
            Some("localization=false&tickers=false&market_data=true&community_data=false&developer_data=false&sparkline=false")
        );
    }

    #[test]
    fn test_history_request_encodes_id() {
        let req = client()
            .build_request(
                &["coins", "weird/id", "market_chart"],
                &CoinGeckoClient::history_params(365),
            )
            .unwrap();
        assert_eq!(req.url().path(), "/api/v3/coins/weird%2Fid/market_chart");
        assert_eq!(req.url().query(), Some("vs_currency=usd&days=365"));
    }

    #[test]
    fn test_search_request() {
        let req = client()
            .build_request(&["search"], &[("query", "shiba inu".to_string())])
            .unwrap();
        assert_eq!(req.url().path(), "/api/v3/search");
        assert_eq!(req.url().query(), Some("query=shiba+inu"));
    }

    #[test]
    fn test_trailing_slash_base() {
        let c = CoinGeckoClient::new("http://localhost:8080/api/v3/", "t").unwrap();
        let req = c.build_request(&["search"], &[]).unwrap();
        assert_eq!(req.url().path(), "/api/v3/search");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(CoinGeckoClient::new("not a url", "t").is_err());
        assert!(CoinGeckoClient::new("mailto:someone@example.com", "t").is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_collapses_to_empty() {
        // Port 9 (discard) on localhost is closed in test environments.
        let c = CoinGeckoClient::new("http://127.0.0.1:9/api/v3", "t").unwrap();
        assert!(c.fetch_coins(5).await.is_err());
        assert!(c.list_coins(5).await.is_empty());
        assert!(c.coin_details("bitcoin").await.is_none());
        assert!(c.price_history("bitcoin", 7).await.is_empty());
        assert!(c.search_coins("btc").await.is_empty());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
    }
}
