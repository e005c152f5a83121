//! Market OHLC API Client
//!
//! Fetches OHLC candle data from a CoinGecko-style market endpoint and
//! exposes it through [`SnapshotProvider`]. Symbols are passed through as
//! provider-native coin ids (e.g. `ethereum`, `bitcoin`); resolving ticker
//! symbols to ids is the embedder's concern.

use crate::core::candle::Candle;
use crate::traits::error::{LiveChartError, Result};
use crate::traits::provider::{OhlcRange, Snapshot, SnapshotProvider};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

// =============================================================================
// Constants
// =============================================================================

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// HTTP request timeout
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Demo-tier API key header
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

// =============================================================================
// Wire format
// =============================================================================

/// One response row: `[timestamp_ms, open, high, low, close]`
type OhlcRow = (i64, f64, f64, f64, f64);

fn row_to_candle(row: OhlcRow) -> Candle {
    let (timestamp_ms, open, high, low, close) = row;
    Candle {
        time: timestamp_ms / 1000,
        open,
        high,
        low,
        close,
    }
}

// =============================================================================
// Client
// =============================================================================

/// OHLC market data client
pub struct MarketApiClient {
    http: reqwest::Client,
    base_url: String,
    vs_currency: String,
    /// Optional demo API key sent with every request
    api_key: Option<String>,
}

impl MarketApiClient {
    /// Create a client for the given endpoint
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LiveChartError::Configuration(e.to_string()))?;

        let base_url = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            vs_currency: "usd".to_string(),
            api_key,
        })
    }

    /// Create a client from environment variables
    ///
    /// `MARKET_API_URL` overrides the default endpoint; `COINGECKO_API_KEY`
    /// is optional and only needed to lift the anonymous rate limits.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("MARKET_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("COINGECKO_API_KEY").ok();
        Self::new(base_url, api_key)
    }

    /// Quote currency for fetched candles (defaults to `usd`)
    pub fn with_vs_currency(mut self, vs_currency: impl Into<String>) -> Self {
        self.vs_currency = vs_currency.into();
        self
    }
}

#[async_trait]
impl SnapshotProvider for MarketApiClient {
    async fn fetch(&self, symbol: &str, range: OhlcRange) -> Result<Snapshot> {
        let url = format!("{}/coins/{}/ohlc", self.base_url, symbol);

        debug!("fetching {} candles for {} ({})", range.as_str(), symbol, url);

        let days = range.days().to_string();
        let mut request = self.http.get(&url).query(&[
            ("vs_currency", self.vs_currency.as_str()),
            ("days", days.as_str()),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LiveChartError::Http(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LiveChartError::RateLimited);
        }
        if !status.is_success() {
            return Err(LiveChartError::Http(format!(
                "{} returned status {}",
                url, status
            )));
        }

        let rows: Vec<OhlcRow> = response
            .json()
            .await
            .map_err(|e| LiveChartError::InvalidResponse(e.to_string()))?;

        debug!("received {} candles for {}", rows.len(), symbol);

        Ok(Snapshot {
            candles: rows.into_iter().map(row_to_candle).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_decoding_truncates_ms_to_seconds() {
        let payload = r#"[[1700000000123, 100.0, 110.5, 95.25, 105.0]]"#;
        let rows: Vec<OhlcRow> = serde_json::from_str(payload).unwrap();
        let candle = row_to_candle(rows[0]);

        assert_eq!(candle.time, 1_700_000_000);
        assert!((candle.open - 100.0).abs() < f64::EPSILON);
        assert!((candle.high - 110.5).abs() < f64::EPSILON);
        assert!((candle.low - 95.25).abs() < f64::EPSILON);
        assert!((candle.close - 105.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rows_stay_chronological() {
        let payload = r#"[
            [1700000000000, 1.0, 1.0, 1.0, 1.0],
            [1700003600000, 2.0, 2.0, 2.0, 2.0]
        ]"#;
        let rows: Vec<OhlcRow> = serde_json::from_str(payload).unwrap();
        let candles: Vec<Candle> = rows.into_iter().map(row_to_candle).collect();
        assert!(candles[0].time < candles[1].time);
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = MarketApiClient::new("https://example.test/api/", None).unwrap();
        assert_eq!(client.base_url, "https://example.test/api");
    }
}
