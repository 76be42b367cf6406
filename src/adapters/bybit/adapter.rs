//! Bybit REST adapter for the option chain
//!
//! Public market endpoints are unauthenticated; the fee-rate endpoint is
//! private and signed with HMAC-SHA256 (see `signing.rs`).

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::config::BybitConfig;
use super::signing::{
    sign_query, HEADER_API_KEY, HEADER_RECV_WINDOW, HEADER_SIGN, HEADER_TIMESTAMP,
};
use super::types::{BybitResponse, FeeRateResult, InstrumentsPage, TickersResult};
use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::MarketDataSource;
use crate::adapters::types::{create_http_client, InstrumentInfo, RawTicker};
use crate::config::constants;
use crate::config::logging::SanitizedValue;
use crate::core::symbol::BaseAsset;

/// Page size for instruments-info (Bybit maximum)
const INSTRUMENTS_PAGE_LIMIT: u32 = 1000;

/// Hard stop on cursor pagination, in case the exchange keeps returning cursors
const MAX_INSTRUMENT_PAGES: usize = 50;

// =============================================================================
// Bybit Adapter
// =============================================================================

/// Bybit v5 REST client implementing `MarketDataSource`
pub struct BybitAdapter {
    config: BybitConfig,
    http: reqwest::Client,
    timeout: Duration,
}

impl BybitAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: BybitConfig) -> Self {
        let timeout = constants::http_timeout();
        tracing::info!(
            exchange = "bybit",
            rest_url = %config.rest_url(),
            api_key = %SanitizedValue::new(&config.api_key),
            "Bybit adapter created"
        );
        Self {
            http: create_http_client("bybit", timeout),
            config,
            timeout,
        }
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// Send a request and decode the v5 envelope
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> ExchangeResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ExchangeError::from_transport(e, self.timeout_ms()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "<no body>".to_string());
            return Err(ExchangeError::ConnectionFailed(format!(
                "Bybit {} returned HTTP {}: {}",
                what, status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::from_transport(e, self.timeout_ms()))?;
        let envelope: BybitResponse<T> = serde_json::from_str(&body).map_err(|e| {
            ExchangeError::InvalidResponse(format!("Failed to parse Bybit {}: {}", what, e))
        })?;
        envelope.into_result()
    }

    /// Unauthenticated GET on a market endpoint
    async fn get_public<T: DeserializeOwned>(&self, path: &str, query: &str) -> ExchangeResult<T> {
        let url = format!("{}{}?{}", self.config.rest_url(), path, query);
        self.send(self.http.get(&url), path).await
    }

    /// Signed GET on a private endpoint
    async fn get_signed<T: DeserializeOwned>(&self, path: &str, query: &str) -> ExchangeResult<T> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let signature = sign_query(
            &self.config.api_secret,
            timestamp,
            &self.config.api_key,
            self.config.recv_window_ms,
            query,
        )?;
        let url = format!("{}{}?{}", self.config.rest_url(), path, query);
        let request = self
            .http
            .get(&url)
            .header(HEADER_API_KEY, &self.config.api_key)
            .header(HEADER_TIMESTAMP, timestamp.to_string())
            .header(HEADER_RECV_WINDOW, self.config.recv_window_ms.to_string())
            .header(HEADER_SIGN, signature);
        self.send(request, path).await
    }
}

#[async_trait]
impl MarketDataSource for BybitAdapter {
    async fn list_instruments(&self, base: BaseAsset) -> ExchangeResult<Vec<InstrumentInfo>> {
        let mut instruments = Vec::new();
        let mut cursor = String::new();

        for page in 0..MAX_INSTRUMENT_PAGES {
            let mut query = format!(
                "category=option&baseCoin={}&status=Trading&limit={}",
                base, INSTRUMENTS_PAGE_LIMIT
            );
            if !cursor.is_empty() {
                query.push_str("&cursor=");
                query.push_str(&cursor);
            }

            let result: InstrumentsPage = self.get_public("/v5/market/instruments-info", &query).await?;
            tracing::debug!(
                exchange = "bybit",
                base = %base,
                page = page,
                count = result.list.len(),
                "Instruments page fetched"
            );
            instruments.extend(result.list.into_iter().filter(|i| i.is_trading()));

            if result.next_page_cursor.is_empty() {
                break;
            }
            cursor = result.next_page_cursor;
        }

        Ok(instruments)
    }

    async fn list_tickers(&self, base: BaseAsset) -> ExchangeResult<Vec<RawTicker>> {
        let query = format!("category=option&baseCoin={}", base);
        let result: TickersResult = self.get_public("/v5/market/tickers", &query).await?;
        tracing::debug!(
            exchange = "bybit",
            base = %base,
            count = result.list.len(),
            "Tickers fetched"
        );
        Ok(result.list)
    }

    async fn taker_fee_rate(&self, symbol: &str) -> ExchangeResult<f64> {
        // option fee rates are keyed by base coin, not by symbol
        let base_coin = symbol.split('-').next().unwrap_or(symbol);
        let query = format!("baseCoin={}&category=option", base_coin);
        let result: FeeRateResult = self.get_signed("/v5/account/fee-rate", &query).await?;
        result.taker_rate(base_coin)
    }

    fn exchange_name(&self) -> &'static str {
        "bybit"
    }
}
