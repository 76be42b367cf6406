//! Market-data types shared by all option-chain adapters
//!
//! Numeric ticker fields arrive as strings and are kept as strings here.
//! Conversion and validation happen in `core::contract::normalize_option`,
//! which drops the record instead of failing the batch.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// =============================================================================
// HTTP Client Constants
// =============================================================================

/// HTTP connection timeout (milliseconds)
const HTTP_CONNECT_TIMEOUT_MS: u64 = 3000;
/// Max idle connections per host in connection pool
const HTTP_POOL_MAX_IDLE: usize = 5;
/// How long idle connections stay in the pool (seconds)
const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 60;
/// TCP keepalive interval (seconds)
const HTTP_TCP_KEEPALIVE_SECS: u64 = 30;

/// Create a pooled HTTP client for REST polling
pub fn create_http_client(service: &str, timeout: Duration) -> reqwest::Client {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE)
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .tcp_keepalive(Duration::from_secs(HTTP_TCP_KEEPALIVE_SECS))
        .connect_timeout(Duration::from_millis(HTTP_CONNECT_TIMEOUT_MS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());
    tracing::info!(
        phase = "init",
        service = %service,
        timeout_s = timeout.as_secs(),
        connect_timeout_ms = HTTP_CONNECT_TIMEOUT_MS,
        pool_max_idle = HTTP_POOL_MAX_IDLE,
        "HTTP client configured"
    );
    client
}

// =============================================================================
// Instrument Descriptor
// =============================================================================

/// One listed option instrument (metadata only, no prices)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentInfo {
    /// Exchange symbol, e.g. "ETH-27DEC24-2600-C"
    pub symbol: String,
    /// "Call" or "Put"
    #[serde(default)]
    pub options_type: String,
    /// Listing status, e.g. "Trading"
    #[serde(default)]
    pub status: String,
    /// Underlying coin, e.g. "ETH"
    #[serde(default)]
    pub base_coin: String,
}

impl InstrumentInfo {
    pub fn is_trading(&self) -> bool {
        self.status.is_empty() || self.status.eq_ignore_ascii_case("trading")
    }
}

// =============================================================================
// Raw Ticker
// =============================================================================

/// Market data for one option, every numeric field still a string
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawTicker {
    pub symbol: String,
    #[serde(default)]
    pub bid1_price: String,
    #[serde(default)]
    pub ask1_price: String,
    #[serde(default)]
    pub mark_price: String,
    #[serde(default)]
    pub mark_iv: String,
    #[serde(default)]
    pub delta: String,
    #[serde(default)]
    pub gamma: String,
    #[serde(default)]
    pub vega: String,
    #[serde(default)]
    pub theta: String,
    #[serde(default)]
    pub open_interest: String,
    #[serde(default)]
    pub volume24h: String,
}
