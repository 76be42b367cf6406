//! In-memory `MarketDataSource` for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::MarketDataSource;
use crate::adapters::types::{InstrumentInfo, RawTicker};
use crate::core::symbol::BaseAsset;

/// Fixture source with canned instruments/tickers and call counters
pub struct MockMarketData {
    pub instruments: Vec<InstrumentInfo>,
    pub tickers: Vec<RawTicker>,
    /// `None` makes the fee lookup fail
    pub fee_rate: Option<f64>,
    /// Artificial latency on the fee lookup, to widen race windows
    pub fee_delay: Duration,
    pub fail_tickers: bool,
    pub fee_calls: Arc<AtomicUsize>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            instruments: Vec::new(),
            tickers: Vec::new(),
            fee_rate: Some(0.0),
            fee_delay: Duration::ZERO,
            fail_tickers: false,
            fee_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Add one listed option with its ticker
    pub fn with_option(mut self, symbol: &str, ask: f64, bid: f64, mark: f64, delta: f64, oi: f64) -> Self {
        self.instruments.push(instrument(symbol));
        self.tickers.push(ticker(symbol, ask, bid, mark, delta, oi));
        self
    }

    pub fn fee_calls(&self) -> usize {
        self.fee_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockMarketData {
    fn default() -> Self {
        Self::new()
    }
}

pub fn instrument(symbol: &str) -> InstrumentInfo {
    let options_type = if symbol.ends_with("-C") { "Call" } else { "Put" };
    InstrumentInfo {
        symbol: symbol.to_string(),
        options_type: options_type.to_string(),
        status: "Trading".to_string(),
        base_coin: symbol.split('-').next().unwrap_or_default().to_string(),
    }
}

pub fn ticker(symbol: &str, ask: f64, bid: f64, mark: f64, delta: f64, oi: f64) -> RawTicker {
    RawTicker {
        symbol: symbol.to_string(),
        bid1_price: bid.to_string(),
        ask1_price: ask.to_string(),
        mark_price: mark.to_string(),
        mark_iv: "0.55".to_string(),
        delta: delta.to_string(),
        gamma: "0.0005".to_string(),
        vega: "1.2".to_string(),
        theta: "-2.5".to_string(),
        open_interest: oi.to_string(),
        volume24h: "10".to_string(),
    }
}

#[async_trait]
impl MarketDataSource for MockMarketData {
    async fn list_instruments(&self, _base: BaseAsset) -> ExchangeResult<Vec<InstrumentInfo>> {
        Ok(self.instruments.clone())
    }

    async fn list_tickers(&self, _base: BaseAsset) -> ExchangeResult<Vec<RawTicker>> {
        if self.fail_tickers {
            return Err(ExchangeError::ConnectionFailed("tickers unavailable".into()));
        }
        Ok(self.tickers.clone())
    }

    async fn taker_fee_rate(&self, _symbol: &str) -> ExchangeResult<f64> {
        self.fee_calls.fetch_add(1, Ordering::SeqCst);
        if !self.fee_delay.is_zero() {
            tokio::time::sleep(self.fee_delay).await;
        }
        self.fee_rate
            .ok_or_else(|| ExchangeError::ConnectionFailed("fee endpoint down".into()))
    }

    fn exchange_name(&self) -> &'static str {
        "mock"
    }
}
