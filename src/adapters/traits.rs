//! Market-data source trait definition
//!
//! The scanner only talks to the exchange through `MarketDataSource`, so the
//! pipeline can run against Bybit in production and against an in-memory
//! fixture in tests.

use async_trait::async_trait;

use crate::adapters::errors::ExchangeResult;
use crate::adapters::types::{InstrumentInfo, RawTicker};
use crate::core::symbol::BaseAsset;

/// Read-only access to an exchange's option chain
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// List tradeable option instruments for a base asset
    async fn list_instruments(&self, base: BaseAsset) -> ExchangeResult<Vec<InstrumentInfo>>;

    /// List tickers (prices + greeks) for every option of a base asset
    async fn list_tickers(&self, base: BaseAsset) -> ExchangeResult<Vec<RawTicker>>;

    /// Taker fee rate (fraction, e.g. 0.0003) for the given option symbol
    async fn taker_fee_rate(&self, symbol: &str) -> ExchangeResult<f64>;

    /// Short name used in logs
    fn exchange_name(&self) -> &'static str;
}
