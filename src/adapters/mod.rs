//! Exchange adapters for option-chain market data
//!
//! This module provides the `MarketDataSource` abstraction the scanner
//! consumes, and its Bybit REST implementation.

pub mod bybit;
pub mod errors;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types for convenience
pub use bybit::{BybitAdapter, BybitConfig, BybitEnvironment};
pub use errors::{ExchangeError, ExchangeResult};
pub use traits::MarketDataSource;
pub use types::{create_http_client, InstrumentInfo, RawTicker};
