//! Bybit exchange module
//!
//! REST access to the Bybit v5 option chain: instruments, tickers and the
//! account fee schedule.

pub mod adapter;
pub mod config;
pub mod signing;
pub(crate) mod types;

pub use adapter::BybitAdapter;
pub use config::{BybitConfig, BybitEnvironment};
