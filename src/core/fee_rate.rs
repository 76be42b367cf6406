//! Single-flight taker fee-rate cache
//!
//! The first caller resolves the rate from the exchange; every concurrent
//! caller awaits that same resolution and every later caller reads the cached
//! value. The cache is never invalidated for the life of the process.
//!
//! # Resolution rules
//! - No sample symbol: cache the fallback without fetching
//! - Fetch success with a finite rate: cache the rate
//! - Any failure (network, API, malformed, non-finite): cache the fallback

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::adapters::MarketDataSource;
use crate::config::constants::fee_rate_fallback;

// =============================================================================
// FeeRateCache
// =============================================================================

/// Process-wide taker fee rate, resolved at most once
#[derive(Debug)]
pub struct FeeRateCache {
    cell: OnceCell<f64>,
    fallback: f64,
}

impl Default for FeeRateCache {
    fn default() -> Self {
        Self::from_env()
    }
}

impl FeeRateCache {
    /// Create an empty cache with an explicit fallback rate
    pub fn new(fallback: f64) -> Self {
        Self {
            cell: OnceCell::new(),
            fallback,
        }
    }

    /// Create an empty cache using `FEE_RATE_FALLBACK` (0 if unset)
    pub fn from_env() -> Self {
        Self::new(fee_rate_fallback())
    }

    /// Cached rate, if resolution already completed
    pub fn cached(&self) -> Option<f64> {
        self.cell.get().copied()
    }

    /// Drop the cached rate so the next `resolve` fetches again
    pub fn reset(&mut self) {
        self.cell = OnceCell::new();
    }

    /// Return the cached rate, resolving it through `source` on first use
    pub async fn resolve<S>(&self, source: &S, sample_symbol: Option<&str>) -> f64
    where
        S: MarketDataSource + ?Sized,
    {
        *self
            .cell
            .get_or_init(|| self.fetch(source, sample_symbol))
            .await
    }

    async fn fetch<S>(&self, source: &S, sample_symbol: Option<&str>) -> f64
    where
        S: MarketDataSource + ?Sized,
    {
        let Some(symbol) = sample_symbol else {
            info!(
                fee_rate = self.fallback,
                "No sample symbol for fee lookup, using fallback rate"
            );
            return self.fallback;
        };

        match source.taker_fee_rate(symbol).await {
            Ok(rate) if rate.is_finite() => {
                info!(
                    exchange = source.exchange_name(),
                    symbol = %symbol,
                    fee_rate = rate,
                    "Taker fee rate resolved"
                );
                rate
            }
            Ok(rate) => {
                warn!(
                    exchange = source.exchange_name(),
                    symbol = %symbol,
                    rate = %rate,
                    fallback = self.fallback,
                    "Non-finite fee rate, using fallback"
                );
                self.fallback
            }
            Err(e) => {
                warn!(
                    exchange = source.exchange_name(),
                    symbol = %symbol,
                    error = %e,
                    fallback = self.fallback,
                    "Fee rate lookup failed, using fallback"
                );
                self.fallback
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
