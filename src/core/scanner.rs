//! Scan pipeline entry point
//!
//! `SpreadScanner::scan` wires the stages together for one base asset:
//! instruments + tickers → contracts → chains → filtered candidates → top N.
//! Only the market-data and fee-rate fetches suspend; everything after them
//! is synchronous.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::{MarketDataSource, RawTicker};
use crate::core::chain::build_chains;
use crate::core::contract::{normalize_option, Contract};
use crate::core::fee_rate::FeeRateCache;
use crate::core::filters::{FilterThresholds, SpreadFilter};
use crate::core::ranker::{rank_spreads, DEFAULT_TOP_N};
use crate::core::spread::{enumerate_with_stats, SpreadCandidate};
use crate::core::symbol::BaseAsset;
use crate::error::Result;

/// Scans one exchange for bull-call spreads
///
/// Cheap to clone; the market-data source and fee cache are shared.
#[derive(Clone)]
pub struct SpreadScanner {
    source: Arc<dyn MarketDataSource>,
    fee_cache: Arc<FeeRateCache>,
    thresholds: FilterThresholds,
    top_n: usize,
}

impl SpreadScanner {
    pub fn new(source: Arc<dyn MarketDataSource>, fee_cache: Arc<FeeRateCache>) -> Self {
        Self {
            source,
            fee_cache,
            thresholds: FilterThresholds::default(),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_thresholds(mut self, thresholds: FilterThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn fee_cache(&self) -> &FeeRateCache {
        &self.fee_cache
    }

    /// Run one full scan and return at most `top_n` spreads, best first
    ///
    /// Instrument or ticker fetch failures abort the scan. Fee lookup
    /// failures do not; the cache falls back to its default rate.
    pub async fn scan(&self, base: BaseAsset) -> Result<Vec<SpreadCandidate>> {
        let (instruments, tickers) = tokio::try_join!(
            self.source.list_instruments(base),
            self.source.list_tickers(base),
        )?;

        debug!(
            exchange = self.source.exchange_name(),
            base = %base,
            instruments = instruments.len(),
            tickers = tickers.len(),
            "Market data fetched"
        );

        if tickers.is_empty() {
            info!(base = %base, "No tickers returned, nothing to scan");
            return Ok(Vec::new());
        }

        let by_symbol: HashMap<&str, &RawTicker> =
            tickers.iter().map(|t| (t.symbol.as_str(), t)).collect();

        let contracts: Vec<Contract> = instruments
            .iter()
            .filter_map(|inst| normalize_option(inst, by_symbol.get(inst.symbol.as_str()).copied()))
            .collect();

        if contracts.is_empty() {
            info!(
                base = %base,
                instruments = instruments.len(),
                "No usable contracts after normalization"
            );
            return Ok(Vec::new());
        }

        let sample_symbol = contracts.first().map(|c| c.symbol.as_str());
        let fee_rate = self.fee_cache.resolve(self.source.as_ref(), sample_symbol).await;

        let chains = build_chains(&contracts);
        let filter = SpreadFilter::new(self.thresholds.clone(), fee_rate);
        let (candidates, stats) = enumerate_with_stats(&chains, &filter);

        for (stage, count) in stats.nonzero() {
            debug!(base = %base, stage = %stage, rejected = count, "Filter stage rejections");
        }

        let ranked = rank_spreads(candidates, self.top_n);

        info!(
            base = %base,
            contracts = contracts.len(),
            dropped = instruments.len() - contracts.len(),
            chains = chains.len(),
            pairs = stats.pairs_evaluated,
            accepted = stats.accepted,
            reported = ranked.len(),
            fee_rate = fee_rate,
            "Scan complete"
        );

        Ok(ranked)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_utils::MockMarketData;
    use crate::error::AppError;

    fn reference_source() -> MockMarketData {
        MockMarketData::new()
            .with_option("ETH-27DEC24-2000-C", 50.0, 48.0, 49.0, 0.6, 5.0)
            .with_option("ETH-27DEC24-2100-C", 30.0, 28.0, 29.0, 0.4, 5.0)
            .with_option("ETH-27DEC24-2400-C", 5.0, 4.0, 4.5, 0.1, 5.0)
    }

    fn scanner(source: MockMarketData) -> (SpreadScanner, Arc<MockMarketData>) {
        let source = Arc::new(source);
        let scanner = SpreadScanner::new(source.clone(), Arc::new(FeeRateCache::new(0.0)));
        (scanner, source)
    }

    #[tokio::test]
    async fn test_scan_reference_chain() {
        let (scanner, source) = scanner(reference_source());

        let spreads = scanner.scan(BaseAsset::Eth).await.unwrap();
        assert_eq!(spreads.len(), 1);
        assert_eq!(spreads[0].buy_strike, 2000.0);
        assert_eq!(spreads[0].sell_strike, 2100.0);
        assert_eq!(source.fee_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_tickers_skip_fee_lookup() {
        let mut source = reference_source();
        source.tickers.clear();
        let (scanner, source) = scanner(source);

        assert!(scanner.scan(BaseAsset::Eth).await.unwrap().is_empty());
        assert_eq!(source.fee_calls(), 0);
        assert!(scanner.fee_cache().cached().is_none());
    }

    #[tokio::test]
    async fn test_instruments_without_tickers_are_dropped() {
        let mut source = reference_source();
        source.tickers.retain(|t| t.symbol == "ETH-27DEC24-2400-C");
        let (scanner, source) = scanner(source);

        assert!(scanner.scan(BaseAsset::Eth).await.unwrap().is_empty());
        // one contract survived normalization, so the fee rate was still resolved
        assert_eq!(source.fee_calls(), 1);
    }

    #[tokio::test]
    async fn test_ticker_failure_propagates() {
        let mut source = reference_source();
        source.fail_tickers = true;
        let (scanner, _) = scanner(source);

        let err = scanner.scan(BaseAsset::Eth).await.unwrap_err();
        assert!(matches!(err, AppError::Exchange(_)));
    }

    #[tokio::test]
    async fn test_fee_failure_uses_fallback() {
        let mut source = reference_source();
        source.fee_rate = None;
        let (scanner, _) = scanner(source);

        let spreads = scanner.scan(BaseAsset::Eth).await.unwrap();
        assert_eq!(spreads[0].cost, 22.0);
        assert_eq!(scanner.fee_cache().cached(), Some(0.0));
    }

    #[tokio::test]
    async fn test_top_n_and_thresholds_respected() {
        let source = reference_source()
            .with_option("ETH-27DEC24-2050-C", 40.0, 38.0, 39.0, 0.5, 5.0);
        let (scanner, _) = scanner(source);
        let relaxed = FilterThresholds {
            max_risk_reward: 20.0,
            ..FilterThresholds::default()
        };

        let all = scanner.clone().with_thresholds(relaxed.clone()).with_top_n(10);
        let spreads = all.scan(BaseAsset::Eth).await.unwrap();
        assert!(spreads.len() > 1);
        assert!(spreads.windows(2).all(|w| w[0].risk_reward >= w[1].risk_reward));

        let one = scanner.with_thresholds(relaxed).with_top_n(1);
        let top = one.scan(BaseAsset::Eth).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0], spreads[0]);
    }
}
