//! Bull-call spread candidates and enumeration
//!
//! # Architecture
//! - `SpreadCandidate`: a (buy, sell) pair that survived every filter stage
//! - `enumerate_spreads`: all i < j strike pairs of every chain through `SpreadFilter`
//! - `RejectionStats`: how many pairs each stage rejected, for scan logs

use serde::{Deserialize, Serialize};

use crate::core::chain::Chain;
use crate::core::filters::{FilterStage, SpreadFilter};
use crate::core::symbol::BaseAsset;

// =============================================================================
// Core Types
// =============================================================================

/// A viable bull-call vertical: long the lower strike, short the higher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadCandidate {
    pub base_asset: BaseAsset,
    pub expiry: String,
    pub buy_symbol: String,
    pub sell_symbol: String,
    pub buy_strike: f64,
    pub sell_strike: f64,
    /// Net debit including fees
    pub cost: f64,
    /// Strike width minus cost
    pub max_profit: f64,
    /// max_profit / cost
    pub risk_reward: f64,
    /// buy.delta - sell.delta
    pub net_delta: f64,
    pub prob_buy_itm: f64,
    pub prob_max_profit: f64,
    pub expected_value: f64,
    /// Implied volatility of the buy leg
    pub iv: f64,
}

impl SpreadCandidate {
    /// Return on capital at max profit, in percent
    pub fn roi_pct(&self) -> f64 {
        self.risk_reward * 100.0
    }

    pub fn width(&self) -> f64 {
        self.sell_strike - self.buy_strike
    }
}

// =============================================================================
// Rejection statistics
// =============================================================================

/// Per-stage rejection counters for one enumeration pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectionStats {
    pub pairs_evaluated: usize,
    pub accepted: usize,
    rejected: [usize; FilterStage::ALL.len()],
}

impl RejectionStats {
    pub fn record_rejection(&mut self, stage: FilterStage) {
        self.rejected[stage.index()] += 1;
    }

    pub fn rejected_at(&self, stage: FilterStage) -> usize {
        self.rejected[stage.index()]
    }

    pub fn total_rejected(&self) -> usize {
        self.rejected.iter().sum()
    }

    /// Stages that rejected at least one pair, in pipeline order
    pub fn nonzero(&self) -> impl Iterator<Item = (FilterStage, usize)> + '_ {
        FilterStage::ALL
            .iter()
            .map(move |stage| (*stage, self.rejected_at(*stage)))
            .filter(|(_, count)| *count > 0)
    }
}

// =============================================================================
// Enumeration
// =============================================================================

/// Enumerate and filter every strike pair of every chain
pub fn enumerate_spreads(chains: &[Chain], filter: &SpreadFilter) -> Vec<SpreadCandidate> {
    enumerate_with_stats(chains, filter).0
}

/// Same as `enumerate_spreads`, also returning per-stage rejection counts
///
/// Pairs are visited chain by chain, buy index ascending, then sell index
/// ascending, and survivors are emitted in that order.
pub fn enumerate_with_stats(
    chains: &[Chain],
    filter: &SpreadFilter,
) -> (Vec<SpreadCandidate>, RejectionStats) {
    let mut stats = RejectionStats::default();
    let mut candidates = Vec::new();

    for chain in chains {
        for (i, buy) in chain.calls.iter().enumerate() {
            for sell in &chain.calls[i + 1..] {
                stats.pairs_evaluated += 1;
                match filter.evaluate(buy, sell) {
                    Ok(candidate) => {
                        stats.accepted += 1;
                        candidates.push(candidate);
                    }
                    Err(stage) => stats.record_rejection(stage),
                }
            }
        }
    }

    (candidates, stats)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_utils::{instrument, ticker};
    use crate::core::chain::build_chains;
    use crate::core::contract::{normalize_option, Contract};
    use crate::core::filters::FilterThresholds;

    fn call(expiry: &str, strike: u32, ask: f64, bid: f64, delta: f64) -> Contract {
        let symbol = format!("ETH-{}-{}-C", expiry, strike);
        let mark = (ask + bid) / 2.0;
        normalize_option(&instrument(&symbol), Some(&ticker(&symbol, ask, bid, mark, delta, 5.0)))
            .unwrap()
    }

    fn reference_chain() -> Vec<Chain> {
        build_chains(&[
            call("27DEC24", 2000, 50.0, 48.0, 0.6),
            call("27DEC24", 2100, 30.0, 28.0, 0.4),
            call("27DEC24", 2400, 5.0, 4.0, 0.1),
        ])
    }

    #[test]
    fn test_reference_chain_yields_single_candidate() {
        let filter = SpreadFilter::new(FilterThresholds::default(), 0.0);
        let (candidates, stats) = enumerate_with_stats(&reference_chain(), &filter);

        assert_eq!(candidates.len(), 1);
        let spread = &candidates[0];
        assert_eq!(spread.buy_strike, 2000.0);
        assert_eq!(spread.sell_strike, 2100.0);
        assert_eq!(spread.cost, 22.0);
        assert_eq!(spread.max_profit, 78.0);
        assert_eq!(spread.buy_symbol, "ETH-27DEC24-2000-C");

        assert_eq!(stats.pairs_evaluated, 3);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.total_rejected(), 2);
    }

    #[test]
    fn test_reference_chain_rejections_by_stage() {
        // 2400 leg: (5 - 4) / 4.5 = 0.22 quote spread passes; rr 7.7 and 10.5 fail
        let filter = SpreadFilter::new(FilterThresholds::default(), 0.0);
        let (_, stats) = enumerate_with_stats(&reference_chain(), &filter);
        assert_eq!(stats.rejected_at(FilterStage::RiskReward), 2);

        let stages: Vec<_> = stats.nonzero().collect();
        assert_eq!(stages, vec![(FilterStage::RiskReward, 2)]);
    }

    #[test]
    fn test_sell_strike_always_above_buy_strike() {
        let thresholds = FilterThresholds {
            min_risk_reward: 0.0,
            max_risk_reward: 100.0,
            max_width_ratio: 10.0,
            min_ev_ratio: -100.0,
            ..FilterThresholds::default()
        };
        let filter = SpreadFilter::new(thresholds, 0.0);
        let candidates = enumerate_spreads(&reference_chain(), &filter);

        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|c| c.sell_strike > c.buy_strike));
    }

    #[test]
    fn test_chains_enumerated_independently() {
        let chains = build_chains(&[
            call("27DEC24", 2000, 50.0, 48.0, 0.6),
            call("28MAR25", 2100, 30.0, 28.0, 0.4),
        ]);
        let filter = SpreadFilter::new(FilterThresholds::default(), 0.0);
        let (candidates, stats) = enumerate_with_stats(&chains, &filter);

        assert!(candidates.is_empty());
        assert_eq!(stats.pairs_evaluated, 0);
    }

    #[test]
    fn test_empty_input() {
        let filter = SpreadFilter::new(FilterThresholds::default(), 0.0);
        assert!(enumerate_spreads(&[], &filter).is_empty());
    }

    #[test]
    fn test_roi_and_width() {
        let filter = SpreadFilter::new(FilterThresholds::default(), 0.0);
        let spread = enumerate_spreads(&reference_chain(), &filter).remove(0);
        assert_eq!(spread.width(), 100.0);
        assert!((spread.roi_pct() - 354.545454).abs() < 1e-4);
    }
}
