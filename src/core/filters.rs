//! Ordered filter pipeline for bull-call spread candidates
//!
//! Each (buy, sell) pair flows through the stages in `FilterStage::ALL`
//! order. A stage either passes, possibly filling in derived fields on the
//! `SpreadDraft`, or rejects the pair and stops the pipeline. Rejection is a
//! normal outcome, not an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::contract::Contract;
use crate::core::scoring::{ev_efficiency, expected_value, ProbabilityEstimate};
use crate::core::spread::SpreadCandidate;
use crate::error::AppError;

// =============================================================================
// Thresholds
// =============================================================================

/// Tunable thresholds for the filter stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterThresholds {
    /// Minimum open interest on each leg
    pub min_open_interest: f64,
    /// Minimum delta of the long leg
    pub min_buy_delta: f64,
    /// Minimum delta of the short leg
    pub min_sell_delta: f64,
    /// Maximum (ask - bid) / mark on each leg
    pub max_quote_spread_ratio: f64,
    /// Maximum strike width relative to the buy strike
    pub max_width_ratio: f64,
    /// Risk/reward band, inclusive on both ends
    pub min_risk_reward: f64,
    pub max_risk_reward: f64,
    /// Minimum EV per unit of cost
    pub min_ev_ratio: f64,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            min_open_interest: 0.1,
            min_buy_delta: 0.30,
            min_sell_delta: 0.10,
            max_quote_spread_ratio: 0.30,
            max_width_ratio: 0.25,
            min_risk_reward: 1.5,
            max_risk_reward: 6.0,
            min_ev_ratio: 0.10,
        }
    }
}

impl FilterThresholds {
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("min_open_interest", self.min_open_interest),
            ("min_buy_delta", self.min_buy_delta),
            ("min_sell_delta", self.min_sell_delta),
            ("max_quote_spread_ratio", self.max_quote_spread_ratio),
            ("max_width_ratio", self.max_width_ratio),
            ("min_risk_reward", self.min_risk_reward),
            ("max_risk_reward", self.max_risk_reward),
            ("min_ev_ratio", self.min_ev_ratio),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(AppError::Config(format!("filters.{} must be finite", name)));
            }
        }

        if self.max_quote_spread_ratio <= 0.0 || self.max_width_ratio <= 0.0 {
            return Err(AppError::Config(
                "filters.max_quote_spread_ratio and filters.max_width_ratio must be > 0".to_string(),
            ));
        }
        if self.min_risk_reward > self.max_risk_reward {
            return Err(AppError::Config(format!(
                "filters.min_risk_reward ({}) must be <= filters.max_risk_reward ({})",
                self.min_risk_reward, self.max_risk_reward
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Stages
// =============================================================================

/// Named filter stages, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterStage {
    QuoteValidity,
    Liquidity,
    ProbabilityFloor,
    QuoteSpread,
    RawCost,
    FeeAdjustedCost,
    Structure,
    Profitability,
    RiskReward,
    ExpectedValue,
    EvEfficiency,
}

impl FilterStage {
    pub const ALL: [FilterStage; 11] = [
        FilterStage::QuoteValidity,
        FilterStage::Liquidity,
        FilterStage::ProbabilityFloor,
        FilterStage::QuoteSpread,
        FilterStage::RawCost,
        FilterStage::FeeAdjustedCost,
        FilterStage::Structure,
        FilterStage::Profitability,
        FilterStage::RiskReward,
        FilterStage::ExpectedValue,
        FilterStage::EvEfficiency,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FilterStage::QuoteValidity => "quote_validity",
            FilterStage::Liquidity => "liquidity",
            FilterStage::ProbabilityFloor => "probability_floor",
            FilterStage::QuoteSpread => "quote_spread",
            FilterStage::RawCost => "raw_cost",
            FilterStage::FeeAdjustedCost => "fee_adjusted_cost",
            FilterStage::Structure => "structure",
            FilterStage::Profitability => "profitability",
            FilterStage::RiskReward => "risk_reward",
            FilterStage::ExpectedValue => "expected_value",
            FilterStage::EvEfficiency => "ev_efficiency",
        }
    }

    /// Position in the pipeline, 0-based
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A (buy, sell) pair being enriched as it passes each stage
///
/// Derived fields hold 0.0 until the stage that computes them has run.
#[derive(Debug, Clone)]
pub struct SpreadDraft<'a> {
    pub buy: &'a Contract,
    pub sell: &'a Contract,
    pub raw_cost: f64,
    pub cost: f64,
    pub width: f64,
    pub max_profit: f64,
    pub risk_reward: f64,
    pub expected_value: f64,
}

impl<'a> SpreadDraft<'a> {
    pub fn new(buy: &'a Contract, sell: &'a Contract) -> Self {
        Self {
            buy,
            sell,
            raw_cost: 0.0,
            cost: 0.0,
            width: 0.0,
            max_profit: 0.0,
            risk_reward: 0.0,
            expected_value: 0.0,
        }
    }

    fn into_candidate(self) -> SpreadCandidate {
        let probs = ProbabilityEstimate::from_legs(self.buy, self.sell);
        SpreadCandidate {
            base_asset: self.buy.base_asset,
            expiry: self.buy.expiry.clone(),
            buy_symbol: self.buy.symbol.clone(),
            sell_symbol: self.sell.symbol.clone(),
            buy_strike: self.buy.strike,
            sell_strike: self.sell.strike,
            cost: self.cost,
            max_profit: self.max_profit,
            risk_reward: self.risk_reward,
            net_delta: self.buy.delta - self.sell.delta,
            prob_buy_itm: probs.prob_buy_itm,
            prob_max_profit: probs.prob_max_profit,
            expected_value: self.expected_value,
            iv: self.buy.iv,
        }
    }
}

// =============================================================================
// SpreadFilter
// =============================================================================

/// Runs the stage pipeline with fixed thresholds and fee rate
#[derive(Debug, Clone)]
pub struct SpreadFilter {
    thresholds: FilterThresholds,
    fee_rate: f64,
}

impl SpreadFilter {
    pub fn new(thresholds: FilterThresholds, fee_rate: f64) -> Self {
        Self { thresholds, fee_rate }
    }

    /// Run every stage in order; the first failing stage is returned as `Err`
    pub fn evaluate(&self, buy: &Contract, sell: &Contract) -> Result<SpreadCandidate, FilterStage> {
        let mut draft = SpreadDraft::new(buy, sell);
        for stage in FilterStage::ALL {
            if !self.check(stage, &mut draft) {
                return Err(stage);
            }
        }
        Ok(draft.into_candidate())
    }

    /// Run a single stage against `draft`
    ///
    /// Stages later in the pipeline read fields filled in by earlier ones, so
    /// callers running one stage in isolation must populate those first.
    pub fn check(&self, stage: FilterStage, draft: &mut SpreadDraft<'_>) -> bool {
        let t = &self.thresholds;
        let (buy, sell) = (draft.buy, draft.sell);

        match stage {
            FilterStage::QuoteValidity => buy.ask != 0.0 && sell.bid != 0.0,
            FilterStage::Liquidity => {
                buy.open_interest >= t.min_open_interest && sell.open_interest >= t.min_open_interest
            }
            FilterStage::ProbabilityFloor => {
                buy.delta >= t.min_buy_delta && sell.delta >= t.min_sell_delta
            }
            FilterStage::QuoteSpread => [buy, sell].iter().all(|leg| {
                leg.quote_spread_ratio()
                    .map_or(false, |ratio| ratio <= t.max_quote_spread_ratio)
            }),
            FilterStage::RawCost => {
                draft.raw_cost = buy.ask - sell.bid;
                draft.raw_cost > 0.0
            }
            FilterStage::FeeAdjustedCost => {
                draft.cost = draft.raw_cost + (buy.ask + sell.bid) * self.fee_rate;
                true
            }
            FilterStage::Structure => {
                draft.width = sell.strike - buy.strike;
                draft.width / buy.strike <= t.max_width_ratio
            }
            FilterStage::Profitability => {
                draft.max_profit = draft.width - draft.cost;
                draft.max_profit > 0.0
            }
            FilterStage::RiskReward => {
                draft.risk_reward = draft.max_profit / draft.cost;
                draft.risk_reward >= t.min_risk_reward && draft.risk_reward <= t.max_risk_reward
            }
            FilterStage::ExpectedValue => {
                let probs = ProbabilityEstimate::from_legs(buy, sell);
                draft.expected_value =
                    expected_value(probs.prob_max_profit, draft.max_profit, draft.cost);
                draft.expected_value > 0.0
            }
            FilterStage::EvEfficiency => {
                ev_efficiency(draft.expected_value, draft.cost) >= t.min_ev_ratio
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
