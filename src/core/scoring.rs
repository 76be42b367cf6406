//! EV and probability scoring for bull-call spreads
//!
//! Delta stands in for the probability of finishing in the money: the buy
//! leg's delta estimates P(price > buy strike) and the sell leg's delta
//! estimates P(price > sell strike), i.e. the chance of max profit.

use crate::core::contract::Contract;

/// Probability estimates for one (buy, sell) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityEstimate {
    /// P(buy leg finishes ITM) = buy.delta
    pub prob_buy_itm: f64,
    /// P(max profit) = sell.delta
    pub prob_max_profit: f64,
}

impl ProbabilityEstimate {
    pub fn from_legs(buy: &Contract, sell: &Contract) -> Self {
        Self {
            prob_buy_itm: buy.delta,
            prob_max_profit: sell.delta,
        }
    }
}

/// Two-outcome expected value: win `max_profit` with `p`, lose `cost` otherwise
pub fn expected_value(prob_max_profit: f64, max_profit: f64, cost: f64) -> f64 {
    prob_max_profit * max_profit - (1.0 - prob_max_profit) * cost
}

/// EV per unit of capital at risk
pub fn ev_efficiency(ev: f64, cost: f64) -> f64 {
    ev / cost
}
