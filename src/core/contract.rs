//! Option contract records and the market-data normalizer
//!
//! `normalize_option` is the only place untrusted ticker strings become
//! numbers. It never fails loudly: anything unusable yields `None` so one bad
//! contract cannot abort a scan.

use serde::{Deserialize, Serialize};

use crate::adapters::types::{InstrumentInfo, RawTicker};
use crate::core::symbol::{parse_option_symbol, BaseAsset, OptionType};

/// One option contract with validated market data, immutable for a scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub symbol: String,
    pub base_asset: BaseAsset,
    pub expiry: String,
    pub strike: f64,
    pub option_type: OptionType,

    pub bid: f64,
    pub ask: f64,
    pub mark_price: f64,
    pub iv: f64,

    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,

    pub open_interest: f64,
    pub volume_24h: f64,
}

impl Contract {
    /// (ask - bid) / mark, `None` when the mark is not positive
    pub fn quote_spread_ratio(&self) -> Option<f64> {
        if self.mark_price > 0.0 {
            Some((self.ask - self.bid) / self.mark_price)
        } else {
            None
        }
    }
}

/// Parse a ticker number; blank means zero, garbage or non-finite means `None`
fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Same as `parse_number` but also rejects negatives
fn parse_non_negative(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|v| *v >= 0.0)
}

/// Merge an instrument descriptor with its ticker into a `Contract`
///
/// Returns `None` when the symbol does not parse, the ticker is missing, any
/// numeric field is malformed, the strike is not a positive number, or both
/// sides of the quote are zero. One-sided markets are kept.
pub fn normalize_option(instrument: &InstrumentInfo, ticker: Option<&RawTicker>) -> Option<Contract> {
    let parsed = parse_option_symbol(&instrument.symbol)?;
    let ticker = ticker?;

    if !(parsed.strike.is_finite() && parsed.strike > 0.0) {
        return None;
    }

    let bid = parse_non_negative(&ticker.bid1_price)?;
    let ask = parse_non_negative(&ticker.ask1_price)?;
    if bid == 0.0 && ask == 0.0 {
        return None;
    }

    Some(Contract {
        symbol: instrument.symbol.clone(),
        base_asset: parsed.base_asset,
        expiry: parsed.expiry,
        strike: parsed.strike,
        option_type: parsed.option_type,
        bid,
        ask,
        mark_price: parse_non_negative(&ticker.mark_price)?,
        iv: parse_number(&ticker.mark_iv)?,
        delta: parse_number(&ticker.delta)?,
        gamma: parse_number(&ticker.gamma)?,
        vega: parse_number(&ticker.vega)?,
        theta: parse_number(&ticker.theta)?,
        open_interest: parse_non_negative(&ticker.open_interest)?,
        volume_24h: parse_non_negative(&ticker.volume24h)?,
    })
}
