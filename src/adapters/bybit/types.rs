//! Bybit Types
//!
//! Response envelopes for the Bybit v5 REST endpoints used by the scanner.
//!
//! Every v5 response looks like:
//!   { "retCode": 0, "retMsg": "OK", "result": { ... }, "time": 1700000000000 }

use serde::Deserialize;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::{InstrumentInfo, RawTicker};

/// Top-level v5 envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BybitResponse<T> {
    pub ret_code: i64,
    #[serde(default)]
    pub ret_msg: String,
    pub result: Option<T>,
}

impl<T> BybitResponse<T> {
    /// Unwrap the result, turning a non-zero retCode into `ExchangeError::Api`
    pub fn into_result(self) -> ExchangeResult<T> {
        if self.ret_code != 0 {
            return Err(ExchangeError::Api {
                code: self.ret_code,
                message: self.ret_msg,
            });
        }
        self.result
            .ok_or_else(|| ExchangeError::InvalidResponse("Missing result in Bybit response".into()))
    }
}

/// `GET /v5/market/instruments-info` payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InstrumentsPage {
    #[serde(default)]
    pub list: Vec<InstrumentInfo>,
    /// Empty when there are no more pages
    #[serde(default)]
    pub next_page_cursor: String,
}

/// `GET /v5/market/tickers` payload
#[derive(Debug, Deserialize)]
pub(crate) struct TickersResult {
    #[serde(default)]
    pub list: Vec<RawTicker>,
}

/// `GET /v5/account/fee-rate` payload
#[derive(Debug, Deserialize)]
pub(crate) struct FeeRateResult {
    #[serde(default)]
    pub list: Vec<FeeRateEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeeRateEntry {
    #[serde(default)]
    pub base_coin: String,
    pub taker_fee_rate: String,
}

impl FeeRateResult {
    /// Parse the taker rate for `base_coin`, rejecting non-finite values
    ///
    /// An entry without a `baseCoin` is accepted when no entry names the coin.
    pub fn taker_rate(&self, base_coin: &str) -> ExchangeResult<f64> {
        let entry = self
            .list
            .iter()
            .find(|e| e.base_coin.eq_ignore_ascii_case(base_coin))
            .or_else(|| self.list.iter().find(|e| e.base_coin.is_empty()))
            .ok_or_else(|| {
                ExchangeError::InvalidResponse(format!("No fee-rate entry for {}", base_coin))
            })?;
        let rate = entry.taker_fee_rate.trim().parse::<f64>().map_err(|e| {
            ExchangeError::InvalidResponse(format!(
                "Invalid takerFeeRate '{}': {}",
                entry.taker_fee_rate, e
            ))
        })?;
        if !rate.is_finite() {
            return Err(ExchangeError::InvalidResponse(format!(
                "Non-finite takerFeeRate '{}'",
                entry.taker_fee_rate
            )));
        }
        Ok(rate)
    }
}
