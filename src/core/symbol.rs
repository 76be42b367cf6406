//! Option symbol parsing
//!
//! Exchange option symbols have the shape `BASE-EXPIRY-STRIKE-TYPE`, e.g.
//! `ETH-27DEC24-2600-C`. The expiry code is kept as an opaque string and
//! only ever compared for equality.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Underlyings the scanner supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseAsset {
    #[serde(rename = "BTC")]
    Btc,
    #[serde(rename = "ETH")]
    Eth,
}

impl BaseAsset {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseAsset::Btc => "BTC",
            BaseAsset::Eth => "ETH",
        }
    }
}

impl fmt::Display for BaseAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BaseAsset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BTC" => Ok(BaseAsset::Btc),
            "ETH" => Ok(BaseAsset::Eth),
            other => Err(format!("Unsupported base asset: {}", other)),
        }
    }
}

/// Call or Put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Single-letter code used in exchange symbols
    pub fn code(&self) -> char {
        match self {
            OptionType::Call => 'C',
            OptionType::Put => 'P',
        }
    }
}

/// Decoded `BASE-EXPIRY-STRIKE-TYPE` symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedSymbol {
    pub base_asset: BaseAsset,
    /// Expiry code as listed, e.g. "27DEC24"
    pub expiry: String,
    /// May be non-finite when the strike field is malformed
    pub strike: f64,
    pub option_type: OptionType,
}

impl ParsedSymbol {
    /// Re-encode into the exchange symbol format
    pub fn to_symbol(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.base_asset,
            self.expiry,
            self.strike,
            self.option_type.code()
        )
    }
}

/// Parse an option symbol
///
/// Returns `None` unless the symbol has exactly four hyphen-separated fields
/// and a supported base asset. Any type code other than `C` is a Put. A strike
/// that is not a number becomes NaN; the normalizer rejects it.
pub fn parse_option_symbol(symbol: &str) -> Option<ParsedSymbol> {
    let mut parts = symbol.split('-');
    let (base, expiry, strike, kind) = (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let base_asset = base.parse::<BaseAsset>().ok()?;
    let strike = strike.parse::<f64>().unwrap_or(f64::NAN);
    let option_type = if kind == "C" { OptionType::Call } else { OptionType::Put };

    Some(ParsedSymbol {
        base_asset,
        expiry: expiry.to_string(),
        strike,
        option_type,
    })
}
