//! Per-expiry call chains

use crate::core::contract::Contract;
use crate::core::symbol::{BaseAsset, OptionType};

/// Calls of one base asset and expiry, ascending by strike
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub base_asset: BaseAsset,
    pub expiry: String,
    pub calls: Vec<Contract>,
}

/// Group calls by (base asset, expiry) and sort each group by strike
///
/// Puts are ignored. Groups keep the order in which their expiry first
/// appears; the strike sort is stable so equal strikes keep input order.
pub fn build_chains(contracts: &[Contract]) -> Vec<Chain> {
    let mut chains: Vec<Chain> = Vec::new();

    for contract in contracts.iter().filter(|c| c.option_type == OptionType::Call) {
        match chains
            .iter_mut()
            .find(|ch| ch.base_asset == contract.base_asset && ch.expiry == contract.expiry)
        {
            Some(chain) => chain.calls.push(contract.clone()),
            None => chains.push(Chain {
                base_asset: contract.base_asset,
                expiry: contract.expiry.clone(),
                calls: vec![contract.clone()],
            }),
        }
    }

    for chain in &mut chains {
        chain.calls.sort_by(|a, b| a.strike.total_cmp(&b.strike));
    }

    chains
}
