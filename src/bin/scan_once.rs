//! One-shot scan
//!
//! Runs a single scan per configured base asset against Bybit and prints the
//! reports to stdout. No Telegram token required.

use std::path::Path;
use std::sync::Arc;

use bullcall_bot::adapters::{BybitAdapter, BybitConfig};
use bullcall_bot::config::{self, init_logging};
use bullcall_bot::core::{format_spread_report, FeeRateCache, SpreadScanner, SCAN_FAILED_MESSAGE};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = config::load_config_or_default(Path::new("config.yaml"))?;
    let adapter = BybitAdapter::new(BybitConfig::from_env()?);
    let scanner = SpreadScanner::new(Arc::new(adapter), Arc::new(FeeRateCache::from_env()))
        .with_thresholds(config.filters.clone())
        .with_top_n(config.scanner.top_n);

    for base in &config.scanner.base_assets {
        println!("═══════════════ {} ═══════════════", base);
        match scanner.scan(*base).await {
            Ok(spreads) => println!("{}\n", format_spread_report(&spreads)),
            Err(e) => {
                error!(base = %base, error = %e, "Scan failed");
                println!("{}\n", SCAN_FAILED_MESSAGE);
            }
        }
    }

    if let Some(rate) = scanner.fee_cache().cached() {
        println!("Taker fee rate used: {}", rate);
    }
    Ok(())
}
