//! Bull-call spread scanner bot entry point
//!
//! 1. Loads environment and `config.yaml`
//! 2. Builds the Bybit adapter, shared fee-rate cache and scanner
//! 3. Spawns one watcher per configured base asset plus the Telegram command task
//! 4. Shuts everything down on Ctrl+C

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

use bullcall_bot::adapters::{BybitAdapter, BybitConfig, MarketDataSource};
use bullcall_bot::config::{self, constants::log_configuration, init_logging};
use bullcall_bot::core::{watcher_task, FeeRateCache, SpreadScanner};
use bullcall_bot::notify::{command_task, Notifier, TelegramBot, TelegramConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenvy::dotenv().ok();

    init_logging();

    info!("🚀 Bull call spread scanner starting...");

    let config = match config::load_config_or_default(Path::new("config.yaml")) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("[ERROR] Configuration failed: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        base_assets = ?config.scanner.base_assets,
        interval_s = config.scanner.interval_secs,
        top_n = config.scanner.top_n,
        "[CONFIG] Scanner configuration loaded"
    );
    log_configuration();

    let bybit_config = BybitConfig::from_env()?;
    let source: Arc<dyn MarketDataSource> = Arc::new(BybitAdapter::new(bybit_config));
    let fee_cache = Arc::new(FeeRateCache::from_env());
    let scanner = SpreadScanner::new(source, fee_cache)
        .with_thresholds(config.filters.clone())
        .with_top_n(config.scanner.top_n);

    let bot = Arc::new(TelegramBot::new(TelegramConfig::from_env()?));
    let notifier: Arc<dyn Notifier> = bot.clone();

    // Create shutdown broadcast channel
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let mut handles = Vec::new();
    for base in &config.scanner.base_assets {
        handles.push(tokio::spawn(watcher_task(
            scanner.clone(),
            *base,
            Duration::from_secs(config.scanner.interval_secs),
            notifier.clone(),
            shutdown_tx.subscribe(),
        )));
    }
    handles.push(tokio::spawn(command_task(
        bot,
        scanner,
        config.scanner.base_assets.clone(),
        shutdown_tx.subscribe(),
    )));

    info!(watchers = config.scanner.base_assets.len(), "🧠 Options watchers started");

    match signal::ctrl_c().await {
        Ok(()) => info!("[SHUTDOWN] Graceful shutdown initiated"),
        Err(err) => error!("Failed to listen for Ctrl+C signal: {}", err),
    }
    // Broadcast shutdown to all tasks
    let _ = shutdown_tx.send(());

    for handle in handles {
        if let Err(e) = handle.await {
            error!(error = %e, "[SHUTDOWN] Task ended abnormally");
        }
    }

    info!("[SHUTDOWN] Clean exit");
    Ok(())
}
