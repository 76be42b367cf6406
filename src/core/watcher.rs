//! Periodic scan task for one base asset
//!
//! # Architecture
//! - Scans every `interval` using `tokio::time::interval` (first tick is immediate)
//! - Forwards non-empty reports through a `Notifier`
//! - Scan failures are logged and replaced by a generic notice
//! - Shutdown-aware via broadcast receiver

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::core::report::{format_spread_report, SCAN_FAILED_MESSAGE};
use crate::core::scanner::SpreadScanner;
use crate::core::symbol::BaseAsset;
use crate::notify::Notifier;

/// Scan `base` on a fixed interval until a shutdown signal arrives
pub async fn watcher_task(
    scanner: SpreadScanner,
    base: BaseAsset,
    period: Duration,
    notifier: Arc<dyn Notifier>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    info!(base = %base, interval_s = period.as_secs(), "Options watcher started");

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                info!(base = %base, "Options watcher stopped");
                break;
            }
            _ = ticker.tick() => {
                run_cycle(&scanner, base, notifier.as_ref()).await;
            }
        }
    }
}

async fn run_cycle(scanner: &SpreadScanner, base: BaseAsset, notifier: &dyn Notifier) {
    let message = match scanner.scan(base).await {
        Ok(spreads) if spreads.is_empty() => return,
        Ok(spreads) => {
            info!(base = %base, spreads = spreads.len(), "[SCAN] Spreads found");
            format_spread_report(&spreads)
        }
        Err(e) => {
            error!(base = %base, error = %e, "[SCAN] Scan failed");
            SCAN_FAILED_MESSAGE.to_string()
        }
    };

    if let Err(e) = notifier.notify(&message).await {
        warn!(base = %base, error = %e, "Failed to deliver scan report");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_utils::MockMarketData;
    use crate::core::fee_rate::FeeRateCache;
    use crate::error::Result;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, text: &str) -> Result<()> {
            self.messages.lock().await.push(text.to_string());
            Ok(())
        }
    }

    fn scanner(source: MockMarketData) -> SpreadScanner {
        SpreadScanner::new(Arc::new(source), Arc::new(FeeRateCache::new(0.0)))
    }

    fn reference_source() -> MockMarketData {
        MockMarketData::new()
            .with_option("ETH-27DEC24-2000-C", 50.0, 48.0, 49.0, 0.6, 5.0)
            .with_option("ETH-27DEC24-2100-C", 30.0, 28.0, 29.0, 0.4, 5.0)
    }

    async fn run_briefly(scanner: SpreadScanner, notifier: Arc<RecordingNotifier>) {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = tokio::spawn(watcher_task(
            scanner,
            BaseAsset::Eth,
            Duration::from_secs(3600),
            notifier,
            shutdown_rx,
        ));

        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_first_tick_sends_report() {
        let notifier = Arc::new(RecordingNotifier::default());
        run_briefly(scanner(reference_source()), notifier.clone()).await;

        let messages = notifier.messages.lock().await;
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Buy: 2000 Call"));
    }

    #[tokio::test]
    async fn test_empty_scan_sends_nothing() {
        let notifier = Arc::new(RecordingNotifier::default());
        run_briefly(scanner(MockMarketData::new()), notifier.clone()).await;

        assert!(notifier.messages.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_scan_sends_notice() {
        let mut source = reference_source();
        source.fail_tickers = true;
        let notifier = Arc::new(RecordingNotifier::default());
        run_briefly(scanner(source), notifier.clone()).await;

        let messages = notifier.messages.lock().await;
        assert_eq!(messages.as_slice(), [SCAN_FAILED_MESSAGE.to_string()]);
    }
}
