//! Application-wide constants and configuration defaults
//!
//! This module centralizes all hardcoded values to make them configurable
//! and maintainable. Values can be overridden via environment variables.

use std::time::Duration;

// =============================================================================
// Fee Configuration
// =============================================================================

/// Taker fee rate used when the exchange fee schedule cannot be fetched (default: 0.0)
///
/// Environment variable: `FEE_RATE_FALLBACK`
pub fn fee_rate_fallback() -> f64 {
    std::env::var("FEE_RATE_FALLBACK")
        .ok()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|rate| rate.is_finite() && *rate >= 0.0)
        .unwrap_or(0.0)
}

// =============================================================================
// HTTP Configuration
// =============================================================================

/// REST request timeout (default: 10 seconds)
///
/// Environment variable: `HTTP_TIMEOUT_SECS`
pub fn http_timeout() -> Duration {
    let secs = std::env::var("HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    Duration::from_secs(secs)
}

/// Bybit signed-request receive window in milliseconds (default: 5000)
///
/// Environment variable: `BYBIT_RECV_WINDOW_MS`
pub fn bybit_recv_window_ms() -> u64 {
    std::env::var("BYBIT_RECV_WINDOW_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000)
}

// =============================================================================
// Telegram Configuration
// =============================================================================

/// Long-poll timeout for Telegram `getUpdates` (default: 30 seconds)
///
/// Environment variable: `TELEGRAM_POLL_TIMEOUT_SECS`
pub fn telegram_poll_timeout_secs() -> u64 {
    std::env::var("TELEGRAM_POLL_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(30)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Print all configuration values (for debugging/startup logs)
pub fn log_configuration() {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Fees:");
    tracing::info!("  - Fallback taker fee rate: {}", fee_rate_fallback());
    tracing::info!("HTTP:");
    tracing::info!("  - Request timeout: {:?}", http_timeout());
    tracing::info!("  - Bybit recv window: {}ms", bybit_recv_window_ms());
    tracing::info!("Telegram:");
    tracing::info!("  - getUpdates timeout: {}s", telegram_poll_timeout_secs());
    tracing::info!("==================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn test_default_values() {
        std::env::remove_var("FEE_RATE_FALLBACK");
        std::env::remove_var("HTTP_TIMEOUT_SECS");
        std::env::remove_var("BYBIT_RECV_WINDOW_MS");

        assert_eq!(fee_rate_fallback(), 0.0);
        assert_eq!(http_timeout(), Duration::from_secs(10));
        assert_eq!(bybit_recv_window_ms(), 5000);
    }

    #[test]
    #[serial(env)]
    fn test_fee_fallback_env_override() {
        std::env::set_var("FEE_RATE_FALLBACK", "0.0003");
        assert!((fee_rate_fallback() - 0.0003).abs() < 1e-12);

        std::env::set_var("FEE_RATE_FALLBACK", "not-a-number");
        assert_eq!(fee_rate_fallback(), 0.0);

        std::env::set_var("FEE_RATE_FALLBACK", "-1");
        assert_eq!(fee_rate_fallback(), 0.0);

        std::env::remove_var("FEE_RATE_FALLBACK");
    }
}
