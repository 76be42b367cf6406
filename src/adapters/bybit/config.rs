//! Bybit Configuration
//!
//! Configuration for the Bybit v5 REST API including environment loading.

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::config::constants;

// =============================================================================
// Constants
// =============================================================================

/// Mainnet REST API base URL
const MAINNET_REST_URL: &str = "https://api.bybit.com";
/// Testnet REST API base URL
const TESTNET_REST_URL: &str = "https://api-testnet.bybit.com";
/// Demo-trading REST API base URL
const DEMO_REST_URL: &str = "https://api-demo.bybit.com";

// =============================================================================
// Configuration
// =============================================================================

/// Which Bybit deployment to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BybitEnvironment {
    Mainnet,
    Testnet,
    Demo,
}

/// Configuration for Bybit REST access
#[derive(Debug, Clone)]
pub struct BybitConfig {
    /// API key (needed for the private fee-rate endpoint only)
    pub api_key: String,
    /// API secret used for HMAC request signing
    pub api_secret: String,
    pub environment: BybitEnvironment,
    /// `X-BAPI-RECV-WINDOW` value in milliseconds
    pub recv_window_ms: u64,
    /// Overrides the environment URL (mock servers in tests)
    pub base_url_override: Option<String>,
}

impl BybitConfig {
    /// Create configuration from environment variables
    ///
    /// Required: `BYBIT_API_KEY`, `BYBIT_SECRET_KEY`.
    /// Optional: `BYBIT_TESTNET` (default false), `BYBIT_DEMO` (default false).
    pub fn from_env() -> ExchangeResult<Self> {
        let api_key = std::env::var("BYBIT_API_KEY")
            .map_err(|_| ExchangeError::AuthenticationFailed("BYBIT_API_KEY not set".into()))?;
        let api_secret = std::env::var("BYBIT_SECRET_KEY")
            .map_err(|_| ExchangeError::AuthenticationFailed("BYBIT_SECRET_KEY not set".into()))?;
        if api_key.is_empty() || api_secret.is_empty() {
            return Err(ExchangeError::AuthenticationFailed(
                "BYBIT_API_KEY / BYBIT_SECRET_KEY is empty".into(),
            ));
        }

        let flag = |name: &str| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(false)
        };
        let environment = if flag("BYBIT_TESTNET") {
            BybitEnvironment::Testnet
        } else if flag("BYBIT_DEMO") {
            BybitEnvironment::Demo
        } else {
            BybitEnvironment::Mainnet
        };

        Ok(Self {
            api_key,
            api_secret,
            environment,
            recv_window_ms: constants::bybit_recv_window_ms(),
            base_url_override: None,
        })
    }

    /// Configuration pointing at an arbitrary base URL
    pub fn with_base_url(api_key: &str, api_secret: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            environment: BybitEnvironment::Mainnet,
            recv_window_ms: 5000,
            base_url_override: Some(base_url.trim_end_matches('/').to_string()),
        }
    }

    /// Get REST API base URL
    pub fn rest_url(&self) -> &str {
        if let Some(url) = &self.base_url_override {
            return url;
        }
        match self.environment {
            BybitEnvironment::Mainnet => MAINNET_REST_URL,
            BybitEnvironment::Testnet => TESTNET_REST_URL,
            BybitEnvironment::Demo => DEMO_REST_URL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_bybit_env() {
        for var in ["BYBIT_API_KEY", "BYBIT_SECRET_KEY", "BYBIT_TESTNET", "BYBIT_DEMO"] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial(env)]
    fn test_from_env_missing_key() {
        clear_bybit_env();
        let result = BybitConfig::from_env();
        assert!(matches!(result, Err(ExchangeError::AuthenticationFailed(_))));
    }

    #[test]
    #[serial(env)]
    fn test_from_env_demo() {
        clear_bybit_env();
        std::env::set_var("BYBIT_API_KEY", "key");
        std::env::set_var("BYBIT_SECRET_KEY", "secret");
        std::env::set_var("BYBIT_DEMO", "true");

        let config = BybitConfig::from_env().unwrap();
        assert_eq!(config.environment, BybitEnvironment::Demo);
        assert_eq!(config.rest_url(), DEMO_REST_URL);

        clear_bybit_env();
    }

    #[test]
    #[serial(env)]
    fn test_testnet_wins_over_demo() {
        clear_bybit_env();
        std::env::set_var("BYBIT_API_KEY", "key");
        std::env::set_var("BYBIT_SECRET_KEY", "secret");
        std::env::set_var("BYBIT_TESTNET", "true");
        std::env::set_var("BYBIT_DEMO", "true");

        let config = BybitConfig::from_env().unwrap();
        assert_eq!(config.rest_url(), TESTNET_REST_URL);

        clear_bybit_env();
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let config = BybitConfig::with_base_url("k", "s", "http://127.0.0.1:1234/");
        assert_eq!(config.rest_url(), "http://127.0.0.1:1234");
    }
}
