//! Logging configuration
//!
//! # Usage
//! ```rust,ignore
//! use bullcall_bot::config::logging::init_logging;
//! init_logging();
//! ```
//!
//! # Environment Variables
//! - `LOG_FORMAT`: Output format - `json` (default) or `pretty`
//! - `RUST_LOG`: Log level filter (default: `info`)

use std::fmt;

use tracing_subscriber::EnvFilter;

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialize logging with configurable format
///
/// Reads `LOG_FORMAT` from environment:
/// - `json` (default): Machine-parseable JSON output for production
/// - `pretty`: Human-readable output for development
///
/// Also respects `RUST_LOG` for log level filtering (default: `info`).
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let result = if log_format() == "pretty" {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .pretty()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

fn log_format() -> String {
    std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase())
        .unwrap_or_else(|_| "json".to_string())
}

/// Wrapper for secrets (API keys, bot tokens) that should be redacted in logs.
///
/// Values longer than 8 characters keep their first 4 characters; shorter
/// values are fully redacted.
#[derive(Clone)]
pub struct SanitizedValue<'a>(&'a str);

impl<'a> SanitizedValue<'a> {
    pub fn new(value: &'a str) -> Self {
        Self(value)
    }
}

impl fmt::Display for SanitizedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.get(..4) {
            Some(prefix) if self.0.len() > 8 => write!(f, "{}...REDACTED", prefix),
            _ => write!(f, "REDACTED"),
        }
    }
}

impl fmt::Debug for SanitizedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SanitizedValue({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn test_log_format_env_var_default() {
        std::env::remove_var("LOG_FORMAT");
        assert_eq!(log_format(), "json");
    }

    #[test]
    #[serial(env)]
    fn test_log_format_pretty_case_insensitive() {
        std::env::set_var("LOG_FORMAT", "Pretty");
        assert_eq!(log_format(), "pretty");
        std::env::remove_var("LOG_FORMAT");
    }

    #[test]
    fn test_sanitized_long_value() {
        let key = "sk-1234567890abcdef";
        assert_eq!(SanitizedValue::new(key).to_string(), "sk-1...REDACTED");
    }

    #[test]
    fn test_sanitized_short_and_empty_values() {
        assert_eq!(SanitizedValue::new("abc").to_string(), "REDACTED");
        assert_eq!(SanitizedValue::new("").to_string(), "REDACTED");
        assert!(format!("{:?}", SanitizedValue::new("abc")).contains("REDACTED"));
    }
}
