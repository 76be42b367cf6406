//! Configuration types for scanner settings
//!
//! Loaded from an optional `config.yaml`; every field has a default so an
//! empty or missing file yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::core::filters::FilterThresholds;
use crate::core::ranker::DEFAULT_TOP_N;
use crate::core::symbol::BaseAsset;
use crate::error::AppError;

// ============================================================================
// Configuration Structs
// ============================================================================

/// Scan scheduling and output size
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Underlyings to scan, one watcher each
    pub base_assets: Vec<BaseAsset>,
    /// Seconds between two scans of the same underlying
    pub interval_secs: u64,
    /// Number of spreads reported per scan
    pub top_n: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            base_assets: vec![BaseAsset::Eth],
            interval_secs: 60,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ScannerConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.base_assets.is_empty() {
            return Err(AppError::Config(
                "scanner.base_assets must contain at least one asset".to_string(),
            ));
        }
        if self.interval_secs == 0 {
            return Err(AppError::Config(
                "scanner.interval_secs must be > 0".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(AppError::Config("scanner.top_n must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub scanner: ScannerConfig,
    /// Spread filter thresholds
    pub filters: FilterThresholds,
}

impl AppConfig {
    /// Validate all configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        self.scanner.validate()?;
        self.filters.validate()?;
        Ok(())
    }
}
