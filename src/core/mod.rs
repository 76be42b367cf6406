//! Core module - Symbol parsing, normalization, chains, spread filters, ranking
//!
//! # Module Architecture
//!
//! This module uses **explicit re-exports** instead of glob exports (`pub use module::*`)
//! to provide better API visibility and prevent accidental public API changes.
//!
//! ## Usage
//! Prefer importing from `crate::core`:
//! ```ignore
//! use crate::core::{SpreadScanner, FeeRateCache, format_spread_report};
//! ```
//!
//! ## Adding New Public Types
//! When adding new public types to submodules, explicitly add them to the
//! re-exports below to make them part of the public API.

pub mod chain;
pub mod contract;
pub mod fee_rate;
pub mod filters;
pub mod ranker;
pub mod report;
pub mod scanner;
pub mod scoring;
pub mod spread;
pub mod symbol;
pub mod watcher;

// Explicit re-exports for symbol module
pub use symbol::{parse_option_symbol, BaseAsset, OptionType, ParsedSymbol};

// Explicit re-exports for contract module
pub use contract::{normalize_option, Contract};

// Explicit re-exports for fee_rate module
pub use fee_rate::FeeRateCache;

// Explicit re-exports for chain module
pub use chain::{build_chains, Chain};

// Explicit re-exports for filters module
pub use filters::{FilterStage, FilterThresholds, SpreadDraft, SpreadFilter};

// Explicit re-exports for scoring module
pub use scoring::{ev_efficiency, expected_value, ProbabilityEstimate};

// Explicit re-exports for spread module
pub use spread::{enumerate_spreads, enumerate_with_stats, RejectionStats, SpreadCandidate};

// Explicit re-exports for ranker module
pub use ranker::{rank_spreads, DEFAULT_TOP_N};

// Explicit re-exports for scanner module
pub use scanner::SpreadScanner;

// Explicit re-exports for report module
pub use report::{format_spread_report, NO_RESULTS_MESSAGE, SCAN_FAILED_MESSAGE};

// Explicit re-exports for watcher module
pub use watcher::watcher_task;
