//! Bull-call spread scanner
//!
//! Minimal implementation focusing on:
//! - Option-chain market data (Bybit v5 REST)
//! - Spread enumeration through an ordered filter pipeline
//! - EV-based ranking and Telegram delivery

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;
pub mod notify;

pub use error::AppError;
