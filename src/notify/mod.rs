//! Outbound notifications for scan results
//!
//! The watcher only knows the `Notifier` trait; `TelegramBot` is the
//! production implementation and also serves the interactive commands.

pub mod telegram;

use async_trait::async_trait;

use crate::error::Result;

/// Delivers a pre-formatted text message to whoever is listening
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str) -> Result<()>;
}

pub use telegram::{command_task, BotCommand, TelegramBot, TelegramConfig};
