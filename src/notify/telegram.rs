//! Telegram Bot API client and command loop
//!
//! # Architecture
//! - `TelegramConfig`: token, API base URL and seed chat IDs from env
//! - `TelegramBot`: `sendMessage` / `getUpdates` over reqwest, subscriber set
//! - `command_task`: long-polls updates and answers `/start`, `/stop`,
//!   `/status` and `/scan` until shutdown

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, info, warn};

use crate::adapters::create_http_client;
use crate::config::constants::{http_timeout, telegram_poll_timeout_secs};
use crate::config::SanitizedValue;
use crate::core::report::{format_spread_report, SCAN_FAILED_MESSAGE};
use crate::core::scanner::SpreadScanner;
use crate::core::symbol::BaseAsset;
use crate::error::{AppError, Result};
use crate::notify::Notifier;

/// Public Bot API endpoint
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Pause before retrying after a failed `getUpdates`
const POLL_RETRY_DELAY_SECS: u64 = 5;

const WELCOME_MESSAGE: &str =
    "🚀 *Bull Call Scanner Started*\n\n🔔 You will receive spread signals after every scan";
const STOPPED_MESSAGE: &str = "🛑 Notifications stopped";
const USAGE_MESSAGE: &str = "👇 Use buttons below";
const SCANNING_MESSAGE: &str = "🔎 Scanning...";

// =============================================================================
// Configuration
// =============================================================================

#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub api_url: String,
    /// Chats subscribed at startup
    pub chat_ids: Vec<i64>,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &SanitizedValue::new(&self.bot_token))
            .field("api_url", &self.api_url)
            .field("chat_ids", &self.chat_ids)
            .finish()
    }
}

impl TelegramConfig {
    /// Read `BOT_TOKEN` (required), `TELEGRAM_CHAT_IDS` and `TELEGRAM_API_URL`
    pub fn from_env() -> Result<Self> {
        let bot_token = std::env::var("BOT_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::Config("BOT_TOKEN environment variable not set".to_string()))?;

        let chat_ids = std::env::var("TELEGRAM_CHAT_IDS")
            .map(|raw| parse_chat_ids(&raw))
            .unwrap_or_default();

        let api_url = std::env::var("TELEGRAM_API_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| TELEGRAM_API_URL.to_string());

        Ok(Self {
            bot_token,
            api_url: api_url.trim_end_matches('/').to_string(),
            chat_ids,
        })
    }
}

/// Parse a comma-separated list of chat IDs, skipping invalid entries
fn parse_chat_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(value = %s, "Ignoring invalid TELEGRAM_CHAT_IDS entry");
                None
            }
        })
        .collect()
}

// =============================================================================
// Bot API types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

/// Commands understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Stop,
    Status,
    Scan,
    Unknown,
}

impl BotCommand {
    /// Parse the first word of a message, accepting `/cmd@botname`
    pub fn parse(text: &str) -> Self {
        let word = text.split_whitespace().next().unwrap_or_default();
        let command = word.split('@').next().unwrap_or_default();
        match command {
            "/start" => BotCommand::Start,
            "/stop" => BotCommand::Stop,
            "/status" => BotCommand::Status,
            "/scan" => BotCommand::Scan,
            _ => BotCommand::Unknown,
        }
    }
}

fn main_keyboard() -> serde_json::Value {
    json!({
        "keyboard": [
            [{"text": "/start"}, {"text": "/status"}],
            [{"text": "/stop"}, {"text": "/scan"}]
        ],
        "resize_keyboard": true
    })
}

// =============================================================================
// TelegramBot
// =============================================================================

pub struct TelegramBot {
    config: TelegramConfig,
    http: reqwest::Client,
    subscribers: RwLock<HashSet<i64>>,
}

impl TelegramBot {
    pub fn new(config: TelegramConfig) -> Self {
        // getUpdates holds the connection open for the whole poll timeout
        let timeout = http_timeout() + Duration::from_secs(telegram_poll_timeout_secs());
        let http = create_http_client("telegram", timeout);
        let subscribers = config.chat_ids.iter().copied().collect();

        info!(
            token = %SanitizedValue::new(&config.bot_token),
            seeded_chats = config.chat_ids.len(),
            "Telegram bot configured"
        );

        Self {
            config,
            http,
            subscribers: RwLock::new(subscribers),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.config.api_url, self.config.bot_token, method)
    }

    async fn call<T>(&self, method: &str, body: serde_json::Value) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .post(self.method_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Notification(format!("{} request failed: {}", method, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Notification(format!("{} body read failed: {}", method, e)))?;

        let parsed: ApiResponse<T> = serde_json::from_str(&text).map_err(|e| {
            AppError::Notification(format!("{} returned HTTP {}: {} ({})", method, status, text, e))
        })?;

        if !parsed.ok {
            return Err(AppError::Notification(format!(
                "{} rejected: {}",
                method,
                parsed.description.unwrap_or_else(|| status.to_string())
            )));
        }
        parsed
            .result
            .ok_or_else(|| AppError::Notification(format!("{} returned no result", method)))
    }

    /// Send a Markdown message to one chat
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.send_with_markup(chat_id, text, None).await
    }

    async fn send_with_markup(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<serde_json::Value>,
    ) -> Result<()> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });
        if let Some(markup) = reply_markup {
            body["reply_markup"] = markup;
        }
        let _: serde_json::Value = self.call("sendMessage", body).await?;
        debug!(chat_id, "Telegram message sent");
        Ok(())
    }

    /// Long-poll for updates newer than `offset`
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    pub async fn subscribe(&self, chat_id: i64) -> bool {
        self.subscribers.write().await.insert(chat_id)
    }

    pub async fn unsubscribe(&self, chat_id: i64) -> bool {
        self.subscribers.write().await.remove(&chat_id)
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    pub async fn is_subscribed(&self, chat_id: i64) -> bool {
        self.subscribers.read().await.contains(&chat_id)
    }

    /// Answer one incoming text message
    pub async fn handle_message(
        &self,
        chat_id: i64,
        text: &str,
        scanner: &SpreadScanner,
        bases: &[BaseAsset],
    ) -> Result<()> {
        match BotCommand::parse(text) {
            BotCommand::Start => {
                self.subscribe(chat_id).await;
                info!(chat_id, "Chat subscribed");
                self.send_with_markup(chat_id, WELCOME_MESSAGE, Some(main_keyboard()))
                    .await
            }
            BotCommand::Stop => {
                self.unsubscribe(chat_id).await;
                info!(chat_id, "Chat unsubscribed");
                self.send_with_markup(chat_id, STOPPED_MESSAGE, Some(main_keyboard()))
                    .await
            }
            BotCommand::Status => {
                let status = format!("👥 Subscribers: {}", self.subscriber_count().await);
                self.send_message(chat_id, &status).await
            }
            BotCommand::Scan => {
                self.send_message(chat_id, SCANNING_MESSAGE).await?;
                for base in bases {
                    let reply = match scanner.scan(*base).await {
                        Ok(spreads) => format_spread_report(&spreads),
                        Err(e) => {
                            error!(chat_id, base = %base, error = %e, "On-demand scan failed");
                            SCAN_FAILED_MESSAGE.to_string()
                        }
                    };
                    self.send_message(chat_id, &reply).await?;
                }
                Ok(())
            }
            BotCommand::Unknown => {
                self.send_with_markup(chat_id, USAGE_MESSAGE, Some(main_keyboard()))
                    .await
            }
        }
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    /// Broadcast to every subscriber; one failed chat does not stop the rest
    async fn notify(&self, text: &str) -> Result<()> {
        let chats: Vec<i64> = self.subscribers.read().await.iter().copied().collect();
        if chats.is_empty() {
            debug!("No subscribers, notification dropped");
            return Ok(());
        }

        let mut failed = 0usize;
        for chat_id in &chats {
            if let Err(e) = self.send_message(*chat_id, text).await {
                failed += 1;
                warn!(chat_id = *chat_id, error = %e, "Send failed");
            }
        }

        if failed == chats.len() {
            return Err(AppError::Notification(format!(
                "delivery failed for all {} subscribers",
                failed
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Command loop
// =============================================================================

/// Poll for commands until shutdown
pub async fn command_task(
    bot: Arc<TelegramBot>,
    scanner: SpreadScanner,
    bases: Vec<BaseAsset>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    info!("Telegram command task started");
    let poll_timeout = telegram_poll_timeout_secs();
    let mut offset = 0i64;

    loop {
        let updates = tokio::select! {
            _ = shutdown_rx.recv() => {
                info!("Telegram command task shutting down");
                break;
            }
            result = bot.get_updates(offset, poll_timeout) => result,
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "getUpdates failed, retrying");
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Telegram command task shutting down");
                        break;
                    }
                    _ = tokio::time::sleep(Duration::from_secs(POLL_RETRY_DELAY_SECS)) => continue,
                }
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            let Some(message) = update.message else { continue };
            let Some(text) = message.text else { continue };

            if let Err(e) = bot
                .handle_message(message.chat.id, &text, &scanner, &bases)
                .await
            {
                warn!(chat_id = message.chat.id, error = %e, "Failed to answer command");
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
