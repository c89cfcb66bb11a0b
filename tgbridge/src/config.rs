//! Bridge configuration: Telegram connectivity + web server + update source + pipeline sizing.
//! Loaded from env (after `.env`); CLI flags override.

use std::env;

use anyhow::{Context, Result};
use tgbridge_telegram::{is_valid_secret_token, webhook_endpoint, TelegramConfig};
use tgbridge_web::{parse_env, BridgeMode, WebConfig};

pub const DEFAULT_LOG_FILE: &str = "logs/tgbridge.log";
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;
pub const DEFAULT_MAX_CONCURRENT_HANDLERS: usize = 16;
pub const DEFAULT_INBOX_CAPACITY: usize = 500;

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub telegram: TelegramConfig,
    pub web: WebConfig,
    /// BRIDGE_MODE
    pub mode: BridgeMode,
    /// LOG_FILE
    pub log_file: String,
    /// WEBHOOK_URL, public base URL Telegram calls (https)
    pub webhook_url: Option<String>,
    /// WEBHOOK_SECRET
    pub webhook_secret: Option<String>,
    /// WEBHOOK_DROP_PENDING
    pub webhook_drop_pending: bool,
    /// WEBHOOK_DELETE_ON_SHUTDOWN
    pub webhook_delete_on_shutdown: bool,
    /// ALLOWED_USERS
    pub allowed_users: Vec<i64>,
    /// ALLOWED_CHATS
    pub allowed_chats: Vec<i64>,
    /// UPDATE_QUEUE_CAPACITY
    pub queue_capacity: usize,
    /// MAX_CONCURRENT_HANDLERS
    pub max_concurrent_handlers: usize,
    /// INBOX_CAPACITY
    pub inbox_capacity: usize,
}

impl BridgeConfig {
    /// Loads from env. `token` overrides BOT_TOKEN, `mode` overrides BRIDGE_MODE.
    pub fn load(token: Option<String>, mode: Option<BridgeMode>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let web = WebConfig::from_env()?;
        let mode = match mode {
            Some(mode) => mode,
            None => match env::var("BRIDGE_MODE") {
                Ok(raw) => raw.parse()?,
                Err(_) => BridgeMode::Polling,
            },
        };

        Ok(Self {
            telegram,
            web,
            mode,
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string()),
            webhook_url: non_empty_env("WEBHOOK_URL"),
            webhook_secret: non_empty_env("WEBHOOK_SECRET"),
            webhook_drop_pending: parse_env("WEBHOOK_DROP_PENDING", false)?,
            webhook_delete_on_shutdown: parse_env("WEBHOOK_DELETE_ON_SHUTDOWN", true)?,
            allowed_users: parse_id_list_env("ALLOWED_USERS")?,
            allowed_chats: parse_id_list_env("ALLOWED_CHATS")?,
            queue_capacity: parse_env("UPDATE_QUEUE_CAPACITY", DEFAULT_QUEUE_CAPACITY)?,
            max_concurrent_handlers: parse_env(
                "MAX_CONCURRENT_HANDLERS",
                DEFAULT_MAX_CONCURRENT_HANDLERS,
            )?,
            inbox_capacity: parse_env("INBOX_CAPACITY", DEFAULT_INBOX_CAPACITY)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        self.web.validate()?;

        if self.mode == BridgeMode::Webhook {
            if self.webhook_url.is_none() {
                anyhow::bail!("WEBHOOK_URL is required when BRIDGE_MODE=webhook");
            }
            self.webhook_endpoint()?;
        }
        if let Some(ref secret) = self.webhook_secret {
            if !is_valid_secret_token(secret) {
                anyhow::bail!(
                    "WEBHOOK_SECRET must be 1-256 characters of A-Z, a-z, 0-9, '_' or '-'"
                );
            }
        }
        if self.queue_capacity == 0 {
            anyhow::bail!("UPDATE_QUEUE_CAPACITY must be at least 1");
        }
        if self.max_concurrent_handlers == 0 {
            anyhow::bail!("MAX_CONCURRENT_HANDLERS must be at least 1");
        }
        if self.inbox_capacity == 0 {
            anyhow::bail!("INBOX_CAPACITY must be at least 1");
        }
        Ok(())
    }

    /// Full URL Telegram should post updates to: WEBHOOK_URL joined with WEBHOOK_PATH.
    pub fn webhook_endpoint(&self) -> Result<reqwest::Url> {
        let base = self
            .webhook_url
            .as_deref()
            .context("WEBHOOK_URL is not set")?;
        let endpoint = webhook_endpoint(base, &self.web.webhook_path)?;
        if endpoint.scheme() != "https" {
            anyhow::bail!("WEBHOOK_URL must use https (got {})", base);
        }
        Ok(endpoint)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_id_list_env(key: &str) -> Result<Vec<i64>> {
    match env::var(key) {
        Ok(raw) => parse_id_list(&raw).with_context(|| format!("{} has an invalid id list", key)),
        Err(_) => Ok(Vec::new()),
    }
}

/// Parses a comma-separated list of Telegram ids; blanks are skipped.
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("not an integer id: {}", s))
        })
        .collect()
}
