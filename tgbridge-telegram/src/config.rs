//! Telegram connectivity config: token, optional Bot API URL, outgoing parse mode.
//! Loaded from env: BOT_TOKEN, TELEGRAM_API_URL (or TELOXIDE_API_URL), PARSE_MODE.

use anyhow::Result;
use std::env;
use teloxide::types::ParseMode;

/// Telegram bot config (connectivity and message formatting only).
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    /// `None` sends plain text.
    pub parse_mode: Option<ParseMode>,
}

impl TelegramConfig {
    /// Loads from env. `token` overrides BOT_TOKEN; one of them is required.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let parse_mode = match env::var("PARSE_MODE") {
            Ok(value) => parse_parse_mode(&value)?,
            Err(_) => None,
        };
        Ok(Self {
            bot_token,
            telegram_api_url,
            parse_mode,
        })
    }

    /// Builds config with the given token; no API URL override, plain text.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            parse_mode: None,
        }
    }

    /// Token must be non-empty; telegram_api_url must be a valid URL if set.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}

/// Parses PARSE_MODE: `plain` (or empty) | `html` | `markdownv2`, case-insensitive.
pub fn parse_parse_mode(value: &str) -> Result<Option<ParseMode>> {
    match value.trim().to_lowercase().as_str() {
        "" | "plain" | "none" => Ok(None),
        "html" => Ok(Some(ParseMode::Html)),
        "markdownv2" | "markdown_v2" => Ok(Some(ParseMode::MarkdownV2)),
        other => anyhow::bail!(
            "PARSE_MODE must be one of plain, html, markdownv2 (got {})",
            other
        ),
    }
}

/// Creates the teloxide client, pointing it at `telegram_api_url` when set.
pub fn build_teloxide_bot(config: &TelegramConfig) -> Result<teloxide::Bot> {
    let mut bot = teloxide::Bot::new(config.bot_token.clone());
    if let Some(ref url_str) = config.telegram_api_url {
        let url = reqwest::Url::parse(url_str)?;
        bot = bot.set_api_url(url);
    }
    Ok(bot)
}
