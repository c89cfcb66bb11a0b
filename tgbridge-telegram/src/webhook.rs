//! Webhook registration with the Bot API (setWebhook / deleteWebhook / getWebhookInfo).
//! Receiving webhook requests is the web crate's job; this module only talks to Telegram.

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::WebhookInfo;
use tracing::{info, instrument};

/// Header Telegram sets on every webhook request when a secret token was registered.
pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Joins the public base URL and the webhook route path into the URL Telegram should call.
pub fn webhook_endpoint(base_url: &str, path: &str) -> Result<reqwest::Url> {
    let base = reqwest::Url::parse(base_url)
        .map_err(|e| anyhow::anyhow!("WEBHOOK_URL is not a valid URL ({}): {}", e, base_url))?;
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(reqwest::Url::parse(&joined)?)
}

/// Telegram accepts 1-256 characters from `A-Z a-z 0-9 _ -`.
pub fn is_valid_secret_token(secret: &str) -> bool {
    (1..=256).contains(&secret.len())
        && secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[instrument(skip(bot, secret))]
pub async fn register_webhook(
    bot: &teloxide::Bot,
    endpoint: reqwest::Url,
    secret: Option<&str>,
    drop_pending_updates: bool,
) -> Result<()> {
    let mut request = bot
        .set_webhook(endpoint.clone())
        .drop_pending_updates(drop_pending_updates);
    if let Some(secret) = secret {
        request = request.secret_token(secret.to_string());
    }
    request.await?;
    info!(url = %endpoint, drop_pending_updates, "Webhook registered");
    Ok(())
}

#[instrument(skip(bot))]
pub async fn remove_webhook(bot: &teloxide::Bot, drop_pending_updates: bool) -> Result<()> {
    bot.delete_webhook()
        .drop_pending_updates(drop_pending_updates)
        .await?;
    info!("Webhook deleted");
    Ok(())
}

pub async fn webhook_info(bot: &teloxide::Bot) -> Result<WebhookInfo> {
    Ok(bot.get_webhook_info().await?)
}
