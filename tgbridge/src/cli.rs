//! CLI parser, config loading and the webhook admin subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tgbridge_telegram::{
    build_teloxide_bot, register_webhook, remove_webhook, webhook_info, TelegramConfig,
};
use tgbridge_web::BridgeMode;

use crate::config::BridgeConfig;

#[derive(Parser)]
#[command(name = "tgbridge")]
#[command(about = "Telegram bot to web bridge", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bridge (config from env; flags override BOT_TOKEN and BRIDGE_MODE).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// polling or webhook
        #[arg(short, long)]
        mode: Option<String>,
    },
    /// Register the webhook with Telegram (WEBHOOK_URL + WEBHOOK_PATH, WEBHOOK_SECRET).
    SetWebhook {
        #[arg(short, long)]
        token: Option<String>,
        /// Public base URL; overrides WEBHOOK_URL.
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Delete the webhook so long polling can be used again.
    DeleteWebhook {
        #[arg(short, long)]
        token: Option<String>,
        #[arg(long)]
        drop_pending: bool,
    },
    /// Print the webhook status Telegram reports.
    WebhookInfo {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Load BridgeConfig from environment. `token` overrides BOT_TOKEN, `mode` overrides BRIDGE_MODE.
pub fn load_config(token: Option<String>, mode: Option<String>) -> Result<BridgeConfig> {
    let mode = mode.map(|m| m.parse::<BridgeMode>()).transpose()?;
    BridgeConfig::load(token, mode)
}

pub async fn set_webhook(token: Option<String>, url: Option<String>) -> Result<()> {
    let mut config = BridgeConfig::load(token, Some(BridgeMode::Webhook))?;
    if url.is_some() {
        config.webhook_url = url;
    }
    config.validate()?;

    let endpoint = config.webhook_endpoint()?;
    let bot = build_teloxide_bot(&config.telegram)?;
    register_webhook(
        &bot,
        endpoint.clone(),
        config.webhook_secret.as_deref(),
        config.webhook_drop_pending,
    )
    .await?;
    println!("Webhook set: {}", endpoint);
    Ok(())
}

pub async fn delete_webhook(token: Option<String>, drop_pending: bool) -> Result<()> {
    let config = TelegramConfig::from_env(token)?;
    config.validate()?;
    let bot = build_teloxide_bot(&config)?;
    remove_webhook(&bot, drop_pending).await?;
    println!("Webhook deleted (drop_pending: {})", drop_pending);
    Ok(())
}

pub async fn print_webhook_info(token: Option<String>) -> Result<()> {
    let config = TelegramConfig::from_env(token)?;
    config.validate()?;
    let bot = build_teloxide_bot(&config)?;
    let info = webhook_info(&bot).await?;

    let url = info.url.as_ref().map(|u| u.as_str()).unwrap_or("(none, polling)");
    println!("{:<22} {}", "url", url);
    println!("{:<22} {}", "pending_update_count", info.pending_update_count);
    println!(
        "{:<22} {}",
        "last_error_message",
        info.last_error_message.as_deref().unwrap_or("-")
    );
    Ok(())
}
