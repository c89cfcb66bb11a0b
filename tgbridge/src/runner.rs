//! Composition root: wires the bot runtime, the web thread and the update source, then shuts
//! them down in order.

use std::sync::Arc;

use anyhow::Result;
use handler_chain::HandlerChain;
use handlers::{register_commands, AuthHandler, CommandHandler, InboxHandler, LoggingHandler};
use tgbridge_core::{init_tracing, Bot, BridgeStats, Inbox};
use tgbridge_telegram::{
    build_teloxide_bot, refresh_bot_username, register_webhook, remove_webhook, run_dispatcher,
    run_polling, TelegramBotAdapter, UpdateQueue,
};
use tgbridge_web::{spawn_server, AppState, BridgeMode};
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::config::BridgeConfig;

/// Chain order: logging, auth, inbox, commands.
pub fn build_handler_chain(
    config: &BridgeConfig,
    bot: Arc<dyn Bot>,
    inbox: Arc<Inbox>,
    stats: Arc<BridgeStats>,
    bot_username: Arc<RwLock<Option<String>>>,
) -> HandlerChain {
    let auth = AuthHandler::new(config.allowed_users.clone())
        .with_chats(config.allowed_chats.clone());
    let commands = CommandHandler::new(bot, stats, inbox.clone(), bot_username)
        .with_parse_mode(config.telegram.parse_mode);

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(auth))
        .add_handler(Arc::new(InboxHandler::new(inbox)))
        .add_handler(Arc::new(commands))
}

/// Main entry: validate, init logging, start dispatcher and web thread, run the update source
/// until Ctrl-C, then shut down.
#[instrument(skip(config))]
pub async fn run_bridge(config: BridgeConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        mode = %config.mode,
        http_host = %config.web.host,
        http_port = config.web.port,
        queue_capacity = config.queue_capacity,
        max_concurrent_handlers = config.max_concurrent_handlers,
        "Initializing bridge"
    );

    let teloxide_bot = build_teloxide_bot(&config.telegram)?;
    let bot_username = Arc::new(RwLock::new(None));
    refresh_bot_username(&teloxide_bot, &bot_username).await;
    if let Err(e) = register_commands(&teloxide_bot).await {
        warn!(error = %e, "setMyCommands failed; the command menu may be stale");
    }

    let inbox = Arc::new(Inbox::new(config.inbox_capacity));
    let stats = Arc::new(BridgeStats::new());
    let bot: Arc<dyn Bot> = Arc::new(
        TelegramBotAdapter::new(teloxide_bot.clone()).with_parse_mode(config.telegram.parse_mode),
    );
    let chain = build_handler_chain(
        &config,
        bot.clone(),
        inbox.clone(),
        stats.clone(),
        bot_username.clone(),
    );

    let (queue, receiver) = UpdateQueue::channel(config.queue_capacity, stats.clone());
    let dispatcher = tokio::spawn(run_dispatcher(
        receiver,
        chain,
        stats.clone(),
        config.max_concurrent_handlers,
    ));

    let mut state = AppState::new(bot, inbox, stats.clone(), config.mode)
        .with_webhook_secret(config.webhook_secret.clone())
        .with_api_key(config.web.api_key.clone());
    if config.mode == BridgeMode::Webhook {
        state = state.with_queue(queue.clone());
    }
    let server = spawn_server(config.web.clone(), state).await?;

    info!("Bridge started successfully");

    let source_result = match config.mode {
        BridgeMode::Webhook => {
            drop(queue);
            serve_webhook(&config, &teloxide_bot).await
        }
        BridgeMode::Polling => run_polling(teloxide_bot.clone(), queue, bot_username).await,
    };
    if let Err(ref e) = source_result {
        error!(error = %e, "Update source failed");
    }

    info!("step: shutdown started");
    if let Err(e) = server.stop().await {
        error!(error = %e, "Web server did not stop cleanly");
    }
    // Every queue sender is gone now; the dispatcher finishes in-flight chains and returns.
    if let Err(e) = dispatcher.await {
        error!(error = %e, "Dispatcher task failed");
    }
    if config.mode == BridgeMode::Webhook && config.webhook_delete_on_shutdown {
        if let Err(e) = remove_webhook(&teloxide_bot, false).await {
            warn!(error = %e, "deleteWebhook failed on shutdown");
        }
    }

    let snapshot = stats.snapshot();
    info!(
        updates_received = snapshot.updates_received,
        updates_dropped = snapshot.updates_dropped,
        messages_processed = snapshot.messages_processed,
        handler_errors = snapshot.handler_errors,
        messages_sent = snapshot.messages_sent,
        uptime_secs = snapshot.uptime_secs,
        "Bridge stopped"
    );

    source_result
}

/// Registers the webhook and waits for Ctrl-C; the web thread does the receiving.
async fn serve_webhook(config: &BridgeConfig, bot: &teloxide::Bot) -> Result<()> {
    let endpoint = config.webhook_endpoint()?;
    register_webhook(
        bot,
        endpoint,
        config.webhook_secret.as_deref(),
        config.webhook_drop_pending,
    )
    .await?;

    info!("Waiting for webhook updates (Ctrl-C to stop)");
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    Ok(())
}
