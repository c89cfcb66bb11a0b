//! Long-polling runner: converts teloxide messages to core::Message and pushes them into the
//! update queue. Calls teloxide REPL and get_me to populate bot_username.

use crate::queue::UpdateQueue;
use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tgbridge_core::ToCoreMessage;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Calls get_me() and stores the bot username in `bot_username`. Failures are logged, not fatal.
pub async fn refresh_bot_username(
    bot: &teloxide::Bot,
    bot_username: &RwLock<Option<String>>,
) -> Option<String> {
    match bot.get_me().await {
        Ok(me) => {
            let username = me.user.username.clone();
            if let Some(ref name) = username {
                info!(username = %name, "Bot username resolved");
            }
            *bot_username.write().await = username.clone();
            username
        }
        Err(e) => {
            warn!(error = %e, "get_me failed; commands addressed as /cmd@bot will be ignored");
            None
        }
    }
}

/// Starts the REPL with the given teloxide Bot. Each message is converted to core::Message and
/// enqueued; the dispatcher runs the handler chain. Returns when the REPL stops (Ctrl-C).
#[instrument(skip(bot, queue, bot_username))]
pub async fn run_polling(
    bot: teloxide::Bot,
    queue: UpdateQueue,
    bot_username: Arc<RwLock<Option<String>>>,
) -> Result<()> {
    refresh_bot_username(&bot, &bot_username).await;

    info!("Starting long polling");
    teloxide::repl(bot, move |msg: teloxide::types::Message| {
        let queue = queue.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            match msg.text() {
                Some(text) => {
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        message_content = %text,
                        "Received message"
                    );
                }
                None => {
                    info!(
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        "Received non-text message"
                    );
                }
            }

            let user_id = core_msg.user.id;
            if let Err(e) = queue.enqueue(core_msg).await {
                error!(error = %e, user_id = user_id, "Failed to enqueue polled message");
            }

            respond(())
        }
    })
    .await;

    info!("Long polling stopped");
    Ok(())
}
