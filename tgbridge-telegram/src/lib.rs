//! # tgbridge-telegram
//!
//! Telegram transport for the bridge: adapters, [`tgbridge_core::Bot`] implementation, config,
//! the update queue shared with the web thread, the dispatcher, the polling runner and webhook
//! registration. No HTTP serving and no command logic live here.

mod adapters;
mod bot_adapter;
mod config;
mod dispatcher;
mod queue;
pub mod render;
mod runner;
mod webhook;

pub use adapters::{message_from_update, parse_update, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{build_teloxide_bot, parse_parse_mode, TelegramConfig};
pub use dispatcher::run_dispatcher;
pub use queue::{QueueError, UpdateQueue, UpdateReceiver};
pub use runner::{refresh_bot_username, run_polling};
pub use webhook::{
    is_valid_secret_token, register_webhook, remove_webhook, webhook_endpoint, webhook_info,
    SECRET_TOKEN_HEADER,
};

pub use teloxide::types::ParseMode;
