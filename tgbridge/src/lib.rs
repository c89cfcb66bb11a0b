//! # tgbridge
//!
//! Telegram bot to web bridge. Loads config from env, runs the bot on a tokio runtime and the
//! web server on its own thread, connected by a bounded update queue.

pub mod cli;
pub mod config;
pub mod runner;

pub use cli::{delete_webhook, load_config, print_webhook_info, set_webhook, Cli, Commands};
pub use config::{parse_id_list, BridgeConfig};
pub use runner::{build_handler_chain, run_bridge};
