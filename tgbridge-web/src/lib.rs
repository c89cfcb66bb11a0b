//! # tgbridge-web
//!
//! HTTP side of the bridge: `/health`, the Telegram webhook route and the `/api` REST surface,
//! served by actix-web on a dedicated thread. Talks to the bot runtime only through
//! [`tgbridge_telegram::UpdateQueue`] and the shared [`AppState`].

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{parse_env, BridgeMode, WebConfig, DEFAULT_WEBHOOK_PATH};
pub use error::{ApiError, ErrorBody};
pub use server::{spawn_server, WebServerHandle, WEB_THREAD_NAME};
pub use state::AppState;
