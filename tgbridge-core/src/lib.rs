//! # tgbridge-core
//!
//! Core types and traits for the Telegram to web bridge: [`Bot`], [`Handler`], message and user types,
//! the shared [`Inbox`] and [`BridgeStats`], and tracing initialization. Transport-agnostic; used by
//! tgbridge-telegram, tgbridge-web, handler-chain and handlers.

pub mod bot;
pub mod error;
pub mod inbox;
pub mod logger;
pub mod stats;
pub mod types;

pub use bot::Bot;
pub use error::{BridgeError, HandlerError, Result};
pub use inbox::{Inbox, InboxEntry};
pub use logger::init_tracing;
pub use stats::{BridgeStats, StatsSnapshot};
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
