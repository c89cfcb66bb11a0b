//! Bot abstraction for sending messages.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in `tgbridge-telegram`.
//! The web API and command handlers only see `Arc<dyn Bot>`, so tests substitute a mock.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends a message and returns its transport id (e.g. Telegram numeric string).
    /// When the text is split into several messages, returns the id of the last one.
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;
}
