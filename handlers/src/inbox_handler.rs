//! Records inbound conversation text into the shared [`Inbox`] so the web API can read it.

use std::sync::Arc;

use async_trait::async_trait;
use tgbridge_core::{Handler, HandlerResponse, Inbox, Message, Result};
use tracing::debug;

/// Pushes every non-command, non-empty message into the inbox; always continues.
pub struct InboxHandler {
    inbox: Arc<Inbox>,
}

impl InboxHandler {
    pub fn new(inbox: Arc<Inbox>) -> Self {
        Self { inbox }
    }
}

#[async_trait]
impl Handler for InboxHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.is_command() || message.content.trim().is_empty() {
            return Ok(HandlerResponse::Continue);
        }
        self.inbox.push(message);
        debug!(
            chat_id = message.chat.id,
            message_id = %message.id,
            inbox_len = self.inbox.len(),
            "step: message recorded in inbox"
        );
        Ok(HandlerResponse::Continue)
    }
}
