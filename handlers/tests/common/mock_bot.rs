//! Mock implementation of [`tgbridge_core::Bot`] for handler tests.
//!
//! Records every outgoing text so tests can assert on replies without hitting Telegram.

use async_trait::async_trait;
use std::sync::Arc;
use tgbridge_core::{Bot, BridgeError, Chat, Message, Result};
use tokio::sync::mpsc;

/// One recorded outgoing message.
#[derive(Debug, Clone)]
pub struct SentRecord {
    pub chat_id: i64,
    pub text: String,
}

/// Mock Bot that forwards each sent text to `sent_tx`; optionally fails every send.
pub struct MockBot {
    sent_tx: mpsc::UnboundedSender<SentRecord>,
    fail: bool,
}

impl MockBot {
    /// Creates a MockBot and returns the receiver for sent records.
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<SentRecord>) {
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        (Arc::new(Self { sent_tx, fail: false }), sent_rx)
    }

    /// MockBot whose sends all fail with `BridgeError::Bot`.
    #[allow(dead_code)]
    pub fn failing() -> Arc<Self> {
        let (sent_tx, _sent_rx) = mpsc::unbounded_channel();
        Arc::new(Self { sent_tx, fail: true })
    }

    fn record(&self, chat: &Chat, text: &str) -> Result<()> {
        if self.fail {
            return Err(BridgeError::Bot("mock send failure".to_string()));
        }
        let _ = self.sent_tx.send(SentRecord {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(chat, text)
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(&message.chat, text)
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        self.record(chat, text)?;
        Ok("1".to_string())
    }
}
