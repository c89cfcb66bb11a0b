//! Wraps teloxide::Bot and implements [`tgbridge_core::Bot`]. Production code sends messages via Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use teloxide::{prelude::*, types::ChatId, types::MessageId, types::ParseMode};
use tgbridge_core::{Bot as CoreBot, BridgeError, Chat, Message, Result};

use crate::render::{split_message, TELEGRAM_MESSAGE_LIMIT};

/// Thin wrapper around teloxide::Bot that implements the core Bot trait.
/// Applies the configured parse mode and splits text over the Bot API length limit.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
    parse_mode: Option<ParseMode>,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot; sends plain text.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self {
            bot,
            parse_mode: None,
        }
    }

    /// Sets the parse mode applied to every outgoing message.
    pub fn with_parse_mode(mut self, parse_mode: Option<ParseMode>) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    pub fn parse_mode(&self) -> Option<ParseMode> {
        self.parse_mode
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    /// Sends `text` as one or more messages; returns the id of the last one.
    async fn send_chunks(&self, chat_id: ChatId, text: &str) -> Result<MessageId> {
        let mut last_id = None;
        for chunk in split_message(text, TELEGRAM_MESSAGE_LIMIT) {
            let mut request = self.bot.send_message(chat_id, chunk);
            if let Some(mode) = self.parse_mode {
                request = request.parse_mode(mode);
            }
            let sent = request
                .await
                .map_err(|e| BridgeError::Bot(e.to_string()))?;
            last_id = Some(sent.id);
        }
        last_id.ok_or_else(|| BridgeError::Bot("Refusing to send an empty message".to_string()))
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.send_chunks(ChatId(chat.id), text).await?;
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let id = self.send_chunks(ChatId(chat.id), text).await?;
        Ok(id.to_string())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}
