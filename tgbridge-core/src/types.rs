//! Core types: user, chat, message, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel, group or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    /// Chat addressed only by id (e.g. from the web API), type unknown.
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            chat_type: "unknown".to_string(),
        }
    }
}

/// A single message with user, chat, content, and optional reply context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub message_type: String,
    pub created_at: DateTime<Utc>,
    pub reply_to_message_id: Option<String>,
    /// Whether the replied-to message was sent by a bot; only meaningful when `reply_to_message_id` is set.
    pub reply_to_message_from_bot: bool,
    /// Content of the replied-to message, if it had text.
    pub reply_to_message_content: Option<String>,
}

impl Message {
    /// True when the trimmed content starts with `/`.
    pub fn is_command(&self) -> bool {
        self.content.trim_start().starts_with('/')
    }

    /// Lowercase command word without the leading `/` and any `@botname` suffix.
    pub fn command_name(&self) -> Option<String> {
        let first = self.content.trim_start().split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or_default();
        if name.is_empty() {
            None
        } else {
            Some(name.to_lowercase())
        }
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_with(content: &str) -> Message {
        Message {
            id: "1".to_string(),
            user: User {
                id: 1,
                username: None,
                first_name: None,
                last_name: None,
            },
            chat: Chat::with_id(2),
            content: content.to_string(),
            message_type: "text".to_string(),
            created_at: Utc::now(),
            reply_to_message_id: None,
            reply_to_message_from_bot: false,
            reply_to_message_content: None,
        }
    }

    #[test]
    fn test_command_name_plain() {
        assert_eq!(message_with("/help").command_name().as_deref(), Some("help"));
        assert_eq!(message_with("  /Echo hi there").command_name().as_deref(), Some("echo"));
    }

    #[test]
    fn test_command_name_strips_bot_suffix() {
        assert_eq!(
            message_with("/start@bridge_bot").command_name().as_deref(),
            Some("start")
        );
    }

    #[test]
    fn test_command_name_none_for_text() {
        assert!(message_with("hello").command_name().is_none());
        assert!(message_with("/").command_name().is_none());
        assert!(message_with("").command_name().is_none());
        assert!(!message_with("hello /help").is_command());
    }

    #[test]
    fn test_chat_with_id() {
        let chat = Chat::with_id(-100);
        assert_eq!(chat.id, -100);
        assert_eq!(chat.chat_type, "unknown");
    }
}
