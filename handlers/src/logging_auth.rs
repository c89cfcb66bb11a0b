//! Handlers for logging and optional auth (user / chat allowlist).

use async_trait::async_trait;
use tgbridge_core::{Handler, HandlerError, HandlerResponse, Message, Result};
use tracing::{debug, error, info, instrument};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = ?message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

/// Fails with Unauthorized unless the user id or the chat id is allowlisted.
/// With both lists empty every message passes.
pub struct AuthHandler {
    allowed_users: Vec<i64>,
    allowed_chats: Vec<i64>,
}

impl AuthHandler {
    /// Creates a handler that allows only the given user ids.
    pub fn new(allowed_users: Vec<i64>) -> Self {
        Self {
            allowed_users,
            allowed_chats: Vec::new(),
        }
    }

    /// Also allows every member of the given chats.
    pub fn with_chats(mut self, allowed_chats: Vec<i64>) -> Self {
        self.allowed_chats = allowed_chats;
        self
    }

    pub fn is_open(&self) -> bool {
        self.allowed_users.is_empty() && self.allowed_chats.is_empty()
    }

    pub fn is_allowed(&self, user_id: i64, chat_id: i64) -> bool {
        self.is_open()
            || self.allowed_users.contains(&user_id)
            || self.allowed_chats.contains(&chat_id)
    }
}

#[async_trait]
impl Handler for AuthHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let user_id = message.user.id;
        let chat_id = message.chat.id;
        if self.is_allowed(user_id, chat_id) {
            debug!(user_id = user_id, chat_id = chat_id, "User authorized");
            Ok(true)
        } else {
            error!(user_id = user_id, chat_id = chat_id, "Unauthorized access attempt");
            Err(HandlerError::Unauthorized.into())
        }
    }
}
