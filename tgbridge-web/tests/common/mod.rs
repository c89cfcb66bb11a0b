#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tgbridge_core::{Bot, BridgeError, BridgeStats, Chat, Inbox, Message, Result, User};
use tgbridge_web::{AppState, BridgeMode};

pub const API_KEY: &str = "test-key";
pub const SECRET: &str = "hook-secret";

pub const TEXT_UPDATE: &str = r#"{
    "update_id": 10,
    "message": {
        "message_id": 42,
        "date": 1700000000,
        "chat": {"id": 456, "type": "private", "first_name": "Test"},
        "from": {"id": 123, "is_bot": false, "first_name": "Test", "username": "testuser"},
        "text": "hello bridge"
    }
}"#;

pub const CALLBACK_UPDATE: &str = r#"{
    "update_id": 11,
    "callback_query": {
        "id": "cb-1",
        "from": {"id": 123, "is_bot": false, "first_name": "Test"},
        "chat_instance": "ci-1"
    }
}"#;

/// Bot that keeps every sent `(chat_id, text)`; optionally fails every send.
#[derive(Default)]
pub struct RecordingBot {
    pub sent: Mutex<Vec<(i64, String)>>,
    pub fail: bool,
}

impl RecordingBot {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, chat: &Chat, text: &str) -> Result<()> {
        if self.fail {
            return Err(BridgeError::Bot("chat not found".to_string()));
        }
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(chat, text)
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(&message.chat, text)
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        self.record(chat, text)?;
        Ok("777".to_string())
    }
}

/// Polling-mode state with an API key and a 10-entry inbox.
pub fn polling_state(bot: Arc<RecordingBot>) -> AppState {
    AppState::new(
        bot,
        Arc::new(Inbox::new(10)),
        Arc::new(BridgeStats::new()),
        BridgeMode::Polling,
    )
    .with_api_key(Some(API_KEY.to_string()))
}

pub fn sample_message(id: &str, chat_id: i64, content: &str) -> Message {
    Message {
        id: id.to_string(),
        user: User {
            id: 123,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
        reply_to_message_id: None,
        reply_to_message_from_bot: false,
        reply_to_message_content: None,
    }
}
