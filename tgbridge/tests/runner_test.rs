//! Tests for [`tgbridge::build_handler_chain`]: the assembled chain (logging, auth, inbox,
//! commands) behaves end to end against a recording bot.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tgbridge::{build_handler_chain, BridgeConfig};
use tgbridge_core::{
    Bot, BridgeError, BridgeStats, Chat, HandlerError, HandlerResponse, Inbox, Message,
    Result, User,
};
use tgbridge_telegram::TelegramConfig;
use tgbridge_web::{BridgeMode, WebConfig};
use tokio::sync::RwLock;

#[derive(Default)]
struct RecordingBot {
    sent: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        self.send_message(chat, text).await?;
        Ok("1".to_string())
    }
}

fn test_config(allowed_users: Vec<i64>) -> BridgeConfig {
    BridgeConfig {
        telegram: TelegramConfig::with_token("test_token".to_string()),
        web: WebConfig::default(),
        mode: BridgeMode::Polling,
        log_file: "logs/test.log".to_string(),
        webhook_url: None,
        webhook_secret: None,
        webhook_drop_pending: false,
        webhook_delete_on_shutdown: true,
        allowed_users,
        allowed_chats: Vec::new(),
        queue_capacity: 4,
        max_concurrent_handlers: 2,
        inbox_capacity: 10,
    }
}

fn message(user_id: i64, content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: user_id,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 500,
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

/// **Test: The composed chain records text, answers commands and counts replies.**
///
/// **Setup:** Open allowlist, recording bot, inbox of 10.
/// **Action:** Send plain text, then /ping.
/// **Expected:** Text lands in the inbox with Continue; /ping replies pong once and is counted.
#[tokio::test]
async fn test_chain_records_text_and_answers_commands() {
    let bot = Arc::new(RecordingBot::default());
    let inbox = Arc::new(Inbox::new(10));
    let stats = Arc::new(BridgeStats::new());
    let chain = build_handler_chain(
        &test_config(Vec::new()),
        bot.clone(),
        inbox.clone(),
        stats.clone(),
        Arc::new(RwLock::new(Some("bridge_bot".to_string()))),
    );
    assert_eq!(chain.len(), 4);

    let response = chain.handle(&message(1, "hello there")).await.unwrap();
    assert_eq!(response, HandlerResponse::Continue);
    assert_eq!(inbox.len(), 1);

    let response = chain.handle(&message(1, "/ping")).await.unwrap();
    assert_eq!(response, HandlerResponse::Reply("pong".to_string()));
    assert_eq!(inbox.len(), 1, "commands are not recorded");
    assert_eq!(*bot.sent.lock().unwrap(), vec![(500, "pong".to_string())]);
    assert_eq!(stats.snapshot().messages_sent, 1);
}

/// **Test: Auth runs before the inbox and commands; rejected users leave no trace.**
#[tokio::test]
async fn test_chain_rejects_users_outside_allowlist() {
    let bot = Arc::new(RecordingBot::default());
    let inbox = Arc::new(Inbox::new(10));
    let chain = build_handler_chain(
        &test_config(vec![42]),
        bot.clone(),
        inbox.clone(),
        Arc::new(BridgeStats::new()),
        Arc::new(RwLock::new(None)),
    );

    let result = chain.handle(&message(7, "/ping")).await;
    assert!(matches!(
        result,
        Err(BridgeError::Handler(HandlerError::Unauthorized))
    ));
    assert!(bot.sent.lock().unwrap().is_empty());

    let result = chain.handle(&message(7, "sneaky text")).await;
    assert!(result.is_err());
    assert!(inbox.is_empty());

    let response = chain.handle(&message(42, "/ping")).await.unwrap();
    assert_eq!(response, HandlerResponse::Reply("pong".to_string()));
}
