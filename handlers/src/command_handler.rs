//! Bot command registration and handling.
//!
//! [`Command`] is the single place commands are declared; the same enum drives parsing,
//! `/help` output and `setMyCommands`.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::requests::Requester;
use teloxide::types::ParseMode;
use teloxide::utils::command::{BotCommands, ParseError};
use tgbridge_core::{Bot, BridgeStats, Handler, HandlerResponse, Inbox, Message, Result};
use tgbridge_telegram::render::escape_for;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

pub const ECHO_USAGE: &str = "Usage: /echo <text>";

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show the welcome message.")]
    Start,
    #[command(description = "list available commands.")]
    Help,
    #[command(description = "check that the bot is alive.")]
    Ping,
    #[command(description = "repeat the given text.")]
    Echo(String),
    #[command(description = "show this chat's id for the web API.")]
    ChatId,
    #[command(description = "show bridge uptime and counters.")]
    Status,
}

/// Publishes the command list to Telegram (the client's "/" menu).
pub async fn register_commands(bot: &teloxide::Bot) -> std::result::Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

/// Lowercases the command word (before any `@botname`); arguments keep their case.
fn normalize_command(text: &str) -> String {
    let text = text.trim();
    let (head, args) = match text.find(char::is_whitespace) {
        Some(i) => text.split_at(i),
        None => (text, ""),
    };
    let (command, mention) = match head.find('@') {
        Some(i) => head.split_at(i),
        None => (head, ""),
    };
    format!("{}{}{}", command.to_lowercase(), mention, args)
}

/// Answers [`Command`]s through [`Bot::reply_to`] and returns `Reply(text)`.
/// Non-command text continues; commands for another bot are ignored.
pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    stats: Arc<BridgeStats>,
    inbox: Arc<Inbox>,
    bot_username: Arc<RwLock<Option<String>>>,
    parse_mode: Option<ParseMode>,
}

impl CommandHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        stats: Arc<BridgeStats>,
        inbox: Arc<Inbox>,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            bot,
            stats,
            inbox,
            bot_username,
            parse_mode: None,
        }
    }

    /// Parse mode the replies are escaped for; must match the Bot's outgoing parse mode.
    pub fn with_parse_mode(mut self, parse_mode: Option<ParseMode>) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    /// Builds the plain-text reply for a parsed command.
    pub fn reply_for(&self, command: &Command, message: &Message) -> String {
        match command {
            Command::Start => {
                let name = message.user.first_name.as_deref().unwrap_or("there");
                format!(
                    "Hi {}! This bot bridges Telegram and a web API.\nSend /help to see what I can do.",
                    name
                )
            }
            Command::Help => Command::descriptions().to_string(),
            Command::Ping => "pong".to_string(),
            Command::Echo(text) => {
                let text = text.trim();
                if text.is_empty() {
                    ECHO_USAGE.to_string()
                } else {
                    text.to_string()
                }
            }
            Command::ChatId => format!("Chat id: {}", message.chat.id),
            Command::Status => {
                let snapshot = self.stats.snapshot();
                format!(
                    "Uptime: {}s\nUpdates received: {}\nUpdates dropped: {}\nMessages processed: {}\nHandler errors: {}\nMessages sent: {}\nInbox: {}/{}",
                    snapshot.uptime_secs,
                    snapshot.updates_received,
                    snapshot.updates_dropped,
                    snapshot.messages_processed,
                    snapshot.handler_errors,
                    snapshot.messages_sent,
                    self.inbox.len(),
                    self.inbox.capacity()
                )
            }
        }
    }

    async fn send_reply(&self, message: &Message, reply: String) -> Result<HandlerResponse> {
        let rendered = escape_for(self.parse_mode, &reply);
        self.bot.reply_to(message, &rendered).await?;
        self.stats.record_sent();
        Ok(HandlerResponse::Reply(reply))
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(name) = message.command_name() else {
            return Ok(HandlerResponse::Continue);
        };

        let bot_name = self.bot_username.read().await.clone().unwrap_or_default();
        match Command::parse(&normalize_command(&message.content), &bot_name) {
            Ok(command) => {
                info!(
                    user_id = message.user.id,
                    chat_id = message.chat.id,
                    command = ?command,
                    "step: command received"
                );
                let reply = self.reply_for(&command, message);
                self.send_reply(message, reply).await
            }
            Err(ParseError::WrongBotName(target)) => {
                debug!(addressed_to = %target, "Command addressed to another bot, ignored");
                Ok(HandlerResponse::Ignore)
            }
            Err(ParseError::UnknownCommand(_)) => {
                let reply = format!("Unknown command: /{}. Send /help for the list.", name);
                self.send_reply(message, reply).await
            }
            Err(e) if name == "echo" => {
                debug!(error = %e, "Echo without arguments");
                self.send_reply(message, ECHO_USAGE.to_string()).await
            }
            Err(e) => {
                let reply = format!("Invalid arguments for /{}: {}", name, e);
                self.send_reply(message, reply).await
            }
        }
    }
}
