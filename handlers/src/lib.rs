//! # Handlers for the bridge
//!
//! Handler implementations registered on the chain, in this order: logging, auth, inbox, commands.

mod command_handler;
mod inbox_handler;
mod logging_auth;

pub use command_handler::{register_commands, Command, CommandHandler, ECHO_USAGE};
pub use inbox_handler::InboxHandler;
pub use logging_auth::{AuthHandler, LoggingHandler};
