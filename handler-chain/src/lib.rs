//! # Handler chain
//!
//! Runs a sequence of handlers for each inbound message. Every handler's `before` runs first (any
//! `false` stops the chain); then `handle` runs in order until one returns Stop or Reply; finally
//! every `after` runs in reverse order with the final response.

use std::sync::Arc;
use tgbridge_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Ordered list of handlers. Cloning is cheap (handlers are `Arc`), so the dispatcher hands a
/// clone to every spawned task.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

fn handler_name(handler: &Arc<dyn Handler>) -> &'static str {
    let full = std::any::type_name_of_val(handler.as_ref());
    full.rsplit("::").next().unwrap_or(full)
}

fn is_terminal(response: &HandlerResponse) -> bool {
    matches!(response, HandlerResponse::Stop | HandlerResponse::Reply(_))
}

impl HandlerChain {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler (before/handle in order; after in reverse).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs before → handle → after (reverse). Returns the first Stop or Reply, or Continue.
    /// A `false` from any `before` returns Stop without running the later phases.
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            handlers = self.handlers.len(),
            "step: handler_chain started"
        );

        if !self.run_before(message).await? {
            return Ok(HandlerResponse::Stop);
        }
        let response = self.run_handle(message).await?;
        self.run_after(message, &response).await?;

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            response = ?response,
            "step: handler_chain finished"
        );
        Ok(response)
    }

    async fn run_before(&self, message: &Message) -> Result<bool> {
        for handler in &self.handlers {
            if !handler.before(message).await? {
                info!(
                    user_id = message.user.id,
                    handler = handler_name(handler),
                    "step: before returned false, chain stopped"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn run_handle(&self, message: &Message) -> Result<HandlerResponse> {
        for handler in &self.handlers {
            let response = handler.handle(message).await?;
            debug!(
                handler = handler_name(handler),
                response = ?response,
                "step: handle done"
            );
            if is_terminal(&response) {
                return Ok(response);
            }
        }
        Ok(HandlerResponse::Continue)
    }

    async fn run_after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        for handler in self.handlers.iter().rev() {
            handler.after(message, response).await?;
        }
        Ok(())
    }
}
