//! Shared application state handed to every actix worker.

use std::sync::Arc;

use tgbridge_core::{Bot, BridgeStats, Inbox};
use tgbridge_telegram::UpdateQueue;

use crate::config::BridgeMode;

/// Everything the routes need. Cloned into `web::Data` once; all fields are cheap to share.
#[derive(Clone)]
pub struct AppState {
    /// Present only in webhook mode; the webhook route answers 404 without it.
    pub queue: Option<UpdateQueue>,
    pub bot: Arc<dyn Bot>,
    pub inbox: Arc<Inbox>,
    pub stats: Arc<BridgeStats>,
    pub webhook_secret: Option<String>,
    pub api_key: Option<String>,
    pub mode: BridgeMode,
}

impl AppState {
    pub fn new(
        bot: Arc<dyn Bot>,
        inbox: Arc<Inbox>,
        stats: Arc<BridgeStats>,
        mode: BridgeMode,
    ) -> Self {
        Self {
            queue: None,
            bot,
            inbox,
            stats,
            webhook_secret: None,
            api_key: None,
            mode,
        }
    }

    pub fn with_queue(mut self, queue: UpdateQueue) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn with_webhook_secret(mut self, secret: Option<String>) -> Self {
        self.webhook_secret = secret;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}
