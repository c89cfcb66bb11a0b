//! Bounded in-memory record of recent inbound messages, shared between the bot runtime
//! (writer) and the web thread (reader).

use std::collections::VecDeque;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::Message;

/// One recorded inbound message as exposed by the web API.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InboxEntry {
    pub message_id: String,
    pub chat_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl From<&Message> for InboxEntry {
    fn from(message: &Message) -> Self {
        Self {
            message_id: message.id.clone(),
            chat_id: message.chat.id,
            user_id: message.user.id,
            username: message.user.username.clone(),
            text: message.content.clone(),
            received_at: message.created_at,
        }
    }
}

/// Ring buffer of [`InboxEntry`]; the oldest entry is evicted once `capacity` is reached.
#[derive(Debug)]
pub struct Inbox {
    capacity: usize,
    entries: RwLock<VecDeque<InboxEntry>>,
}

impl Inbox {
    /// Creates an empty inbox. A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records a message, evicting the oldest entry when full.
    pub fn push(&self, message: &Message) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(InboxEntry::from(message));
    }

    /// Returns up to `limit` entries, newest first, optionally filtered by chat.
    pub fn recent(&self, chat_id: Option<i64>, limit: usize) -> Vec<InboxEntry> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .iter()
            .rev()
            .filter(|entry| chat_id.map_or(true, |id| entry.chat_id == id))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
