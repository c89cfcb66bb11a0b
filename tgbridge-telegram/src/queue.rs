//! Bounded hand-off between update sources (webhook thread, polling loop) and the dispatcher.
//!
//! `UpdateQueue` wraps a `tokio::sync::mpsc::Sender`, which does not depend on the runtime it
//! was created on, so the actix thread and the tokio runtime share one queue.

use std::sync::Arc;

use thiserror::Error;
use tgbridge_core::{BridgeError, BridgeStats, Message};
use tokio::sync::mpsc::{self, error::TrySendError};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("update queue is full")]
    Full,
    #[error("update queue is closed")]
    Closed,
}

impl From<QueueError> for BridgeError {
    fn from(err: QueueError) -> Self {
        BridgeError::Queue(err.to_string())
    }
}

/// Sending side. Every enqueue attempt counts as received; failed attempts count as dropped.
#[derive(Clone)]
pub struct UpdateQueue {
    tx: mpsc::Sender<Message>,
    stats: Arc<BridgeStats>,
}

/// Receiving side, owned by the dispatcher.
pub struct UpdateReceiver {
    rx: mpsc::Receiver<Message>,
}

impl UpdateQueue {
    /// Creates a queue holding at most `capacity` messages (minimum 1).
    pub fn channel(capacity: usize, stats: Arc<BridgeStats>) -> (Self, UpdateReceiver) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx, stats }, UpdateReceiver { rx })
    }

    /// Enqueues without waiting. Used by the webhook route, which answers 503 on failure
    /// so Telegram redelivers later.
    pub fn try_enqueue(&self, message: Message) -> Result<(), QueueError> {
        self.stats.record_received();
        self.tx.try_send(message).map_err(|e| {
            self.stats.record_dropped();
            match e {
                TrySendError::Full(_) => QueueError::Full,
                TrySendError::Closed(_) => QueueError::Closed,
            }
        })
    }

    /// Enqueues, waiting for capacity. Used by polling, where waiting is the backpressure.
    pub async fn enqueue(&self, message: Message) -> Result<(), QueueError> {
        self.stats.record_received();
        self.tx.send(message).await.map_err(|_| {
            self.stats.record_dropped();
            QueueError::Closed
        })
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl UpdateReceiver {
    /// Next message; `None` once every `UpdateQueue` clone is dropped and the buffer is drained.
    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }

    /// Stops accepting new messages; buffered ones can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
