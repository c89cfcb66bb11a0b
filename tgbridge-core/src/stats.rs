//! Process-wide counters shared by the dispatcher, the web handlers and `/status`.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Atomic counters; cheap to share as `Arc<BridgeStats>` across threads and runtimes.
#[derive(Debug)]
pub struct BridgeStats {
    started_at: DateTime<Utc>,
    updates_received: AtomicU64,
    updates_dropped: AtomicU64,
    messages_processed: AtomicU64,
    handler_errors: AtomicU64,
    messages_sent: AtomicU64,
}

/// Point-in-time copy of [`BridgeStats`], serialized by `GET /api/stats`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub started_at: DateTime<Utc>,
    pub uptime_secs: i64,
    pub updates_received: u64,
    pub updates_dropped: u64,
    pub messages_processed: u64,
    pub handler_errors: u64,
    pub messages_sent: u64,
}

impl BridgeStats {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            updates_received: AtomicU64::new(0),
            updates_dropped: AtomicU64::new(0),
            messages_processed: AtomicU64::new(0),
            handler_errors: AtomicU64::new(0),
            messages_sent: AtomicU64::new(0),
        }
    }

    pub fn record_received(&self) {
        self.updates_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.updates_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_processed(&self) {
        self.messages_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_handler_error(&self) {
        self.handler_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sent(&self) {
        self.messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Seconds since this instance was created.
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            started_at: self.started_at,
            uptime_secs: self.uptime_secs(),
            updates_received: self.updates_received.load(Ordering::Relaxed),
            updates_dropped: self.updates_dropped.load(Ordering::Relaxed),
            messages_processed: self.messages_processed.load(Ordering::Relaxed),
            handler_errors: self.handler_errors.load(Ordering::Relaxed),
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
        }
    }
}

impl Default for BridgeStats {
    fn default() -> Self {
        Self::new()
    }
}
