//! Integration tests for [`tgbridge_telegram::UpdateQueue`] and [`tgbridge_telegram::run_dispatcher`].
//!
//! Covers: queue backpressure (Full / Closed) and counters, the dispatcher draining every message
//! and stopping once all senders are dropped, error accounting, the concurrency limit, and
//! hand-off from a plain OS thread into the tokio runtime.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use handler_chain::HandlerChain;
use tgbridge_core::{BridgeStats, Chat, Handler, HandlerResponse, Message, User};
use tgbridge_telegram::{run_dispatcher, QueueError, UpdateQueue};

fn create_test_message(id: usize) -> Message {
    Message {
        id: id.to_string(),
        content: format!("message {id}"),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        message_type: "text".to_string(),
        created_at: Utc::now(),
        reply_to_message_id: None,
        reply_to_message_from_bot: false,
        reply_to_message_content: None,
    }
}

struct CountingHandler {
    count: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _message: &Message) -> tgbridge_core::Result<HandlerResponse> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(HandlerResponse::Continue)
    }
}

struct FailingHandler;

#[async_trait::async_trait]
impl Handler for FailingHandler {
    async fn handle(&self, _message: &Message) -> tgbridge_core::Result<HandlerResponse> {
        Err(tgbridge_core::BridgeError::Bot("send failed".to_string()))
    }
}

/// **Test: try_enqueue reports Full when the buffer is at capacity and counts the drop.**
#[tokio::test]
async fn test_try_enqueue_full() {
    let stats = Arc::new(BridgeStats::new());
    let (queue, _receiver) = UpdateQueue::channel(1, stats.clone());

    assert!(queue.try_enqueue(create_test_message(1)).is_ok());
    assert_eq!(queue.try_enqueue(create_test_message(2)), Err(QueueError::Full));

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.updates_received, 2);
    assert_eq!(snapshot.updates_dropped, 1);
}

/// **Test: Enqueue fails with Closed after the receiver is dropped.**
#[tokio::test]
async fn test_enqueue_closed() {
    let stats = Arc::new(BridgeStats::new());
    let (queue, receiver) = UpdateQueue::channel(4, stats.clone());
    drop(receiver);

    assert!(queue.is_closed());
    assert_eq!(queue.try_enqueue(create_test_message(1)), Err(QueueError::Closed));
    assert_eq!(queue.enqueue(create_test_message(2)).await, Err(QueueError::Closed));
    assert_eq!(stats.snapshot().updates_dropped, 2);
}

/// **Test: The dispatcher processes every queued message and returns once senders are gone.**
///
/// **Setup:** Counting handler; queue of capacity 64; 20 messages enqueued.
/// **Action:** Drop the queue, await the dispatcher.
/// **Expected:** handler ran 20 times; messages_processed = 20; no errors.
#[tokio::test]
async fn test_dispatcher_drains_queue() {
    let stats = Arc::new(BridgeStats::new());
    let count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new().add_handler(Arc::new(CountingHandler { count: count.clone() }));
    let (queue, receiver) = UpdateQueue::channel(64, stats.clone());

    let dispatcher = tokio::spawn(run_dispatcher(receiver, chain, stats.clone(), 4));

    for i in 0..20 {
        queue.enqueue(create_test_message(i)).await.unwrap();
    }
    drop(queue);

    tokio::time::timeout(Duration::from_secs(5), dispatcher)
        .await
        .expect("dispatcher should stop once the queue is closed")
        .unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 20);
    let snapshot = stats.snapshot();
    assert_eq!(snapshot.messages_processed, 20);
    assert_eq!(snapshot.handler_errors, 0);
}

/// **Test: Chain errors are counted and do not stop the dispatcher.**
#[tokio::test]
async fn test_dispatcher_counts_handler_errors() {
    let stats = Arc::new(BridgeStats::new());
    let chain = HandlerChain::new().add_handler(Arc::new(FailingHandler));
    let (queue, receiver) = UpdateQueue::channel(8, stats.clone());

    let dispatcher = tokio::spawn(run_dispatcher(receiver, chain, stats.clone(), 2));
    for i in 0..3 {
        queue.enqueue(create_test_message(i)).await.unwrap();
    }
    drop(queue);
    dispatcher.await.unwrap();

    let snapshot = stats.snapshot();
    assert_eq!(snapshot.handler_errors, 3);
    assert_eq!(snapshot.messages_processed, 0);
}

/// **Test: No more than max_concurrent chains run at the same time.**
#[tokio::test]
async fn test_dispatcher_respects_concurrency_limit() {
    struct SlowHandler {
        current: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Handler for SlowHandler {
        async fn handle(&self, _message: &Message) -> tgbridge_core::Result<HandlerResponse> {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            Ok(HandlerResponse::Continue)
        }
    }

    let current = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let stats = Arc::new(BridgeStats::new());
    let chain = HandlerChain::new().add_handler(Arc::new(SlowHandler {
        current: current.clone(),
        peak: peak.clone(),
    }));
    let (queue, receiver) = UpdateQueue::channel(32, stats.clone());

    let dispatcher = tokio::spawn(run_dispatcher(receiver, chain, stats.clone(), 2));
    for i in 0..10 {
        queue.enqueue(create_test_message(i)).await.unwrap();
    }
    drop(queue);
    dispatcher.await.unwrap();

    assert!(peak.load(Ordering::SeqCst) <= 2);
    assert_eq!(stats.snapshot().messages_processed, 10);
}

/// **Test: A plain OS thread (no runtime) can hand messages to the dispatcher.**
///
/// This is the shape of the webhook path: the web server thread calls try_enqueue.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_enqueue_from_foreign_thread() {
    let stats = Arc::new(BridgeStats::new());
    let count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new().add_handler(Arc::new(CountingHandler { count: count.clone() }));
    let (queue, receiver) = UpdateQueue::channel(16, stats.clone());

    let dispatcher = tokio::spawn(run_dispatcher(receiver, chain, stats.clone(), 4));

    let producer = std::thread::spawn(move || {
        for i in 0..5 {
            queue.try_enqueue(create_test_message(i)).unwrap();
        }
    });
    producer.join().unwrap();

    dispatcher.await.unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 5);
}
