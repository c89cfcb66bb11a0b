//! Drains the update queue on the bot runtime and runs the handler chain per message,
//! with at most `max_concurrent` chains in flight.

use std::sync::Arc;

use handler_chain::HandlerChain;
use tgbridge_core::BridgeStats;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument};

use crate::queue::UpdateReceiver;

/// Runs until the queue is closed, then waits for in-flight chains to finish.
#[instrument(skip(receiver, chain, stats))]
pub async fn run_dispatcher(
    mut receiver: UpdateReceiver,
    chain: HandlerChain,
    stats: Arc<BridgeStats>,
    max_concurrent: usize,
) {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut tasks = JoinSet::new();

    info!(max_concurrent = max_concurrent.max(1), "Dispatcher started");

    while let Some(message) = receiver.recv().await {
        let permit = match semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break,
        };
        let chain = chain.clone();
        let stats = stats.clone();

        tasks.spawn(async move {
            let _permit = permit;
            info!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                message_id = %message.id,
                "step: processing message (handler chain started)"
            );
            match chain.handle(&message).await {
                Ok(response) => {
                    stats.record_processed();
                    debug!(message_id = %message.id, response = ?response, "Message processed");
                }
                Err(e) => {
                    stats.record_handler_error();
                    error!(error = %e, user_id = message.user.id, "Handler chain failed");
                }
            }
        });

        while let Some(joined) = tasks.try_join_next() {
            if let Err(e) = joined {
                error!(error = %e, "Handler task panicked");
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "Handler task panicked");
        }
    }

    info!("Dispatcher stopped");
}
