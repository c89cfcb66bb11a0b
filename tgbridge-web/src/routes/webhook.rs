//! Telegram webhook ingress. Runs on the web thread and only enqueues; handlers run on the bot runtime.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use tgbridge_telegram::{message_from_update, parse_update, SECRET_TOKEN_HEADER};
use tracing::{debug, warn};

use super::tokens_match;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub ok: bool,
    pub queued: bool,
}

/// POST {webhook_path}
///
/// 401 on a bad secret, 404 when the bridge is polling, 400 on a body that is not an Update,
/// 503 when the queue is full or closed so Telegram retries the delivery.
pub async fn telegram_webhook(
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let Some(queue) = data.queue.as_ref() else {
        return Err(ApiError::NotFound("webhook ingress is disabled".to_string()));
    };

    if let Some(expected) = data.webhook_secret.as_deref() {
        let provided = req
            .headers()
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if !provided.is_some_and(|token| tokens_match(token, expected)) {
            warn!("Rejected webhook call with a missing or wrong secret token");
            return Err(ApiError::Unauthorized);
        }
    }

    let update = parse_update(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid update: {}", e)))?;

    let Some(message) = message_from_update(&update) else {
        debug!(update_id = update.id.0, "Ignoring non-message update");
        return Ok(HttpResponse::Ok().json(WebhookAck {
            ok: true,
            queued: false,
        }));
    };

    queue.try_enqueue(message).map_err(|e| {
        warn!(error = %e, update_id = update.id.0, "Dropping webhook update");
        ApiError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(WebhookAck {
        ok: true,
        queued: true,
    }))
}
