//! REST API under /api. Every route requires `Authorization: Bearer <API_KEY>`.

use actix_web::{get, http::header, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tgbridge_core::{Chat, InboxEntry};
use tracing::{info, warn};

use super::tokens_match;
use crate::error::ApiError;
use crate::state::AppState;

pub const DEFAULT_MESSAGES_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub chat_id: Option<i64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub ok: bool,
    pub count: usize,
    pub messages: Vec<InboxEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub chat_id: i64,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub ok: bool,
    pub message_id: String,
}

/// Checks the bearer token against API_KEY. No key configured means the API is off.
pub fn authorize(req: &HttpRequest, state: &AppState) -> Result<(), ApiError> {
    let Some(expected) = state.api_key.as_deref() else {
        return Err(ApiError::ApiDisabled);
    };
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);
    match token {
        Some(token) if tokens_match(token, expected) => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}

/// GET /api/stats
#[get("/stats")]
pub async fn stats(req: HttpRequest, data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    authorize(&req, &data)?;
    Ok(HttpResponse::Ok().json(data.stats.snapshot()))
}

/// GET /api/messages?chat_id=&limit=
///
/// Newest first. `limit` defaults to 50 and is capped at the inbox capacity.
#[get("/messages")]
pub async fn list_messages(
    req: HttpRequest,
    query: web::Query<MessagesQuery>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    authorize(&req, &data)?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_MESSAGES_LIMIT)
        .min(data.inbox.capacity());
    let messages = data.inbox.recent(query.chat_id, limit);
    Ok(HttpResponse::Ok().json(MessagesResponse {
        ok: true,
        count: messages.len(),
        messages,
    }))
}

/// POST /api/messages
///
/// Sends `text` as-is with the configured parse mode; formatting is the caller's concern.
#[post("/messages")]
pub async fn send_message(
    req: HttpRequest,
    body: web::Json<SendMessageRequest>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    authorize(&req, &data)?;
    let SendMessageRequest { chat_id, text } = body.into_inner();
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".to_string()));
    }

    let message_id = data
        .bot
        .send_message_and_return_id(&Chat::with_id(chat_id), &text)
        .await
        .map_err(|e| {
            warn!(chat_id = chat_id, error = %e, "Send via API failed");
            ApiError::Upstream(e.to_string())
        })?;
    data.stats.record_sent();
    info!(chat_id = chat_id, message_id = %message_id, "Sent message via API");

    Ok(HttpResponse::Ok().json(SendMessageResponse {
        ok: true,
        message_id,
    }))
}
