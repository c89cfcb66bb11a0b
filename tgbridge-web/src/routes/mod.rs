//! Route table. Shared by the server and by in-process tests.

pub mod api;
pub mod health;
pub mod webhook;

use actix_web::{error, web};

use crate::error::ApiError;
use crate::state::AppState;

/// Registers state, extractor error handlers and every route.
///
/// Malformed JSON and query strings answer with the same `{"ok":false,"error":...}` body as
/// the handlers do.
pub fn configure(cfg: &mut web::ServiceConfig, data: web::Data<AppState>, webhook_path: &str) {
    cfg.app_data(data)
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            error::Error::from(ApiError::BadRequest(err.to_string()))
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            error::Error::from(ApiError::BadRequest(err.to_string()))
        }))
        .service(health::health)
        .service(web::resource(webhook_path).route(web::post().to(webhook::telegram_webhook)))
        .service(
            web::scope("/api")
                .service(api::stats)
                .service(api::list_messages)
                .service(api::send_message),
        );
}

/// Compares a presented credential with the configured one in time independent of where they
/// first differ.
pub(crate) fn tokens_match(provided: &str, expected: &str) -> bool {
    let (provided, expected) = (provided.as_bytes(), expected.as_bytes());
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
