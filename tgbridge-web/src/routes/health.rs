use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;

use crate::config::BridgeMode;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mode: BridgeMode,
    pub uptime_secs: i64,
}

/// GET /health
///
/// Liveness of the web thread; does not call Telegram.
#[get("/health")]
pub async fn health(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "UP",
        mode: data.mode,
        uptime_secs: data.stats.uptime_secs(),
    })
}
