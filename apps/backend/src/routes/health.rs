use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::domain::RevealPolicy;
use crate::state::app_state::AppState;

pub async fn root() -> impl Responder {
    HttpResponse::Ok().body("Hello from the Bunker backend!")
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    reveal_policy: RevealPolicy,
    sessions: usize,
    connections: usize,
    uptime_secs: u64,
    time: String,
}

/// Liveness plus a coarse load picture: live sessions and open sockets.
async fn health(app_state: web::Data<AppState>) -> impl Responder {
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        reveal_policy: app_state.config.reveal_policy,
        sessions: app_state.sessions().registry().len(),
        connections: app_state.hub().connection_count(),
        uptime_secs: app_state.started_at().elapsed().as_secs(),
        time,
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
