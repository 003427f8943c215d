use actix_web::{web, App, HttpServer};
use bunker_backend::config::ServerConfig;
use bunker_backend::middleware::cors::cors_middleware;
use bunker_backend::middleware::request_trace::RequestTrace;
use bunker_backend::middleware::structured_logger::StructuredLogger;
use bunker_backend::middleware::trace_span::TraceSpan;
use bunker_backend::routes;
use bunker_backend::services::sessions::spawn_reaper;
use bunker_backend::state::app_state::AppState;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config.clone());
    let reaper = spawn_reaper(
        app_state.sessions(),
        config.session_retention,
        config.reaper_interval,
    );

    info!(
        host = %config.host,
        port = config.port,
        reveal_policy = %config.reveal_policy,
        retention_secs = config.session_retention.as_secs(),
        "Starting Bunker backend"
    );

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    let result = HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    reaper.abort();
    result
}
