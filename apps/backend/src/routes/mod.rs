use actix_web::web;

pub mod games;
pub mod health;
pub mod realtime;

/// Register every route. Shared by `main.rs` and the handler tests so both
/// see the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));

    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Games: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));

    // Realtime: /ws
    cfg.service(web::scope("/ws").configure(realtime::configure_routes));
}
