use actix_cors::Cors;
use actix_web::http::header;

const DEV_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// CORS for the lobby client.
///
/// `allowed_origins` comes from `CORS_ALLOWED_ORIGINS`. An empty list means
/// the local dev client only; a single `*` allows any origin. Browsers need
/// `If-None-Match` on the way in and `ETag` on the way out for conditional
/// snapshot polling.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::IF_NONE_MATCH,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-request-id"),
            header::ETAG,
        ])
        .max_age(3600);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }

    if allowed_origins.is_empty() {
        DEV_ORIGINS
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    } else {
        allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}
