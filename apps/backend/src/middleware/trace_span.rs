//! Per-request tracing span.
//!
//! Everything a handler logs runs inside a `request` span carrying the trace
//! id, method and path. Requests under `/api/games/{id}` also record the game
//! id, so service-level logs for one game can be filtered without parsing
//! paths. `RequestTrace` must be registered after this middleware so its id
//! is already in the extensions.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use tracing::{field, info_span, Instrument};

use crate::middleware::request_trace::TraceId;

const GAMES_PREFIX: &str = "/api/games/";

/// Game id segment of a `/api/games/{id}` path, if present.
fn game_id_from_path(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(GAMES_PREFIX)?;
    let id = rest.split('/').next()?;
    (!id.is_empty()).then_some(id)
}

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::of(&req, "missing-trace-id");

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
            game_id = field::Empty,
        );
        if let Some(game_id) = game_id_from_path(req.path()) {
            span.record("game_id", game_id);
        }

        Box::pin(self.service.call(req).instrument(span))
    }
}
