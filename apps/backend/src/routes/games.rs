//! Game-related HTTP routes.

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::snapshot::SessionSnapshot;
use crate::domain::SessionId;
use crate::error::AppError;
use crate::errors::DomainError;
use crate::extractors::{GameId, ValidatedJson};
use crate::http::etag::{game_etag, if_none_match_matches};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub player_count: u8,
    pub bunker_spots: u8,
    pub creator_name: String,
}

#[derive(Debug, Serialize)]
struct CreateGameResponse {
    game_id: SessionId,
    #[serde(flatten)]
    snapshot: SessionSnapshot,
}

/// POST /api/games
///
/// Validates the capacity/quota pairing and the creator's name, then
/// allocates an empty lobby. The creator takes the host seat by joining
/// over the websocket.
async fn create_game(
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    if req.creator_name.trim().is_empty() {
        return Err(DomainError::InvalidName.into());
    }

    let sessions = app_state.sessions();
    let game_id = sessions.create_session(req.player_count, req.bunker_spots)?;
    let snapshot = sessions.snapshot(game_id)?;
    info!(session_id = %game_id, "Game created over HTTP");

    Ok(HttpResponse::Created()
        .insert_header((ETAG, game_etag(game_id, snapshot.game.version)))
        .json(CreateGameResponse { game_id, snapshot }))
}

/// GET /api/games/{game_id}
///
/// Redacted snapshot with an ETag derived from the session version.
/// Supports `If-None-Match`: a matching tag yields `304 Not Modified`.
async fn get_snapshot(
    http_req: HttpRequest,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let snapshot = app_state.sessions().snapshot(id)?;
    let etag_value = game_etag(id, snapshot.game.version);

    if let Some(if_none_match) = http_req.headers().get(IF_NONE_MATCH) {
        if let Ok(client_etag) = if_none_match.to_str() {
            if if_none_match_matches(client_etag, &etag_value) {
                return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
                    .insert_header((ETAG, etag_value))
                    .finish());
            }
        }
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag_value))
        .json(snapshot))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)));
    cfg.service(web::resource("/{game_id}").route(web::get().to(get_snapshot)));
}
