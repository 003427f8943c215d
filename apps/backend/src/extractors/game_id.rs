use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::SessionId;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Session id parsed from the `{game_id}` path segment.
///
/// Only the format is checked here; existence is the service's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameId(pub SessionId);

impl FromRequest for GameId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_game_id(req.match_info().get("game_id")))
    }
}

fn parse_game_id(raw: Option<&str>) -> Result<GameId, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidGameId,
            "Missing game_id parameter".to_string(),
        )
    })?;
    raw.parse::<SessionId>().map(GameId).map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidGameId, format!("Invalid game id: {raw}"))
    })
}
