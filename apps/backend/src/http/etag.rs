//! ETag helpers for conditional snapshot reads.
//!
//! A session's version is bumped on every applied transition, so
//! `"game-{id}-v{version}"` changes exactly when the snapshot does.

use crate::domain::SessionId;

/// Generate an ETag for a game snapshot.
///
/// Format: `"game-{id}-v{version}"` (with quotes, per RFC 9110)
pub fn game_etag(id: SessionId, version: u64) -> String {
    format!(r#""game-{id}-v{version}""#)
}

/// Whether an `If-None-Match` header value matches `etag`.
///
/// Accepts `*`, comma-separated lists, and weak validators (`W/"..."`), which
/// compare equal to their strong form for GET requests.
pub fn if_none_match_matches(header: &str, etag: &str) -> bool {
    header.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}
