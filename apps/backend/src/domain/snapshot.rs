//! Public snapshot API for observing a session without exposing private cards.

use serde::Serialize;

use crate::domain::notification::PlayerPublic;
use crate::domain::rules::RevealPolicy;
use crate::domain::session::{Participant, ParticipantId, Phase, Session, SessionId};

/// Session-level header present in all snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionHeader {
    pub game_id: SessionId,
    pub version: u64,
    pub phase: Phase,
    pub started: bool,
    pub player_count: u8,
    pub bunker_spots: u8,
    pub reveal_policy: RevealPolicy,
    pub current_round: u32,
    pub current_turn: Option<ParticipantId>,
    /// Ballots received so far; targets are never exposed.
    pub votes_cast: usize,
    pub survivors: usize,
}

/// Redacted view: each participant's card is cut down to what they disclosed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub game: SessionHeader,
    pub players: Vec<PlayerPublic>,
}

pub fn snapshot(session: &Session) -> SessionSnapshot {
    let config = session.config();
    SessionSnapshot {
        game: SessionHeader {
            game_id: session.id(),
            version: session.version(),
            phase: session.phase(),
            started: session.is_started(),
            player_count: config.capacity(),
            bunker_spots: config.quota(),
            reveal_policy: config.reveal_policy(),
            current_round: session.round(),
            current_turn: session.turn_holder().map(Participant::id),
            votes_cast: session.ballot().len(),
            survivors: session.survivor_count(),
        },
        players: session.roster().iter().map(PlayerPublic::from).collect(),
    }
}
