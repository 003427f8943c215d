use serde::{Deserialize, Serialize};

use crate::domain::notification::Notification;
use crate::domain::session::{ParticipantId, SessionId};
use crate::errors::ErrorCode;

/// Commands a connection may send. Every command after creation names its game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    CreateGame {
        player_count: u8,
        bunker_spots: u8,
        name: String,
    },
    JoinGame {
        game_id: SessionId,
        name: String,
    },
    StartGame {
        game_id: SessionId,
    },
    RevealAttribute {
        game_id: SessionId,
        attribute: String,
    },
    SubmitVote {
        game_id: SessionId,
        target: ParticipantId,
    },
}

impl ClientMsg {
    pub fn name(&self) -> &'static str {
        match self {
            ClientMsg::CreateGame { .. } => "create_game",
            ClientMsg::JoinGame { .. } => "join_game",
            ClientMsg::StartGame { .. } => "start_game",
            ClientMsg::RevealAttribute { .. } => "reveal_attribute",
            ClientMsg::SubmitVote { .. } => "submit_vote",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg<'a> {
    /// First frame on every connection.
    Welcome { participant_id: ParticipantId },

    Event {
        game_id: SessionId,
        event: &'a Notification,
    },

    /// Rejected command; sent only to the connection that issued it.
    Error { code: ErrorCode, message: String },
}
