//! Error codes for the bunker backend.
//!
//! Every failure that reaches a client (HTTP problem+json or a websocket
//! `error` frame) carries one of these codes. Add new codes here; never pass
//! ad-hoc strings as error codes.

use core::fmt;

use serde::{Serialize, Serializer};

/// Centralized error codes, each mapping to a canonical SCREAMING_SNAKE_CASE string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Session lookup
    /// No session with the given id
    SessionNotFound,

    // Lobby
    /// Roster already holds `capacity` participants
    SessionFull,
    /// Session has left the lobby
    AlreadyStarted,
    /// Display name already used in the session
    DuplicateName,
    /// Blank display name
    InvalidName,
    /// Connection already holds a seat in a session
    AlreadyJoined,
    /// Only the host may start the game
    NotHost,
    /// Fewer participants than the start minimum
    NotEnoughPlayers,

    // Turn and voting
    /// Actor does not hold the turn
    WrongTurn,
    /// Unknown attribute name
    InvalidAttribute,
    /// Attribute disclosed earlier
    AlreadyRevealed,
    /// Vote outside the voting phase
    InvalidVotingState,
    /// Eliminated participants cannot vote
    VoterEliminated,
    /// Vote target unknown or eliminated
    InvalidTarget,
    /// Session reached its survivor quota
    GameAlreadyOver,
    /// Actor is not on the session roster
    NotAParticipant,

    // Request validation
    /// Capacity and quota are not a supported pairing
    InvalidConfiguration,
    /// Malformed game id
    InvalidGameId,
    /// General bad request
    BadRequest,

    // System
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical string that appears on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SessionNotFound => "SESSION_NOT_FOUND",

            Self::SessionFull => "SESSION_FULL",
            Self::AlreadyStarted => "ALREADY_STARTED",
            Self::DuplicateName => "DUPLICATE_NAME",
            Self::InvalidName => "INVALID_NAME",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::NotHost => "NOT_HOST",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",

            Self::WrongTurn => "WRONG_TURN",
            Self::InvalidAttribute => "INVALID_ATTRIBUTE",
            Self::AlreadyRevealed => "ALREADY_REVEALED",
            Self::InvalidVotingState => "INVALID_VOTING_STATE",
            Self::VoterEliminated => "VOTER_ELIMINATED",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::GameAlreadyOver => "GAME_ALREADY_OVER",
            Self::NotAParticipant => "NOT_A_PARTICIPANT",

            Self::InvalidConfiguration => "INVALID_CONFIGURATION",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::BadRequest => "BAD_REQUEST",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
