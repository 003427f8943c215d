//! Domain-level error type returned by the session coordinator.
//!
//! This error type is HTTP- and transport-agnostic. Route handlers convert it
//! into `crate::error::AppError`; the websocket session renders it as an
//! `error` frame addressed only to the acting connection.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::profile::AttributeName;
use crate::errors::ErrorCode;

/// Rejection of a player action. Every variant is recoverable and leaves the
/// session untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    SessionNotFound,
    SessionFull { capacity: u8 },
    AlreadyStarted,
    DuplicateName(String),
    InvalidName,
    AlreadyJoined,
    NotHost,
    NotEnoughPlayers { have: usize, need: usize },
    WrongTurn,
    InvalidAttribute(String),
    AlreadyRevealed(AttributeName),
    InvalidVotingState,
    VoterEliminated,
    InvalidTarget,
    GameAlreadyOver,
    NotAParticipant,
    InvalidConfiguration(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::SessionNotFound => write!(f, "game not found"),
            DomainError::SessionFull { capacity } => {
                write!(f, "game is full ({capacity} players)")
            }
            DomainError::AlreadyStarted => write!(f, "game already started"),
            DomainError::DuplicateName(name) => write!(f, "name already taken: {name}"),
            DomainError::InvalidName => write!(f, "display name must not be blank"),
            DomainError::AlreadyJoined => write!(f, "connection already joined a game"),
            DomainError::NotHost => write!(f, "only the host can start the game"),
            DomainError::NotEnoughPlayers { have, need } => {
                write!(f, "not enough players: {have} joined, {need} required")
            }
            DomainError::WrongTurn => write!(f, "not your turn"),
            DomainError::InvalidAttribute(name) => write!(f, "invalid attribute: {name}"),
            DomainError::AlreadyRevealed(name) => {
                write!(f, "attribute already revealed: {}", name.as_str())
            }
            DomainError::InvalidVotingState => write!(f, "game not in voting phase"),
            DomainError::VoterEliminated => write!(f, "eliminated players cannot vote"),
            DomainError::InvalidTarget => write!(f, "invalid target player"),
            DomainError::GameAlreadyOver => write!(f, "game is over"),
            DomainError::NotAParticipant => write!(f, "not a participant of this game"),
            DomainError::InvalidConfiguration(detail) => {
                write!(f, "invalid game configuration: {detail}")
            }
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::SessionNotFound => ErrorCode::SessionNotFound,
            DomainError::SessionFull { .. } => ErrorCode::SessionFull,
            DomainError::AlreadyStarted => ErrorCode::AlreadyStarted,
            DomainError::DuplicateName(_) => ErrorCode::DuplicateName,
            DomainError::InvalidName => ErrorCode::InvalidName,
            DomainError::AlreadyJoined => ErrorCode::AlreadyJoined,
            DomainError::NotHost => ErrorCode::NotHost,
            DomainError::NotEnoughPlayers { .. } => ErrorCode::NotEnoughPlayers,
            DomainError::WrongTurn => ErrorCode::WrongTurn,
            DomainError::InvalidAttribute(_) => ErrorCode::InvalidAttribute,
            DomainError::AlreadyRevealed(_) => ErrorCode::AlreadyRevealed,
            DomainError::InvalidVotingState => ErrorCode::InvalidVotingState,
            DomainError::VoterEliminated => ErrorCode::VoterEliminated,
            DomainError::InvalidTarget => ErrorCode::InvalidTarget,
            DomainError::GameAlreadyOver => ErrorCode::GameAlreadyOver,
            DomainError::NotAParticipant => ErrorCode::NotAParticipant,
            DomainError::InvalidConfiguration(_) => ErrorCode::InvalidConfiguration,
        }
    }

    pub fn invalid_configuration(detail: impl Into<String>) -> Self {
        Self::InvalidConfiguration(detail.into())
    }
}
