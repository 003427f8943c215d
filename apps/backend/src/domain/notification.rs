//! Outbound events produced by coordinator transitions.
//!
//! A transition returns its notifications as an ordered batch of
//! [`Outbound`] entries. The transport must deliver a batch in order and
//! must not interleave two batches of the same session.

use serde::Serialize;

use crate::domain::profile::{AttributeName, AttributeSet, AttributeValue};
use crate::domain::rules::RevealPolicy;
use crate::domain::session::{Participant, ParticipantId, Phase, Session, SessionId};

/// Name + id, the minimal public reference to a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRef {
    pub id: ParticipantId,
    pub name: String,
}

impl From<&Participant> for PlayerRef {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id(),
            name: p.name().to_string(),
        }
    }
}

/// A participant with its full card exposed (own join receipt, eliminations, game over).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerCard {
    pub id: ParticipantId,
    pub name: String,
    pub card: AttributeSet,
}

impl From<&Participant> for PlayerCard {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id(),
            name: p.name().to_string(),
            card: p.card().clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedAttribute {
    pub attribute: AttributeName,
    pub value: AttributeValue,
}

/// Public roster entry: only disclosed attributes are included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerPublic {
    pub id: ParticipantId,
    pub name: String,
    pub is_host: bool,
    pub is_eliminated: bool,
    pub revealed: Vec<RevealedAttribute>,
}

impl From<&Participant> for PlayerPublic {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id(),
            name: p.name().to_string(),
            is_host: p.is_host(),
            is_eliminated: p.is_eliminated(),
            revealed: p
                .revealed()
                .iter()
                .map(|&attribute| RevealedAttribute {
                    attribute,
                    value: p.card().value(attribute),
                })
                .collect(),
        }
    }
}

/// Session-level header carried by roster updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub started: bool,
    pub phase: Phase,
    pub player_count: u8,
    pub bunker_spots: u8,
    pub current_round: u32,
    pub current_turn: Option<ParticipantId>,
    pub reveal_policy: RevealPolicy,
}

impl From<&Session> for SessionState {
    fn from(s: &Session) -> Self {
        Self {
            started: s.is_started(),
            phase: s.phase(),
            player_count: s.config().capacity(),
            bunker_spots: s.config().quota(),
            current_round: s.round(),
            current_turn: s.turn_holder().map(Participant::id),
            reveal_policy: s.config().reveal_policy(),
        }
    }
}

/// Ballots received by one target. Listed in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteCount {
    pub player: PlayerRef,
    pub votes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    Vote,
    Disconnections,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// Private join receipt, including the joiner's own card.
    Joined {
        game_id: SessionId,
        player: PlayerCard,
        is_host: bool,
    },
    RosterUpdated {
        players: Vec<PlayerPublic>,
        state: SessionState,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    GameStarted {
        players: Vec<PlayerPublic>,
        first_player: PlayerRef,
        round: u32,
        round_message: &'static str,
    },
    AttributeRevealed {
        player: PlayerRef,
        attribute: AttributeName,
        value: AttributeValue,
    },
    NextTurn {
        player: PlayerRef,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    VotingStarted {
        round: u32,
        eligible: Vec<PlayerRef>,
    },
    /// Progress only; the chosen target stays secret until the tally.
    VoteRegistered {
        voter: PlayerRef,
        votes_cast: usize,
        eligible_voters: usize,
    },
    /// Ballots naming a departed participant were discarded; these voters must vote again.
    BallotsVoided {
        voters: Vec<PlayerRef>,
        votes_cast: usize,
        eligible_voters: usize,
    },
    RoundEnded {
        eliminated: PlayerCard,
        tally: Vec<VoteCount>,
        next_round: u32,
        next_player: PlayerRef,
        round_message: &'static str,
    },
    PlayerDisconnected {
        player: PlayerRef,
    },
    GameOver {
        reason: GameOverReason,
        survivors: Vec<PlayerCard>,
        #[serde(skip_serializing_if = "Option::is_none")]
        eliminated: Option<PlayerCard>,
        tally: Vec<VoteCount>,
    },
}

impl Notification {
    /// Wire name, also used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Joined { .. } => "joined",
            Notification::RosterUpdated { .. } => "roster_updated",
            Notification::GameStarted { .. } => "game_started",
            Notification::AttributeRevealed { .. } => "attribute_revealed",
            Notification::NextTurn { .. } => "next_turn",
            Notification::VotingStarted { .. } => "voting_started",
            Notification::VoteRegistered { .. } => "vote_registered",
            Notification::BallotsVoided { .. } => "ballots_voided",
            Notification::RoundEnded { .. } => "round_ended",
            Notification::PlayerDisconnected { .. } => "player_disconnected",
            Notification::GameOver { .. } => "game_over",
        }
    }
}

/// Who receives an outbound notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Only this participant's connection.
    Participant(ParticipantId),
    /// Every connection subscribed to the session.
    Session,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub audience: Audience,
    pub notification: Notification,
}

impl Outbound {
    pub fn to_all(notification: Notification) -> Self {
        Self {
            audience: Audience::Session,
            notification,
        }
    }

    pub fn to_participant(id: ParticipantId, notification: Notification) -> Self {
        Self {
            audience: Audience::Participant(id),
            notification,
        }
    }
}
