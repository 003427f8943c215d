use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profile::{AttributeName, AttributeSet};
use crate::domain::rules::SessionConfig;

/// Connection-scoped participant identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque session identifier (random 128-bit UUID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(SessionId)
    }
}

/// Overall session progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Accepting joins; nothing dealt into play yet.
    Lobby,
    /// The turn-holder discloses one attribute.
    Turn,
    /// Every survivor casts a ballot.
    Voting,
    /// Survivor quota reached. Terminal.
    Over,
}

/// voter -> target for the current voting phase.
pub type Ballot = HashMap<ParticipantId, ParticipantId>;

#[derive(Debug, Clone)]
pub struct Participant {
    pub(in crate::domain) id: ParticipantId,
    pub(in crate::domain) name: String,
    pub(in crate::domain) card: AttributeSet,
    pub(in crate::domain) revealed: Vec<AttributeName>,
    pub(in crate::domain) eliminated: bool,
    pub(in crate::domain) host: bool,
}

impl Participant {
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn card(&self) -> &AttributeSet {
        &self.card
    }

    /// Disclosed attribute names in disclosure order.
    pub fn revealed(&self) -> &[AttributeName] {
        &self.revealed
    }

    pub fn has_revealed(&self, name: AttributeName) -> bool {
        self.revealed.contains(&name)
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    pub fn is_host(&self) -> bool {
        self.host
    }
}

/// Authoritative state of one game. Only `domain::coordinator` mutates it.
#[derive(Debug, Clone)]
pub struct Session {
    pub(in crate::domain) id: SessionId,
    pub(in crate::domain) config: SessionConfig,
    pub(in crate::domain) roster: Vec<Participant>,
    pub(in crate::domain) started: bool,
    pub(in crate::domain) round: u32,
    pub(in crate::domain) turn: usize,
    pub(in crate::domain) phase: Phase,
    pub(in crate::domain) ballot: Ballot,
    pub(in crate::domain) version: u64,
}

impl Session {
    pub fn new(id: SessionId, config: SessionConfig) -> Self {
        Self {
            id,
            config,
            roster: Vec::with_capacity(config.capacity() as usize),
            started: false,
            round: 0,
            turn: 0,
            phase: Phase::Lobby,
            ballot: Ballot::new(),
            version: 0,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Participants in join order (which is also turn order).
    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.roster.iter().find(|p| p.id == id)
    }

    pub fn host(&self) -> Option<&Participant> {
        self.roster.iter().find(|p| p.host)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Raw turn index; only meaningful while `phase == Turn`.
    pub fn turn_holder(&self) -> Option<&Participant> {
        match self.phase {
            Phase::Turn => self.roster.get(self.turn),
            _ => None,
        }
    }

    pub fn ballot(&self) -> &Ballot {
        &self.ballot
    }

    /// Bumped once per applied transition.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn survivors(&self) -> impl Iterator<Item = &Participant> {
        self.roster.iter().filter(|p| !p.eliminated)
    }

    pub fn survivor_count(&self) -> usize {
        survivor_count(&self.roster)
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub(in crate::domain) fn index_of(&self, id: ParticipantId) -> Option<usize> {
        self.roster.iter().position(|p| p.id == id)
    }
}

// Roster scan helpers. Roster order is fixed, so these are pure index math
// over the elimination flags.

pub fn survivor_count(roster: &[Participant]) -> usize {
    roster.iter().filter(|p| !p.eliminated).count()
}

/// First non-eliminated index in `start..len`, no wrap.
pub fn first_active_from(roster: &[Participant], start: usize) -> Option<usize> {
    (start..roster.len()).find(|&i| !roster[i].eliminated)
}

/// Next non-eliminated index strictly after `idx`, no wrap.
pub fn next_active_after(roster: &[Participant], idx: usize) -> Option<usize> {
    first_active_from(roster, idx + 1)
}

/// Next non-eliminated index after `idx`, wrapping past the end of the
/// roster. Returns `idx` itself only if it is the sole survivor.
pub fn next_active_wrapping(roster: &[Participant], idx: usize) -> Option<usize> {
    let len = roster.len();
    (1..=len)
        .map(|step| (idx + step) % len)
        .find(|&i| !roster[i].eliminated)
}
