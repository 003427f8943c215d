// apps/backend/src/domain/session_transition.rs

use crate::domain::session::{ParticipantId, Phase, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLifecycleView {
    pub version: u64,
    pub phase: Phase,
    pub round: u32,
    pub turn: Option<ParticipantId>,
    pub roster_len: usize,
}

impl From<&Session> for SessionLifecycleView {
    fn from(s: &Session) -> Self {
        Self {
            version: s.version(),
            phase: s.phase(),
            round: s.round(),
            turn: s.turn_holder().map(|p| p.id()),
            roster_len: s.roster().len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EliminationCause {
    Vote,
    Disconnect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    /// Explicit: participant appended to the roster
    PlayerJoined { participant_id: ParticipantId },

    /// Explicit: participant removed from a lobby roster
    PlayerLeft { participant_id: ParticipantId },

    /// Explicit: host flag moved after the host left the lobby
    HostTransferred { participant_id: ParticipantId },

    /// Explicit: participant's elimination flag set
    PlayerEliminated {
        participant_id: ParticipantId,
        cause: EliminationCause,
    },

    /// Edge-triggered: the turn became a specific participant.
    TurnBecame { participant_id: ParticipantId },

    /// Edge-triggered: Lobby -> Turn
    GameStarted,

    /// Edge-triggered: !Voting -> Voting
    VotingOpened { round: u32 },

    /// Edge-triggered: round counter moved past a completed round
    RoundAdvanced { round: u32 },

    /// Edge-triggered: !Over -> Over
    GameEnded,

    /// Edge-triggered: last participant left the lobby
    RosterEmptied,
}

/// Derive edge-triggered transitions from before/after lifecycle state.
pub fn derive_session_transitions(
    before: &SessionLifecycleView,
    after: &SessionLifecycleView,
) -> Vec<SessionTransition> {
    let mut transitions = Vec::new();

    // 1. Game start
    if before.phase == Phase::Lobby && after.phase == Phase::Turn {
        transitions.push(SessionTransition::GameStarted);
    }

    // 2. Round advance (0 -> 1 is the start, not an advance)
    if before.round > 0 && after.round > before.round {
        transitions.push(SessionTransition::RoundAdvanced { round: after.round });
    }

    // 3. Turn change
    if let Some(participant_id) = after.turn {
        if before.turn != Some(participant_id) {
            transitions.push(SessionTransition::TurnBecame { participant_id });
        }
    }

    // 4. Voting opened
    if before.phase != Phase::Voting && after.phase == Phase::Voting {
        transitions.push(SessionTransition::VotingOpened { round: after.round });
    }

    // 5. Game end
    if before.phase != Phase::Over && after.phase == Phase::Over {
        transitions.push(SessionTransition::GameEnded);
    }

    // 6. Roster emptied
    if before.roster_len > 0 && after.roster_len == 0 {
        transitions.push(SessionTransition::RosterEmptied);
    }

    transitions
}
