//! Session state machine: `Lobby -> Turn <-> Voting -> Over`.
//!
//! [`Coordinator`] is the only code that mutates a [`Session`]. Each action
//! validates against the current state first and only then applies, so a
//! rejected action leaves the session exactly as it was. A successful action
//! bumps the session version once and returns the ordered notification
//! batch plus the lifecycle transitions it caused.

use rand::Rng;

use crate::domain::notification::{
    GameOverReason, Notification, Outbound, PlayerCard, PlayerPublic, PlayerRef, SessionState,
    VoteCount,
};
use crate::domain::profile::{generate_with, AttributeName};
use crate::domain::rules::{RevealPolicy, MIN_PLAYERS};
use crate::domain::session::{
    first_active_from, next_active_after, next_active_wrapping, survivor_count, Participant,
    ParticipantId, Phase, Session,
};
use crate::domain::session_transition::{
    derive_session_transitions, EliminationCause, SessionLifecycleView, SessionTransition,
};
use crate::domain::tally::{count_votes, elimination_pick, to_vote_counts};
use crate::domain::vocab::ROUND_MESSAGES;
use crate::errors::domain::DomainError;

/// A player action as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Join { name: String },
    Start,
    Reveal { attribute: String },
    Vote { target: ParticipantId },
    Disconnect,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Join { .. } => "join",
            Action::Start => "start",
            Action::Reveal { .. } => "reveal",
            Action::Vote { .. } => "vote",
            Action::Disconnect => "disconnect",
        }
    }
}

/// Result of one applied action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Notifications in delivery order.
    pub outbound: Vec<Outbound>,
    /// Explicit transitions first, then edge-triggered ones.
    pub transitions: Vec<SessionTransition>,
}

impl Outcome {
    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty() && self.transitions.is_empty()
    }

    fn push_all(&mut self, notification: Notification) {
        self.outbound.push(Outbound::to_all(notification));
    }
}

pub struct Coordinator<'a, R: Rng + ?Sized> {
    session: &'a mut Session,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Coordinator<'a, R> {
    pub fn new(session: &'a mut Session, rng: &'a mut R) -> Self {
        Self { session, rng }
    }

    pub fn apply(&mut self, actor: ParticipantId, action: Action) -> Result<Outcome, DomainError> {
        match action {
            Action::Join { name } => self.join(actor, &name),
            Action::Start => self.start(actor),
            Action::Reveal { attribute } => self.reveal(actor, &attribute),
            Action::Vote { target } => self.vote(actor, target),
            Action::Disconnect => self.disconnect(actor),
        }
    }

    pub fn join(&mut self, participant: ParticipantId, name: &str) -> Result<Outcome, DomainError> {
        let s = &*self.session;
        match s.phase {
            Phase::Lobby => {}
            Phase::Over => return Err(DomainError::GameAlreadyOver),
            Phase::Turn | Phase::Voting => return Err(DomainError::AlreadyStarted),
        }
        if s.index_of(participant).is_some() {
            return Err(DomainError::AlreadyJoined);
        }
        if s.roster.len() >= s.config.capacity() as usize {
            return Err(DomainError::SessionFull {
                capacity: s.config.capacity(),
            });
        }
        // Names compare exactly; only all-blank names are refused.
        if name.trim().is_empty() {
            return Err(DomainError::InvalidName);
        }
        if s.roster.iter().any(|p| p.name == name) {
            return Err(DomainError::DuplicateName(name.to_string()));
        }

        let before = SessionLifecycleView::from(&*self.session);
        let host = self.session.roster.is_empty();
        let joined = Participant {
            id: participant,
            name: name.to_string(),
            card: generate_with(&mut *self.rng),
            revealed: Vec::new(),
            eliminated: false,
            host,
        };

        let mut out = Outcome::default();
        out.outbound.push(Outbound::to_participant(
            participant,
            Notification::Joined {
                game_id: self.session.id,
                player: PlayerCard::from(&joined),
                is_host: host,
            },
        ));
        self.session.roster.push(joined);
        out.transitions.push(SessionTransition::PlayerJoined {
            participant_id: participant,
        });
        out.push_all(self.roster_updated(Some(format!("{name} joined the game"))));

        Ok(self.commit(before, out))
    }

    /// A roster already at or below the quota (possible at capacity 12)
    /// still starts; the first elimination then ends the game.
    pub fn start(&mut self, actor: ParticipantId) -> Result<Outcome, DomainError> {
        let s = &*self.session;
        match s.phase {
            Phase::Lobby => {}
            Phase::Over => return Err(DomainError::GameAlreadyOver),
            Phase::Turn | Phase::Voting => return Err(DomainError::AlreadyStarted),
        }
        let Some(idx) = s.index_of(actor) else {
            return Err(DomainError::NotAParticipant);
        };
        if !s.roster[idx].host {
            return Err(DomainError::NotHost);
        }
        if s.roster.len() < MIN_PLAYERS {
            return Err(DomainError::NotEnoughPlayers {
                have: s.roster.len(),
                need: MIN_PLAYERS,
            });
        }

        let before = SessionLifecycleView::from(&*self.session);
        self.session.started = true;
        self.session.round = 1;
        self.session.turn = 0;
        self.session.phase = Phase::Turn;

        let mut out = Outcome::default();
        let round_message = self.round_message();
        out.push_all(Notification::GameStarted {
            players: self.public_roster(),
            first_player: PlayerRef::from(&self.session.roster[0]),
            round: 1,
            round_message,
        });

        Ok(self.commit(before, out))
    }

    pub fn reveal(&mut self, actor: ParticipantId, attribute: &str) -> Result<Outcome, DomainError> {
        let s = &*self.session;
        if s.phase == Phase::Over {
            return Err(DomainError::GameAlreadyOver);
        }
        let Some(idx) = s.index_of(actor) else {
            return Err(DomainError::NotAParticipant);
        };
        if s.phase != Phase::Turn || s.turn != idx {
            return Err(DomainError::WrongTurn);
        }
        let name: AttributeName = attribute.parse()?;
        if s.roster[idx].has_revealed(name) {
            return Err(DomainError::AlreadyRevealed(name));
        }

        let before = SessionLifecycleView::from(&*self.session);
        let holder = &mut self.session.roster[idx];
        holder.revealed.push(name);
        let value = holder.card.value(name);

        let mut out = Outcome::default();
        out.push_all(Notification::AttributeRevealed {
            player: PlayerRef::from(&*holder),
            attribute: name,
            value,
        });

        match self.session.config.reveal_policy() {
            RevealPolicy::SingleReveal => self.open_voting(&mut out),
            RevealPolicy::FullRotation => {
                match next_active_after(&self.session.roster, idx) {
                    Some(next) => self.pass_turn(next, None, &mut out),
                    None => self.open_voting(&mut out),
                }
            }
        }

        Ok(self.commit(before, out))
    }

    pub fn vote(
        &mut self,
        voter: ParticipantId,
        target: ParticipantId,
    ) -> Result<Outcome, DomainError> {
        let s = &*self.session;
        if s.phase == Phase::Over {
            return Err(DomainError::GameAlreadyOver);
        }
        let Some(voter_idx) = s.index_of(voter) else {
            return Err(DomainError::NotAParticipant);
        };
        if s.phase != Phase::Voting {
            return Err(DomainError::InvalidVotingState);
        }
        if s.roster[voter_idx].eliminated {
            return Err(DomainError::VoterEliminated);
        }
        match s.participant(target) {
            Some(p) if !p.eliminated => {}
            _ => return Err(DomainError::InvalidTarget),
        }

        let before = SessionLifecycleView::from(&*self.session);
        self.session.ballot.insert(voter, target);

        let mut out = Outcome::default();
        out.push_all(Notification::VoteRegistered {
            voter: PlayerRef::from(&self.session.roster[voter_idx]),
            votes_cast: self.session.ballot.len(),
            eligible_voters: self.session.survivor_count(),
        });
        if self.quorum_reached() {
            self.resolve_round(&mut out);
        }

        Ok(self.commit(before, out))
    }

    pub fn disconnect(&mut self, participant: ParticipantId) -> Result<Outcome, DomainError> {
        let s = &*self.session;
        if s.phase == Phase::Over {
            return Err(DomainError::GameAlreadyOver);
        }
        let Some(idx) = s.index_of(participant) else {
            return Err(DomainError::NotAParticipant);
        };
        if s.roster[idx].eliminated {
            // Already out of play; nothing changes.
            return Ok(Outcome::default());
        }

        let before = SessionLifecycleView::from(&*self.session);
        let mut out = Outcome::default();
        if self.session.phase == Phase::Lobby {
            self.leave_lobby(idx, &mut out);
        } else {
            self.drop_out_of_play(idx, &mut out);
        }

        Ok(self.commit(before, out))
    }

    fn leave_lobby(&mut self, idx: usize, out: &mut Outcome) {
        let left = self.session.roster.remove(idx);
        out.transitions.push(SessionTransition::PlayerLeft {
            participant_id: left.id,
        });

        if let Some(first) = self.session.roster.first_mut() {
            if left.host {
                first.host = true;
                out.transitions.push(SessionTransition::HostTransferred {
                    participant_id: first.id,
                });
            }
            out.push_all(self.roster_updated(Some(format!("{} left the game", left.name))));
        }
    }

    fn drop_out_of_play(&mut self, idx: usize, out: &mut Outcome) {
        let phase = self.session.phase;
        let leaver = &mut self.session.roster[idx];
        leaver.eliminated = true;
        let leaver_id = leaver.id;
        let leaver_ref = PlayerRef::from(&*leaver);
        let leaver_card = PlayerCard::from(&*leaver);

        out.transitions.push(SessionTransition::PlayerEliminated {
            participant_id: leaver_id,
            cause: EliminationCause::Disconnect,
        });
        out.push_all(Notification::PlayerDisconnected {
            player: leaver_ref.clone(),
        });

        // End condition before anything else.
        if self.quota_reached() {
            self.finish(GameOverReason::Disconnections, Some(leaver_card), Vec::new(), out);
            return;
        }

        match phase {
            Phase::Turn if self.session.turn == idx => {
                let message = Some(format!("{} disconnected", leaver_ref.name));
                let roster = &self.session.roster;
                let next = match self.session.config.reveal_policy() {
                    RevealPolicy::FullRotation => next_active_after(roster, idx),
                    RevealPolicy::SingleReveal => next_active_wrapping(roster, idx),
                };
                match next {
                    Some(next) => self.pass_turn(next, message, out),
                    None => self.open_voting(out),
                }
            }
            Phase::Voting => {
                let ballot = &mut self.session.ballot;
                ballot.remove(&leaver_id);
                let mut voided: Vec<ParticipantId> = ballot
                    .iter()
                    .filter(|(_, target)| **target == leaver_id)
                    .map(|(voter, _)| *voter)
                    .collect();
                for voter in &voided {
                    ballot.remove(voter);
                }

                if !voided.is_empty() {
                    // Roster order keeps the notification stable across runs.
                    let roster = &self.session.roster;
                    voided.sort_by_key(|v| roster.iter().position(|p| p.id == *v));
                    let voters = voided
                        .iter()
                        .filter_map(|v| self.session.participant(*v))
                        .map(PlayerRef::from)
                        .collect();
                    out.push_all(Notification::BallotsVoided {
                        voters,
                        votes_cast: self.session.ballot.len(),
                        eligible_voters: self.session.survivor_count(),
                    });
                }

                if self.quorum_reached() {
                    self.resolve_round(out);
                }
            }
            _ => {}
        }
    }

    fn pass_turn(&mut self, next: usize, message: Option<String>, out: &mut Outcome) {
        self.session.turn = next;
        out.push_all(Notification::NextTurn {
            player: PlayerRef::from(&self.session.roster[next]),
            message,
        });
    }

    fn open_voting(&mut self, out: &mut Outcome) {
        self.session.phase = Phase::Voting;
        self.session.ballot.clear();
        out.push_all(Notification::VotingStarted {
            round: self.session.round,
            eligible: self.session.survivors().map(PlayerRef::from).collect(),
        });
    }

    fn quorum_reached(&self) -> bool {
        let s = &*self.session;
        s.survivors().all(|p| s.ballot.contains_key(&p.id))
    }

    fn quota_reached(&self) -> bool {
        survivor_count(&self.session.roster) <= self.session.config.quota() as usize
    }

    fn resolve_round(&mut self, out: &mut Outcome) {
        let tally = count_votes(&self.session.roster, &self.session.ballot);
        let Some(idx) = elimination_pick(&tally) else {
            return;
        };
        let counts = to_vote_counts(&self.session.roster, &tally);

        let eliminated = &mut self.session.roster[idx];
        eliminated.eliminated = true;
        let eliminated_id = eliminated.id;
        let eliminated_card = PlayerCard::from(&*eliminated);
        out.transitions.push(SessionTransition::PlayerEliminated {
            participant_id: eliminated_id,
            cause: EliminationCause::Vote,
        });

        if self.quota_reached() {
            self.finish(GameOverReason::Vote, Some(eliminated_card), counts, out);
            return;
        }

        // Turn scan restarts from the top of the roster every round.
        let Some(next) = first_active_from(&self.session.roster, 0) else {
            return;
        };
        self.session.ballot.clear();
        self.session.round += 1;
        self.session.turn = next;
        self.session.phase = Phase::Turn;

        let round_message = self.round_message();
        out.push_all(Notification::RoundEnded {
            eliminated: eliminated_card,
            tally: counts,
            next_round: self.session.round,
            next_player: PlayerRef::from(&self.session.roster[next]),
            round_message,
        });
    }

    fn finish(
        &mut self,
        reason: GameOverReason,
        eliminated: Option<PlayerCard>,
        tally: Vec<VoteCount>,
        out: &mut Outcome,
    ) {
        self.session.phase = Phase::Over;
        self.session.ballot.clear();
        out.push_all(Notification::GameOver {
            reason,
            survivors: self.session.survivors().map(PlayerCard::from).collect(),
            eliminated,
            tally,
        });
    }

    fn round_message(&mut self) -> &'static str {
        ROUND_MESSAGES[self.rng.random_range(0..ROUND_MESSAGES.len())]
    }

    fn public_roster(&self) -> Vec<PlayerPublic> {
        self.session.roster.iter().map(PlayerPublic::from).collect()
    }

    fn roster_updated(&self, message: Option<String>) -> Notification {
        Notification::RosterUpdated {
            players: self.public_roster(),
            state: SessionState::from(&*self.session),
            message,
        }
    }

    fn commit(&mut self, before: SessionLifecycleView, mut out: Outcome) -> Outcome {
        self.session.version += 1;
        let after = SessionLifecycleView::from(&*self.session);
        out.transitions
            .extend(derive_session_transitions(&before, &after));
        out
    }
}
