//! Session service - bridges the pure coordinator with the registry and the
//! realtime transport.
//!
//! Every action runs under the session's lock: resolve the slot, apply the
//! coordinator, publish the batch to the sink, then apply lifecycle
//! consequences. Publishing before the lock is released keeps batches of one
//! session in the same relative order for every recipient.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::coordinator::{Action, Coordinator};
use crate::domain::notification::Outbound;
use crate::domain::rules::{RevealPolicy, SessionConfig};
use crate::domain::session::{ParticipantId, SessionId};
use crate::domain::session_transition::{EliminationCause, SessionTransition};
use crate::domain::snapshot::{snapshot, SessionSnapshot};
use crate::errors::domain::DomainError;
use crate::services::registry::SessionRegistry;

/// Outbound side of the session service.
///
/// Called with the session lock held: implementations must only enqueue.
pub trait NotificationSink: Send + Sync {
    /// `participant` now belongs to `session_id`; called before the join batch.
    fn attach(&self, _session_id: SessionId, _participant: ParticipantId) {}

    /// `participant` left `session_id`; called after the departure batch.
    fn detach(&self, _session_id: SessionId, _participant: ParticipantId) {}

    fn deliver(&self, session_id: SessionId, batch: &[Outbound]);

    /// The session is gone from the registry.
    fn close(&self, _session_id: SessionId) {}
}

/// Sink that drops everything. Used when no transport is wired.
pub struct NullSink;

impl NotificationSink for NullSink {
    fn deliver(&self, _session_id: SessionId, _batch: &[Outbound]) {}
}

pub struct SessionService {
    registry: Arc<SessionRegistry>,
    sink: Arc<dyn NotificationSink>,
    reveal_policy: RevealPolicy,
}

impl SessionService {
    pub fn new(
        registry: Arc<SessionRegistry>,
        sink: Arc<dyn NotificationSink>,
        reveal_policy: RevealPolicy,
    ) -> Self {
        Self {
            registry,
            sink,
            reveal_policy,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn reveal_policy(&self) -> RevealPolicy {
        self.reveal_policy
    }

    /// Validate the capacity/quota pairing and allocate an empty lobby.
    pub fn create_session(
        &self,
        player_count: u8,
        bunker_spots: u8,
    ) -> Result<SessionId, DomainError> {
        let config = SessionConfig::new(player_count, bunker_spots, self.reveal_policy)?;
        let session_id = self.registry.create(config);
        info!(
            session_id = %session_id,
            player_count,
            bunker_spots,
            reveal_policy = %self.reveal_policy,
            "Session created"
        );
        Ok(session_id)
    }

    /// Create a session and join the creator as host. The session is
    /// discarded if the join is rejected.
    pub fn create_and_join(
        &self,
        player_count: u8,
        bunker_spots: u8,
        creator: ParticipantId,
        name: &str,
    ) -> Result<SessionId, DomainError> {
        let session_id = self.create_session(player_count, bunker_spots)?;
        if let Err(err) = self.join(session_id, creator, name) {
            self.discard(session_id);
            return Err(err);
        }
        Ok(session_id)
    }

    /// Apply one action under the session's exclusive lock.
    pub fn apply(
        &self,
        session_id: SessionId,
        actor: ParticipantId,
        action: Action,
    ) -> Result<Vec<SessionTransition>, DomainError> {
        let action_name = action.name();
        let slot = self.registry.get(session_id)?;
        let mut state = slot.lock();

        let applied = {
            let session = state.session_mut()?;
            let mut rng = rand::rng();
            let result = Coordinator::new(&mut *session, &mut rng).apply(actor, action);
            result.map(|outcome| (outcome, session.version()))
        };
        let (outcome, version) = match applied {
            Ok(applied) => applied,
            Err(err) => {
                debug!(
                    session_id = %session_id,
                    participant_id = %actor,
                    action = action_name,
                    error = %err,
                    "Action rejected"
                );
                return Err(err);
            }
        };

        let mut emptied = false;
        let mut departed = Vec::new();
        for transition in &outcome.transitions {
            match transition {
                SessionTransition::PlayerJoined { participant_id } => {
                    state.mark_active();
                    self.sink.attach(session_id, *participant_id);
                }
                SessionTransition::PlayerLeft { participant_id }
                | SessionTransition::PlayerEliminated {
                    participant_id,
                    cause: EliminationCause::Disconnect,
                } => departed.push(*participant_id),
                SessionTransition::GameEnded => state.mark_idle(Instant::now()),
                SessionTransition::RosterEmptied => emptied = true,
                _ => {}
            }
        }

        if !outcome.outbound.is_empty() {
            self.sink.deliver(session_id, &outcome.outbound);
        }
        for participant in departed {
            self.sink.detach(session_id, participant);
        }
        if emptied {
            state.retire();
        }
        drop(state);

        if !outcome.is_empty() {
            info!(
                session_id = %session_id,
                participant_id = %actor,
                action = action_name,
                version,
                notifications = outcome.outbound.len(),
                "Action applied"
            );
        }
        if emptied {
            self.registry.forget(session_id);
            self.sink.close(session_id);
            info!(session_id = %session_id, "Lobby emptied, session removed");
        }

        Ok(outcome.transitions)
    }

    pub fn join(
        &self,
        session_id: SessionId,
        participant: ParticipantId,
        name: &str,
    ) -> Result<Vec<SessionTransition>, DomainError> {
        self.apply(
            session_id,
            participant,
            Action::Join {
                name: name.to_string(),
            },
        )
    }

    pub fn start(
        &self,
        session_id: SessionId,
        actor: ParticipantId,
    ) -> Result<Vec<SessionTransition>, DomainError> {
        self.apply(session_id, actor, Action::Start)
    }

    pub fn reveal(
        &self,
        session_id: SessionId,
        actor: ParticipantId,
        attribute: &str,
    ) -> Result<Vec<SessionTransition>, DomainError> {
        self.apply(
            session_id,
            actor,
            Action::Reveal {
                attribute: attribute.to_string(),
            },
        )
    }

    pub fn vote(
        &self,
        session_id: SessionId,
        voter: ParticipantId,
        target: ParticipantId,
    ) -> Result<Vec<SessionTransition>, DomainError> {
        self.apply(session_id, voter, Action::Vote { target })
    }

    pub fn disconnect(
        &self,
        session_id: SessionId,
        participant: ParticipantId,
    ) -> Result<Vec<SessionTransition>, DomainError> {
        self.apply(session_id, participant, Action::Disconnect)
    }

    /// Redacted snapshot for read-only consumers.
    pub fn snapshot(&self, session_id: SessionId) -> Result<SessionSnapshot, DomainError> {
        let slot = self.registry.get(session_id)?;
        let state = slot.lock();
        Ok(snapshot(state.session()?))
    }

    /// Remove a session outright.
    pub fn discard(&self, session_id: SessionId) {
        if self.registry.delete(session_id) {
            self.sink.close(session_id);
        }
    }

    /// Remove sessions idle for at least `retention`. Returns how many went.
    pub fn purge_idle(&self, retention: Duration) -> usize {
        let purged = self.registry.purge_idle(retention);
        for session_id in &purged {
            self.sink.close(*session_id);
            debug!(session_id = %session_id, "Idle session purged");
        }
        purged.len()
    }
}

/// Periodically purge idle sessions.
pub fn spawn_reaper(
    service: Arc<SessionService>,
    retention: Duration,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // First tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = service.purge_idle(retention);
            if purged > 0 {
                info!(
                    purged,
                    remaining = service.registry().len(),
                    "Reaper purged idle sessions"
                );
            }
        }
    })
}
