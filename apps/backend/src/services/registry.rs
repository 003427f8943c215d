//! In-memory session registry.
//!
//! Sessions live in a `DashMap` keyed by id, each behind its own mutex, so
//! actions on different sessions never contend and actions on the same
//! session run one at a time. Never hold a map reference while locking a
//! slot: clone the `Arc` out first.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};
use tracing::debug;

use crate::domain::rules::SessionConfig;
use crate::domain::session::{Session, SessionId};
use crate::errors::domain::DomainError;

/// Mutable contents of one registry entry.
pub struct SlotState {
    session: Session,
    retired: bool,
    idle_since: Option<Instant>,
}

impl SlotState {
    /// The session, unless the slot was retired by a concurrent delete.
    pub fn session(&self) -> Result<&Session, DomainError> {
        if self.retired {
            return Err(DomainError::SessionNotFound);
        }
        Ok(&self.session)
    }

    pub fn session_mut(&mut self) -> Result<&mut Session, DomainError> {
        if self.retired {
            return Err(DomainError::SessionNotFound);
        }
        Ok(&mut self.session)
    }

    /// Reject every later action on this slot.
    pub fn retire(&mut self) {
        self.retired = true;
    }

    /// Start the retention clock unless it is already running.
    pub fn mark_idle(&mut self, now: Instant) {
        self.idle_since.get_or_insert(now);
    }

    pub fn mark_active(&mut self) {
        self.idle_since = None;
    }

    pub fn idle_since(&self) -> Option<Instant> {
        self.idle_since
    }
}

pub struct SessionSlot {
    id: SessionId,
    state: Mutex<SlotState>,
}

impl SessionSlot {
    fn new(session: Session, now: Instant) -> Self {
        Self {
            id: session.id(),
            state: Mutex::new(SlotState {
                session,
                retired: false,
                idle_since: Some(now),
            }),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Exclusive access to the session. Do not call back into the registry
    /// while the guard is alive.
    pub fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock()
    }
}

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<SessionSlot>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Allocate a fresh id and an empty lobby for it.
    pub fn create(&self, config: SessionConfig) -> SessionId {
        loop {
            let id = SessionId::random();
            if let Entry::Vacant(entry) = self.sessions.entry(id) {
                let session = Session::new(id, config);
                entry.insert(Arc::new(SessionSlot::new(session, Instant::now())));
                debug!(session_id = %id, "session created");
                return id;
            }
        }
    }

    pub fn get(&self, id: SessionId) -> Result<Arc<SessionSlot>, DomainError> {
        self.sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(DomainError::SessionNotFound)
    }

    /// Remove and retire a session. Must not be called while holding its lock.
    pub fn delete(&self, id: SessionId) -> bool {
        match self.sessions.remove(&id) {
            Some((_, slot)) => {
                slot.lock().retire();
                debug!(session_id = %id, "session deleted");
                true
            }
            None => false,
        }
    }

    /// Drop the map entry of a slot the caller already retired.
    pub fn forget(&self, id: SessionId) {
        if self.sessions.remove(&id).is_some() {
            debug!(session_id = %id, "session forgotten");
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn purge_idle(&self, retention: Duration) -> Vec<SessionId> {
        self.purge_idle_at(retention, Instant::now())
    }

    /// Remove sessions whose retention clock started at least `retention`
    /// before `now`. Returns the removed ids.
    pub fn purge_idle_at(&self, retention: Duration, now: Instant) -> Vec<SessionId> {
        let slots: Vec<Arc<SessionSlot>> = self
            .sessions
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut purged = Vec::new();
        for slot in slots {
            let expired = {
                let mut state = slot.lock();
                let expired = state
                    .idle_since()
                    .is_some_and(|since| now.saturating_duration_since(since) >= retention);
                if expired {
                    state.retire();
                }
                expired
            };
            if expired
                && self
                    .sessions
                    .remove_if(&slot.id(), |_, current| Arc::ptr_eq(current, &slot))
                    .is_some()
            {
                purged.push(slot.id());
            }
        }
        purged
    }
}
