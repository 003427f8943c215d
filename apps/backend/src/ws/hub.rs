//! Connection registry for the websocket transport.
//!
//! Maps participant ids to live connections and sessions to their members,
//! and implements [`NotificationSink`] on top of that. Delivery is a plain
//! `do_send` into each connection's mailbox, so it never blocks the caller.

use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::notification::{Audience, Outbound};
use crate::domain::session::{ParticipantId, SessionId};
use crate::services::sessions::NotificationSink;
use crate::ws::session::HubEvent;

#[derive(Default)]
pub struct WsRegistry {
    connections: DashMap<ParticipantId, Recipient<HubEvent>>,
    members: DashMap<SessionId, Vec<ParticipantId>>,
}

impl WsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_connection(&self, participant: ParticipantId, recipient: Recipient<HubEvent>) {
        self.connections.insert(participant, recipient);
        debug!(participant_id = %participant, "connection registered");
    }

    /// Forget a connection and every membership it still holds.
    pub fn unregister_connection(&self, participant: ParticipantId) {
        self.connections.remove(&participant);
        self.members.retain(|_, members| {
            members.retain(|m| *m != participant);
            !members.is_empty()
        });
        debug!(participant_id = %participant, "connection unregistered");
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn members_of(&self, session_id: SessionId) -> Vec<ParticipantId> {
        self.members
            .get(&session_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn send_to(&self, participant: ParticipantId, event: HubEvent) {
        let Some(recipient) = self.connections.get(&participant) else {
            debug!(participant_id = %participant, "no live connection, event dropped");
            return;
        };
        recipient.value().do_send(event);
    }
}

impl NotificationSink for WsRegistry {
    fn attach(&self, session_id: SessionId, participant: ParticipantId) {
        let mut members = self.members.entry(session_id).or_default();
        if !members.contains(&participant) {
            members.push(participant);
        }
    }

    fn detach(&self, session_id: SessionId, participant: ParticipantId) {
        let now_empty = match self.members.get_mut(&session_id) {
            Some(mut members) => {
                members.retain(|m| *m != participant);
                members.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.members.remove_if(&session_id, |_, members| members.is_empty());
        }
    }

    fn deliver(&self, session_id: SessionId, batch: &[Outbound]) {
        let members = self.members_of(session_id);
        for outbound in batch {
            let notification = Arc::new(outbound.notification.clone());
            match outbound.audience {
                Audience::Participant(participant) => self.send_to(
                    participant,
                    HubEvent::Notify {
                        game_id: session_id,
                        notification,
                    },
                ),
                Audience::Session => {
                    for participant in &members {
                        self.send_to(
                            *participant,
                            HubEvent::Notify {
                                game_id: session_id,
                                notification: Arc::clone(&notification),
                            },
                        );
                    }
                }
            }
        }
    }

    fn close(&self, session_id: SessionId) {
        let Some((_, members)) = self.members.remove(&session_id) else {
            return;
        };
        debug!(
            session_id = %session_id,
            members = members.len(),
            "session closed"
        );
        for participant in members {
            self.send_to(participant, HubEvent::SessionClosed { game_id: session_id });
        }
    }
}
