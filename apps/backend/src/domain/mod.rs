//! Domain layer: pure session logic types and helpers.

pub mod coordinator;
pub mod notification;
pub mod profile;
pub mod rules;
pub mod session;
pub mod session_transition;
pub mod snapshot;
pub mod tally;
pub mod vocab;

#[cfg(test)]
mod tests_snapshot_phases;

// Re-exports for ergonomics
pub use coordinator::{Action, Coordinator, Outcome};
pub use notification::{Audience, Notification, Outbound};
pub use profile::{generate, AttributeName, AttributeSet};
pub use rules::{RevealPolicy, SessionConfig};
pub use session::{ParticipantId, Phase, Session, SessionId};
pub use session_transition::SessionTransition;
pub use snapshot::{snapshot, SessionSnapshot};
