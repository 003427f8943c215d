pub mod registry;
pub mod sessions;

pub use registry::SessionRegistry;
pub use sessions::{spawn_reaper, NotificationSink, NullSink, SessionService};
