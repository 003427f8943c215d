use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::services::registry::SessionRegistry;
use crate::services::sessions::SessionService;
use crate::ws::hub::WsRegistry;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<SessionService>,
    hub: Arc<WsRegistry>,
    pub config: ServerConfig,
    started_at: Instant,
}

impl AppState {
    /// Wire an empty registry to the websocket hub.
    pub fn new(config: ServerConfig) -> Self {
        let hub = Arc::new(WsRegistry::new());
        let sessions = Arc::new(SessionService::new(
            Arc::new(SessionRegistry::new()),
            hub.clone(),
            config.reveal_policy,
        ));
        Self {
            sessions,
            hub,
            config,
            started_at: Instant::now(),
        }
    }

    pub fn sessions(&self) -> Arc<SessionService> {
        self.sessions.clone()
    }

    pub fn hub(&self) -> Arc<WsRegistry> {
        self.hub.clone()
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// State with default configuration, for handler tests.
    pub fn for_tests() -> Self {
        Self::new(ServerConfig::default())
    }
}
