// Auth context
// Decision: Explicitly constructed and passed; no process-wide singletons
// Decision: Cheap to clone (all handles are Arc) so it can live in web framework state

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::memory::{InMemorySessionStore, InMemoryUserStore};
use crate::session::SessionManager;
use crate::traits::{SessionStore, UserStore};

/// Handles the auth workflow needs: configuration, user store, session manager
#[derive(Clone)]
pub struct AuthContext {
    pub config: Arc<AuthConfig>,
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<SessionManager>,
}

impl AuthContext {
    pub fn new(
        config: AuthConfig,
        users: Arc<dyn UserStore>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        let sessions = Arc::new(SessionManager::new(session_store, config.session.clone()));
        Self {
            config: Arc::new(config),
            users,
            sessions,
        }
    }

    /// Context backed by in-memory stores (dev mode, tests)
    pub fn in_memory(config: AuthConfig) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryUserStore::new()),
            Arc::new(InMemorySessionStore::new()),
        )
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
