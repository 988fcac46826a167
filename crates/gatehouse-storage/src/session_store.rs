// Database-backed SessionStore implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gatehouse_core::{Session, SessionStore, StoreError, StoreResult};

use crate::repositories::Database;

// ============================================================================
// DbSessionStore - Stores sessions in the database
// ============================================================================

#[derive(Clone)]
pub struct DbSessionStore {
    db: Database,
}

impl DbSessionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for DbSessionStore {
    async fn create_session(&self, session: Session) -> StoreResult<()> {
        self.db
            .create_session(&session)
            .await
            .map_err(StoreError::storage)?;
        Ok(())
    }

    async fn get_session(&self, id: &str) -> StoreResult<Option<Session>> {
        let row = self
            .db
            .get_session(id)
            .await
            .map_err(StoreError::storage)?;
        Ok(row.map(Session::from))
    }

    async fn delete_session(&self, id: &str) -> StoreResult<bool> {
        self.db
            .delete_session(id)
            .await
            .map_err(StoreError::storage)
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        self.db
            .delete_expired_sessions(now)
            .await
            .map_err(StoreError::storage)
    }
}
