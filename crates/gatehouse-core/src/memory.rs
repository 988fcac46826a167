// In-memory implementations for dev mode and testing
//
// All data is lost on restart. Uniqueness of emails is enforced by doing the
// duplicate check and the insert under one write lock, which gives the same
// guarantee as a unique index.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::session::Session;
use crate::traits::{SessionStore, UserStore};
use crate::user::User;

// ============================================================================
// InMemoryUserStore
// ============================================================================

#[derive(Debug, Default)]
struct UserTable {
    by_id: HashMap<Uuid, User>,
    by_email: HashMap<String, Uuid>,
}

/// In-memory user store
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    table: Arc<RwLock<UserTable>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<Uuid> {
        let mut table = self.table.write().await;
        if table.by_email.contains_key(email) {
            return Err(StoreError::DuplicateEmail);
        }

        let id = Uuid::now_v7();
        let user = User {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        table.by_email.insert(user.email.clone(), id);
        table.by_id.insert(id, user);
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.table.read().await.by_id.get(&id).cloned())
    }
}

// ============================================================================
// InMemorySessionStore
// ============================================================================

/// In-memory session store keyed by session ID (token digest)
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Direct lookup by session ID
    pub async fn get(&self, id: &str) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Sessions belonging to a user
    pub async fn count_for_user(&self, user_id: Uuid) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|s| s.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(&self, session: Session) -> StoreResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session);
        Ok(())
    }

    async fn get_session(&self, id: &str) -> StoreResult<Option<Session>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn delete_session(&self, id: &str) -> StoreResult<bool> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> StoreResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        Ok((before - sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_store_create_and_find() {
        let store = InMemoryUserStore::new();
        let id = store.create_user("a@example.com", "hash").await.unwrap();

        let user = store.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.password_hash, "hash");
        assert_eq!(store.get_user(id).await.unwrap(), Some(user));

        assert!(store.find_by_email("b@example.com").await.unwrap().is_none());
        assert!(store.get_user(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_store_rejects_duplicate_email() {
        let store = InMemoryUserStore::new();
        store.create_user("a@example.com", "h1").await.unwrap();

        let err = store.create_user("a@example.com", "h2").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_user_store_email_is_case_sensitive() {
        let store = InMemoryUserStore::new();
        store.create_user("A@example.com", "h").await.unwrap();
        store.create_user("a@example.com", "h").await.unwrap();
        assert_eq!(store.len().await, 2);
        assert!(store.find_by_email("a@EXAMPLE.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_store_delete() {
        let store = InMemorySessionStore::new();
        let session = Session {
            id: "abc".to_string(),
            user_id: Uuid::now_v7(),
            expires_at: None,
            created_at: Utc::now(),
        };
        store.create_session(session.clone()).await.unwrap();
        assert_eq!(store.get_session("abc").await.unwrap(), Some(session));

        assert!(store.delete_session("abc").await.unwrap());
        assert!(!store.delete_session("abc").await.unwrap());
        assert!(store.is_empty().await);
    }
}
