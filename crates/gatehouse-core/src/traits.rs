// Core traits for pluggable backends
//
// These traits keep the auth workflow independent of the database:
// - In-memory implementations for dev mode and testing (crate::memory)
// - PostgreSQL implementations for production (gatehouse-storage)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::session::Session;
use crate::user::User;

// ============================================================================
// UserStore - Durable email -> user mapping
// ============================================================================

/// Trait for creating and looking up users
///
/// Email uniqueness MUST be enforced by the store itself at insert time
/// (unique index, or check-and-insert under a single lock). Callers never
/// pre-check, so this is the only thing standing between two concurrent
/// signups for the same address.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; `StoreError::DuplicateEmail` if the email is taken
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<Uuid>;

    /// Find a user by exact email; Ok(None) when absent
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Find a user by ID
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;
}

// ============================================================================
// SessionStore - Persisted session records
// ============================================================================

/// Trait for persisting sessions
///
/// Session IDs are token digests (see `session::hash_session_token`); stores
/// never see the raw token.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session
    async fn create_session(&self, session: Session) -> StoreResult<()>;

    /// Load a session by ID
    async fn get_session(&self, id: &str) -> StoreResult<Option<Session>>;

    /// Delete a session; Ok(false) if it did not exist
    async fn delete_session(&self, id: &str) -> StoreResult<bool>;

    /// Delete every session that expired before `now`
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> StoreResult<u64>;
}
