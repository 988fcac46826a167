// Database-backed UserStore implementation
//
// Duplicate emails are detected from the unique constraint on users.email
// (SQLSTATE 23505) raised by the INSERT itself, never by a prior SELECT.

use async_trait::async_trait;
use gatehouse_core::{StoreError, StoreResult, User, UserStore};
use uuid::Uuid;

use crate::models::CreateUserRow;
use crate::repositories::Database;

/// True when `err` wraps a Postgres unique violation
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
        _ => false,
    }
}

// ============================================================================
// DbUserStore - Stores users in the database
// ============================================================================

#[derive(Clone)]
pub struct DbUserStore {
    db: Database,
}

impl DbUserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for DbUserStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<Uuid> {
        let input = CreateUserRow {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };

        match self.db.create_user(input).await {
            Ok(row) => Ok(row.id),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateEmail),
            Err(e) => Err(StoreError::storage(e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = self
            .db
            .get_user_by_email(email)
            .await
            .map_err(StoreError::storage)?;
        Ok(row.map(User::from))
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row = self.db.get_user(id).await.map_err(StoreError::storage)?;
        Ok(row.map(User::from))
    }
}
