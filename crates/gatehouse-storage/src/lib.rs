// Postgres storage layer with sqlx
//
// This crate provides database implementations for core traits:
// - DbUserStore: implements UserStore (email uniqueness via unique index)
// - DbSessionStore: implements SessionStore

pub mod models;
pub mod repositories;
pub mod session_store;
pub mod user_store;

use std::sync::Arc;

use anyhow::{Context, Result};
use gatehouse_core::{AuthConfig, AuthContext};

pub use models::*;
pub use repositories::*;
pub use session_store::DbSessionStore;
pub use user_store::{is_unique_violation, DbUserStore};

/// Connect, run migrations, and build an AuthContext backed by PostgreSQL
pub async fn connect(database_url: &str, config: AuthConfig) -> Result<AuthContext> {
    let db = Database::from_url(database_url)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await.context("Failed to run migrations")?;
    tracing::info!("Connected to database");

    Ok(AuthContext::new(
        config,
        Arc::new(DbUserStore::new(db.clone())),
        Arc::new(DbSessionStore::new(db)),
    ))
}
