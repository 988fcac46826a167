// User entity

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A registered account
///
/// Created by signup and never mutated afterwards. `email` is stored exactly as
/// submitted (case-sensitive); `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
