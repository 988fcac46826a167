// Error types for the auth workflow
//
// Validation and business-rule failures (bad email, duplicate account, wrong
// password) are NOT errors here; they are returned as AuthOutcome::Rejected.
// Only infrastructure failures travel through these types.

use thiserror::Error;

/// Result type alias for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors returned by UserStore / SessionStore implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The email is already taken (uniqueness constraint violated on insert)
    #[error("email already registered")]
    DuplicateEmail,

    /// Underlying storage failure (connection, I/O, query)
    #[error("storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

impl StoreError {
    /// Wrap any error as a storage failure
    pub fn storage(err: impl Into<anyhow::Error>) -> Self {
        StoreError::Storage(err.into())
    }
}

/// Errors that abort an auth workflow
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password hashing failed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Configuration that cannot be applied (e.g. an unrepresentable session expiry)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store failure that cannot be recovered locally
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl AuthError {
    /// Create a password hashing error
    pub fn password_hash(msg: impl Into<String>) -> Self {
        AuthError::PasswordHash(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        AuthError::Config(msg.into())
    }
}
