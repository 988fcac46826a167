// Session management
// Decision: Tokens are 32 random bytes from the OS CSPRNG, hex encoded
// Decision: Only the SHA-256 digest of a token is persisted
// Decision: No expiry by default; a session lives until logout

use chrono::{DateTime, Utc};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::config::{SameSite, SessionConfig};
use crate::error::{AuthError, Result};
use crate::traits::SessionStore;

const SESSION_TOKEN_BYTES: usize = 32; // 32 random bytes = 64 hex chars

/// Browsers cap cookie lifetime at 400 days; used for "never expires" sessions
pub const PERSISTENT_COOKIE_MAX_AGE: Duration = Duration::from_secs(400 * 24 * 60 * 60);

/// Persisted session record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// SHA-256 hex digest of the client token
    pub id: String,
    pub user_id: Uuid,
    /// None = never expires
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= now,
            None => false,
        }
    }
}

/// Generate a new unguessable session token
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Digest a token for storage/lookup
pub fn hash_session_token(token: &str) -> String {
    let hash = Sha256::digest(token.as_bytes());
    hex::encode(hash)
}

/// Cheap shape check before touching the store
pub fn is_valid_session_token_format(token: &str) -> bool {
    token.len() == SESSION_TOKEN_BYTES * 2 && token.chars().all(|c| c.is_ascii_hexdigit())
}

/// `now + max_age`, or an error when the lifetime does not fit a timestamp
fn session_expiry(now: DateTime<Utc>, max_age: Duration) -> Result<DateTime<Utc>> {
    chrono::Duration::from_std(max_age)
        .ok()
        .and_then(|max_age| now.checked_add_signed(max_age))
        .ok_or_else(|| {
            tracing::error!(?max_age, "Session lifetime overflows the expiry timestamp");
            AuthError::config(format!("session lifetime {:?} is out of range", max_age))
        })
}

/// Cookie the web layer must attach to the response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub path: &'static str,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub max_age: Duration,
}

/// Result of creating a session: the raw token is only ever available here
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: Option<DateTime<Utc>>,
    pub cookie: SessionCookie,
}

/// Creates, validates and destroys sessions
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Create and persist a session for `user_id`
    pub async fn create_session(&self, user_id: Uuid) -> Result<IssuedSession> {
        let token = generate_session_token();
        let now = Utc::now();
        let expires_at = match self.config.max_age {
            Some(max_age) => Some(session_expiry(now, max_age)?),
            None => None,
        };

        self.store
            .create_session(Session {
                id: hash_session_token(&token),
                user_id,
                expires_at,
                created_at: now,
            })
            .await?;

        tracing::debug!(%user_id, ?expires_at, "Session created");

        let cookie = self.cookie(&token);
        Ok(IssuedSession {
            token,
            user_id,
            expires_at,
            cookie,
        })
    }

    /// Resolve a token to its user; None if malformed, unknown or expired
    pub async fn validate_session(&self, token: &str) -> Result<Option<Uuid>> {
        if !is_valid_session_token_format(token) {
            return Ok(None);
        }

        let id = hash_session_token(token);
        let Some(session) = self.store.get_session(&id).await? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            tracing::debug!(user_id = %session.user_id, "Expired session removed");
            self.store.delete_session(&id).await?;
            return Ok(None);
        }

        Ok(Some(session.user_id))
    }

    /// Delete the session behind `token`; unknown tokens are fine
    pub async fn destroy_session(&self, token: &str) -> Result<()> {
        if !is_valid_session_token_format(token) {
            return Ok(());
        }

        let deleted = self
            .store
            .delete_session(&hash_session_token(token))
            .await?;
        if deleted {
            tracing::debug!("Session destroyed");
        }
        Ok(())
    }

    /// Remove all expired sessions, returns how many were deleted
    pub async fn purge_expired(&self) -> Result<u64> {
        let deleted = self.store.delete_expired_sessions(Utc::now()).await?;
        if deleted > 0 {
            tracing::info!(deleted, "Purged expired sessions");
        }
        Ok(deleted)
    }

    /// Cookie carrying `token` with the configured attributes
    pub fn cookie(&self, token: &str) -> SessionCookie {
        SessionCookie {
            name: self.config.cookie_name.clone(),
            value: token.to_string(),
            path: "/",
            http_only: true,
            secure: self.config.secure,
            same_site: self.config.same_site,
            max_age: self.config.max_age.unwrap_or(PERSISTENT_COOKIE_MAX_AGE),
        }
    }

    /// Cookie that clears the session cookie on the client
    pub fn blank_cookie(&self) -> SessionCookie {
        SessionCookie {
            max_age: Duration::ZERO,
            ..self.cookie("")
        }
    }
}
