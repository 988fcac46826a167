// Gatehouse core
//
// DB-agnostic email/password authentication:
// - Password hashing (Argon2id)
// - Credential shape validation with a configurable email policy
// - Session manager over a pluggable SessionStore
// - Signup / login / logout workflow over a pluggable UserStore
// - AuthContext: the explicitly passed bundle of config + stores

pub mod config;
pub mod context;
pub mod error;
pub mod password;
pub mod session;
pub mod traits;
pub mod user;
pub mod validation;
pub mod workflow;

// In-memory implementations for dev mode and testing
pub mod memory;

// Re-exports for convenience
pub use config::{AuthConfig, SameSite, SessionConfig};
pub use context::AuthContext;
pub use error::{AuthError, Result, StoreError, StoreResult};
pub use memory::{InMemorySessionStore, InMemoryUserStore};
pub use session::{IssuedSession, Session, SessionCookie, SessionManager};
pub use traits::{SessionStore, UserStore};
pub use user::User;
pub use validation::{CredentialPolicy, EmailPolicy, Field, FieldErrors};
pub use workflow::{current_user, login, logout, signup, AuthOutcome};
