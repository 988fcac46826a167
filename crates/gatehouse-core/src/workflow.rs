// Signup / login / logout workflow
//
// Each entry point runs once and ends in one of:
// - AuthOutcome::Authenticated: a session was created, navigate to the landing page
// - AuthOutcome::Rejected: field-level messages for the form, nothing was created
// - Err(AuthError): infrastructure failure, propagated to the caller
//
// Login keeps the field-specific messages (email -> not found, password ->
// authentication failed) that the form layer renders next to each input.

use uuid::Uuid;

use crate::context::AuthContext;
use crate::error::{Result, StoreError};
use crate::password::{hash_password, verify_password};
use crate::session::IssuedSession;
use crate::user::User;
use crate::validation::{Field, FieldErrors};

/// Signup with an email that already has an account
pub const DUPLICATE_EMAIL_MESSAGE: &str =
    "It seems like an account for the chosen email already exists.";

/// Login with an email that has no account
pub const EMAIL_NOT_FOUND_MESSAGE: &str = "No account found for this email address.";

/// Login with a wrong password
pub const AUTHENTICATION_FAILED_MESSAGE: &str =
    "Authentication failed, please check your credentials.";

/// What the caller should do next
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// Attach the session cookie and navigate to `redirect_to`
    Authenticated {
        user_id: Uuid,
        session: IssuedSession,
        redirect_to: String,
    },
    /// Re-render the form with these messages
    Rejected(FieldErrors),
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated { .. })
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            AuthOutcome::Rejected(errors) => Some(errors),
            AuthOutcome::Authenticated { .. } => None,
        }
    }
}

fn rejected_fields(errors: &FieldErrors) -> Vec<&'static str> {
    errors.iter().map(|(field, _)| field.as_str()).collect()
}

async fn authenticate(ctx: &AuthContext, user_id: Uuid) -> Result<AuthOutcome> {
    let session = ctx.sessions.create_session(user_id).await?;
    Ok(AuthOutcome::Authenticated {
        user_id,
        session,
        redirect_to: ctx.config.landing_path.clone(),
    })
}

/// Register a new account and sign it in
pub async fn signup(ctx: &AuthContext, email: &str, password: &str) -> Result<AuthOutcome> {
    let errors = ctx.config.credentials.validate(email, password);
    if !errors.is_empty() {
        tracing::debug!(fields = ?rejected_fields(&errors), "Signup rejected by validation");
        return Ok(AuthOutcome::Rejected(errors));
    }

    let password_hash = hash_password(password)?;

    let user_id = match ctx.users.create_user(email, &password_hash).await {
        Ok(id) => id,
        Err(StoreError::DuplicateEmail) => {
            tracing::debug!("Signup rejected: email already registered");
            return Ok(AuthOutcome::Rejected(FieldErrors::single(
                Field::Email,
                DUPLICATE_EMAIL_MESSAGE,
            )));
        }
        Err(e) => {
            tracing::error!("User creation error: {}", e);
            return Err(e.into());
        }
    };

    let outcome = authenticate(ctx, user_id).await?;
    tracing::info!(%user_id, "User signed up");
    Ok(outcome)
}

/// Sign in an existing account
pub async fn login(ctx: &AuthContext, email: &str, password: &str) -> Result<AuthOutcome> {
    let errors = ctx.config.credentials.validate(email, password);
    if !errors.is_empty() {
        tracing::debug!(fields = ?rejected_fields(&errors), "Login rejected by validation");
        return Ok(AuthOutcome::Rejected(errors));
    }

    let user = ctx.users.find_by_email(email).await.map_err(|e| {
        tracing::error!("Database error during login: {}", e);
        e
    })?;

    let Some(user) = user else {
        tracing::debug!("Login rejected: unknown email");
        return Ok(AuthOutcome::Rejected(FieldErrors::single(
            Field::Email,
            EMAIL_NOT_FOUND_MESSAGE,
        )));
    };

    if !verify_password(password, &user.password_hash) {
        tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
        return Ok(AuthOutcome::Rejected(FieldErrors::single(
            Field::Password,
            AUTHENTICATION_FAILED_MESSAGE,
        )));
    }

    let outcome = authenticate(ctx, user.id).await?;
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(outcome)
}

/// End the session behind `token`; safe to call repeatedly
pub async fn logout(ctx: &AuthContext, token: &str) -> Result<()> {
    ctx.sessions.destroy_session(token).await
}

/// The user a session token belongs to, if the session is still valid
pub async fn current_user(ctx: &AuthContext, token: &str) -> Result<Option<User>> {
    let Some(user_id) = ctx.sessions.validate_session(token).await? else {
        return Ok(None);
    };
    Ok(ctx.users.get_user(user_id).await?)
}
