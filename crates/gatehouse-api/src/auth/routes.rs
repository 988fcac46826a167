// Authentication routes
// Decision: Form posts answer with 303 + Set-Cookie so browsers follow to the landing page
// Decision: Rejections are 422 with a per-field error map

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite as CookieSameSite};
use gatehouse_core::{workflow, AuthContext, AuthOutcome, FieldErrors, SameSite, SessionCookie};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::middleware::{ApiError, AuthUser, ErrorResponse};

// ============================================================================
// Request/Response types
// ============================================================================

/// Signup and login form
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CredentialsForm {
    /// Email address; compared as given (no trimming or case folding).
    #[schema(example = "user@example.com")]
    #[serde(default)]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

/// Field-keyed rejection messages
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorsResponse {
    /// Map of field name (`email`, `password`) to message.
    pub errors: BTreeMap<String, String>,
}

impl From<&FieldErrors> for FieldErrorsResponse {
    fn from(errors: &FieldErrors) -> Self {
        Self {
            errors: errors
                .iter()
                .map(|(field, message)| (field.as_str().to_string(), message.to_string()))
                .collect(),
        }
    }
}

/// Current user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserInfoResponse {
    pub id: String,
    pub email: String,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes(ctx: AuthContext) -> Router {
    Router::new()
        .route("/v1/auth/signup", post(signup))
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/logout", post(logout))
        .route("/v1/auth/me", get(get_current_user))
        .with_state(ctx)
}

/// Create an account and start a session
#[utoipa::path(
    post,
    path = "/v1/auth/signup",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created; session cookie set and redirect to the landing page"),
        (status = 422, description = "Invalid credentials or email already registered", body = FieldErrorsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(ctx): State<AuthContext>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, ApiError> {
    let outcome = workflow::signup(&ctx, &form.email, &form.password).await?;
    Ok(outcome_response(jar, outcome))
}

/// Authenticate and start a session
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in; session cookie set and redirect to the landing page"),
        (status = 422, description = "Invalid credentials, unknown email or wrong password", body = FieldErrorsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(ctx): State<AuthContext>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, ApiError> {
    let outcome = workflow::login(&ctx, &form.email, &form.password).await?;
    Ok(outcome_response(jar, outcome))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 303, description = "Session destroyed; cookie removed and redirect to /"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn logout(
    State(ctx): State<AuthContext>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    if let Some(cookie) = jar.get(ctx.sessions.cookie_name()) {
        workflow::logout(&ctx, cookie.value()).await?;
    }

    let jar = jar.remove(to_cookie(ctx.sessions.blank_cookie()));
    Ok((jar, Redirect::to("/")))
}

/// Get the user behind the session cookie
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserInfoResponse),
        (status = 401, description = "Missing, invalid or expired session", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn get_current_user(user: AuthUser) -> Json<UserInfoResponse> {
    Json(UserInfoResponse {
        id: user.id.to_string(),
        email: user.email,
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn outcome_response(jar: CookieJar, outcome: AuthOutcome) -> Response {
    match outcome {
        AuthOutcome::Authenticated {
            session,
            redirect_to,
            ..
        } => {
            let jar = jar.add(to_cookie(session.cookie));
            (jar, Redirect::to(&redirect_to)).into_response()
        }
        AuthOutcome::Rejected(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(FieldErrorsResponse::from(&errors)),
        )
            .into_response(),
    }
}

/// Convert the core cookie description into a `Set-Cookie` value
pub fn to_cookie(cookie: SessionCookie) -> Cookie<'static> {
    let same_site = match cookie.same_site {
        SameSite::Strict => CookieSameSite::Strict,
        SameSite::Lax => CookieSameSite::Lax,
        SameSite::None => CookieSameSite::None,
    };
    let max_age = time::Duration::seconds(cookie.max_age.as_secs() as i64);

    Cookie::build((cookie.name, cookie.value))
        .path(cookie.path)
        .http_only(cookie.http_only)
        .secure(cookie.secure)
        .same_site(same_site)
        .max_age(max_age)
        .build()
}
