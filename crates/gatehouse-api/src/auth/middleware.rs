// Authentication extractors and error responses
// Decision: Session token travels only in the session cookie
// Decision: Workflow failures become a generic 500; details stay in the logs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use gatehouse_core::{workflow, AuthContext, AuthError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Error body returned by auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong.
    pub error: String,
}

/// HTTP error with status
#[derive(Debug, Clone)]
pub struct ApiError {
    pub error: String,
    pub status: StatusCode,
}

impl ApiError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            error: message.to_string(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn internal() -> Self {
        Self {
            error: "Internal server error".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        tracing::error!("Auth workflow failed: {}", err);
        ApiError::internal()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse { error: self.error };
        (self.status, Json(body)).into_response()
    }
}

/// Authenticated user resolved from the session cookie.
/// Rejects with 401 when the cookie is missing or the session is invalid.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthContext: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = AuthContext::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(ctx.sessions.cookie_name())
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        let user = workflow::current_user(&ctx, &token)
            .await?
            .ok_or_else(|| {
                tracing::debug!("Session cookie did not resolve to a user");
                ApiError::unauthorized("Invalid or expired session")
            })?;

        Ok(AuthUser {
            id: user.id,
            email: user.email,
        })
    }
}
