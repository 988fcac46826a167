// OpenAPI document for the public API

use utoipa::OpenApi;

use crate::auth::{middleware, routes};
use crate::HealthResponse;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        routes::signup,
        routes::login,
        routes::logout,
        routes::get_current_user,
    ),
    components(
        schemas(
            routes::CredentialsForm,
            routes::FieldErrorsResponse,
            routes::UserInfoResponse,
            middleware::ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "auth", description = "Signup, login and session endpoints")
    ),
    info(
        title = "Gatehouse API",
        version = "0.1.0",
        description = "Email/password authentication with server-side sessions",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_auth_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/v1/auth/signup",
            "/v1/auth/login",
            "/v1/auth/logout",
            "/v1/auth/me",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
