// Session-cookie authentication over the HTTP surface

pub mod middleware;
pub mod routes;

pub use middleware::{ApiError, AuthUser, ErrorResponse};
pub use routes::routes;
