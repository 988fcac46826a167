// Gatehouse HTTP surface
// Decision: Handlers only translate HTTP to workflow calls; auth rules live in gatehouse-core
// Decision: AuthContext is the router state, passed explicitly (no globals)

pub mod auth;
pub mod config;
pub mod openapi;

use axum::{extract::State, routing::get, Json, Router};
use gatehouse_core::AuthContext;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};

use crate::openapi::ApiDoc;

/// Which store implementation backs the running server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    InMemory,
    Postgres,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::InMemory => "memory",
            StorageMode::Postgres => "postgres",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `memory` or `postgres`
    pub storage: String,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    storage: StorageMode,
}

async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.storage.as_str().to_string(),
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router
pub fn app(ctx: AuthContext, storage: StorageMode) -> Router {
    Router::new()
        .route(
            "/health",
            get(health).with_state(HealthState { storage }),
        )
        .route("/api-doc/openapi.json", get(openapi_json))
        .merge(auth::routes(ctx))
        .layer(TraceLayer::new_for_http())
}
