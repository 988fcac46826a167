// Gatehouse API server
// Decision: Fall back to in-memory stores when DATABASE_URL is unset

use std::time::Duration;

use anyhow::{Context, Result};
use gatehouse_api::{app, config::ServerConfig, StorageMode};
use gatehouse_core::{AuthConfig, AuthContext};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often expired sessions are swept from the store
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatehouse_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("gatehouse-api starting...");

    let server_config = ServerConfig::from_env();
    let auth_config = AuthConfig::from_env();
    tracing::info!(
        cookie = %auth_config.session.cookie_name,
        secure = auth_config.session.secure,
        max_age = ?auth_config.session.max_age,
        landing_path = %auth_config.landing_path,
        "Authentication configured"
    );

    let (ctx, storage) = match server_config.database_url.as_deref() {
        Some(url) => (
            gatehouse_storage::connect(url, auth_config).await?,
            StorageMode::Postgres,
        ),
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
            (AuthContext::in_memory(auth_config), StorageMode::InMemory)
        }
    };

    // Sessions without expiry never need sweeping
    if ctx.config.session.max_age.is_some() {
        let sessions = ctx.sessions.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
            loop {
                interval.tick().await;
                if let Err(e) = sessions.purge_expired().await {
                    tracing::warn!("Failed to purge expired sessions: {}", e);
                }
            }
        });
    }

    let app = app(ctx, storage);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", server_config.bind_addr))?;
    tracing::info!("gatehouse-api listening on {}", server_config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
