// Server configuration loaded from environment variables.
// Decision: No DATABASE_URL means in-memory storage (local development)

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";

/// Process-level settings for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// PostgreSQL connection string; `None` selects the in-memory stores
    pub database_url: Option<String>,
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        Self {
            database_url: non_empty("DATABASE_URL"),
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}
