// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config
// Decision: Sessions never expire unless AUTH_SESSION_MAX_AGE is set
// Decision: Secure cookies follow APP_ENV=production unless explicitly overridden

use std::time::Duration;

use crate::session::PERSISTENT_COOKIE_MAX_AGE;
use crate::validation::{CredentialPolicy, EmailPolicy, DEFAULT_MIN_PASSWORD_LENGTH};

/// Default session cookie name
pub const DEFAULT_COOKIE_NAME: &str = "auth_session";

/// Where the browser goes after a successful signup or login
pub const DEFAULT_LANDING_PATH: &str = "/training";

/// SameSite attribute for the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "none" => SameSite::None,
            _ => SameSite::Lax,
        }
    }
}

/// Session lifetime and cookie attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Cookie name carrying the session token
    pub cookie_name: String,
    /// Session lifetime; None means the session lives until logout
    pub max_age: Option<Duration>,
    /// Send the cookie over HTTPS only
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            max_age: None,
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Session and cookie settings
    pub session: SessionConfig,
    /// Email / password shape rules
    pub credentials: CredentialPolicy,
    /// Redirect target after signup/login
    pub landing_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            credentials: CredentialPolicy::default(),
            landing_path: DEFAULT_LANDING_PATH.to_string(),
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (environment, test map)
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = get("APP_ENV")
            .map(|s| s.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let mut secure = get("AUTH_COOKIE_SECURE")
            .map(|s| s.to_lowercase() == "true" || s == "1")
            .unwrap_or(production);

        // Minutes; 0 or unset means no expiry
        let max_age = get("AUTH_SESSION_MAX_AGE")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|mins| *mins > 0)
            .map(session_max_age_from_minutes);

        let cookie_name = get("AUTH_COOKIE_NAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        let same_site = get("AUTH_COOKIE_SAME_SITE")
            .map(|s| SameSite::from_str(&s))
            .unwrap_or_default();

        // Browsers drop SameSite=None cookies that are not Secure
        if same_site == SameSite::None && !secure {
            tracing::warn!("AUTH_COOKIE_SAME_SITE=none requires a secure cookie, enabling Secure");
            secure = true;
        }

        let email = get("AUTH_EMAIL_POLICY")
            .map(|s| EmailPolicy::from_str(&s))
            .unwrap_or_default();

        let min_password_length = get("AUTH_MIN_PASSWORD_LENGTH")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_MIN_PASSWORD_LENGTH);

        let landing_path = get("AUTH_LANDING_PATH")
            .filter(|s| is_local_path(s))
            .unwrap_or_else(|| DEFAULT_LANDING_PATH.to_string());

        Self {
            session: SessionConfig {
                cookie_name,
                max_age,
                secure,
                same_site,
            },
            credentials: CredentialPolicy {
                email,
                min_password_length,
            },
            landing_path,
        }
    }
}

/// Minutes to a session lifetime, capped at the cookie lifetime browsers honour
fn session_max_age_from_minutes(minutes: u64) -> Duration {
    match minutes.checked_mul(60).map(Duration::from_secs) {
        Some(max_age) if max_age <= PERSISTENT_COOKIE_MAX_AGE => max_age,
        _ => {
            tracing::warn!(
                minutes,
                "AUTH_SESSION_MAX_AGE exceeds the 400 day cookie limit, capping"
            );
            PERSISTENT_COOKIE_MAX_AGE
        }
    }
}

/// Same-origin absolute path; rejects protocol-relative `//host` and `/\host`
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AuthConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AuthConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.session.cookie_name, "auth_session");
        assert_eq!(config.session.max_age, None);
        assert!(!config.session.secure);
        assert_eq!(config.session.same_site, SameSite::Lax);
        assert_eq!(config.credentials.min_password_length, 8);
        assert_eq!(config.credentials.email, EmailPolicy::Basic);
        assert_eq!(config.landing_path, "/training");
    }

    #[test]
    fn test_empty_environment_matches_default() {
        assert_eq!(config_from(&[]), AuthConfig::default());
    }

    #[test]
    fn test_production_enables_secure_cookie() {
        let config = config_from(&[("APP_ENV", "production")]);
        assert!(config.session.secure);

        let config = config_from(&[("APP_ENV", "production"), ("AUTH_COOKIE_SECURE", "false")]);
        assert!(!config.session.secure, "explicit override wins");

        let config = config_from(&[("APP_ENV", "development"), ("AUTH_COOKIE_SECURE", "1")]);
        assert!(config.session.secure);
    }

    #[test]
    fn test_session_max_age_minutes() {
        let config = config_from(&[("AUTH_SESSION_MAX_AGE", "90")]);
        assert_eq!(config.session.max_age, Some(Duration::from_secs(90 * 60)));

        let config = config_from(&[("AUTH_SESSION_MAX_AGE", "0")]);
        assert_eq!(config.session.max_age, None);

        let config = config_from(&[("AUTH_SESSION_MAX_AGE", "forever")]);
        assert_eq!(config.session.max_age, None);
    }

    #[test]
    fn test_session_max_age_is_capped() {
        for minutes in ["1000000", "10000000000000", "200000000000000", "400000000000000000"] {
            let config = config_from(&[("AUTH_SESSION_MAX_AGE", minutes)]);
            assert_eq!(
                config.session.max_age,
                Some(PERSISTENT_COOKIE_MAX_AGE),
                "{} minutes",
                minutes
            );
        }

        let config = config_from(&[("AUTH_SESSION_MAX_AGE", "576000")]);
        assert_eq!(config.session.max_age, Some(PERSISTENT_COOKIE_MAX_AGE));
    }

    #[tokio::test]
    async fn test_capped_max_age_still_expires_sessions() {
        let config = config_from(&[("AUTH_SESSION_MAX_AGE", "200000000000000")]);
        let manager = crate::session::SessionManager::new(
            std::sync::Arc::new(crate::memory::InMemorySessionStore::new()),
            config.session,
        );

        let issued = manager.create_session(uuid::Uuid::now_v7()).await.unwrap();
        assert!(issued.expires_at.is_some());
        assert_eq!(issued.cookie.max_age, PERSISTENT_COOKIE_MAX_AGE);
    }

    #[test]
    fn test_same_site_none_forces_secure() {
        let config = config_from(&[("AUTH_COOKIE_SAME_SITE", "none")]);
        assert_eq!(config.session.same_site, SameSite::None);
        assert!(config.session.secure);

        let config = config_from(&[
            ("AUTH_COOKIE_SAME_SITE", "none"),
            ("AUTH_COOKIE_SECURE", "false"),
        ]);
        assert!(config.session.secure);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("AUTH_COOKIE_NAME", "sid"),
            ("AUTH_COOKIE_SAME_SITE", "strict"),
            ("AUTH_EMAIL_POLICY", "suffix:.com"),
            ("AUTH_MIN_PASSWORD_LENGTH", "12"),
            ("AUTH_LANDING_PATH", "/dashboard"),
        ]);
        assert_eq!(config.session.cookie_name, "sid");
        assert_eq!(config.session.same_site, SameSite::Strict);
        assert_eq!(
            config.credentials.email,
            EmailPolicy::AllowedSuffixes(vec![".com".to_string()])
        );
        assert_eq!(config.credentials.min_password_length, 12);
        assert_eq!(config.landing_path, "/dashboard");
    }

    #[test]
    fn test_landing_path_must_be_local() {
        for path in [
            "https://evil.example.com",
            "//evil.example.com",
            "/\\evil.example.com",
            "training",
        ] {
            let config = config_from(&[("AUTH_LANDING_PATH", path)]);
            assert_eq!(config.landing_path, "/training", "{}", path);
        }

        let config = config_from(&[("AUTH_LANDING_PATH", "/app/home")]);
        assert_eq!(config.landing_path, "/app/home");
    }
}
