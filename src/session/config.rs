use chrono::Duration;

use crate::config::ConfigError;

const DEFAULT_ACCESS_TTL_SECS: i64 = 15 * 60;
const DEFAULT_REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Signing secret and token lifetimes for the token service.
///
/// Constructed explicitly and handed to [`TokenService::new`]; the secret is
/// always injected, never embedded in source.
///
/// [`TokenService::new`]: super::TokenService::new
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric HMAC-SHA256 signing key, known only to the token service.
    pub secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    /// Build a config with the default lifetimes (15 minutes access,
    /// 7 days refresh).
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_ttl: Duration::seconds(DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl: Duration::seconds(DEFAULT_REFRESH_TTL_SECS),
        }
    }

    /// Load from the environment: `AUTH_TOKEN_SECRET` (required),
    /// `AUTH_ACCESS_TOKEN_TTL_SECS` and `AUTH_REFRESH_TOKEN_TTL_SECS`
    /// (optional overrides, in seconds).
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("AUTH_TOKEN_SECRET")
            .map_err(|_| ConfigError::MissingVar("AUTH_TOKEN_SECRET".to_string()))?;

        let access_ttl = ttl_from_env("AUTH_ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TTL_SECS)?;
        let refresh_ttl = ttl_from_env("AUTH_REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TTL_SECS)?;

        Ok(Self {
            secret,
            access_ttl,
            refresh_ttl,
        })
    }
}

fn ttl_from_env(var: &str, default_secs: i64) -> Result<Duration, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => {
            let secs: i64 = raw
                .parse()
                .map_err(|_| ConfigError::InvalidVar(var.to_string(), raw.clone()))?;
            if secs <= 0 {
                return Err(ConfigError::InvalidVar(var.to_string(), raw));
            }
            Ok(Duration::seconds(secs))
        }
        Err(_) => Ok(Duration::seconds(default_secs)),
    }
}
