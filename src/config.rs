//! Crate-level configuration.
//!
//! All configuration is carried by explicitly constructed objects handed to
//! [`IdentityCoordinator::new`]; `from_env` loaders exist for convenience
//! but nothing reads the environment after construction.
//!
//! [`IdentityCoordinator::new`]: crate::IdentityCoordinator::new

use thiserror::Error;

use crate::oauth2::OAuth2ProviderConfig;
use crate::session::TokenConfig;

#[derive(Debug, Error, Clone)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidVar(String, String),
}

/// Everything the coordinator needs: token signing configuration and
/// external provider credentials.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub token: TokenConfig,
    pub provider: OAuth2ProviderConfig,
}

impl IdentityConfig {
    /// Load the full configuration from the environment, reading a `.env`
    /// file first if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            token: TokenConfig::from_env()?,
            provider: OAuth2ProviderConfig::from_env()?,
        })
    }
}
