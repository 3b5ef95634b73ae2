use url::Url;

use crate::config::ConfigError;

const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Credentials and endpoints for the external identity provider.
///
/// The token and userinfo endpoints default to Google's; overriding them is
/// mainly useful for pointing tests at a local stand-in.
#[derive(Debug, Clone)]
pub struct OAuth2ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl OAuth2ProviderConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            userinfo_url: DEFAULT_USERINFO_URL.to_string(),
        }
    }

    /// Load from the environment: `OAUTH2_GOOGLE_CLIENT_ID`,
    /// `OAUTH2_GOOGLE_CLIENT_SECRET`, and `OAUTH2_REDIRECT_URI` are
    /// required; `OAUTH2_TOKEN_URL` and `OAUTH2_USERINFO_URL` override the
    /// provider endpoints.
    pub fn from_env() -> Result<Self, ConfigError> {
        let client_id = require_var("OAUTH2_GOOGLE_CLIENT_ID")?;
        let client_secret = require_var("OAUTH2_GOOGLE_CLIENT_SECRET")?;
        let redirect_uri = require_var("OAUTH2_REDIRECT_URI")?;

        let config = Self {
            token_url: std::env::var("OAUTH2_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            userinfo_url: std::env::var("OAUTH2_USERINFO_URL")
                .unwrap_or_else(|_| DEFAULT_USERINFO_URL.to_string()),
            client_id,
            client_secret,
            redirect_uri,
        };
        config.validate()?;

        Ok(config)
    }

    /// Check that every endpoint parses as a URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("OAUTH2_REDIRECT_URI", &self.redirect_uri),
            ("OAUTH2_TOKEN_URL", &self.token_url),
            ("OAUTH2_USERINFO_URL", &self.userinfo_url),
        ] {
            Url::parse(value)
                .map_err(|_| ConfigError::InvalidVar(name.to_string(), value.clone()))?;
        }
        Ok(())
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}
