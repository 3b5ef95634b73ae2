use super::config::OAuth2ProviderConfig;
use super::errors::OAuth2Error;
use super::types::{ExternalProfile, GoogleUserInfo, OidcTokenResponse};

/// Client for the external identity provider: exchanges an authorization
/// code for a provider access token and fetches the profile behind it.
pub struct GoogleClient {
    http: reqwest::Client,
    config: OAuth2ProviderConfig,
}

impl GoogleClient {
    pub fn new(config: OAuth2ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Exchange `code` for the provider's access token.
    pub async fn exchange_code(&self, code: &str) -> Result<String, OAuth2Error> {
        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::OK => {}
            status => {
                tracing::debug!("Token exchange rejected: {}", status);
                return Err(OAuth2Error::TokenExchange(status.to_string()));
            }
        }

        let response_body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;
        let response_json: OidcTokenResponse = serde_json::from_str(&response_body)
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

        Ok(response_json.access_token)
    }

    /// Fetch the provider profile for `access_token`.
    ///
    /// A response missing the subject id, email, or name parts fails here;
    /// reconciliation never runs on a partial profile.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<ExternalProfile, OAuth2Error> {
        let response = self
            .http
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

        let response_body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

        let user_data: GoogleUserInfo = serde_json::from_str(&response_body)
            .map_err(|e| OAuth2Error::Serde(format!("Failed to deserialize userinfo: {e}")))?;

        if !user_data.verified_email {
            tracing::debug!("Provider profile email is unverified");
        }

        Ok(ExternalProfile::from(user_data))
    }
}
