use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One external-provider binding for a local user. A user may have zero or
/// more; each `(provider, provider_user_id)` pair is unique system-wide.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct LinkedIdentity {
    pub id: i64,
    pub user_id: i64,
    /// Provider tag, e.g. `"google"`.
    pub provider: String,
    /// The provider's stable subject identifier for this user.
    pub provider_user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a link; the store assigns id and
/// timestamps.
#[derive(Debug, Clone)]
pub struct NewLinkedIdentity {
    pub user_id: i64,
    pub provider: String,
    pub provider_user_id: String,
}

// The user data we get back from Google's userinfo endpoint. The subject
// id, email, and name parts are required; a response missing any of them
// fails deserialization, which the caller reports as a provider error.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GoogleUserInfo {
    pub(crate) id: String,
    pub(crate) email: String,
    pub(crate) given_name: String,
    pub(crate) family_name: String,
    #[serde(default)]
    pub(crate) verified_email: bool,
    #[allow(dead_code)]
    pub(crate) name: Option<String>,
    #[allow(dead_code)]
    pub(crate) picture: Option<String>,
    #[allow(dead_code)]
    pub(crate) locale: Option<String>,
}

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
pub(super) struct OidcTokenResponse {
    pub(super) access_token: String,
    token_type: String,
    expires_in: Option<u64>,
    scope: Option<String>,
    id_token: Option<String>,
    refresh_token: Option<String>,
}

/// The provider profile fields the reconciliation flow consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalProfile {
    pub provider: String,
    pub provider_user_id: String,
    pub email: String,
    pub given_name: String,
    pub family_name: String,
}

impl ExternalProfile {
    /// Display name for auto-provisioned accounts.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}

impl From<GoogleUserInfo> for ExternalProfile {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            provider: "google".to_string(),
            provider_user_id: info.id,
            email: info.email,
            given_name: info.given_name,
            family_name: info.family_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_google_user_info_deserialization() {
        let json_data = json!({
            "id": "123456789",
            "email": "test@example.com",
            "verified_email": true,
            "name": "Test User",
            "given_name": "Test",
            "family_name": "User",
            "picture": "https://example.com/pic.jpg",
            "locale": "en"
        });

        let info: GoogleUserInfo =
            serde_json::from_value(json_data).expect("valid profile should deserialize");
        let profile = ExternalProfile::from(info);
        assert_eq!(profile.provider, "google");
        assert_eq!(profile.provider_user_id, "123456789");
        assert_eq!(profile.email, "test@example.com");
        assert_eq!(profile.display_name(), "Test User");
    }

    #[test]
    fn test_google_user_info_missing_required_fields() {
        // No email: must fail, never silently skip.
        let json_data = json!({
            "id": "123456789",
            "given_name": "Test",
            "family_name": "User"
        });
        assert!(serde_json::from_value::<GoogleUserInfo>(json_data).is_err());

        // No subject id either.
        let json_data = json!({
            "email": "test@example.com",
            "given_name": "Test",
            "family_name": "User"
        });
        assert!(serde_json::from_value::<GoogleUserInfo>(json_data).is_err());
    }

    #[test]
    fn test_token_response_requires_access_token() {
        let json_data = json!({
            "access_token": "ya29.token",
            "token_type": "Bearer"
        });
        let response: OidcTokenResponse =
            serde_json::from_value(json_data).expect("minimal response should deserialize");
        assert_eq!(response.access_token, "ya29.token");

        let json_data = json!({
            "token_type": "Bearer",
            "expires_in": 3599
        });
        assert!(serde_json::from_value::<OidcTokenResponse>(json_data).is_err());
    }
}
