use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::userdb::Role;

/// Which of the two token kinds to issue. Both carry the same claims; they
/// differ only in lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived; sent with each request.
    Access,
    /// Long-lived; used to obtain fresh token pairs without re-entering a
    /// password.
    Refresh,
}

/// Decoded payload of a session token. Not persisted anywhere; the signed
/// token itself is the only session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: i64,
    pub role: Role,
    /// Expiry as unix seconds.
    pub exp: i64,
}

impl SessionClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
    }
}

/// An access/refresh token pair, issued together on every successful login.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
