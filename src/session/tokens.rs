use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::userdb::Role;

use super::config::TokenConfig;
use super::errors::TokenError;
use super::types::{SessionClaims, TokenKind, TokenPair};

/// Issues and validates signed session tokens.
///
/// Tokens are HMAC-SHA256 JWTs carrying [`SessionClaims`]. There is no
/// revocation mechanism: a validly-signed, unexpired token is always
/// accepted, and logout is client-side token discard.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        // Pinning the accepted algorithm rejects tokens that name any other
        // one in their header (algorithm-confusion defense).
        let validation = Validation::new(Algorithm::HS256);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
        }
    }

    /// Issue a signed token for `user_id` with the lifetime of `kind`.
    pub fn issue(&self, user_id: i64, role: Role, kind: TokenKind) -> Result<String, TokenError> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = SessionClaims {
            user_id,
            role,
            exp: (Utc::now() + ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Issue an access/refresh pair for one authenticated user.
    pub fn issue_pair(&self, user_id: i64, role: Role) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(user_id, role, TokenKind::Access)?,
            refresh_token: self.issue(user_id, role, TokenKind::Refresh)?,
        })
    }

    /// Validate a signed token and return its claims.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, TokenError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}
