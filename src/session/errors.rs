use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum TokenError {
    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Token expired")]
    Expired,

    /// The signature did not verify, or the token was signed with an
    /// algorithm other than the expected one.
    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token: {0}")]
    Malformed(String),
}
