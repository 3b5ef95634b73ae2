use thiserror::Error;

use crate::oauth2::OAuth2Error;
use crate::password::PasswordError;
use crate::session::TokenError;
use crate::userdb::UserError;

/// Errors that can occur while coordinating identity operations.
#[derive(Error, Debug)]
pub enum CoordinationError {
    /// The email is already registered. Returned on registration both when
    /// the pre-check finds the email and when the store's unique constraint
    /// rejects a racing create.
    #[error("Email already registered")]
    DuplicateEmail,

    /// Wrong password or unknown email; deliberately indistinguishable.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Incorrect old password")]
    IncorrectOldPassword,

    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Network, decode, or missing-field failure from the external identity
    /// provider.
    #[error("External provider error: {0}")]
    ExternalProvider(OAuth2Error),

    #[error("Token error: {0}")]
    Token(TokenError),

    #[error("Password error: {0}")]
    Password(PasswordError),

    #[error("User store error: {0}")]
    User(UserError),
}

impl CoordinationError {
    /// Log the error and return self, for chaining at the point of origin.
    ///
    /// Expected authentication outcomes are logged at debug; everything
    /// else is an operational error.
    pub fn log(self) -> Self {
        match &self {
            Self::DuplicateEmail => tracing::debug!("Registration rejected: duplicate email"),
            Self::InvalidCredentials => tracing::debug!("Authentication rejected"),
            Self::IncorrectOldPassword => tracing::debug!("Password change rejected"),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::debug!("Resource not found: {} {}", resource_type, resource_id),
            Self::ExternalProvider(err) => tracing::error!("External provider error: {}", err),
            Self::Token(err) => tracing::error!("Token error: {}", err),
            Self::Password(err) => tracing::error!("Password error: {}", err),
            Self::User(err) => tracing::error!("User store error: {}", err),
        }
        self
    }
}

impl From<OAuth2Error> for CoordinationError {
    fn from(err: OAuth2Error) -> Self {
        Self::ExternalProvider(err).log()
    }
}

impl From<TokenError> for CoordinationError {
    fn from(err: TokenError) -> Self {
        Self::Token(err)
    }
}

impl From<PasswordError> for CoordinationError {
    fn from(err: PasswordError) -> Self {
        Self::Password(err).log()
    }
}

impl From<UserError> for CoordinationError {
    fn from(err: UserError) -> Self {
        Self::User(err).log()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<CoordinationError>();
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CoordinationError::DuplicateEmail.to_string(),
            "Email already registered"
        );
        assert_eq!(
            CoordinationError::InvalidCredentials.to_string(),
            "Incorrect email or password"
        );
        assert_eq!(
            CoordinationError::IncorrectOldPassword.to_string(),
            "Incorrect old password"
        );
        assert_eq!(
            CoordinationError::ResourceNotFound {
                resource_type: "User".to_string(),
                resource_id: "123".to_string(),
            }
            .to_string(),
            "Resource not found: User 123"
        );
    }

    #[test]
    fn test_from_user_error() {
        let err: CoordinationError = UserError::Storage("db down".to_string()).into();
        match err {
            CoordinationError::User(UserError::Storage(msg)) => assert_eq!(msg, "db down"),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_from_token_error_preserves_kind() {
        let err: CoordinationError = TokenError::Expired.into();
        assert!(matches!(err, CoordinationError::Token(TokenError::Expired)));
    }

    #[test]
    fn test_log_returns_self() {
        let err = CoordinationError::DuplicateEmail.log();
        assert!(matches!(err, CoordinationError::DuplicateEmail));
    }
}
