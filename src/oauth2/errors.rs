use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum OAuth2Error {
    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("Fetch user info error: {0}")]
    FetchUserInfo(String),

    #[error("Serde error: {0}")]
    Serde(String),

    /// The `(provider, provider_user_id)` pair is already linked.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for OAuth2Error {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                OAuth2Error::Constraint(db_err.to_string())
            }
            _ => OAuth2Error::Storage(err.to_string()),
        }
    }
}
