use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    /// A database uniqueness constraint rejected the write. For the users
    /// table the only unique column is `email`, so this is the authoritative
    /// signal for a duplicate registration race.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for UserError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                UserError::Constraint(db_err.to_string())
            }
            _ => UserError::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(UserError::NotFound.to_string(), "User not found");
        assert_eq!(
            UserError::Constraint("UNIQUE constraint failed: users.email".to_string()).to_string(),
            "Constraint violation: UNIQUE constraint failed: users.email"
        );
        assert_eq!(
            UserError::Storage("connection reset".to_string()).to_string(),
            "Storage error: connection reset"
        );
    }

    #[test]
    fn test_from_non_database_sqlx_error() {
        let err: UserError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, UserError::Storage(_)));
    }
}
