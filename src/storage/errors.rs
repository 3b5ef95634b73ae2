use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Unsupported database URL scheme: {0}")]
    UnsupportedScheme(String),
}
