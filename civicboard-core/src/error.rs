//! Error types for civicboard.

use thiserror::Error;

/// Errors that can occur in civicboard operations.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("A record with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for civicboard operations.
pub type BoardResult<T> = Result<T, BoardError>;
