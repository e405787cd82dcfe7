//! Error types for conversa-core

use thiserror::Error;

/// Result type alias for conversa operations
pub type Result<T> = std::result::Result<T, ConversaError>;

/// Main error type for conversa operations
#[derive(Error, Debug)]
pub enum ConversaError {
    /// Persistence-related errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Completion API errors
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),
}

/// Persistence-specific errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

/// Errors from the external completion service
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The service answered with a non-success status
    #[error("Completion API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response
    #[error("Completion request failed: {0}")]
    Request(String),

    /// The response body could not be decoded
    #[error("Malformed completion payload: {0}")]
    Malformed(String),
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        PersistenceError::Database(err.to_string())
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for ConversaError {
    fn from(err: rusqlite::Error) -> Self {
        ConversaError::Persistence(PersistenceError::Database(err.to_string()))
    }
}
