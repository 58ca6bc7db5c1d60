//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Client store errors.
///
/// The three kinds stay distinct so the boundary can map each one to its
/// own status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The sheet file could not be read, parsed or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// No client has the requested key
    #[error("Client not found: {0}")]
    NotFound(String),

    /// Another client already holds the key
    #[error("Client already exists: {0}")]
    Conflict(String),
}

impl StoreError {
    /// Storage failure with context about what was being done
    pub fn storage(context: impl std::fmt::Display, cause: impl std::fmt::Display) -> Self {
        StoreError::Storage(format!("{}: {}", context, cause))
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Storage(_) => 500,
            StoreError::NotFound(_) => 404,
            StoreError::Conflict(_) => 409,
        }
    }
}
