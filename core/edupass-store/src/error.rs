//! Record store error types.

use thiserror::Error;

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur reading or writing the record document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("API request failed: {0}")]
    Api(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("malformed record document: {0}")]
    Document(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Failure injected by the in-memory store.
    #[error("simulated store failure: {0}")]
    Simulated(String),
}

impl StoreError {
    /// Returns true if retrying with the same credentials cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            StoreError::AuthFailed(_) | StoreError::Config(_) | StoreError::NotFound(_)
        )
    }
}
