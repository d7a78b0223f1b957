//! Pin store error types.

use thiserror::Error;

/// Pin store operation errors.
#[derive(Debug, Error)]
pub enum PinStoreError {
    /// The store rejected or failed to complete a write (pin or unpin).
    #[error("content store write failed: {0}")]
    WriteFailed(String),

    /// No pinned blob matches the requested content address.
    #[error("blob not pinned: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure reaching the pinning service.
    #[error("content store transport error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for pin store operations.
pub type PinStoreResult<T> = std::result::Result<T, PinStoreError>;
