//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid content address: {0}")]
    InvalidAddress(String),

    #[error("invalid wallet address: {0}")]
    InvalidWallet(String),

    #[error("invalid record id: {0}")]
    InvalidRecordId(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
