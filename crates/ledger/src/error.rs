//! Ledger client error types.

use thiserror::Error;

/// Ledger operation errors.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger rejected or failed to durably commit a write.
    #[error("ledger write failed: {0}")]
    WriteFailed(String),

    /// No record matches the requested (owner, content hash) pair.
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure reaching the ledger gateway.
    #[error("ledger transport error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for ledger operations.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
