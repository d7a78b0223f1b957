//! Engine error taxonomy.

use moorage_core::ContentAddress;
use moorage_ledger::LedgerError;
use moorage_pinstore::PinStoreError;
use thiserror::Error;

/// Render the orphaned-pin suffix for a failed ledger write.
fn orphaned_pin(content_hash: &Option<ContentAddress>) -> String {
    match content_hash {
        Some(hash) => format!(" (orphaned pin: {hash})"),
        None => String::new(),
    }
}

/// Reconciliation engine errors.
///
/// Every write-path failure carries enough context (which side failed, and
/// the content hash when one is involved) for out-of-band cleanup; the
/// engine never retries and never runs destructive compensating actions.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The content store refused or failed a write. When this is the first
    /// step of an upload, no ledger call was made and no orphan exists.
    #[error("content store write failed: {source}")]
    ContentStoreWriteFailed {
        #[source]
        source: PinStoreError,
    },

    /// The ledger refused or failed a write. For an upload this happens
    /// after the blob was pinned, so the attached hash names an orphaned
    /// pin a caller or a later sweep must clean up.
    #[error("ledger write failed{}: {source}", orphaned_pin(.content_hash))]
    LedgerWriteFailed {
        content_hash: Option<ContentAddress>,
        #[source]
        source: LedgerError,
    },

    /// The owner has no matching record (or the bytes are already gone).
    #[error("file not found: {0}")]
    NotFound(ContentAddress),

    /// The requested operation is not valid from the file's current state.
    #[error("invalid transition for {content_hash}: {from} -> {attempted}")]
    InvalidTransition {
        content_hash: ContentAddress,
        from: &'static str,
        attempted: &'static str,
    },

    /// Quota arithmetic over a zero-byte quota is undefined.
    #[error("invalid quota: {0} bytes")]
    InvalidQuota(u64),
}

impl EngineError {
    /// Wrap a content store failure.
    pub fn content_store(source: PinStoreError) -> Self {
        Self::ContentStoreWriteFailed { source }
    }

    /// Wrap a ledger failure, attaching the content hash when the blob
    /// side of the operation had already committed.
    pub fn ledger(source: LedgerError, content_hash: Option<ContentAddress>) -> Self {
        Self::LedgerWriteFailed {
            content_hash,
            source,
        }
    }

    /// The orphaned pin this error names, if any.
    pub fn orphaned_content_hash(&self) -> Option<&ContentAddress> {
        match self {
            Self::LedgerWriteFailed {
                content_hash: Some(hash),
                ..
            } => Some(hash),
            _ => None,
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
