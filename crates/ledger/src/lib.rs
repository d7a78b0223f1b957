//! Ownership ledger client for Moorage.
//!
//! The ledger is the durable source of truth for "does this owner still
//! claim this file". This crate provides:
//! - The `LedgerClient` trait the reconciliation engine depends on
//! - An in-memory implementation for tests and local development
//! - An HTTP adapter for a ledger gateway that submits and confirms the
//!   underlying chain transactions
//!
//! All writes are confirmed: a client method resolves only once the ledger
//! reports durable commit, so a returned `Ok` is a committed record.

pub mod error;
pub mod http;
pub mod memory;

pub use error::{LedgerError, LedgerResult};
pub use http::HttpLedger;
pub use memory::MemoryLedger;

use async_trait::async_trait;
use moorage_core::config::LedgerConfig;
use moorage_core::{ContentAddress, FileRecord, RecordId, WalletAddress};
use std::sync::Arc;

/// Typed interface over the external ownership ledger.
#[async_trait]
pub trait LedgerClient: Send + Sync + 'static {
    /// Register a file record for an owner, awaiting durable commit.
    ///
    /// Registration is an upsert on (owner, content hash): a soft-deleted
    /// record is reactivated in place with the new display name, an active
    /// record is returned unchanged. At most one record per pair ever has
    /// `exists = true`.
    async fn register(
        &self,
        owner: &WalletAddress,
        content_hash: &ContentAddress,
        display_name: &str,
    ) -> LedgerResult<RecordId>;

    /// Flip a record's existence flag, awaiting durable commit.
    ///
    /// Fails with `NotFound` when the owner has no record for the hash.
    /// Setting the flag to its current value is a no-op, not an error.
    async fn set_existence(
        &self,
        owner: &WalletAddress,
        content_hash: &ContentAddress,
        exists: bool,
    ) -> LedgerResult<()>;

    /// List every record the ledger holds for an owner, both active and
    /// soft-deleted. Order is unspecified; callers sort.
    async fn list_records(&self, owner: &WalletAddress) -> LedgerResult<Vec<FileRecord>>;
}

/// Create a ledger client from configuration.
pub fn from_config(config: &LedgerConfig) -> LedgerResult<Arc<dyn LedgerClient>> {
    config.validate().map_err(LedgerError::Config)?;

    match config {
        LedgerConfig::Memory => Ok(Arc::new(MemoryLedger::new())),
        LedgerConfig::Http { base_url, token } => {
            let token = token
                .clone()
                .or_else(|| std::env::var("MOORAGE_LEDGER_TOKEN").ok());
            let client = HttpLedger::new(base_url, token)?;
            Ok(Arc::new(client))
        }
    }
}
