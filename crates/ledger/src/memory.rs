//! In-memory ledger implementation.

use crate::error::{LedgerError, LedgerResult};
use crate::LedgerClient;
use async_trait::async_trait;
use moorage_core::{ContentAddress, FileRecord, RecordId, WalletAddress};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-process ledger backed by a mutex-guarded map.
///
/// Confirmed-write semantics are trivial here: every mutation is durable
/// (for the process lifetime) the moment the lock is released. Intended for
/// tests and local development only.
#[derive(Default)]
pub struct MemoryLedger {
    records: Mutex<HashMap<(WalletAddress, ContentAddress), FileRecord>>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerClient for MemoryLedger {
    async fn register(
        &self,
        owner: &WalletAddress,
        content_hash: &ContentAddress,
        display_name: &str,
    ) -> LedgerResult<RecordId> {
        let mut records = self.records.lock().await;
        let key = (owner.clone(), content_hash.clone());

        if let Some(existing) = records.get_mut(&key) {
            if !existing.exists {
                // Reactivate the soft-deleted record in place.
                existing.exists = true;
                existing.display_name = display_name.to_string();
            }
            return Ok(existing.record_id);
        }

        let record = FileRecord {
            record_id: RecordId::new(),
            owner: owner.clone(),
            content_hash: content_hash.clone(),
            display_name: display_name.to_string(),
            exists: true,
        };
        let record_id = record.record_id;
        records.insert(key, record);
        Ok(record_id)
    }

    async fn set_existence(
        &self,
        owner: &WalletAddress,
        content_hash: &ContentAddress,
        exists: bool,
    ) -> LedgerResult<()> {
        let mut records = self.records.lock().await;
        let key = (owner.clone(), content_hash.clone());
        match records.get_mut(&key) {
            Some(record) => {
                record.exists = exists;
                Ok(())
            }
            None => Err(LedgerError::NotFound(format!(
                "{} has no record for {content_hash}",
                owner.short()
            ))),
        }
    }

    async fn list_records(&self, owner: &WalletAddress) -> LedgerResult<Vec<FileRecord>> {
        let records = self.records.lock().await;
        Ok(records
            .values()
            .filter(|r| &r.owner == owner)
            .cloned()
            .collect())
    }
}
