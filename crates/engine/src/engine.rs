//! The file lifecycle reconciliation engine.

use crate::error::{EngineError, EngineResult};
use crate::merge::{self, Merged};
use crate::quota;
use bytes::Bytes;
use moorage_core::{
    ContentAddress, FileRecord, FileState, FileView, ListScope, Orphan, PinnedBlob, QuotaUsage,
    WalletAddress,
};
use moorage_ledger::{LedgerClient, LedgerError};
use moorage_pinstore::{PinStore, PinStoreError};
use std::sync::Arc;
use time::OffsetDateTime;

/// Orchestrates file lifecycle operations across the ownership ledger and
/// the content store.
///
/// The engine owns no persistent state, only the merge logic. Each
/// operation is a sequential chain of confirmed calls against the two
/// clients; there is no cross-system transaction and no distributed lock,
/// so concurrent conflicting operations on the same (owner, hash) may race.
/// Callers needing serialization hold it above the engine.
pub struct ReconciliationEngine {
    ledger: Arc<dyn LedgerClient>,
    pins: Arc<dyn PinStore>,
}

impl ReconciliationEngine {
    /// Create an engine over the two external clients.
    pub fn new(ledger: Arc<dyn LedgerClient>, pins: Arc<dyn PinStore>) -> Self {
        Self { ledger, pins }
    }

    /// Fetch both listings for an owner, concurrently and without a lock.
    ///
    /// The two systems are independently paced and not snapshot-isolated;
    /// immediately after a write one side may not reflect it yet. Merge
    /// consumers must treat the combined result as best-effort.
    async fn fetch_listings(
        &self,
        owner: &WalletAddress,
    ) -> EngineResult<(Vec<FileRecord>, Vec<PinnedBlob>)> {
        let (records, pins) = tokio::join!(
            self.ledger.list_records(owner),
            self.pins.list_pinned(owner)
        );
        let records = records.map_err(|e| EngineError::ledger(e, None))?;
        let pins = pins.map_err(EngineError::content_store)?;
        Ok((records, pins))
    }

    /// Upload a file: pin the bytes, then register ownership.
    ///
    /// Two-step commit with no atomicity across the systems. If the store
    /// write fails nothing was registered and no orphan exists. If the
    /// ledger write fails after the pin succeeded, the blob is an orphaned
    /// pin; the engine deliberately does NOT unpin it (the compensating
    /// delete is itself fallible and would mask the original failure) and
    /// instead returns `LedgerWriteFailed` carrying the hash so the caller
    /// (or a later sweep) can clean up.
    pub async fn upload(
        &self,
        owner: &WalletAddress,
        data: Bytes,
        display_name: &str,
    ) -> EngineResult<FileView> {
        let size_bytes = data.len() as u64;
        let content_hash = self
            .pins
            .put(data, display_name)
            .await
            .map_err(EngineError::content_store)?;

        match self
            .ledger
            .register(owner, &content_hash, display_name)
            .await
        {
            Ok(record_id) => {
                tracing::info!(
                    owner = %owner.short(),
                    content_hash = %content_hash,
                    record_id = %record_id,
                    size_bytes,
                    "file uploaded"
                );
                Ok(FileView {
                    content_hash,
                    display_name: display_name.to_string(),
                    size_bytes,
                    pinned_at: OffsetDateTime::now_utc(),
                    state: FileState::Active,
                })
            }
            Err(source) => {
                tracing::warn!(
                    owner = %owner.short(),
                    content_hash = %content_hash,
                    error = %source,
                    "ledger registration failed after pin; blob is now an orphaned pin"
                );
                Err(EngineError::ledger(source, Some(content_hash)))
            }
        }
    }

    /// Soft-delete a file: flip the ledger flag, leave the bytes pinned.
    ///
    /// The content store is untouched: soft-deleted bytes stay pinned and
    /// recoverable. Valid only from `Active`; `NotFound` when the owner has
    /// no active record for the hash.
    pub async fn soft_delete(
        &self,
        owner: &WalletAddress,
        content_hash: &ContentAddress,
    ) -> EngineResult<FileView> {
        let (records, pins) = self.fetch_listings(owner).await?;
        let blob = match merge::merge_one(&records, &pins, content_hash) {
            Merged::Active(_, blob) => blob.clone(),
            // No active record: absent, already deleted, or purged.
            state @ (Merged::Absent | Merged::SoftDeleted(..) | Merged::BlobOnly(_)) => {
                tracing::debug!(content_hash = %content_hash, state = state.label(), "soft delete refused");
                return Err(EngineError::NotFound(content_hash.clone()));
            }
            state @ Merged::RecordOnly(record) => {
                // exists = true with no blob is an orphan; exists = false
                // with no blob is the purged terminal state.
                if record.exists {
                    return Err(EngineError::InvalidTransition {
                        content_hash: content_hash.clone(),
                        from: state.label(),
                        attempted: "soft_delete",
                    });
                }
                return Err(EngineError::NotFound(content_hash.clone()));
            }
        };

        self.ledger
            .set_existence(owner, content_hash, false)
            .await
            .map_err(|e| match e {
                LedgerError::NotFound(_) => EngineError::NotFound(content_hash.clone()),
                other => EngineError::ledger(other, Some(content_hash.clone())),
            })?;

        tracing::info!(owner = %owner.short(), content_hash = %content_hash, "file soft-deleted");
        Ok(FileView {
            content_hash: blob.content_hash,
            display_name: blob.display_name,
            size_bytes: blob.size_bytes,
            pinned_at: blob.pinned_at,
            state: FileState::SoftDeleted,
        })
    }

    /// Recover a soft-deleted file.
    ///
    /// Idempotent on an already-Active file: returns the current view
    /// unchanged. Fails with `InvalidTransition` from any orphaned, purged,
    /// or absent state.
    pub async fn recover(
        &self,
        owner: &WalletAddress,
        content_hash: &ContentAddress,
    ) -> EngineResult<FileView> {
        let (records, pins) = self.fetch_listings(owner).await?;
        let blob = match merge::merge_one(&records, &pins, content_hash) {
            Merged::Active(_, blob) => {
                return Ok(FileView {
                    content_hash: blob.content_hash.clone(),
                    display_name: blob.display_name.clone(),
                    size_bytes: blob.size_bytes,
                    pinned_at: blob.pinned_at,
                    state: FileState::Active,
                });
            }
            Merged::SoftDeleted(_, blob) => blob.clone(),
            state => {
                return Err(EngineError::InvalidTransition {
                    content_hash: content_hash.clone(),
                    from: state.label(),
                    attempted: "recover",
                });
            }
        };

        self.ledger
            .set_existence(owner, content_hash, true)
            .await
            .map_err(|e| match e {
                LedgerError::NotFound(_) => EngineError::NotFound(content_hash.clone()),
                other => EngineError::ledger(other, Some(content_hash.clone())),
            })?;

        tracing::info!(owner = %owner.short(), content_hash = %content_hash, "file recovered");
        Ok(FileView {
            content_hash: blob.content_hash,
            display_name: blob.display_name,
            size_bytes: blob.size_bytes,
            pinned_at: blob.pinned_at,
            state: FileState::Active,
        })
    }

    /// Permanently delete a soft-deleted file's bytes.
    ///
    /// Purge must follow a soft-delete: while the ledger still reports
    /// `exists = true` the engine refuses rather than unpin, since that
    /// would silently turn an Active file into an orphan. After a
    /// successful unpin the ledger record stays at `exists = false` forever;
    /// the ledger is an append-mostly audit trail, and blob absence IS
    /// the purged state.
    pub async fn purge(
        &self,
        owner: &WalletAddress,
        content_hash: &ContentAddress,
    ) -> EngineResult<()> {
        let records = self
            .ledger
            .list_records(owner)
            .await
            .map_err(|e| EngineError::ledger(e, None))?;

        let record = records
            .iter()
            .find(|r| &r.content_hash == content_hash)
            .ok_or_else(|| EngineError::NotFound(content_hash.clone()))?;
        if record.exists {
            return Err(EngineError::InvalidTransition {
                content_hash: content_hash.clone(),
                from: "active",
                attempted: "purge",
            });
        }

        self.pins.unpin(content_hash).await.map_err(|e| match e {
            PinStoreError::NotFound(_) => EngineError::NotFound(content_hash.clone()),
            other => EngineError::content_store(other),
        })?;

        tracing::info!(owner = %owner.short(), content_hash = %content_hash, "file purged");
        Ok(())
    }

    /// List the owner's files in one scope, merged and ordered.
    ///
    /// Inconsistent entries (hash present on only one side) are dropped
    /// silently rather than failing the listing: best-effort visibility;
    /// the diagnostic sweep is where inconsistencies surface.
    pub async fn list_view(
        &self,
        owner: &WalletAddress,
        scope: ListScope,
    ) -> EngineResult<Vec<FileView>> {
        let (records, pins) = self.fetch_listings(owner).await?;
        Ok(merge::list_views(&records, &pins, scope))
    }

    /// Report every inconsistency between the two systems for an owner.
    ///
    /// Read-only diagnostics, never destructive. A report taken immediately
    /// after a write may reflect transient listing skew rather than a true
    /// orphan; re-check after a short delay before acting on one.
    pub async fn sweep_orphans(&self, owner: &WalletAddress) -> EngineResult<Vec<Orphan>> {
        let (records, pins) = self.fetch_listings(owner).await?;
        let orphans = merge::classify_orphans(&records, &pins);
        if !orphans.is_empty() {
            tracing::debug!(
                owner = %owner.short(),
                count = orphans.len(),
                "orphan sweep found inconsistencies"
            );
        }
        Ok(orphans)
    }

    /// Derive the owner's storage usage against a quota.
    pub async fn quota_usage(
        &self,
        owner: &WalletAddress,
        quota_bytes: u64,
    ) -> EngineResult<QuotaUsage> {
        let views = self.list_view(owner, ListScope::Active).await?;
        let used_bytes = quota::used_bytes(&views);
        let percent = quota::usage_percent(used_bytes, quota_bytes)?;
        Ok(QuotaUsage {
            used_bytes,
            quota_bytes,
            percent,
        })
    }
}
