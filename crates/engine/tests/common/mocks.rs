//! Failure-injecting client wrappers for partial-failure scenarios.

use async_trait::async_trait;
use bytes::Bytes;
use moorage_core::{ContentAddress, FileRecord, PinnedBlob, RecordId, WalletAddress};
use moorage_ledger::{LedgerClient, LedgerError, LedgerResult, MemoryLedger};
use moorage_pinstore::{MemoryPinStore, PinStore, PinStoreError, PinStoreResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ledger wrapper whose writes can be made to fail on demand.
///
/// Reads always pass through, so tests can flip a flag, observe the failed
/// write, then inspect the resulting state through the same engine.
pub struct FlakyLedger {
    inner: Arc<MemoryLedger>,
    pub fail_register: AtomicBool,
    pub fail_set_existence: AtomicBool,
}

#[allow(dead_code)]
impl FlakyLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Arc::new(MemoryLedger::new()),
            fail_register: AtomicBool::new(false),
            fail_set_existence: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl LedgerClient for FlakyLedger {
    async fn register(
        &self,
        owner: &WalletAddress,
        content_hash: &ContentAddress,
        display_name: &str,
    ) -> LedgerResult<RecordId> {
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(LedgerError::WriteFailed(
                "injected: transaction reverted".to_string(),
            ));
        }
        self.inner.register(owner, content_hash, display_name).await
    }

    async fn set_existence(
        &self,
        owner: &WalletAddress,
        content_hash: &ContentAddress,
        exists: bool,
    ) -> LedgerResult<()> {
        if self.fail_set_existence.load(Ordering::SeqCst) {
            return Err(LedgerError::WriteFailed(
                "injected: transaction reverted".to_string(),
            ));
        }
        self.inner.set_existence(owner, content_hash, exists).await
    }

    async fn list_records(&self, owner: &WalletAddress) -> LedgerResult<Vec<FileRecord>> {
        self.inner.list_records(owner).await
    }
}

/// Pin store wrapper whose writes can be made to fail on demand.
pub struct FlakyPinStore {
    inner: Arc<MemoryPinStore>,
    pub fail_put: AtomicBool,
    pub fail_unpin: AtomicBool,
}

#[allow(dead_code)]
impl FlakyPinStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Arc::new(MemoryPinStore::new()),
            fail_put: AtomicBool::new(false),
            fail_unpin: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl PinStore for FlakyPinStore {
    async fn put(&self, data: Bytes, display_name: &str) -> PinStoreResult<ContentAddress> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(PinStoreError::WriteFailed(
                "injected: pin queue unavailable".to_string(),
            ));
        }
        self.inner.put(data, display_name).await
    }

    async fn unpin(&self, content_hash: &ContentAddress) -> PinStoreResult<()> {
        if self.fail_unpin.load(Ordering::SeqCst) {
            return Err(PinStoreError::WriteFailed(
                "injected: unpin unavailable".to_string(),
            ));
        }
        self.inner.unpin(content_hash).await
    }

    async fn list_pinned(&self, scope: &WalletAddress) -> PinStoreResult<Vec<PinnedBlob>> {
        self.inner.list_pinned(scope).await
    }
}
