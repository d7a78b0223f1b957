//! In-memory pin store implementation.

use crate::error::{PinStoreError, PinStoreResult};
use crate::PinStore;
use async_trait::async_trait;
use bytes::Bytes;
use moorage_core::{ContentAddress, PinnedBlob, WalletAddress};
use std::collections::HashMap;
use time::OffsetDateTime;
use tokio::sync::Mutex;

/// In-process pin store backed by a mutex-guarded map.
///
/// Content addresses are SHA-256 hex digests of the payload. Like the real
/// pinning service, the listing is account-wide: `list_pinned` ignores the
/// wallet scope and returns every pin, leaving ownership filtering to the
/// engine. Intended for tests and local development only.
#[derive(Default)]
pub struct MemoryPinStore {
    pins: Mutex<HashMap<ContentAddress, (Bytes, PinnedBlob)>>,
}

impl MemoryPinStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PinStore for MemoryPinStore {
    async fn put(&self, data: Bytes, display_name: &str) -> PinStoreResult<ContentAddress> {
        let address = ContentAddress::for_bytes(&data);
        let mut pins = self.pins.lock().await;

        // Dedupe on content: the first pin wins, including its timestamp
        // and name, matching how pinning services treat re-pins.
        if pins.contains_key(&address) {
            return Ok(address);
        }

        let blob = PinnedBlob {
            content_hash: address.clone(),
            size_bytes: data.len() as u64,
            pinned_at: OffsetDateTime::now_utc(),
            display_name: display_name.to_string(),
        };
        pins.insert(address.clone(), (data, blob));
        Ok(address)
    }

    async fn unpin(&self, content_hash: &ContentAddress) -> PinStoreResult<()> {
        let mut pins = self.pins.lock().await;
        match pins.remove(content_hash) {
            Some(_) => Ok(()),
            None => Err(PinStoreError::NotFound(content_hash.to_string())),
        }
    }

    async fn list_pinned(&self, _scope: &WalletAddress) -> PinStoreResult<Vec<PinnedBlob>> {
        let pins = self.pins.lock().await;
        Ok(pins.values().map(|(_, blob)| blob.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> WalletAddress {
        WalletAddress::parse("0x1111111111111111111111111111111111111111").unwrap()
    }

    #[tokio::test]
    async fn test_put_and_list() {
        let store = MemoryPinStore::new();
        let address = store
            .put(Bytes::from_static(b"hello"), "hello.txt")
            .await
            .unwrap();

        let pins = store.list_pinned(&scope()).await.unwrap();
        assert_eq!(pins.len(), 1);
        assert_eq!(pins[0].content_hash, address);
        assert_eq!(pins[0].size_bytes, 5);
        assert_eq!(pins[0].display_name, "hello.txt");
    }

    #[tokio::test]
    async fn test_put_dedupes_on_content() {
        let store = MemoryPinStore::new();
        let first = store
            .put(Bytes::from_static(b"same bytes"), "first.txt")
            .await
            .unwrap();
        let second = store
            .put(Bytes::from_static(b"same bytes"), "second.txt")
            .await
            .unwrap();

        assert_eq!(first, second);
        let pins = store.list_pinned(&scope()).await.unwrap();
        assert_eq!(pins.len(), 1);
        assert_eq!(pins[0].display_name, "first.txt");
    }

    #[tokio::test]
    async fn test_unpin_removes_blob() {
        let store = MemoryPinStore::new();
        let address = store
            .put(Bytes::from_static(b"temp"), "temp.bin")
            .await
            .unwrap();

        store.unpin(&address).await.unwrap();
        assert!(store.list_pinned(&scope()).await.unwrap().is_empty());

        match store.unpin(&address).await {
            Err(PinStoreError::NotFound(_)) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
