//! Content-addressed pin store client for Moorage.
//!
//! The pin store is the durable source of truth for "do the bytes still
//! exist". This crate provides:
//! - The `PinStore` trait the reconciliation engine depends on
//! - An in-memory implementation for tests and local development
//! - An HTTP adapter speaking the Pinata pinning API
//!
//! The store has no notion of soft-delete and no transactional coupling to
//! the ownership ledger: a blob is pinned or it is gone.

pub mod error;
pub mod http;
pub mod memory;

pub use error::{PinStoreError, PinStoreResult};
pub use http::HttpPinStore;
pub use memory::MemoryPinStore;

use async_trait::async_trait;
use bytes::Bytes;
use moorage_core::config::PinStoreConfig;
use moorage_core::{ContentAddress, PinnedBlob, WalletAddress};
use std::sync::Arc;

/// Typed interface over the external content-addressed blob service.
#[async_trait]
pub trait PinStore: Send + Sync + 'static {
    /// Pin a byte payload and return its content address.
    ///
    /// Content addressing dedupes: putting bytes that are already pinned
    /// returns the existing address and leaves the original pin (and its
    /// pin time) untouched.
    async fn put(&self, data: Bytes, display_name: &str) -> PinStoreResult<ContentAddress>;

    /// Unpin a blob, permanently releasing its bytes.
    ///
    /// Fails with `NotFound` when nothing is pinned at the address.
    async fn unpin(&self, content_hash: &ContentAddress) -> PinStoreResult<()>;

    /// List pinned blobs visible to the given scope.
    ///
    /// Pinning services list per account, not per wallet, so the returned
    /// set may include blobs owned by other wallets sharing the store; the
    /// engine's merge drops anything the owner's ledger records do not
    /// claim. Order is unspecified; callers sort.
    async fn list_pinned(&self, scope: &WalletAddress) -> PinStoreResult<Vec<PinnedBlob>>;
}

/// Create a pin store from configuration.
pub fn from_config(config: &PinStoreConfig) -> PinStoreResult<Arc<dyn PinStore>> {
    config.validate().map_err(PinStoreError::Config)?;

    match config {
        PinStoreConfig::Memory => Ok(Arc::new(MemoryPinStore::new())),
        PinStoreConfig::Http {
            base_url,
            api_key,
            api_secret,
        } => {
            let client = HttpPinStore::new(base_url, api_key.clone(), api_secret.clone())?;
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_memory() {
        from_config(&PinStoreConfig::Memory).unwrap();
    }

    #[test]
    fn test_from_config_rejects_partial_credentials() {
        let config = PinStoreConfig::Http {
            base_url: "https://api.pinata.cloud".to_string(),
            api_key: None,
            api_secret: Some("secret".to_string()),
        };
        match from_config(&config) {
            Err(PinStoreError::Config(_)) => {}
            Ok(_) => panic!("expected config error, got Ok"),
            Err(e) => panic!("expected config error, got {e:?}"),
        }
    }
}
