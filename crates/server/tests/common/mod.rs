//! Shared test-server helpers.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use moorage_core::config::AppConfig;
use moorage_core::{ContentAddress, FileRecord, RecordId, WalletAddress};
use moorage_ledger::{LedgerClient, LedgerError, LedgerResult, MemoryLedger};
use moorage_pinstore::MemoryPinStore;
use moorage_server::{create_router, AppState};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Build a router over fresh in-memory clients.
#[allow(dead_code)]
pub fn memory_router() -> Router {
    memory_router_with_config(AppConfig::for_testing())
}

/// Build a router over fresh in-memory clients with a custom config.
#[allow(dead_code)]
pub fn memory_router_with_config(config: AppConfig) -> Router {
    let state = AppState::new(
        config,
        Arc::new(MemoryLedger::new()),
        Arc::new(MemoryPinStore::new()),
    );
    create_router(state)
}

/// Ledger wrapper whose register calls can be made to fail on demand.
pub struct FlakyLedger {
    inner: MemoryLedger,
    pub fail_register: AtomicBool,
}

#[allow(dead_code)]
impl FlakyLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryLedger::new(),
            fail_register: AtomicBool::new(false),
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
        self.inner.set_existence(owner, content_hash, exists).await
    }

    async fn list_records(&self, owner: &WalletAddress) -> LedgerResult<Vec<FileRecord>> {
        self.inner.list_records(owner).await
    }
}

/// Helper to make JSON requests against the router.
#[allow(dead_code)]
pub async fn json_request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    let request_body = match body {
        Some(v) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let request = builder.body(request_body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
