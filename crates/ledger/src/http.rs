//! HTTP adapter for a ledger gateway.
//!
//! The gateway owns the chain-facing half of the ledger: it signs and
//! submits the underlying transactions and answers a request only after the
//! write is durably committed, so every `Ok` from this client carries the
//! same confirmed-write guarantee the in-memory ledger gives for free.

use crate::error::{LedgerError, LedgerResult};
use crate::LedgerClient;
use async_trait::async_trait;
use moorage_core::{ContentAddress, FileRecord, RecordId, WalletAddress};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

/// HTTP ledger gateway client.
pub struct HttpLedger {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    owner: &'a WalletAddress,
    content_hash: &'a ContentAddress,
    display_name: &'a str,
}

#[derive(Deserialize)]
struct RegisterResponse {
    record_id: RecordId,
}

#[derive(Serialize)]
struct SetExistenceRequest<'a> {
    owner: &'a WalletAddress,
    content_hash: &'a ContentAddress,
    exists: bool,
}

#[derive(Deserialize)]
struct ListRecordsResponse {
    records: Vec<FileRecord>,
}

impl HttpLedger {
    /// Create a client for the given gateway base URL.
    pub fn new(base_url: &str, token: Option<String>) -> LedgerResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| LedgerError::Config(format!("invalid ledger gateway URL: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        })
    }

    fn url(&self, path: &str) -> LedgerResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| LedgerError::Config(format!("failed to build gateway URL: {e}")))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send a request and map non-success statuses onto ledger errors.
    async fn send(&self, req: reqwest::RequestBuilder) -> LedgerResult<reqwest::Response> {
        let response = self.authorize(req).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            Err(LedgerError::NotFound(body))
        } else {
            Err(LedgerError::WriteFailed(format!(
                "gateway returned {status}: {body}"
            )))
        }
    }
}

#[async_trait]
impl LedgerClient for HttpLedger {
    async fn register(
        &self,
        owner: &WalletAddress,
        content_hash: &ContentAddress,
        display_name: &str,
    ) -> LedgerResult<RecordId> {
        let url = self.url("/v1/records")?;
        let body = RegisterRequest {
            owner,
            content_hash,
            display_name,
        };
        let response = self.send(self.http.post(url).json(&body)).await?;
        let parsed: RegisterResponse = response.json().await?;
        tracing::debug!(
            owner = %owner.short(),
            content_hash = %content_hash,
            record_id = %parsed.record_id,
            "ledger record registered"
        );
        Ok(parsed.record_id)
    }

    async fn set_existence(
        &self,
        owner: &WalletAddress,
        content_hash: &ContentAddress,
        exists: bool,
    ) -> LedgerResult<()> {
        let url = self.url("/v1/records/existence")?;
        let body = SetExistenceRequest {
            owner,
            content_hash,
            exists,
        };
        self.send(self.http.post(url).json(&body)).await?;
        Ok(())
    }

    async fn list_records(&self, owner: &WalletAddress) -> LedgerResult<Vec<FileRecord>> {
        let mut url = self.url("/v1/records")?;
        url.query_pairs_mut().append_pair("owner", owner.as_str());
        let response = self.send(self.http.get(url)).await?;
        let parsed: ListRecordsResponse = response.json().await?;
        Ok(parsed.records)
    }
}
