//! HTTP adapter for a Pinata-compatible pinning service.

use crate::error::{PinStoreError, PinStoreResult};
use crate::PinStore;
use async_trait::async_trait;
use bytes::Bytes;
use moorage_core::{ContentAddress, PinnedBlob, WalletAddress};
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Fallback shown when the store holds no metadata name for a pin.
const UNNAMED: &str = "Unnamed File";

/// Pinata pinning API client.
pub struct HttpPinStore {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    api_secret: Option<String>,
}

#[derive(Deserialize)]
struct PinFileResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

#[derive(Deserialize)]
struct PinListResponse {
    rows: Vec<PinRow>,
}

#[derive(Deserialize)]
struct PinRow {
    ipfs_pin_hash: String,
    size: u64,
    date_pinned: String,
    #[serde(default)]
    metadata: PinMetadata,
}

#[derive(Deserialize, Default)]
struct PinMetadata {
    name: Option<String>,
}

impl HttpPinStore {
    /// Create a client for the given API base URL.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> PinStoreResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| PinStoreError::Config(format!("invalid pinning service URL: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            api_secret,
        })
    }

    fn url(&self, path: &str) -> PinStoreResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| PinStoreError::Config(format!("failed to build pinning URL: {e}")))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => req
                .header("pinata_api_key", key)
                .header("pinata_secret_api_key", secret),
            _ => req,
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> PinStoreResult<reqwest::Response> {
        let response = self.authorize(req).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            Err(PinStoreError::NotFound(body))
        } else {
            Err(PinStoreError::WriteFailed(format!(
                "pinning service returned {status}: {body}"
            )))
        }
    }
}

#[async_trait]
impl PinStore for HttpPinStore {
    async fn put(&self, data: Bytes, display_name: &str) -> PinStoreResult<ContentAddress> {
        let url = self.url("/pinning/pinFileToIPFS")?;
        let metadata = serde_json::json!({ "name": display_name }).to_string();
        let form = Form::new()
            .part(
                "file",
                Part::bytes(data.to_vec()).file_name(display_name.to_string()),
            )
            .text("pinataMetadata", metadata);

        let response = self.send(self.http.post(url).multipart(form)).await?;
        let parsed: PinFileResponse = response.json().await?;
        let address = ContentAddress::parse(&parsed.ipfs_hash)
            .map_err(|e| PinStoreError::WriteFailed(format!("service returned bad hash: {e}")))?;
        tracing::debug!(content_hash = %address, "blob pinned");
        Ok(address)
    }

    async fn unpin(&self, content_hash: &ContentAddress) -> PinStoreResult<()> {
        let url = self.url(&format!("/pinning/unpin/{content_hash}"))?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn list_pinned(&self, _scope: &WalletAddress) -> PinStoreResult<Vec<PinnedBlob>> {
        let mut url = self.url("/data/pinList")?;
        url.query_pairs_mut().append_pair("status", "pinned");
        let response = self.send(self.http.get(url)).await?;
        let parsed: PinListResponse = response.json().await?;

        let mut blobs = Vec::with_capacity(parsed.rows.len());
        for row in parsed.rows {
            // Rows the service mangled are dropped rather than failing the
            // whole listing; the merge treats absence as orphaned anyway.
            let Ok(content_hash) = ContentAddress::parse(&row.ipfs_pin_hash) else {
                tracing::warn!(hash = %row.ipfs_pin_hash, "skipping pin with unparseable hash");
                continue;
            };
            let Ok(pinned_at) = OffsetDateTime::parse(&row.date_pinned, &Rfc3339) else {
                tracing::warn!(hash = %row.ipfs_pin_hash, "skipping pin with unparseable date");
                continue;
            };
            blobs.push(PinnedBlob {
                content_hash,
                size_bytes: row.size,
                pinned_at,
                display_name: row.metadata.name.unwrap_or_else(|| UNNAMED.to_string()),
            });
        }
        Ok(blobs)
    }
}
