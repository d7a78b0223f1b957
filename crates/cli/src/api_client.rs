use anyhow::{Context, Result};
use base64::Engine as _;
use moorage_core::{FileView, ListScope, Orphan, QuotaUsage};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct ListFilesResponse {
    files: Vec<FileView>,
}

#[derive(Deserialize)]
struct OrphansResponse {
    orphans: Vec<Orphan>,
}

/// Error body returned by the server.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    orphaned_content_hash: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).context("invalid server URL")?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).context("failed to build API URL")
    }

    /// Turn a non-success response into an error, keeping the server's
    /// message and, for failed uploads, the orphaned pin hash it reported.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
            if let Some(hash) = parsed.orphaned_content_hash {
                anyhow::bail!(
                    "{} (your bytes are pinned at {hash} but not registered; \
                     keep the hash for cleanup or retry)",
                    parsed.message
                );
            }
            anyhow::bail!("API error ({status}): {}", parsed.message);
        }
        anyhow::bail!("API error ({status}): {body}");
    }

    async fn send_json<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T> {
        let response = Self::check(req.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send_empty(&self, req: reqwest::RequestBuilder) -> Result<()> {
        Self::check(req.send().await?).await?;
        Ok(())
    }

    pub async fn upload(&self, owner: &str, display_name: &str, data: &[u8]) -> Result<FileView> {
        let url = self.url("/v1/files")?;
        let body = json!({
            "owner": owner,
            "display_name": display_name,
            "data_base64": base64::engine::general_purpose::STANDARD.encode(data),
        });
        self.send_json(self.http.post(url).json(&body)).await
    }

    pub async fn list_files(&self, owner: &str, scope: ListScope) -> Result<Vec<FileView>> {
        let mut url = self.url("/v1/files")?;
        url.query_pairs_mut()
            .append_pair("owner", owner)
            .append_pair("scope", scope.as_str());
        let response: ListFilesResponse = self.send_json(self.http.get(url)).await?;
        Ok(response.files)
    }

    pub async fn soft_delete(&self, owner: &str, hash: &str) -> Result<FileView> {
        let url = self.url(&format!("/v1/files/{hash}/soft-delete"))?;
        self.send_json(self.http.post(url).json(&json!({ "owner": owner })))
            .await
    }

    pub async fn recover(&self, owner: &str, hash: &str) -> Result<FileView> {
        let url = self.url(&format!("/v1/files/{hash}/recover"))?;
        self.send_json(self.http.post(url).json(&json!({ "owner": owner })))
            .await
    }

    pub async fn purge(&self, owner: &str, hash: &str) -> Result<()> {
        let mut url = self.url(&format!("/v1/files/{hash}"))?;
        url.query_pairs_mut().append_pair("owner", owner);
        self.send_empty(self.http.delete(url)).await
    }

    pub async fn quota(&self, owner: &str) -> Result<QuotaUsage> {
        let mut url = self.url("/v1/quota")?;
        url.query_pairs_mut().append_pair("owner", owner);
        self.send_json(self.http.get(url)).await
    }

    pub async fn orphans(&self, owner: &str) -> Result<Vec<Orphan>> {
        let mut url = self.url("/v1/diagnostics/orphans")?;
        url.query_pairs_mut().append_pair("owner", owner);
        let response: OrphansResponse = self.send_json(self.http.get(url)).await?;
        Ok(response.orphans)
    }
}
