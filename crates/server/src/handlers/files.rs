//! File lifecycle endpoints.

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{parse_hash, parse_owner};
use crate::metrics;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use base64::Engine as _;
use bytes::Bytes;
use moorage_core::{FileView, ListScope};
use serde::{Deserialize, Serialize};

/// Request body for an upload.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Owning wallet address.
    pub owner: String,
    /// User-supplied file name.
    pub display_name: String,
    /// File bytes, standard base64.
    pub data_base64: String,
}

/// Request body for lifecycle transitions.
#[derive(Debug, Deserialize)]
pub struct OwnerRequest {
    pub owner: String,
}

/// Query parameters for listing files.
#[derive(Debug, Deserialize)]
pub struct ListFilesQuery {
    pub owner: String,
    /// Listing scope; defaults to active.
    pub scope: Option<ListScope>,
}

/// Query parameters for purge.
#[derive(Debug, Deserialize)]
pub struct PurgeQuery {
    pub owner: String,
}

/// Listing response.
#[derive(Debug, Serialize)]
pub struct ListFilesResponse {
    pub files: Vec<FileView>,
}

/// POST /v1/files
pub async fn upload_file(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> ApiResult<(StatusCode, Json<FileView>)> {
    let owner = parse_owner(&request.owner)?;
    if request.display_name.is_empty() {
        return Err(ApiError::BadRequest("display_name must not be empty".to_string()));
    }

    let data = base64::engine::general_purpose::STANDARD
        .decode(&request.data_base64)
        .map_err(|e| ApiError::BadRequest(format!("invalid base64 payload: {e}")))?;
    let max = state.config.server.max_upload_bytes;
    if data.len() as u64 > max {
        return Err(ApiError::BadRequest(format!(
            "payload of {} bytes exceeds the {max} byte limit",
            data.len()
        )));
    }

    let result = state
        .engine
        .upload(&owner, Bytes::from(data), &request.display_name)
        .await;
    match result {
        Ok(view) => {
            metrics::FILES_UPLOADED.inc();
            Ok((StatusCode::CREATED, Json(view)))
        }
        Err(err) => {
            if err.orphaned_content_hash().is_some() {
                metrics::UPLOAD_ORPHANS.inc();
            }
            Err(err.into())
        }
    }
}

/// GET /v1/files
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<ListFilesQuery>,
) -> ApiResult<Json<ListFilesResponse>> {
    let owner = parse_owner(&query.owner)?;
    let scope = query.scope.unwrap_or(ListScope::Active);
    let files = state.engine.list_view(&owner, scope).await?;
    Ok(Json(ListFilesResponse { files }))
}

/// POST /v1/files/{hash}/soft-delete
pub async fn soft_delete_file(
    State(state): State<AppState>,
    Path(hash): Path<String>,
    Json(request): Json<OwnerRequest>,
) -> ApiResult<Json<FileView>> {
    let owner = parse_owner(&request.owner)?;
    let content_hash = parse_hash(&hash)?;
    let view = state.engine.soft_delete(&owner, &content_hash).await?;
    metrics::FILES_SOFT_DELETED.inc();
    Ok(Json(view))
}

/// POST /v1/files/{hash}/recover
pub async fn recover_file(
    State(state): State<AppState>,
    Path(hash): Path<String>,
    Json(request): Json<OwnerRequest>,
) -> ApiResult<Json<FileView>> {
    let owner = parse_owner(&request.owner)?;
    let content_hash = parse_hash(&hash)?;
    let view = state.engine.recover(&owner, &content_hash).await?;
    metrics::FILES_RECOVERED.inc();
    Ok(Json(view))
}

/// DELETE /v1/files/{hash}
pub async fn purge_file(
    State(state): State<AppState>,
    Path(hash): Path<String>,
    Query(query): Query<PurgeQuery>,
) -> ApiResult<StatusCode> {
    let owner = parse_owner(&query.owner)?;
    let content_hash = parse_hash(&hash)?;
    state.engine.purge(&owner, &content_hash).await?;
    metrics::FILES_PURGED.inc();
    Ok(StatusCode::NO_CONTENT)
}
