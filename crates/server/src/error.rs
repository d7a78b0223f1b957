//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use moorage_engine::EngineError;
use serde::Serialize;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Set when an upload pinned bytes but failed to register them: the
    /// caller's bytes are stored yet unowned, and the UI must say so.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orphaned_content_hash: Option<String>,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// The ledger gateway failed a confirmed write. Carries the orphaned
    /// pin's hash when the content store had already committed.
    #[error("ledger failure: {message}")]
    Ledger {
        message: String,
        orphaned_content_hash: Option<String>,
    },

    /// The pinning service failed a write.
    #[error("content store failure: {0}")]
    ContentStore(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "invalid_transition",
            Self::Ledger { .. } => "ledger_write_failed",
            Self::ContentStore(_) => "content_store_write_failed",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Ledger { .. } => StatusCode::BAD_GATEWAY,
            Self::ContentStore(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound(hash) => Self::NotFound(hash.to_string()),
            EngineError::InvalidTransition { .. } => Self::Conflict(err.to_string()),
            EngineError::InvalidQuota(_) => Self::BadRequest(err.to_string()),
            EngineError::ContentStoreWriteFailed { .. } => Self::ContentStore(err.to_string()),
            EngineError::LedgerWriteFailed { .. } => {
                let orphaned_content_hash = err
                    .orphaned_content_hash()
                    .map(|hash| hash.to_string());
                Self::Ledger {
                    message: err.to_string(),
                    orphaned_content_hash,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let orphaned_content_hash = match &self {
            Self::Ledger {
                orphaned_content_hash,
                ..
            } => orphaned_content_hash.clone(),
            _ => None,
        };
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            orphaned_content_hash,
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
