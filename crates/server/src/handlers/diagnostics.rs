//! Health and reconciliation diagnostics endpoints.

use crate::error::ApiResult;
use crate::handlers::common::parse_owner;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use moorage_core::Orphan;
use serde::{Deserialize, Serialize};

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /v1/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Query parameters for the orphan sweep.
#[derive(Debug, Deserialize)]
pub struct OrphansQuery {
    pub owner: String,
}

/// Orphan sweep response.
#[derive(Debug, Serialize)]
pub struct OrphansResponse {
    pub orphans: Vec<Orphan>,
}

/// GET /v1/diagnostics/orphans
///
/// Read-only report of ledger/store inconsistencies for an owner. Results
/// taken immediately after a write may be transient listing skew; callers
/// should re-check before acting on them.
pub async fn list_orphans(
    State(state): State<AppState>,
    Query(query): Query<OrphansQuery>,
) -> ApiResult<Json<OrphansResponse>> {
    let owner = parse_owner(&query.owner)?;
    let orphans = state.engine.sweep_orphans(&owner).await?;
    Ok(Json(OrphansResponse { orphans }))
}
