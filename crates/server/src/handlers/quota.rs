//! Quota endpoint.

use crate::error::ApiResult;
use crate::handlers::common::parse_owner;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::Json;
use moorage_core::QuotaUsage;
use serde::Deserialize;

/// Query parameters for quota lookup.
#[derive(Debug, Deserialize)]
pub struct QuotaQuery {
    pub owner: String,
}

/// GET /v1/quota
pub async fn get_quota(
    State(state): State<AppState>,
    Query(query): Query<QuotaQuery>,
) -> ApiResult<Json<QuotaUsage>> {
    let owner = parse_owner(&query.owner)?;
    let usage = state
        .engine
        .quota_usage(&owner, state.config.quota.quota_bytes)
        .await?;
    Ok(Json(usage))
}
