//! Shared handler helpers.

use crate::error::{ApiError, ApiResult};
use moorage_core::{ContentAddress, WalletAddress};

/// Parse an owner wallet address, mapping failures to a 400.
pub fn parse_owner(raw: &str) -> ApiResult<WalletAddress> {
    WalletAddress::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Parse a content address, mapping failures to a 400.
pub fn parse_hash(raw: &str) -> ApiResult<ContentAddress> {
    ContentAddress::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}
