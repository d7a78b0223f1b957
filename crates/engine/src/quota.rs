//! Quota aggregation over the merged file view.

use crate::error::{EngineError, EngineResult};
use moorage_core::FileView;

/// Bytes counted against an owner's quota.
///
/// Only `Active` entries are summed. Soft-deleted files still occupy
/// storage, but they are excluded from the active-usage metric on purpose:
/// usage shown to the owner tracks what they actively claim, and recovery
/// of a soft-deleted file must never be blocked by the quota it would
/// "re-add". Entries in any other state contribute nothing.
pub fn used_bytes(views: &[FileView]) -> u64 {
    views
        .iter()
        .filter(|v| v.state.is_active())
        .map(|v| v.size_bytes)
        .sum()
}

/// Usage as a percentage of the quota.
///
/// Undefined over a zero quota; fails with `InvalidQuota` rather than
/// returning an infinity that would render as a broken meter.
pub fn usage_percent(used: u64, quota_bytes: u64) -> EngineResult<f64> {
    if quota_bytes == 0 {
        return Err(EngineError::InvalidQuota(quota_bytes));
    }
    Ok(used as f64 / quota_bytes as f64 * 100.0)
}
