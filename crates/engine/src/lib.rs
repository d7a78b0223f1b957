//! File lifecycle reconciliation engine for Moorage.
//!
//! The core of the system: drives the two-step commit protocol for each
//! lifecycle operation (upload, soft-delete, recover, purge), merges ledger
//! and content-store state into one consistent per-wallet file view,
//! tolerates the orphaned artifacts partial failures produce, and derives
//! storage quota usage from the merged view.
//!
//! The engine holds no persistent state of its own. The ledger is
//! authoritative for ownership and lifecycle; the content store for byte
//! presence; everything else is recomputed per read.

pub mod engine;
pub mod error;
pub mod merge;
pub mod quota;

pub use engine::ReconciliationEngine;
pub use error::{EngineError, EngineResult};
pub use merge::{classify_orphans, list_views};
pub use quota::{usage_percent, used_bytes};
