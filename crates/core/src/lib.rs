//! Core domain types and shared logic for Moorage.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Content addresses and wallet identities
//! - Ledger file records and pinned blob metadata
//! - The derived per-file view and its lifecycle states
//! - Quota usage summaries
//! - Application configuration

pub mod address;
pub mod config;
pub mod error;
pub mod file;
pub mod quota;
pub mod wallet;

pub use address::ContentAddress;
pub use error::{Error, Result};
pub use file::{
    FileRecord, FileState, FileView, ListScope, Orphan, OrphanKind, PinnedBlob, RecordId,
};
pub use quota::{QuotaUsage, format_size};
pub use wallet::WalletAddress;
