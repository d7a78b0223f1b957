//! File records, pinned blobs, and the derived per-file view.

use crate::address::ContentAddress;
use crate::wallet::WalletAddress;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

/// Unique identifier for a ledger record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a new random record ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from a string.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| crate::Error::InvalidRecordId(e.to_string()))
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A per-wallet file record held by the ownership ledger.
///
/// The ledger is authoritative for existence: `exists = true` means the
/// owner actively claims the file, `exists = false` means soft-deleted.
/// There is no purged flag: permanent deletion is represented by the blob
/// vanishing from the content store while `exists = false` persists.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileRecord {
    /// Ledger-assigned record identifier.
    pub record_id: RecordId,
    /// Owning wallet.
    pub owner: WalletAddress,
    /// Content address of the file bytes.
    pub content_hash: ContentAddress,
    /// User-supplied label, mutable only by re-registration.
    pub display_name: String,
    /// Lifecycle flag: true = active, false = soft-deleted.
    pub exists: bool,
}

/// Metadata for a blob pinned in the content store.
///
/// The store is authoritative for byte presence. It has no notion of
/// soft-delete: a blob is pinned or it is gone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PinnedBlob {
    /// Content address of the pinned bytes.
    pub content_hash: ContentAddress,
    /// Size of the pinned payload in bytes.
    pub size_bytes: u64,
    /// When the blob was pinned.
    #[serde(with = "time::serde::rfc3339")]
    pub pinned_at: OffsetDateTime,
    /// Store-side copy of the display name.
    pub display_name: String,
}

/// Observable lifecycle state of a file, derived per read.
///
/// Never stored anywhere: the engine recomputes it from the ledger record
/// and blob presence on every query, so it cannot drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileState {
    /// Ledger `exists = true` and blob present.
    Active,
    /// Ledger `exists = false` and blob present; bytes recoverable.
    SoftDeleted,
    /// Ledger and store disagree in a way no valid transition produces.
    Orphaned,
}

impl FileState {
    /// Check whether the file counts toward active storage usage.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Check whether the file is recoverable.
    pub fn is_soft_deleted(&self) -> bool {
        matches!(self, Self::SoftDeleted)
    }

    /// Check whether the file is in an inconsistent diagnostic-only state.
    pub fn is_orphaned(&self) -> bool {
        matches!(self, Self::Orphaned)
    }
}

/// Listing scope requested by a caller. Orphaned entries are never listed;
/// they surface only through the diagnostic sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListScope {
    Active,
    SoftDeleted,
}

impl ListScope {
    /// Whether a ledger record's existence flag falls inside this scope.
    pub fn matches(&self, exists: bool) -> bool {
        match self {
            Self::Active => exists,
            Self::SoftDeleted => !exists,
        }
    }

    /// The view state every entry listed under this scope carries.
    pub fn state(&self) -> FileState {
        match self {
            Self::Active => FileState::Active,
            Self::SoftDeleted => FileState::SoftDeleted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::SoftDeleted => "soft_deleted",
        }
    }
}

/// The merged per-file view: ledger record intersected with its pinned blob.
///
/// Constructed fresh per query and never cached across reconciliation
/// calls. Size and pin time come from the blob; the name comes from the
/// store's metadata copy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileView {
    pub content_hash: ContentAddress,
    pub display_name: String,
    pub size_bytes: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub pinned_at: OffsetDateTime,
    pub state: FileState,
}

/// Why an artifact is orphaned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanKind {
    /// Ledger claims the file exists but the bytes are gone.
    MissingBlob,
    /// Bytes are pinned but no record of this owner claims them. May be a
    /// partial-upload leak, or another owner's file in a shared store.
    UnclaimedBlob,
}

/// A diagnostic entry produced by the orphan sweep.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Orphan {
    pub content_hash: ContentAddress,
    pub kind: OrphanKind,
    /// Display name, when either side still has one.
    pub display_name: Option<String>,
    /// Pinned size, when the blob still exists.
    pub size_bytes: Option<u64>,
}
