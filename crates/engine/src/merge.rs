//! Pure merge logic: ledger records × pinned blobs -> per-file views.
//!
//! This module owns the reconciliation algorithm and nothing else. It takes
//! both sides' listings as plain slices so every rule is testable without a
//! client in sight, and it never mutates anything: views are constructed
//! fresh per call.

use moorage_core::{
    ContentAddress, FileRecord, FileState, FileView, ListScope, Orphan, OrphanKind, PinnedBlob,
};
use std::collections::{HashMap, HashSet};

/// The merged position of a single content hash across both systems.
#[derive(Debug)]
pub(crate) enum Merged<'a> {
    /// Neither side knows the hash.
    Absent,
    /// Record with `exists = true` and blob present.
    Active(&'a FileRecord, &'a PinnedBlob),
    /// Record with `exists = false` and blob present.
    SoftDeleted(&'a FileRecord, &'a PinnedBlob),
    /// Record present, bytes gone. With `exists = false` this is the valid
    /// purged terminal state; with `exists = true` it is an orphan.
    RecordOnly(&'a FileRecord),
    /// Bytes pinned, no record for this owner.
    BlobOnly(&'a PinnedBlob),
}

impl Merged<'_> {
    /// Short state label used in transition errors.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Active(..) => "active",
            Self::SoftDeleted(..) => "soft_deleted",
            Self::RecordOnly(record) if record.exists => "orphaned",
            Self::RecordOnly(_) => "purged",
            Self::BlobOnly(_) => "orphaned",
        }
    }
}

/// Merge the position of one content hash.
pub(crate) fn merge_one<'a>(
    records: &'a [FileRecord],
    pins: &'a [PinnedBlob],
    content_hash: &ContentAddress,
) -> Merged<'a> {
    let record = records.iter().find(|r| &r.content_hash == content_hash);
    let blob = pins.iter().find(|b| &b.content_hash == content_hash);
    match (record, blob) {
        (None, None) => Merged::Absent,
        (Some(record), Some(blob)) if record.exists => Merged::Active(record, blob),
        (Some(record), Some(blob)) => Merged::SoftDeleted(record, blob),
        (Some(record), None) => Merged::RecordOnly(record),
        (None, Some(blob)) => Merged::BlobOnly(blob),
    }
}

/// Build a view from a blob, in the given state.
fn view_from_blob(blob: &PinnedBlob, state: FileState) -> FileView {
    FileView {
        content_hash: blob.content_hash.clone(),
        display_name: blob.display_name.clone(),
        size_bytes: blob.size_bytes,
        pinned_at: blob.pinned_at,
        state,
    }
}

/// Merge both listings into the owner's file views for one scope.
///
/// Records outside the scope are skipped; records whose hash has no pinned
/// blob, and blobs no in-scope record claims, are dropped silently: they
/// are either orphaned or another owner's, and neither belongs in a normal
/// listing. Result is ordered by pin time ascending, ties broken by content
/// hash, so listings are deterministic.
pub fn list_views(records: &[FileRecord], pins: &[PinnedBlob], scope: ListScope) -> Vec<FileView> {
    let valid_hashes: HashSet<&ContentAddress> = records
        .iter()
        .filter(|r| scope.matches(r.exists))
        .map(|r| &r.content_hash)
        .collect();

    let mut views: Vec<FileView> = pins
        .iter()
        .filter(|b| valid_hashes.contains(&b.content_hash))
        .map(|b| view_from_blob(b, scope.state()))
        .collect();

    views.sort_by(|a, b| {
        a.pinned_at
            .cmp(&b.pinned_at)
            .then_with(|| a.content_hash.cmp(&b.content_hash))
    });
    views
}

/// Classify every inconsistency between the two listings.
///
/// Two kinds surface:
/// - `MissingBlob`: the ledger claims the file exists but the bytes are
///   gone. A soft-deleted record with no blob is NOT reported; that is the
///   valid purged terminal state.
/// - `UnclaimedBlob`: bytes are pinned but no record of this owner claims
///   them, in any lifecycle state. Partial-upload leak or another owner's
///   file; the caller decides.
///
/// Reports taken immediately after a write may reflect transient listing
/// skew rather than a true orphan; callers should re-check before acting.
pub fn classify_orphans(records: &[FileRecord], pins: &[PinnedBlob]) -> Vec<Orphan> {
    let pinned: HashMap<&ContentAddress, &PinnedBlob> =
        pins.iter().map(|b| (&b.content_hash, b)).collect();
    let claimed: HashSet<&ContentAddress> = records.iter().map(|r| &r.content_hash).collect();

    let mut orphans: Vec<Orphan> = Vec::new();

    for record in records {
        if record.exists && !pinned.contains_key(&record.content_hash) {
            orphans.push(Orphan {
                content_hash: record.content_hash.clone(),
                kind: OrphanKind::MissingBlob,
                display_name: Some(record.display_name.clone()),
                size_bytes: None,
            });
        }
    }

    for blob in pins {
        if !claimed.contains(&blob.content_hash) {
            orphans.push(Orphan {
                content_hash: blob.content_hash.clone(),
                kind: OrphanKind::UnclaimedBlob,
                display_name: Some(blob.display_name.clone()),
                size_bytes: Some(blob.size_bytes),
            });
        }
    }

    orphans.sort_by(|a, b| a.content_hash.cmp(&b.content_hash));
    orphans
}
