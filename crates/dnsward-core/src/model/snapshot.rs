use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::{FilteringConfig, FilteringMethod};

/// How a snapshot came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotOrigin {
    /// Created by an explicit user action
    Manual,
    /// Created by an automatic policy outside this engine
    Automatic,
}

/// Precomputed entry counts displayed alongside a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCounts {
    /// Total exact-match allowed domains across all groups
    pub allowed: usize,
    /// Total exact-match blocked domains across all groups
    pub blocked: usize,
    /// Number of groups
    pub groups: usize,
}

impl SnapshotCounts {
    /// Compute counts from a configuration
    pub fn of(config: &FilteringConfig) -> Self {
        Self {
            allowed: config.groups.iter().map(|g| g.allowed.len()).sum(),
            blocked: config.groups.iter().map(|g| g.blocked.len()).sum(),
            groups: config.groups.len(),
        }
    }
}

/// Listable metadata for one point-in-time configuration capture
///
/// The full configuration body is not part of the metadata; it is fetched
/// lazily via the snapshot detail call and cached by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// Unique snapshot identifier
    pub id: String,

    /// Node this snapshot belongs to
    pub node_id: String,

    /// Filtering method this snapshot captures
    pub method: FilteringMethod,

    /// When the capture was taken
    pub created_at: DateTime<Utc>,

    /// Whether the snapshot was taken manually or automatically
    pub origin: SnapshotOrigin,

    /// Pinned snapshots sort first and are exempt from external retention
    pub pinned: bool,

    /// Free-form operator note
    pub note: Option<String>,

    /// Precomputed entry counts
    pub counts: SnapshotCounts,
}

/// Sort snapshots for display: pinned first, then newest first.
///
/// Pinned snapshots sort before unpinned ones regardless of age.
pub fn sort_snapshots(snapshots: &mut [SnapshotMeta]) {
    snapshots.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// A snapshot's full body: metadata plus the captured configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDetail {
    pub meta: SnapshotMeta,
    pub config: FilteringConfig,
}

/// Outcome of restoring a snapshot onto a node's live configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreResult {
    /// Allowed-domain entries now live after the restore
    pub restored_allowed: usize,
    /// Blocked-domain entries now live after the restore
    pub restored_blocked: usize,
    /// Groups now live after the restore
    pub restored_groups: usize,
}
