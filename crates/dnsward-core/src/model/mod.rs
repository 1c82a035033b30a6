pub mod config;
pub mod group;
pub mod node;
pub mod snapshot;

pub use config::{FilteringConfig, FilteringMethod, MappingKind};
pub use group::{Group, ListEntry, StringListField, UrlListField};
pub use node::{Node, NodeRole};
pub use snapshot::{
    sort_snapshots, RestoreResult, SnapshotCounts, SnapshotDetail, SnapshotMeta, SnapshotOrigin,
};
