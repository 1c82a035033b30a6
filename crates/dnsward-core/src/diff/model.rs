//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Output ordering is deterministic: config scalars, then mappings, then
//! groups sorted by name.

use serde::{Deserialize, Serialize};

use crate::model::MappingKind;

/// How an element differs between the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Present only in `after`
    Added,
    /// Present only in `before`
    Removed,
    /// Present on both sides with different values
    Modified,
}

/// Where in the configuration a change occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeScope {
    /// A config-level scalar field
    Config,
    /// An entry in one of the two mapping tables
    Mapping(MappingKind),
    /// A group as a whole (synthetic add/remove) or one of its settings
    Group(String),
    /// Membership of one of a group's list fields
    List { group: String, field: String },
}

/// One categorized difference between two configurations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    pub scope: ChangeScope,
    /// Human-readable description of the change
    pub detail: String,
}

impl Change {
    pub fn added(scope: ChangeScope, detail: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Added,
            scope,
            detail: detail.into(),
        }
    }

    pub fn removed(scope: ChangeScope, detail: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Removed,
            scope,
            detail: detail.into(),
        }
    }

    pub fn modified(scope: ChangeScope, detail: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Modified,
            scope,
            detail: detail.into(),
        }
    }
}
