use serde::{Deserialize, Serialize};

/// Role of a node within an optional cluster
///
/// Only meaningful when clustering is enabled; standalone deployments
/// leave every node at `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Primary,
    Secondary,
    Unset,
}

/// A DNS node under management
///
/// Nodes are discovered externally and are read-only to this engine except
/// that their role and capability flags gate what the engine may do to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable identifier for this node
    pub id: String,

    /// Cluster role (meaningful only when clustering is active)
    pub role: NodeRole,

    /// Whether this node supports the advanced filtering method
    pub has_advanced_filtering: bool,
}

impl Node {
    /// Create a standalone node with no cluster role
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: NodeRole::Unset,
            has_advanced_filtering: false,
        }
    }

    /// Whether this node's configuration may be edited
    ///
    /// Secondary nodes are read-only while clustering is active: their
    /// configuration is replicated from the primary.
    pub fn is_editable(&self, clustering_active: bool) -> bool {
        !(clustering_active && self.role == NodeRole::Secondary)
    }
}
