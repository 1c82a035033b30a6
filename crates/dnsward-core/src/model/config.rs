use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::group::Group;

/// Which filtering implementation a configuration belongs to
///
/// A node always has a built-in configuration; the advanced configuration
/// exists only on nodes with the corresponding capability flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilteringMethod {
    #[serde(rename = "built-in")]
    BuiltIn,
    #[serde(rename = "advanced")]
    Advanced,
}

impl FilteringMethod {
    /// Stable string form used in persistence and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            FilteringMethod::BuiltIn => "built-in",
            FilteringMethod::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for FilteringMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which of the two client-to-group mapping tables is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingKind {
    /// Keys are client endpoints or `host:port` pairs
    Endpoint,
    /// Keys are CIDR blocks or bare IP addresses
    Network,
}

impl MappingKind {
    /// Human-readable label used in change descriptions
    pub fn label(&self) -> &'static str {
        match self {
            MappingKind::Endpoint => "endpoint mapping",
            MappingKind::Network => "network mapping",
        }
    }
}

/// A node's complete filtering configuration for one method
///
/// Group order is insertion order: not semantically meaningful, but preserved
/// across round-trips unless a group is renamed or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteringConfig {
    /// Master switch for blocking on this node
    pub enable_blocking: bool,

    /// TTL in seconds for synthesized blocking answers
    pub answer_ttl_seconds: Option<u32>,

    /// Hours component of the remote list refresh interval
    pub refresh_interval_hours: Option<u32>,

    /// Minutes component of the remote list refresh interval
    pub refresh_interval_minutes: Option<u32>,

    /// Client endpoint (or `host:port`) to group-name mapping
    pub endpoint_group_map: BTreeMap<String, String>,

    /// Network (CIDR or bare IP) to group-name mapping
    pub network_group_map: BTreeMap<String, String>,

    /// Filtering groups, in insertion order
    pub groups: Vec<Group>,
}

impl FilteringConfig {
    /// Create an empty configuration with blocking enabled and no groups
    pub fn new() -> Self {
        Self {
            enable_blocking: true,
            answer_ttl_seconds: None,
            refresh_interval_hours: None,
            refresh_interval_minutes: None,
            endpoint_group_map: BTreeMap::new(),
            network_group_map: BTreeMap::new(),
            groups: Vec::new(),
        }
    }

    /// Look up a group by exact name
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Look up a group by exact name, mutably
    pub fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    /// Whether a group with this exact name exists
    pub fn has_group(&self, name: &str) -> bool {
        self.group(name).is_some()
    }

    /// All group names, in insertion order
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Borrow a mapping table by kind
    pub fn mapping(&self, kind: MappingKind) -> &BTreeMap<String, String> {
        match kind {
            MappingKind::Endpoint => &self.endpoint_group_map,
            MappingKind::Network => &self.network_group_map,
        }
    }

    /// Mutably borrow a mapping table by kind
    pub fn mapping_mut(&mut self, kind: MappingKind) -> &mut BTreeMap<String, String> {
        match kind {
            MappingKind::Endpoint => &mut self.endpoint_group_map,
            MappingKind::Network => &mut self.network_group_map,
        }
    }
}

impl Default for FilteringConfig {
    fn default() -> Self {
        Self::new()
    }
}
