//! External collaborator boundary.
//!
//! The engine never talks to a DNS node directly; everything goes through
//! [`NodeTransport`]. Implementations wrap whatever request/response API the
//! deployment uses. Every method maps a remote failure to
//! `WardError::Transport` (retryable) or a stale-reference variant
//! (`NodeNotFound`, `SnapshotNotFound`, `ConfigNotFound`).

use async_trait::async_trait;

use dnsward_core::errors::Result;
use dnsward_core::model::{
    FilteringConfig, FilteringMethod, Node, RestoreResult, SnapshotDetail, SnapshotMeta,
    SnapshotOrigin,
};

/// Request/response API of a managed DNS node fleet
#[async_trait]
pub trait NodeTransport: Send + Sync {
    /// Fetch a node's configuration for one filtering method.
    ///
    /// Returns `Ok(None)` when the node has no configuration for the method
    /// (e.g. the advanced method on a node without the capability).
    async fn fetch_config(
        &self,
        node_id: &str,
        method: FilteringMethod,
    ) -> Result<Option<FilteringConfig>>;

    /// Persist a configuration; echoes back the server-sanitized form.
    async fn save_config(
        &self,
        node_id: &str,
        method: FilteringMethod,
        config: &FilteringConfig,
    ) -> Result<FilteringConfig>;

    /// List all managed nodes with their roles and capability flags.
    async fn list_nodes(&self) -> Result<Vec<Node>>;

    /// List snapshot metadata for one node and method, in store order.
    async fn list_snapshots(
        &self,
        node_id: &str,
        method: FilteringMethod,
    ) -> Result<Vec<SnapshotMeta>>;

    /// Create a snapshot of the node's current configuration.
    async fn create_snapshot(
        &self,
        node_id: &str,
        method: FilteringMethod,
        origin: SnapshotOrigin,
        note: Option<String>,
    ) -> Result<SnapshotMeta>;

    /// Overwrite the node's live configuration with a snapshot's body.
    async fn restore_snapshot(&self, node_id: &str, snapshot_id: &str) -> Result<RestoreResult>;

    /// Toggle a snapshot's pinned flag; returns the updated metadata.
    async fn set_snapshot_pinned(
        &self,
        node_id: &str,
        snapshot_id: &str,
        pinned: bool,
    ) -> Result<SnapshotMeta>;

    /// Replace a snapshot's note; returns the updated metadata.
    async fn update_snapshot_note(
        &self,
        node_id: &str,
        snapshot_id: &str,
        note: Option<String>,
    ) -> Result<SnapshotMeta>;

    /// Delete a snapshot irreversibly.
    async fn delete_snapshot(&self, node_id: &str, snapshot_id: &str) -> Result<()>;

    /// Fetch a snapshot's full body (metadata plus captured configuration).
    async fn get_snapshot_detail(
        &self,
        node_id: &str,
        snapshot_id: &str,
    ) -> Result<SnapshotDetail>;
}
