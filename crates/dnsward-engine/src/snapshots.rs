//! Snapshot history management.
//!
//! Orders, defaults, and locally reconciles the per-(node, method) snapshot
//! history; persistence belongs to the transport. Local state mutates only
//! after the transport acknowledges an operation - there is no optimistic
//! apply-then-rollback. Detail payloads are fetched lazily and cached by
//! snapshot id for the life of the session.

use std::collections::HashMap;
use std::sync::Arc;

use dnsward_core::errors::{ErrorKind, Result, WardError};
use dnsward_core::model::{
    sort_snapshots, FilteringMethod, RestoreResult, SnapshotDetail, SnapshotMeta, SnapshotOrigin,
};

use crate::api::NodeTransport;

/// Explicit acknowledgment that a restore overwrites live configuration.
///
/// Restore is destructive and has no undo, so the caller must pass
/// `Confirmed` after its own confirmation step; `Unconfirmed` never reaches
/// the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreConfirmation {
    Unconfirmed,
    Confirmed,
}

/// Ordered, pinnable snapshot history for the currently viewed node/method
pub struct SnapshotManager<T: NodeTransport> {
    transport: Arc<T>,
    snapshots: Vec<SnapshotMeta>,
    detail_cache: HashMap<String, SnapshotDetail>,
}

impl<T: NodeTransport> SnapshotManager<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            snapshots: Vec::new(),
            detail_cache: HashMap::new(),
        }
    }

    /// The current snapshot list, sorted pinned-first then newest-first
    pub fn snapshots(&self) -> &[SnapshotMeta] {
        &self.snapshots
    }

    /// Re-fetch the snapshot list, replacing local state wholesale.
    pub async fn refresh(
        &mut self,
        node_id: &str,
        method: FilteringMethod,
    ) -> Result<&[SnapshotMeta]> {
        let mut listed = self.transport.list_snapshots(node_id, method).await?;
        sort_snapshots(&mut listed);
        self.snapshots = listed;
        Ok(&self.snapshots)
    }

    /// Create a snapshot and insert it into the local list.
    pub async fn create(
        &mut self,
        node_id: &str,
        method: FilteringMethod,
        origin: SnapshotOrigin,
        note: Option<String>,
    ) -> Result<SnapshotMeta> {
        let meta = self
            .transport
            .create_snapshot(node_id, method, origin, note)
            .await?;
        tracing::info!(node_id, %method, snapshot_id = %meta.id, "created snapshot");

        self.snapshots.push(meta.clone());
        sort_snapshots(&mut self.snapshots);
        Ok(meta)
    }

    /// Restore a snapshot onto the node's live configuration.
    ///
    /// Destructive: overwrites the live configuration for the snapshot's
    /// method with no undo.
    ///
    /// # Errors
    /// * `ConfirmationRequired` - called without `Confirmed`; transport untouched
    pub async fn restore(
        &mut self,
        node_id: &str,
        snapshot_id: &str,
        confirmation: RestoreConfirmation,
    ) -> Result<RestoreResult> {
        if confirmation != RestoreConfirmation::Confirmed {
            return Err(WardError::ConfirmationRequired);
        }

        match self.transport.restore_snapshot(node_id, snapshot_id).await {
            Ok(result) => {
                tracing::info!(
                    node_id,
                    snapshot_id,
                    groups = result.restored_groups,
                    "restored snapshot"
                );
                Ok(result)
            }
            Err(err) => self.reconcile_stale(node_id, snapshot_id, err).await,
        }
    }

    /// Toggle a snapshot's pinned flag.
    ///
    /// The local entry is updated (and the list re-sorted) only after the
    /// transport confirms.
    pub async fn set_pinned(
        &mut self,
        node_id: &str,
        snapshot_id: &str,
        pinned: bool,
    ) -> Result<SnapshotMeta> {
        match self
            .transport
            .set_snapshot_pinned(node_id, snapshot_id, pinned)
            .await
        {
            Ok(meta) => {
                self.replace_local(meta.clone());
                Ok(meta)
            }
            Err(err) => self.reconcile_stale(node_id, snapshot_id, err).await,
        }
    }

    /// Replace a snapshot's note. Independent of restore and pin state.
    pub async fn update_note(
        &mut self,
        node_id: &str,
        snapshot_id: &str,
        note: Option<String>,
    ) -> Result<SnapshotMeta> {
        match self
            .transport
            .update_snapshot_note(node_id, snapshot_id, note)
            .await
        {
            Ok(meta) => {
                self.replace_local(meta.clone());
                Ok(meta)
            }
            Err(err) => self.reconcile_stale(node_id, snapshot_id, err).await,
        }
    }

    /// Delete a snapshot irreversibly, purging any cached detail for it.
    pub async fn delete(&mut self, node_id: &str, snapshot_id: &str) -> Result<()> {
        match self.transport.delete_snapshot(node_id, snapshot_id).await {
            Ok(()) => {
                self.snapshots.retain(|s| s.id != snapshot_id);
                self.detail_cache.remove(snapshot_id);
                tracing::info!(node_id, snapshot_id, "deleted snapshot");
                Ok(())
            }
            Err(err) => self.reconcile_stale(node_id, snapshot_id, err).await,
        }
    }

    /// Fetch a snapshot's full body, lazily and cached by id.
    ///
    /// A cache hit never re-issues the transport fetch.
    pub async fn detail(&mut self, node_id: &str, snapshot_id: &str) -> Result<&SnapshotDetail> {
        if !self.detail_cache.contains_key(snapshot_id) {
            let detail = self
                .transport
                .get_snapshot_detail(node_id, snapshot_id)
                .await?;
            self.detail_cache.insert(snapshot_id.to_string(), detail);
        }

        self.detail_cache
            .get(snapshot_id)
            .ok_or_else(|| WardError::Internal {
                message: format!("detail cache lost entry for snapshot '{snapshot_id}'"),
            })
    }

    fn replace_local(&mut self, meta: SnapshotMeta) {
        if let Some(existing) = self.snapshots.iter_mut().find(|s| s.id == meta.id) {
            *existing = meta;
            sort_snapshots(&mut self.snapshots);
        }
    }

    /// Handle a failed snapshot operation.
    ///
    /// Stale references (the snapshot vanished between our list and the
    /// operation) are reconciled silently: the local entry and cached detail
    /// are dropped and the list is re-fetched so the caller can simply
    /// re-render. The original error still propagates with kind `Stale`, so
    /// callers can distinguish it from user-facing transport failures.
    async fn reconcile_stale<R>(
        &mut self,
        node_id: &str,
        snapshot_id: &str,
        err: WardError,
    ) -> Result<R> {
        if err.kind() == ErrorKind::Stale {
            let method = self
                .snapshots
                .iter()
                .find(|s| s.id == snapshot_id)
                .map(|s| s.method);
            self.snapshots.retain(|s| s.id != snapshot_id);
            self.detail_cache.remove(snapshot_id);

            if let Some(method) = method {
                tracing::debug!(node_id, snapshot_id, "stale snapshot reference; refreshing list");
                // Best effort: a refresh failure must not mask the original error
                let _ = self.refresh(node_id, method).await;
            }
        }
        Err(err)
    }
}
