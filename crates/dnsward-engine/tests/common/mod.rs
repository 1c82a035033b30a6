//! Shared in-memory `NodeTransport` fake for engine integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use dnsward_core::errors::{Result, WardError};
use dnsward_core::model::{
    FilteringConfig, FilteringMethod, Node, RestoreResult, SnapshotCounts, SnapshotDetail,
    SnapshotMeta, SnapshotOrigin,
};
use dnsward_core::sanitize;
use dnsward_engine::NodeTransport;

/// Transport fake backed by hash maps, with call counters and fault injection.
#[derive(Default)]
pub struct InMemoryTransport {
    nodes: Mutex<Vec<Node>>,
    configs: Mutex<HashMap<(String, FilteringMethod), FilteringConfig>>,
    snapshots: Mutex<Vec<SnapshotMeta>>,
    details: Mutex<HashMap<String, SnapshotDetail>>,
    next_id: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub restore_calls: AtomicUsize,
    pub detail_fetches: AtomicUsize,
    pub fail_next_save: AtomicBool,
    pub fail_next_fetch: AtomicBool,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(self, node: Node) -> Self {
        self.nodes.lock().unwrap().push(node);
        self
    }

    pub fn with_config(self, node_id: &str, method: FilteringMethod, config: FilteringConfig) -> Self {
        self.configs
            .lock()
            .unwrap()
            .insert((node_id.to_string(), method), config);
        self
    }

    pub fn config(&self, node_id: &str, method: FilteringMethod) -> Option<FilteringConfig> {
        self.configs
            .lock()
            .unwrap()
            .get(&(node_id.to_string(), method))
            .cloned()
    }

    pub fn save_count(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn detail_fetch_count(&self) -> usize {
        self.detail_fetches.load(Ordering::SeqCst)
    }

    /// Seed a snapshot (metadata plus body) directly into the store.
    pub fn seed_snapshot(&self, meta: SnapshotMeta, config: FilteringConfig) {
        self.details.lock().unwrap().insert(
            meta.id.clone(),
            SnapshotDetail {
                meta: meta.clone(),
                config,
            },
        );
        self.snapshots.lock().unwrap().push(meta);
    }

    /// Drop a snapshot out from under the engine, as an external actor would.
    pub fn forget_snapshot(&self, snapshot_id: &str) {
        self.snapshots.lock().unwrap().retain(|s| s.id != snapshot_id);
        self.details.lock().unwrap().remove(snapshot_id);
    }

    fn stale(node_id: &str, snapshot_id: &str) -> WardError {
        WardError::SnapshotNotFound {
            node_id: node_id.to_string(),
            snapshot_id: snapshot_id.to_string(),
        }
    }
}

#[async_trait]
impl NodeTransport for InMemoryTransport {
    async fn fetch_config(
        &self,
        node_id: &str,
        method: FilteringMethod,
    ) -> Result<Option<FilteringConfig>> {
        if self.fail_next_fetch.swap(false, Ordering::SeqCst) {
            return Err(WardError::transport("fetch_config", "connection reset"));
        }
        Ok(self.config(node_id, method))
    }

    async fn save_config(
        &self,
        node_id: &str,
        method: FilteringMethod,
        config: &FilteringConfig,
    ) -> Result<FilteringConfig> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(WardError::transport("save_config", "connection reset"));
        }

        let persisted = sanitize(config);
        self.configs
            .lock()
            .unwrap()
            .insert((node_id.to_string(), method), persisted.clone());
        Ok(persisted)
    }

    async fn list_nodes(&self) -> Result<Vec<Node>> {
        Ok(self.nodes.lock().unwrap().clone())
    }

    async fn list_snapshots(
        &self,
        node_id: &str,
        method: FilteringMethod,
    ) -> Result<Vec<SnapshotMeta>> {
        Ok(self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.node_id == node_id && s.method == method)
            .cloned()
            .collect())
    }

    async fn create_snapshot(
        &self,
        node_id: &str,
        method: FilteringMethod,
        origin: SnapshotOrigin,
        note: Option<String>,
    ) -> Result<SnapshotMeta> {
        let config = self
            .config(node_id, method)
            .ok_or_else(|| WardError::ConfigNotFound {
                node_id: node_id.to_string(),
                method: method.to_string(),
            })?;

        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let meta = SnapshotMeta {
            id: format!("snap-{n}"),
            node_id: node_id.to_string(),
            method,
            created_at: Utc::now(),
            origin,
            pinned: false,
            note,
            counts: SnapshotCounts::of(&config),
        };
        self.seed_snapshot(meta.clone(), config);
        Ok(meta)
    }

    async fn restore_snapshot(&self, node_id: &str, snapshot_id: &str) -> Result<RestoreResult> {
        self.restore_calls.fetch_add(1, Ordering::SeqCst);
        let detail = self
            .details
            .lock()
            .unwrap()
            .get(snapshot_id)
            .cloned()
            .ok_or_else(|| Self::stale(node_id, snapshot_id))?;

        self.configs.lock().unwrap().insert(
            (node_id.to_string(), detail.meta.method),
            detail.config.clone(),
        );
        let counts = SnapshotCounts::of(&detail.config);
        Ok(RestoreResult {
            restored_allowed: counts.allowed,
            restored_blocked: counts.blocked,
            restored_groups: counts.groups,
        })
    }

    async fn set_snapshot_pinned(
        &self,
        node_id: &str,
        snapshot_id: &str,
        pinned: bool,
    ) -> Result<SnapshotMeta> {
        let mut snapshots = self.snapshots.lock().unwrap();
        let meta = snapshots
            .iter_mut()
            .find(|s| s.id == snapshot_id)
            .ok_or_else(|| Self::stale(node_id, snapshot_id))?;
        meta.pinned = pinned;
        Ok(meta.clone())
    }

    async fn update_snapshot_note(
        &self,
        node_id: &str,
        snapshot_id: &str,
        note: Option<String>,
    ) -> Result<SnapshotMeta> {
        let mut snapshots = self.snapshots.lock().unwrap();
        let meta = snapshots
            .iter_mut()
            .find(|s| s.id == snapshot_id)
            .ok_or_else(|| Self::stale(node_id, snapshot_id))?;
        meta.note = note;
        Ok(meta.clone())
    }

    async fn delete_snapshot(&self, node_id: &str, snapshot_id: &str) -> Result<()> {
        let mut snapshots = self.snapshots.lock().unwrap();
        if !snapshots.iter().any(|s| s.id == snapshot_id) {
            return Err(Self::stale(node_id, snapshot_id));
        }
        snapshots.retain(|s| s.id != snapshot_id);
        self.details.lock().unwrap().remove(snapshot_id);
        Ok(())
    }

    async fn get_snapshot_detail(
        &self,
        node_id: &str,
        snapshot_id: &str,
    ) -> Result<SnapshotDetail> {
        self.detail_fetches.fetch_add(1, Ordering::SeqCst);
        self.details
            .lock()
            .unwrap()
            .get(snapshot_id)
            .cloned()
            .ok_or_else(|| Self::stale(node_id, snapshot_id))
    }
}

/// A primary, fully capable node.
pub fn primary_node(id: &str) -> Node {
    Node {
        id: id.to_string(),
        role: dnsward_core::NodeRole::Primary,
        has_advanced_filtering: true,
    }
}

/// A secondary node, read-only while clustering is active.
pub fn secondary_node(id: &str) -> Node {
    Node {
        id: id.to_string(),
        role: dnsward_core::NodeRole::Secondary,
        has_advanced_filtering: false,
    }
}
