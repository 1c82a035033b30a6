//! Cross-node configuration synchronization.
//!
//! Stateless coordinator: each call fetches what it needs, computes against
//! sanitized forms, and pushes at most one save. The target node is never
//! touched unless the merged candidate passes validation.

use std::sync::Arc;

use dnsward_core::errors::{Result, WardError};
use dnsward_core::model::{FilteringConfig, FilteringMethod};
use dnsward_core::{rules, sanitize, sync, SyncSelection};
use dnsward_core_types::OpId;

use crate::api::NodeTransport;

/// Copies configuration between nodes of a fleet, whole or group-by-group
pub struct SyncCoordinator<T: NodeTransport> {
    transport: Arc<T>,
}

impl<T: NodeTransport> SyncCoordinator<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Count the configuration differences between two nodes.
    ///
    /// Both sides are sanitized before comparison so cosmetic differences
    /// (whitespace, letter case, duplicates) never register as divergence.
    ///
    /// # Errors
    /// * `ConfigNotFound` - either node lacks a configuration for the method
    pub async fn divergence(
        &self,
        node_a: &str,
        node_b: &str,
        method: FilteringMethod,
    ) -> Result<usize> {
        let a = self.fetch(node_a, method).await?;
        let b = self.fetch(node_b, method).await?;
        let count = sync::divergence(&sanitize(&a), &sanitize(&b));
        tracing::debug!(node_a, node_b, %method, count, "computed divergence");
        Ok(count)
    }

    /// Copy configuration from `source` onto the target node.
    ///
    /// `FullConfig` replaces the target's configuration outright; `Group`
    /// copies one group into the target's otherwise-unchanged configuration.
    /// The merged candidate is sanitized and validated before the save; a
    /// validation failure leaves the target untouched.
    ///
    /// Returns the persisted configuration as echoed by the transport.
    ///
    /// # Errors
    /// * `ConfigNotFound` - group selection and the target has no configuration
    /// * `ValidationFailed` - the merged candidate failed pre-flight checks
    pub async fn apply_sync(
        &self,
        source: &FilteringConfig,
        target_node_id: &str,
        method: FilteringMethod,
        selection: &SyncSelection,
    ) -> Result<FilteringConfig> {
        let candidate = match selection {
            SyncSelection::FullConfig => source.clone(),
            SyncSelection::Group(_) => {
                let target = self.fetch(target_node_id, method).await?;
                sync::apply_selection(source, &target, selection)?
            }
        };

        let sanitized = sanitize(&candidate);
        let errors = rules::validate(&sanitized);
        if !errors.is_empty() {
            tracing::warn!(
                target_node_id,
                %method,
                error_count = errors.len(),
                "sync blocked by validation"
            );
            return Err(WardError::ValidationFailed { errors });
        }

        let op = OpId::new();
        tracing::info!(target_node_id, %method, %op, ?selection, "applying sync");
        self.transport
            .save_config(target_node_id, method, &sanitized)
            .await
    }

    async fn fetch(&self, node_id: &str, method: FilteringMethod) -> Result<FilteringConfig> {
        self.transport
            .fetch_config(node_id, method)
            .await?
            .ok_or_else(|| WardError::ConfigNotFound {
                node_id: node_id.to_string(),
                method: method.to_string(),
            })
    }
}
