//! Staged editing session for one node/method pair.
//!
//! State machine per selection: Empty -> Loaded (baseline fetched, draft =
//! copy, clean) -> Dirty (draft mutated) -> Saving (save in flight) ->
//! Loaded on success (baseline <- persisted form) or Dirty on failure (draft
//! untouched, error surfaced).
//!
//! Saves are serialized per node: a second save while one is outstanding is
//! rejected with `SaveInProgress`. Every load and save captures a generation
//! number; a completion whose generation no longer matches the current
//! selection is discarded instead of clobbering the newer draft.

use std::sync::Arc;

use dnsward_core::diff::Change;
use dnsward_core::errors::{Result, WardError};
use dnsward_core::model::{
    FilteringConfig, FilteringMethod, ListEntry, MappingKind, Node, StringListField, UrlListField,
};
use dnsward_core::ops::{field_ops, group_ops, Draft};
use dnsward_core::{rules, sanitize, Group};
use dnsward_core_types::OpId;

use crate::api::NodeTransport;

/// The node/method pair a session is currently editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub node_id: String,
    pub method: FilteringMethod,
}

/// One operator's staged editing state against a fleet of nodes
pub struct StagingSession<T: NodeTransport> {
    transport: Arc<T>,
    selection: Option<Selection>,
    draft: Option<Draft>,
    save_in_flight: bool,
    generation: u64,
}

impl<T: NodeTransport> StagingSession<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            selection: None,
            draft: None,
            save_in_flight: false,
            generation: 0,
        }
    }

    /// The currently selected node/method pair, if any
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Select a node/method pair and load its baseline.
    ///
    /// Switching away from a dirty draft requires `discard_changes: true`;
    /// otherwise the call fails with `UnsavedChanges` and the current draft
    /// is kept intact. A failed fetch leaves the previous selection and
    /// draft exactly where they were: the session only moves to the new
    /// pair once its baseline has arrived.
    ///
    /// # Errors
    /// * `NodeNotEditable` - secondary node while clustering is active
    /// * `UnsavedChanges` - current draft is dirty and `discard_changes` is false
    /// * `ConfigNotFound` - the node has no configuration for this method
    /// * `Transport` - the fetch failed; previous state untouched
    pub async fn select(
        &mut self,
        node: &Node,
        method: FilteringMethod,
        clustering_active: bool,
        discard_changes: bool,
    ) -> Result<()> {
        if !node.is_editable(clustering_active) {
            return Err(WardError::NodeNotEditable {
                node_id: node.id.clone(),
            });
        }
        self.guard_unsaved(discard_changes)?;

        // Invalidate any in-flight completion for the previous selection
        self.generation += 1;
        let generation = self.generation;

        let fetched = self.transport.fetch_config(&node.id, method).await?;

        // A newer select superseded this one while we were waiting
        if self.generation != generation {
            tracing::debug!(node_id = %node.id, %method, "discarding stale load completion");
            return Ok(());
        }

        let baseline = fetched.ok_or_else(|| WardError::ConfigNotFound {
            node_id: node.id.clone(),
            method: method.to_string(),
        })?;

        tracing::info!(node_id = %node.id, %method, "loaded baseline configuration");
        self.selection = Some(Selection {
            node_id: node.id.clone(),
            method,
        });
        self.draft = Some(Draft::from_baseline(baseline));
        self.save_in_flight = false;
        Ok(())
    }

    /// Deselect entirely. Dirty drafts require `discard_changes: true`.
    pub fn clear(&mut self, discard_changes: bool) -> Result<()> {
        self.guard_unsaved(discard_changes)?;
        self.generation += 1;
        self.selection = None;
        self.draft = None;
        self.save_in_flight = false;
        Ok(())
    }

    fn guard_unsaved(&self, discard_changes: bool) -> Result<()> {
        if discard_changes {
            return Ok(());
        }
        if let (Some(selection), Some(draft)) = (&self.selection, &self.draft) {
            if draft.is_dirty() {
                return Err(WardError::UnsavedChanges {
                    node_id: selection.node_id.clone(),
                    method: selection.method.to_string(),
                });
            }
        }
        Ok(())
    }

    fn draft(&self) -> Result<&Draft> {
        self.draft.as_ref().ok_or(WardError::NoSelection)
    }

    fn draft_mut(&mut self) -> Result<&mut Draft> {
        self.draft.as_mut().ok_or(WardError::NoSelection)
    }

    /// The working (draft) configuration
    pub fn config(&self) -> Result<&FilteringConfig> {
        Ok(self.draft()?.working())
    }

    /// The last-persisted baseline configuration
    pub fn baseline(&self) -> Result<&FilteringConfig> {
        Ok(self.draft()?.baseline())
    }

    /// Whether the draft differs from the baseline
    pub fn is_dirty(&self) -> bool {
        self.draft.as_ref().is_some_and(Draft::is_dirty)
    }

    /// Categorized changes a save would persist
    pub fn pending_changes(&self) -> Result<Vec<Change>> {
        Ok(self.draft()?.pending_changes())
    }

    /// Discard local edits, restoring the draft to the baseline
    pub fn reset(&mut self) -> Result<()> {
        self.draft_mut()?.reset();
        Ok(())
    }

    // ===== Mutation operators (synchronous, draft-only) =====

    /// Create a new group with default settings in the draft
    pub fn create_group(&mut self, name: &str) -> Result<()> {
        group_ops::create_group(self.draft_mut()?.working_mut(), name)
    }

    /// Rename a group, cascading into every mapping that targets it
    pub fn rename_group(&mut self, old: &str, new: &str) -> Result<bool> {
        group_ops::rename_group(self.draft_mut()?.working_mut(), old, new)
    }

    /// Delete a group, cascading removal of its mappings
    pub fn delete_group(&mut self, name: &str) -> Result<bool> {
        Ok(group_ops::delete_group(self.draft_mut()?.working_mut(), name))
    }

    /// Mutate a group's settings or content in place
    pub fn update_group<F>(&mut self, name: &str, mutate: F) -> Result<bool>
    where
        F: FnOnce(&mut Group),
    {
        Ok(field_ops::update_group(
            self.draft_mut()?.working_mut(),
            name,
            mutate,
        ))
    }

    /// Insert or update a mapping entry in the draft
    pub fn set_mapping(&mut self, kind: MappingKind, key: &str, target: &str) -> Result<bool> {
        Ok(field_ops::set_mapping(
            self.draft_mut()?.working_mut(),
            kind,
            key,
            target,
        ))
    }

    /// Remove a mapping entry from the draft
    pub fn remove_mapping(&mut self, kind: MappingKind, key: &str) -> Result<bool> {
        Ok(field_ops::remove_mapping(
            self.draft_mut()?.working_mut(),
            kind,
            key,
        ))
    }

    /// Replace one of a group's string-set fields (sanitized on apply)
    pub fn update_string_list(
        &mut self,
        name: &str,
        field: StringListField,
        values: Vec<String>,
    ) -> Result<bool> {
        Ok(field_ops::update_string_list(
            self.draft_mut()?.working_mut(),
            name,
            field,
            values,
        ))
    }

    /// Replace one of a group's list-source collections (sanitized on apply)
    pub fn update_url_list(
        &mut self,
        name: &str,
        field: UrlListField,
        entries: Vec<ListEntry>,
    ) -> Result<bool> {
        Ok(field_ops::update_url_list(
            self.draft_mut()?.working_mut(),
            name,
            field,
            entries,
        ))
    }

    /// Toggle the config-level blocking switch
    pub fn set_enable_blocking(&mut self, enabled: bool) -> Result<()> {
        self.draft_mut()?.working_mut().enable_blocking = enabled;
        Ok(())
    }

    /// Set the synthesized-answer TTL
    pub fn set_answer_ttl(&mut self, seconds: Option<u32>) -> Result<()> {
        self.draft_mut()?.working_mut().answer_ttl_seconds = seconds;
        Ok(())
    }

    /// Set the remote list refresh interval
    pub fn set_refresh_interval(&mut self, hours: Option<u32>, minutes: Option<u32>) -> Result<()> {
        let config = self.draft_mut()?.working_mut();
        config.refresh_interval_hours = hours;
        config.refresh_interval_minutes = minutes;
        Ok(())
    }

    // ===== Save =====

    /// Sanitize, validate, and persist the draft.
    ///
    /// On success the transport's echoed (server-sanitized) configuration
    /// becomes the new baseline and the returned list describes what was
    /// persisted. Validation failures block the save before any network
    /// traffic. A transport failure leaves the draft exactly as it was, so
    /// the save can be retried.
    ///
    /// # Errors
    /// * `NoSelection` - nothing is loaded
    /// * `SaveInProgress` - a save for this node is already outstanding
    /// * `ValidationFailed` - pre-flight checks failed; transport not contacted
    /// * `Transport` - the persist call failed; draft unchanged
    pub async fn save(&mut self) -> Result<Vec<Change>> {
        let selection = self.selection.clone().ok_or(WardError::NoSelection)?;
        if self.save_in_flight {
            return Err(WardError::SaveInProgress {
                node_id: selection.node_id,
            });
        }

        let draft = self.draft.as_ref().ok_or(WardError::NoSelection)?;
        let sanitized = sanitize(draft.working());

        let errors = rules::validate(&sanitized);
        if !errors.is_empty() {
            tracing::warn!(
                node_id = %selection.node_id,
                method = %selection.method,
                error_count = errors.len(),
                "save blocked by validation"
            );
            return Err(WardError::ValidationFailed { errors });
        }

        let changes = dnsward_core::diff::diff(draft.baseline(), &sanitized);
        let op = OpId::new();
        let generation = self.generation;
        self.save_in_flight = true;

        tracing::info!(
            node_id = %selection.node_id,
            method = %selection.method,
            %op,
            change_count = changes.len(),
            "saving configuration"
        );

        let result = self
            .transport
            .save_config(&selection.node_id, selection.method, &sanitized)
            .await;
        self.save_in_flight = false;

        match result {
            Ok(persisted) => {
                if self.generation == generation {
                    if let Some(draft) = self.draft.as_mut() {
                        draft.promote(persisted);
                    }
                } else {
                    // User switched selection while the save was in flight;
                    // the persist happened but must not clobber the new draft.
                    tracing::debug!(node_id = %selection.node_id, %op, "discarding stale save completion");
                }
                Ok(changes)
            }
            Err(err) => {
                tracing::warn!(node_id = %selection.node_id, %op, error = %err, "save failed");
                Err(err)
            }
        }
    }
}
