//! Draft/baseline pair for one staged configuration.
//!
//! The draft is a deep copy of the last-loaded baseline, mutated locally and
//! never observable elsewhere until a save promotes it. Dirty state is
//! derived by structural equality, not tracked by flag, so it survives
//! edit-then-undo sequences and map key reordering.

use crate::diff::{diff, Change};
use crate::model::FilteringConfig;

/// A locally staged configuration alongside its last-persisted baseline
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    baseline: FilteringConfig,
    working: FilteringConfig,
}

impl Draft {
    /// Stage a freshly loaded baseline; the working copy starts identical
    pub fn from_baseline(baseline: FilteringConfig) -> Self {
        let working = baseline.clone();
        Self { baseline, working }
    }

    /// The last-persisted configuration
    pub fn baseline(&self) -> &FilteringConfig {
        &self.baseline
    }

    /// The locally mutated working copy
    pub fn working(&self) -> &FilteringConfig {
        &self.working
    }

    /// Mutable access to the working copy for the mutation operators
    pub fn working_mut(&mut self) -> &mut FilteringConfig {
        &mut self.working
    }

    /// Whether the working copy differs structurally from the baseline
    pub fn is_dirty(&self) -> bool {
        self.working != self.baseline
    }

    /// Discard local edits: the working copy becomes a fresh baseline copy
    pub fn reset(&mut self) {
        self.working = self.baseline.clone();
    }

    /// Promote a persisted configuration to the new baseline.
    ///
    /// Called after the transport acknowledged a save with the
    /// server-sanitized form; both sides adopt it, so the draft is clean.
    pub fn promote(&mut self, persisted: FilteringConfig) {
        self.working = persisted.clone();
        self.baseline = persisted;
    }

    /// Categorized changes that a save would persist (baseline vs working)
    pub fn pending_changes(&self) -> Vec<Change> {
        diff(&self.baseline, &self.working)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Group;

    fn baseline() -> FilteringConfig {
        let mut config = FilteringConfig::new();
        config.groups.push(Group::with_defaults("g1"));
        config
    }

    #[test]
    fn test_fresh_draft_is_clean() {
        let draft = Draft::from_baseline(baseline());
        assert!(!draft.is_dirty());
        assert!(draft.pending_changes().is_empty());
    }

    #[test]
    fn test_mutation_marks_dirty() {
        let mut draft = Draft::from_baseline(baseline());
        draft.working_mut().enable_blocking = false;

        assert!(draft.is_dirty());
        assert_eq!(draft.pending_changes().len(), 1);
    }

    #[test]
    fn test_edit_then_undo_is_clean() {
        let mut draft = Draft::from_baseline(baseline());
        draft.working_mut().enable_blocking = false;
        draft.working_mut().enable_blocking = true;

        assert!(!draft.is_dirty());
    }

    #[test]
    fn test_reset_round_trip() {
        let mut draft = Draft::from_baseline(baseline());
        draft
            .working_mut()
            .groups
            .push(Group::with_defaults("g2"));
        assert!(draft.is_dirty());

        draft.reset();
        assert!(!draft.is_dirty());
        assert_eq!(draft.working(), draft.baseline());
    }

    #[test]
    fn test_promote_replaces_baseline() {
        let mut draft = Draft::from_baseline(baseline());
        draft.working_mut().answer_ttl_seconds = Some(60);

        let mut persisted = draft.working().clone();
        persisted.answer_ttl_seconds = Some(61); // server adjusted it
        draft.promote(persisted.clone());

        assert!(!draft.is_dirty());
        assert_eq!(draft.baseline(), &persisted);
        assert_eq!(draft.working(), &persisted);
    }
}
