//! Cross-node divergence computation and sync selection.
//!
//! The divergence count is advisory (it drives a badge in the caller's UI)
//! and must be recomputed whenever either side's configuration changes. The
//! actual copy is a full overwrite of the selected entity, never a
//! field-level merge; `apply_selection` builds the resulting target
//! configuration and the engine persists it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::diff::diff_groups;
use crate::errors::{Result, WardError};
use crate::model::FilteringConfig;

/// What to copy from the source node to the target node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncSelection {
    /// Overwrite the target's entire configuration
    FullConfig,
    /// Overwrite (or create) a single group on the target
    Group(String),
}

/// Count the structural differences between two configurations.
///
/// The count is the number of groups existing on only one side, plus the
/// number of shared groups whose content or settings differ, plus the number
/// of config-level scalar and mapping fields that differ (each differing
/// field counts once).
pub fn divergence(a: &FilteringConfig, b: &FilteringConfig) -> usize {
    let mut count = 0;

    if a.enable_blocking != b.enable_blocking {
        count += 1;
    }
    if a.answer_ttl_seconds != b.answer_ttl_seconds {
        count += 1;
    }
    if a.refresh_interval_hours != b.refresh_interval_hours {
        count += 1;
    }
    if a.refresh_interval_minutes != b.refresh_interval_minutes {
        count += 1;
    }
    if a.endpoint_group_map != b.endpoint_group_map {
        count += 1;
    }
    if a.network_group_map != b.network_group_map {
        count += 1;
    }

    let a_names: BTreeSet<&str> = a.groups.iter().map(|g| g.name.as_str()).collect();
    let b_names: BTreeSet<&str> = b.groups.iter().map(|g| g.name.as_str()).collect();

    for name in a_names.union(&b_names) {
        match (a.group(name), b.group(name)) {
            (Some(ga), Some(gb)) => {
                if !diff_groups(ga, gb).is_empty() {
                    count += 1;
                }
            }
            // Present on one side only
            _ => count += 1,
        }
    }

    count
}

/// Build the target configuration that applying a sync selection produces.
///
/// Full-config selection replaces the target wholesale; group selection
/// replaces the named group in place (or appends it when the target does not
/// have it yet), leaving everything else on the target untouched.
///
/// # Errors
/// * `Internal` - if the selected group does not exist on the source
pub fn apply_selection(
    source: &FilteringConfig,
    target: &FilteringConfig,
    selection: &SyncSelection,
) -> Result<FilteringConfig> {
    match selection {
        SyncSelection::FullConfig => Ok(source.clone()),
        SyncSelection::Group(name) => {
            let group = source.group(name).ok_or_else(|| WardError::Internal {
                message: format!("sync selection references unknown source group '{}'", name),
            })?;

            let mut result = target.clone();
            match result.group_mut(name) {
                Some(existing) => *existing = group.clone(),
                None => result.groups.push(group.clone()),
            }
            Ok(result)
        }
    }
}
