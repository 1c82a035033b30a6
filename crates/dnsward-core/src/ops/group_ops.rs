//! Group lifecycle operations with mapping cascades.
//!
//! Groups are referenced from the mapping tables by mutable name, so every
//! rename and delete must go through these functions: callers never mutate a
//! group name directly. Rename re-points every mapping whose value equals the
//! old name; delete removes those mappings outright rather than reassigning
//! them.

use crate::errors::{Result, WardError};
use crate::model::{FilteringConfig, Group, MappingKind};

/// Create a new group with default settings.
///
/// The name is trimmed first; group-name uniqueness is checked with an exact
/// case-sensitive match.
///
/// # Errors
/// * `InvalidGroupName` - if the name is empty after trimming
/// * `GroupExists` - if a group with this exact name already exists
pub fn create_group(config: &mut FilteringConfig, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WardError::InvalidGroupName);
    }
    if config.has_group(name) {
        return Err(WardError::GroupExists {
            name: name.to_string(),
        });
    }

    config.groups.push(Group::with_defaults(name));
    Ok(())
}

/// Rename a group, cascading into every mapping entry that targets it.
///
/// Returns `Ok(true)` on success and `Ok(false)` when no group named `old`
/// exists (the operation is total: a stale name is a no-op, not a crash).
///
/// # Errors
/// * `InvalidGroupName` - if the new name is empty after trimming
/// * `GroupExists` - if a group with the new name already exists
pub fn rename_group(config: &mut FilteringConfig, old: &str, new: &str) -> Result<bool> {
    let new = new.trim();
    if new.is_empty() {
        return Err(WardError::InvalidGroupName);
    }
    if config.has_group(new) {
        return Err(WardError::GroupExists {
            name: new.to_string(),
        });
    }

    let Some(group) = config.group_mut(old) else {
        return Ok(false);
    };
    group.name = new.to_string();

    // Cascade: re-point every mapping that targeted the old name
    let mut repointed = 0usize;
    for kind in [MappingKind::Endpoint, MappingKind::Network] {
        for target in config.mapping_mut(kind).values_mut() {
            if target == old {
                *target = new.to_string();
                repointed += 1;
            }
        }
    }
    tracing::debug!(old, new, repointed, "renamed group");

    Ok(true)
}

/// Delete a group, cascading removal of every mapping entry that targets it.
///
/// Orphaned mappings are removed, not repointed. Returns `false` when no
/// group with this name exists.
pub fn delete_group(config: &mut FilteringConfig, name: &str) -> bool {
    let before = config.groups.len();
    config.groups.retain(|g| g.name != name);
    if config.groups.len() == before {
        return false;
    }

    let mut dropped = 0usize;
    for kind in [MappingKind::Endpoint, MappingKind::Network] {
        let mapping = config.mapping_mut(kind);
        let before = mapping.len();
        mapping.retain(|_, target| target != name);
        dropped += before - mapping.len();
    }
    tracing::debug!(name, dropped, "deleted group and its mappings");

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_mapped_group() -> FilteringConfig {
        let mut config = FilteringConfig::new();
        create_group(&mut config, "g1").unwrap();
        config
            .network_group_map
            .insert("10.0.0.0/8".to_string(), "g1".to_string());
        config
            .endpoint_group_map
            .insert("laptop".to_string(), "g1".to_string());
        config
    }

    #[test]
    fn test_create_group_success() {
        let mut config = FilteringConfig::new();
        create_group(&mut config, " family ").unwrap();

        let group = config.group("family").unwrap();
        assert!(group.block_as_nx_domain);
        assert_eq!(group.blocking_addresses, vec!["0.0.0.0", "::"]);
    }

    #[test]
    fn test_create_group_conflicts() {
        let mut config = FilteringConfig::new();
        create_group(&mut config, "g1").unwrap();

        let result = create_group(&mut config, "g1");
        assert!(matches!(result, Err(WardError::GroupExists { .. })));

        let result = create_group(&mut config, "   ");
        assert!(matches!(result, Err(WardError::InvalidGroupName)));

        // Case differs: exact-match uniqueness, so this is allowed
        create_group(&mut config, "G1").unwrap();
        assert_eq!(config.groups.len(), 2);
    }

    #[test]
    fn test_rename_cascades_into_mappings() {
        let mut config = config_with_mapped_group();

        assert!(rename_group(&mut config, "g1", "g2").unwrap());
        assert!(config.has_group("g2"));
        assert!(!config.has_group("g1"));
        assert_eq!(
            config.network_group_map.get("10.0.0.0/8"),
            Some(&"g2".to_string())
        );
        assert_eq!(
            config.endpoint_group_map.get("laptop"),
            Some(&"g2".to_string())
        );
    }

    #[test]
    fn test_rename_missing_group_is_noop() {
        let mut config = config_with_mapped_group();
        let before = config.clone();

        assert!(!rename_group(&mut config, "ghost", "g2").unwrap());
        assert_eq!(config, before);
    }

    #[test]
    fn test_rename_onto_existing_name_fails() {
        let mut config = config_with_mapped_group();
        create_group(&mut config, "g2").unwrap();

        let result = rename_group(&mut config, "g1", "g2");
        assert!(matches!(result, Err(WardError::GroupExists { .. })));
        // Mappings untouched on failure
        assert_eq!(
            config.network_group_map.get("10.0.0.0/8"),
            Some(&"g1".to_string())
        );
    }

    #[test]
    fn test_delete_cascades_mapping_removal() {
        let mut config = config_with_mapped_group();

        assert!(delete_group(&mut config, "g1"));
        assert!(config.groups.is_empty());
        assert!(config.network_group_map.is_empty());
        assert!(config.endpoint_group_map.is_empty());
    }

    #[test]
    fn test_delete_leaves_other_mappings() {
        let mut config = config_with_mapped_group();
        create_group(&mut config, "g2").unwrap();
        config
            .network_group_map
            .insert("172.16.0.0/12".to_string(), "g2".to_string());

        assert!(delete_group(&mut config, "g1"));
        assert_eq!(config.network_group_map.len(), 1);
        assert_eq!(
            config.network_group_map.get("172.16.0.0/12"),
            Some(&"g2".to_string())
        );
    }

    #[test]
    fn test_delete_missing_group_is_noop() {
        let mut config = config_with_mapped_group();
        let before = config.clone();

        assert!(!delete_group(&mut config, "ghost"));
        assert_eq!(config, before);
    }
}
