//! Targeted field mutation operators.
//!
//! All operators are total: mutating a group or mapping entry that does not
//! exist returns `false` and leaves the configuration untouched, so a stale
//! reference from the caller never crashes the store. Incoming list values
//! are sanitized as they are applied, keeping the draft normalized at every
//! step.

use crate::model::{FilteringConfig, Group, ListEntry, MappingKind, StringListField, UrlListField};
use crate::sanitize;

/// Apply a closure to the named group.
///
/// Returns `false` (without calling the closure) when the group does not
/// exist. Name changes must go through `group_ops::rename_group` instead;
/// this operator is for settings and list content.
pub fn update_group<F>(config: &mut FilteringConfig, name: &str, mutate: F) -> bool
where
    F: FnOnce(&mut Group),
{
    match config.group_mut(name) {
        Some(group) => {
            let keep = group.name.clone();
            mutate(group);
            // The name is the mapping join key; silently re-pin it so a
            // closure cannot bypass the rename cascade.
            group.name = keep;
            true
        }
        None => false,
    }
}

/// Insert or update a mapping entry.
///
/// The key is trimmed; an empty key is rejected. The target group is not
/// required to exist yet - the validator reports unknown targets at save
/// time, which lets an operator stage mappings before creating the group.
pub fn set_mapping(config: &mut FilteringConfig, kind: MappingKind, key: &str, target: &str) -> bool {
    let key = key.trim();
    let target = target.trim();
    if key.is_empty() || target.is_empty() {
        return false;
    }

    config
        .mapping_mut(kind)
        .insert(key.to_string(), target.to_string());
    true
}

/// Remove a mapping entry. Returns `false` when the key is absent.
pub fn remove_mapping(config: &mut FilteringConfig, kind: MappingKind, key: &str) -> bool {
    config.mapping_mut(kind).remove(key.trim()).is_some()
}

/// Replace one of a group's string-set fields wholesale.
///
/// The incoming values are sanitized (trim, drop-empty, case-insensitive
/// first-wins dedup) before being applied. Returns `false` when the group
/// does not exist.
pub fn update_string_list(
    config: &mut FilteringConfig,
    name: &str,
    field: StringListField,
    values: Vec<String>,
) -> bool {
    update_group(config, name, |group| {
        *group.string_list_mut(field) = sanitize::sanitize_string_list(&values);
    })
}

/// Replace one of a group's remote list-source collections wholesale.
///
/// Entries are sanitized (trimmed URLs, empty dropped, case-insensitive URL
/// dedup keeping the first occurrence). Returns `false` when the group does
/// not exist.
pub fn update_url_list(
    config: &mut FilteringConfig,
    name: &str,
    field: UrlListField,
    entries: Vec<ListEntry>,
) -> bool {
    update_group(config, name, |group| {
        *group.url_list_mut(field) = sanitize::sanitize_list_entries(&entries);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::group_ops::create_group;

    fn config() -> FilteringConfig {
        let mut config = FilteringConfig::new();
        create_group(&mut config, "g1").unwrap();
        config
    }

    #[test]
    fn test_update_group_settings() {
        let mut config = config();

        assert!(update_group(&mut config, "g1", |g| {
            g.enable_blocking = false;
            g.allow_txt_report = true;
        }));

        let group = config.group("g1").unwrap();
        assert!(!group.enable_blocking);
        assert!(group.allow_txt_report);
    }

    #[test]
    fn test_update_missing_group_is_noop() {
        let mut config = config();
        let before = config.clone();

        assert!(!update_group(&mut config, "ghost", |g| {
            g.enable_blocking = false;
        }));
        assert_eq!(config, before);
    }

    #[test]
    fn test_update_group_cannot_rename() {
        let mut config = config();

        update_group(&mut config, "g1", |g| {
            g.name = "sneaky".to_string();
        });

        assert!(config.has_group("g1"));
        assert!(!config.has_group("sneaky"));
    }

    #[test]
    fn test_set_and_remove_mapping() {
        let mut config = config();

        assert!(set_mapping(
            &mut config,
            MappingKind::Network,
            " 10.0.0.0/8 ",
            "g1"
        ));
        assert_eq!(
            config.network_group_map.get("10.0.0.0/8"),
            Some(&"g1".to_string())
        );

        assert!(remove_mapping(&mut config, MappingKind::Network, "10.0.0.0/8"));
        assert!(!remove_mapping(&mut config, MappingKind::Network, "10.0.0.0/8"));
    }

    #[test]
    fn test_set_mapping_rejects_empty_key() {
        let mut config = config();
        assert!(!set_mapping(&mut config, MappingKind::Endpoint, "   ", "g1"));
        assert!(config.endpoint_group_map.is_empty());
    }

    #[test]
    fn test_update_string_list_sanitizes() {
        let mut config = config();

        assert!(update_string_list(
            &mut config,
            "g1",
            StringListField::Blocked,
            vec![
                " a.com ".to_string(),
                "A.COM".to_string(),
                "".to_string(),
                "b.com".to_string(),
            ],
        ));

        assert_eq!(config.group("g1").unwrap().blocked, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_update_url_list_sanitizes() {
        let mut config = config();

        assert!(update_url_list(
            &mut config,
            "g1",
            UrlListField::BlockLists,
            vec![
                ListEntry::Plain(" https://example.com/a ".to_string()),
                ListEntry::Plain("HTTPS://example.com/A".to_string()),
            ],
        ));

        let urls = &config.group("g1").unwrap().block_list_urls;
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].url(), "https://example.com/a");
    }
}
