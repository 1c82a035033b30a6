//! The Validator: pre-flight checks that gate every save.
//!
//! `validate` is pure and aggregates every violation rather than stopping at
//! the first. Checks run in a fixed order:
//!
//! 1. Group name uniqueness
//! 2. Unknown mapping targets (referential integrity of name-based mappings)
//! 3. CIDR prefix bounds on network mapping keys
//! 4. URL scheme membership for every remote list source
//!
//! A non-empty result blocks any save; the caller surfaces the first or
//! aggregated message and must not contact the transport.

use crate::errors::ValidationError;
use crate::model::FilteringConfig;

use super::invariants;

/// Validate a configuration, returning every violation found.
///
/// An empty result means the configuration may be persisted.
pub fn validate(config: &FilteringConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // 1. Group name uniqueness. Names are the mapping join key; a duplicate
    // makes every mapping to that name ambiguous. Operator edits cannot
    // create one, but a baseline arriving over the transport can carry one,
    // and the sanitizer's name trim can collapse two names into a collision.
    for name in invariants::find_duplicate_group_names(config) {
        errors.push(ValidationError::new(
            "groups",
            format!("duplicate group name '{}'", name),
        ));
    }

    // 2. Referential integrity: every mapping value must name a group.
    // One error per distinct unknown target; each message also names the
    // full set so the caller can say "create the group(s) first".
    let unknown = invariants::find_unknown_mapping_targets(config);
    if !unknown.is_empty() {
        let all = unknown.join("', '");
        for target in &unknown {
            errors.push(ValidationError::new(
                "group mappings",
                format!(
                    "mapping references unknown group '{}'; create the group(s) '{}' first",
                    target, all
                ),
            ));
        }
    }

    // 3. CIDR prefix bounds
    for violation in invariants::find_cidr_violations(config) {
        errors.push(ValidationError::new(
            format!("network mapping '{}'", violation.key),
            violation.message,
        ));
    }

    // 4. URL schemes
    for violation in invariants::find_invalid_list_urls(config) {
        errors.push(ValidationError::new(
            format!("group '{}' {}", violation.group, violation.field),
            format!("'{}' must use an http or https URL", violation.url),
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Group, ListEntry};

    #[test]
    fn test_empty_config_is_valid() {
        assert!(validate(&FilteringConfig::new()).is_empty());
    }

    #[test]
    fn test_duplicate_group_name_fails() {
        let mut config = FilteringConfig::new();
        config.groups.push(Group::with_defaults("g1"));
        config.groups.push(Group::with_defaults("g1"));

        let errors = validate(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "groups");
        assert!(errors[0].message.contains("duplicate group name 'g1'"));
    }

    #[test]
    fn test_duplicates_report_before_unknown_targets() {
        let mut config = FilteringConfig::new();
        config.groups.push(Group::with_defaults("g1"));
        config.groups.push(Group::with_defaults("g1"));
        config
            .endpoint_group_map
            .insert("h1".to_string(), "ghost".to_string());

        let errors = validate(&config);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("duplicate"));
        assert!(errors[1].message.contains("ghost"));
    }

    #[test]
    fn test_unknown_target_fails_with_name() {
        let mut config = FilteringConfig::new();
        config
            .endpoint_group_map
            .insert("h1".to_string(), "ghost".to_string());

        let errors = validate(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("ghost"));
    }

    #[test]
    fn test_error_order_targets_then_cidr_then_urls() {
        let mut config = FilteringConfig::new();
        let mut group = Group::with_defaults("g1");
        group.block_list_urls = vec![ListEntry::Plain("gopher://x".to_string())];
        config.groups.push(group);
        config
            .network_group_map
            .insert("10.0.0.0/40".to_string(), "ghost".to_string());

        let errors = validate(&config);
        assert_eq!(errors.len(), 3);
        assert!(errors[0].message.contains("ghost"));
        assert!(errors[1].message.contains("IPv4 subnet mask"));
        assert!(errors[2].message.contains("http or https"));
    }

    #[test]
    fn test_cidr_scenarios() {
        let mut config = FilteringConfig::new();
        config.groups.push(Group::with_defaults("g1"));
        config
            .network_group_map
            .insert("192.168.1.0/24".to_string(), "g1".to_string());
        assert!(validate(&config).is_empty());

        config
            .network_group_map
            .insert("2001:db8::1/200".to_string(), "g1".to_string());
        let errors = validate(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "IPv6 subnet mask cannot be larger than /128"
        );
    }

    #[test]
    fn test_valid_config_with_mappings_and_lists() {
        let mut config = FilteringConfig::new();
        let mut group = Group::with_defaults("family");
        group.block_list_urls = vec![ListEntry::Plain(
            "https://lists.example.com/ads.txt".to_string(),
        )];
        config.groups.push(group);
        config
            .endpoint_group_map
            .insert("laptop:53".to_string(), "family".to_string());
        config
            .network_group_map
            .insert("192.168.0.0/16".to_string(), "family".to_string());

        assert!(validate(&config).is_empty());
    }
}
