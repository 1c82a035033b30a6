//! Configuration sanitization.
//!
//! `sanitize` normalizes a configuration before it is allowed to be compared
//! or persisted: trims every string field, drops empty entries, and
//! deduplicates case-insensitively. List fields keep the **first** occurrence
//! in iteration order; mapping tables keep the **last** occurrence when two
//! keys collapse to the same normalized form, so the most recent key/value
//! edit wins while append-only lists stay stable.
//!
//! The function is pure and idempotent: `sanitize(sanitize(x)) == sanitize(x)`.

use std::collections::{BTreeMap, HashSet};

use crate::model::{FilteringConfig, Group, ListEntry};

/// Trim, drop empties, and case-insensitively dedup a string list,
/// keeping the first occurrence.
pub(crate) fn sanitize_string_list(values: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// Trim URLs, drop empty entries, and dedup by case-insensitive URL,
/// keeping the first occurrence.
pub(crate) fn sanitize_list_entries(entries: &[ListEntry]) -> Vec<ListEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for entry in entries {
        let trimmed = entry.trimmed();
        if trimmed.url().is_empty() {
            continue;
        }
        if seen.insert(trimmed.url_key()) {
            out.push(trimmed);
        }
    }
    out
}

/// Trim keys and values, drop entries with empty keys or values, and dedup
/// keys case-insensitively, keeping the last occurrence in iteration order.
fn sanitize_mapping(mapping: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    // Keyed by normalized (lowercased) key so that "Host" and "host" collide;
    // later entries replace earlier ones.
    let mut collapsed: BTreeMap<String, (String, String)> = BTreeMap::new();
    for (key, value) in mapping {
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        collapsed.insert(key.to_lowercase(), (key.to_string(), value.to_string()));
    }

    collapsed.into_values().collect()
}

fn sanitize_group(group: &Group) -> Group {
    Group {
        name: group.name.trim().to_string(),
        enable_blocking: group.enable_blocking,
        block_as_nx_domain: group.block_as_nx_domain,
        allow_txt_report: group.allow_txt_report,
        blocking_addresses: sanitize_string_list(&group.blocking_addresses),
        allowed: sanitize_string_list(&group.allowed),
        blocked: sanitize_string_list(&group.blocked),
        allowed_regex: sanitize_string_list(&group.allowed_regex),
        blocked_regex: sanitize_string_list(&group.blocked_regex),
        allow_list_urls: sanitize_list_entries(&group.allow_list_urls),
        block_list_urls: sanitize_list_entries(&group.block_list_urls),
        allow_regex_list_urls: sanitize_list_entries(&group.allow_regex_list_urls),
        block_regex_list_urls: sanitize_list_entries(&group.block_regex_list_urls),
        adblock_list_urls: sanitize_list_entries(&group.adblock_list_urls),
    }
}

/// Produce a normalized copy of a configuration.
///
/// Never mutates its argument; group insertion order is preserved.
pub fn sanitize(config: &FilteringConfig) -> FilteringConfig {
    FilteringConfig {
        enable_blocking: config.enable_blocking,
        answer_ttl_seconds: config.answer_ttl_seconds,
        refresh_interval_hours: config.refresh_interval_hours,
        refresh_interval_minutes: config.refresh_interval_minutes,
        endpoint_group_map: sanitize_mapping(&config.endpoint_group_map),
        network_group_map: sanitize_mapping(&config.network_group_map),
        groups: config.groups.iter().map(sanitize_group).collect(),
    }
}
