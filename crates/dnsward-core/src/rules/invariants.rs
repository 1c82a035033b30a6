//! Violation finders for configuration invariants.
//!
//! Each finder returns every violation of one invariant rather than failing
//! on the first, so that `validation::validate` can aggregate them in a
//! stable order. All finders are pure.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{FilteringConfig, MappingKind, UrlListField};

/// Find every group name carried by more than one group.
///
/// Names are compared exactly. The sanitizer trims group names, so two
/// groups differing only by surrounding whitespace collide here after
/// sanitization. Duplicates make every mapping to that name ambiguous.
/// Returned sorted and deduplicated.
pub fn find_duplicate_group_names(config: &FilteringConfig) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for group in &config.groups {
        *counts.entry(group.name.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Find every distinct mapping target that is not a group name.
///
/// Scans both mapping tables; returns the unknown targets sorted and
/// deduplicated. Unknown targets are a hard validation failure, never
/// silently dropped.
pub fn find_unknown_mapping_targets(config: &FilteringConfig) -> Vec<String> {
    let known: BTreeSet<&str> = config.groups.iter().map(|g| g.name.as_str()).collect();

    let mut unknown: BTreeSet<String> = BTreeSet::new();
    for kind in [MappingKind::Endpoint, MappingKind::Network] {
        for target in config.mapping(kind).values() {
            if !known.contains(target.as_str()) {
                unknown.insert(target.clone());
            }
        }
    }

    unknown.into_iter().collect()
}

/// A CIDR prefix bound violation on a network mapping key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidrViolation {
    /// The offending mapping key
    pub key: String,
    /// Why the key is invalid
    pub message: String,
}

/// Whether an address string is IPv6-shaped.
///
/// IPv6-shaped means it contains `:` or starts with `[`; everything else is
/// treated as IPv4-shaped. This is a syntactic check only.
fn is_ipv6_shaped(address: &str) -> bool {
    address.contains(':') || address.starts_with('[')
}

/// Check one mapping key that looks like CIDR (`address/prefix`).
///
/// Keys without a `/` are bare addresses or endpoints and are not checked.
fn check_cidr_key(key: &str) -> Option<String> {
    let (address, prefix) = key.split_once('/')?;

    let prefix: u32 = match prefix.parse() {
        Ok(p) => p,
        Err(_) => return Some(format!("'{}' is not a valid subnet mask", key)),
    };

    if is_ipv6_shaped(address) {
        if prefix > 128 {
            return Some("IPv6 subnet mask cannot be larger than /128".to_string());
        }
    } else if prefix > 32 {
        return Some("IPv4 subnet mask cannot be larger than /32".to_string());
    }

    None
}

/// Find every network mapping key with an out-of-bounds CIDR prefix.
pub fn find_cidr_violations(config: &FilteringConfig) -> Vec<CidrViolation> {
    config
        .network_group_map
        .keys()
        .filter_map(|key| {
            check_cidr_key(key).map(|message| CidrViolation {
                key: key.clone(),
                message,
            })
        })
        .collect()
}

/// An invalid list-source URL within a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlViolation {
    /// Owning group name
    pub group: String,
    /// Human-readable field name
    pub field: &'static str,
    /// The offending URL
    pub url: String,
}

fn has_allowed_scheme(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Find every list entry whose URL scheme is not http or https.
pub fn find_invalid_list_urls(config: &FilteringConfig) -> Vec<UrlViolation> {
    let mut violations = Vec::new();
    for group in &config.groups {
        for field in UrlListField::all() {
            for entry in group.url_list(field) {
                if !has_allowed_scheme(entry.url()) {
                    violations.push(UrlViolation {
                        group: group.name.clone(),
                        field: field.label(),
                        url: entry.url().to_string(),
                    });
                }
            }
        }
    }
    violations
}
