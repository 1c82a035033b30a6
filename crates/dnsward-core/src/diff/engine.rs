//! Diff computation between two configurations.
//!
//! The algorithm is order-independent (set semantics only, never positional
//! comparison) and never mutates either input:
//!
//! - List fields produce `Added`/`Removed` pairs via set difference; an edit
//!   shows up as one add plus one remove.
//! - Scalar fields produce a single `Modified` entry with before/after values.
//! - Mapping tables union keys from both sides; a key on one side only is
//!   `Added`/`Removed`, a key on both sides with different values is
//!   `Modified`.
//! - A group present on one side only contributes a single synthetic entry
//!   for the group itself, not one entry per member.

use std::collections::{BTreeMap, BTreeSet};

use crate::diff::model::{Change, ChangeScope};
use crate::model::{
    FilteringConfig, Group, MappingKind, StringListField, UrlListField,
};

fn fmt_opt(value: Option<u32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "unset".to_string(),
    }
}

fn fmt_bool(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn push_scalar_u32(
    changes: &mut Vec<Change>,
    scope: ChangeScope,
    label: &str,
    before: Option<u32>,
    after: Option<u32>,
) {
    if before != after {
        changes.push(Change::modified(
            scope,
            format!("{}: {} -> {}", label, fmt_opt(before), fmt_opt(after)),
        ));
    }
}

fn push_scalar_bool(
    changes: &mut Vec<Change>,
    scope: ChangeScope,
    label: &str,
    before: bool,
    after: bool,
) {
    if before != after {
        changes.push(Change::modified(
            scope,
            format!("{}: {} -> {}", label, fmt_bool(before), fmt_bool(after)),
        ));
    }
}

/// Case-insensitive set delta between two string lists.
///
/// Returns `(added, removed)`: `added` holds entries present in `after` but
/// not `before` (in `after`'s original form), `removed` the reverse. Keys are
/// compared lowercased so the delta matches the sanitizer's identity rules.
fn string_set_delta(before: &[String], after: &[String]) -> (Vec<String>, Vec<String>) {
    let before_keys: BTreeSet<String> = before.iter().map(|s| s.to_lowercase()).collect();
    let after_keys: BTreeSet<String> = after.iter().map(|s| s.to_lowercase()).collect();

    let added = after
        .iter()
        .filter(|s| !before_keys.contains(&s.to_lowercase()))
        .cloned()
        .collect();
    let removed = before
        .iter()
        .filter(|s| !after_keys.contains(&s.to_lowercase()))
        .cloned()
        .collect();
    (added, removed)
}

fn diff_string_list(
    changes: &mut Vec<Change>,
    group: &str,
    field: StringListField,
    before: &[String],
    after: &[String],
) {
    let (added, removed) = string_set_delta(before, after);
    let scope = || ChangeScope::List {
        group: group.to_string(),
        field: field.label().to_string(),
    };
    for entry in added {
        changes.push(Change::added(scope(), entry));
    }
    for entry in removed {
        changes.push(Change::removed(scope(), entry));
    }
}

fn diff_url_list(
    changes: &mut Vec<Change>,
    group: &str,
    field: UrlListField,
    before: &[crate::model::ListEntry],
    after: &[crate::model::ListEntry],
) {
    let before_keys: BTreeSet<String> = before.iter().map(|e| e.url_key()).collect();
    let after_keys: BTreeSet<String> = after.iter().map(|e| e.url_key()).collect();
    let scope = || ChangeScope::List {
        group: group.to_string(),
        field: field.label().to_string(),
    };

    for entry in after {
        if !before_keys.contains(&entry.url_key()) {
            changes.push(Change::added(scope(), entry.url().to_string()));
        }
    }
    for entry in before {
        if !after_keys.contains(&entry.url_key()) {
            changes.push(Change::removed(scope(), entry.url().to_string()));
        }
    }
}

fn diff_mapping(
    changes: &mut Vec<Change>,
    kind: MappingKind,
    before: &BTreeMap<String, String>,
    after: &BTreeMap<String, String>,
) {
    let all_keys: BTreeSet<&String> = before.keys().chain(after.keys()).collect();

    for key in all_keys {
        match (before.get(key), after.get(key)) {
            (None, Some(target)) => changes.push(Change::added(
                ChangeScope::Mapping(kind),
                format!("'{}' -> '{}'", key, target),
            )),
            (Some(target), None) => changes.push(Change::removed(
                ChangeScope::Mapping(kind),
                format!("'{}' -> '{}'", key, target),
            )),
            (Some(old), Some(new)) if old != new => changes.push(Change::modified(
                ChangeScope::Mapping(kind),
                format!("'{}': '{}' -> '{}'", key, old, new),
            )),
            _ => {}
        }
    }
}

/// Compute the changes between two versions of the same group.
///
/// Used both by the full config diff and by the sync coordinator to decide
/// whether a shared group diverges.
pub fn diff_groups(before: &Group, after: &Group) -> Vec<Change> {
    let mut changes = Vec::new();
    let name = after.name.as_str();
    let scope = || ChangeScope::Group(name.to_string());

    push_scalar_bool(
        &mut changes,
        scope(),
        "blocking",
        before.enable_blocking,
        after.enable_blocking,
    );
    push_scalar_bool(
        &mut changes,
        scope(),
        "block as NXDOMAIN",
        before.block_as_nx_domain,
        after.block_as_nx_domain,
    );
    push_scalar_bool(
        &mut changes,
        scope(),
        "TXT report",
        before.allow_txt_report,
        after.allow_txt_report,
    );

    // Blocking addresses are an ordered list but compared as a set: one
    // Modified entry when membership differs.
    let (added, removed) = string_set_delta(&before.blocking_addresses, &after.blocking_addresses);
    if !added.is_empty() || !removed.is_empty() {
        changes.push(Change::modified(
            scope(),
            format!(
                "blocking addresses: [{}] -> [{}]",
                before.blocking_addresses.join(", "),
                after.blocking_addresses.join(", ")
            ),
        ));
    }

    for field in [
        StringListField::Allowed,
        StringListField::Blocked,
        StringListField::AllowedRegex,
        StringListField::BlockedRegex,
    ] {
        diff_string_list(
            &mut changes,
            name,
            field,
            before.string_list(field),
            after.string_list(field),
        );
    }

    for field in UrlListField::all() {
        diff_url_list(
            &mut changes,
            name,
            field,
            before.url_list(field),
            after.url_list(field),
        );
    }

    changes
}

/// Compute the categorized change list between two configurations.
///
/// `before` and `after` are whichever two snapshots the caller is comparing:
/// baseline vs draft for pending changes, or node A vs node B for sync
/// divergence. Neither input is mutated.
pub fn diff(before: &FilteringConfig, after: &FilteringConfig) -> Vec<Change> {
    let mut changes = Vec::new();

    // Config-level scalars
    push_scalar_bool(
        &mut changes,
        ChangeScope::Config,
        "blocking",
        before.enable_blocking,
        after.enable_blocking,
    );
    push_scalar_u32(
        &mut changes,
        ChangeScope::Config,
        "answer TTL seconds",
        before.answer_ttl_seconds,
        after.answer_ttl_seconds,
    );
    push_scalar_u32(
        &mut changes,
        ChangeScope::Config,
        "list refresh hours",
        before.refresh_interval_hours,
        after.refresh_interval_hours,
    );
    push_scalar_u32(
        &mut changes,
        ChangeScope::Config,
        "list refresh minutes",
        before.refresh_interval_minutes,
        after.refresh_interval_minutes,
    );

    // Mapping tables
    for kind in [MappingKind::Endpoint, MappingKind::Network] {
        diff_mapping(&mut changes, kind, before.mapping(kind), after.mapping(kind));
    }

    // Groups, by name union, sorted for determinism
    let before_names: BTreeSet<&str> = before.groups.iter().map(|g| g.name.as_str()).collect();
    let after_names: BTreeSet<&str> = after.groups.iter().map(|g| g.name.as_str()).collect();

    for name in before_names.union(&after_names) {
        match (before.group(name), after.group(name)) {
            (None, Some(_)) => changes.push(Change::added(
                ChangeScope::Group(name.to_string()),
                format!("group '{}'", name),
            )),
            (Some(_), None) => changes.push(Change::removed(
                ChangeScope::Group(name.to_string()),
                format!("group '{}'", name),
            )),
            (Some(a), Some(b)) => changes.extend(diff_groups(a, b)),
            (None, None) => {}
        }
    }

    changes
}
