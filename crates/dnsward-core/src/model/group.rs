use serde::{Deserialize, Serialize};

/// Standard sinkhole addresses seeded into newly created groups
pub const DEFAULT_BLOCKING_ADDRESSES: &[&str] = &["0.0.0.0", "::"];

/// A remote list source: either a bare URL or a URL with per-list overrides
///
/// Identity for deduplication and diffing purposes is the URL,
/// case-insensitively. The override form lets a single list carry its own
/// NXDOMAIN/blocking-address behavior independent of the owning group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEntry {
    /// Bare list URL
    Plain(String),
    /// List URL with per-list behavior overrides
    Override {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        block_as_nx_domain: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        blocking_addresses: Option<Vec<String>>,
    },
}

impl ListEntry {
    /// The URL of this entry, regardless of form
    pub fn url(&self) -> &str {
        match self {
            ListEntry::Plain(url) => url,
            ListEntry::Override { url, .. } => url,
        }
    }

    /// Case-insensitive identity key for dedup and set comparison
    pub fn url_key(&self) -> String {
        self.url().trim().to_lowercase()
    }

    /// Return this entry with its URL trimmed
    pub(crate) fn trimmed(&self) -> ListEntry {
        match self {
            ListEntry::Plain(url) => ListEntry::Plain(url.trim().to_string()),
            ListEntry::Override {
                url,
                block_as_nx_domain,
                blocking_addresses,
            } => ListEntry::Override {
                url: url.trim().to_string(),
                block_as_nx_domain: *block_as_nx_domain,
                blocking_addresses: blocking_addresses.clone(),
            },
        }
    }
}

/// Identifies one of a group's plain string-set fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringListField {
    Allowed,
    Blocked,
    AllowedRegex,
    BlockedRegex,
    BlockingAddresses,
}

impl StringListField {
    /// Human-readable label used in change descriptions
    pub fn label(&self) -> &'static str {
        match self {
            StringListField::Allowed => "allowed domains",
            StringListField::Blocked => "blocked domains",
            StringListField::AllowedRegex => "allowed regex patterns",
            StringListField::BlockedRegex => "blocked regex patterns",
            StringListField::BlockingAddresses => "blocking addresses",
        }
    }
}

/// Identifies one of a group's remote list-source collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlListField {
    AllowLists,
    BlockLists,
    AllowRegexLists,
    BlockRegexLists,
    AdblockLists,
}

impl UrlListField {
    /// Human-readable label used in change descriptions
    pub fn label(&self) -> &'static str {
        match self {
            UrlListField::AllowLists => "allow list URLs",
            UrlListField::BlockLists => "block list URLs",
            UrlListField::AllowRegexLists => "allow regex list URLs",
            UrlListField::BlockRegexLists => "block regex list URLs",
            UrlListField::AdblockLists => "adblock list URLs",
        }
    }

    /// All URL list fields, in canonical order
    pub fn all() -> [UrlListField; 5] {
        [
            UrlListField::AllowLists,
            UrlListField::BlockLists,
            UrlListField::AllowRegexLists,
            UrlListField::BlockRegexLists,
            UrlListField::AdblockLists,
        ]
    }
}

/// A named bundle of filtering rules that mappings point to
///
/// The group name is the join key for `endpoint_group_map` and
/// `network_group_map`: there is no surrogate id, so renames and deletions
/// must go through the cascade operations in `ops::group_ops`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique name within a configuration (the mapping join key)
    pub name: String,

    /// Whether blocking is active for this group
    pub enable_blocking: bool,

    /// Answer blocked queries with NXDOMAIN instead of a sinkhole address
    pub block_as_nx_domain: bool,

    /// Answer blocked queries with an explanatory TXT record
    pub allow_txt_report: bool,

    /// Sinkhole addresses returned for blocked queries (ordered, compared as a set)
    pub blocking_addresses: Vec<String>,

    /// Exact-match allowed domains
    pub allowed: Vec<String>,

    /// Exact-match blocked domains
    pub blocked: Vec<String>,

    /// Allowed regex patterns
    pub allowed_regex: Vec<String>,

    /// Blocked regex patterns
    pub blocked_regex: Vec<String>,

    /// Remote allow-list URL sources
    pub allow_list_urls: Vec<ListEntry>,

    /// Remote block-list URL sources
    pub block_list_urls: Vec<ListEntry>,

    /// Remote allow-regex-list URL sources
    pub allow_regex_list_urls: Vec<ListEntry>,

    /// Remote block-regex-list URL sources
    pub block_regex_list_urls: Vec<ListEntry>,

    /// Remote adblock-filter URL sources
    pub adblock_list_urls: Vec<ListEntry>,
}

impl Group {
    /// Create a group with sane defaults: blocking on, NXDOMAIN responses on,
    /// standard sinkhole addresses, all lists empty.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enable_blocking: true,
            block_as_nx_domain: true,
            allow_txt_report: false,
            blocking_addresses: DEFAULT_BLOCKING_ADDRESSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed: Vec::new(),
            blocked: Vec::new(),
            allowed_regex: Vec::new(),
            blocked_regex: Vec::new(),
            allow_list_urls: Vec::new(),
            block_list_urls: Vec::new(),
            allow_regex_list_urls: Vec::new(),
            block_regex_list_urls: Vec::new(),
            adblock_list_urls: Vec::new(),
        }
    }

    /// Borrow a plain string-set field by selector
    pub fn string_list(&self, field: StringListField) -> &Vec<String> {
        match field {
            StringListField::Allowed => &self.allowed,
            StringListField::Blocked => &self.blocked,
            StringListField::AllowedRegex => &self.allowed_regex,
            StringListField::BlockedRegex => &self.blocked_regex,
            StringListField::BlockingAddresses => &self.blocking_addresses,
        }
    }

    /// Mutably borrow a plain string-set field by selector
    pub fn string_list_mut(&mut self, field: StringListField) -> &mut Vec<String> {
        match field {
            StringListField::Allowed => &mut self.allowed,
            StringListField::Blocked => &mut self.blocked,
            StringListField::AllowedRegex => &mut self.allowed_regex,
            StringListField::BlockedRegex => &mut self.blocked_regex,
            StringListField::BlockingAddresses => &mut self.blocking_addresses,
        }
    }

    /// Borrow a remote list-source collection by selector
    pub fn url_list(&self, field: UrlListField) -> &Vec<ListEntry> {
        match field {
            UrlListField::AllowLists => &self.allow_list_urls,
            UrlListField::BlockLists => &self.block_list_urls,
            UrlListField::AllowRegexLists => &self.allow_regex_list_urls,
            UrlListField::BlockRegexLists => &self.block_regex_list_urls,
            UrlListField::AdblockLists => &self.adblock_list_urls,
        }
    }

    /// Mutably borrow a remote list-source collection by selector
    pub fn url_list_mut(&mut self, field: UrlListField) -> &mut Vec<ListEntry> {
        match field {
            UrlListField::AllowLists => &mut self.allow_list_urls,
            UrlListField::BlockLists => &mut self.block_list_urls,
            UrlListField::AllowRegexLists => &mut self.allow_regex_list_urls,
            UrlListField::BlockRegexLists => &mut self.block_regex_list_urls,
            UrlListField::AdblockLists => &mut self.adblock_list_urls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_defaults() {
        let group = Group::with_defaults("g1");

        assert_eq!(group.name, "g1");
        assert!(group.enable_blocking);
        assert!(group.block_as_nx_domain);
        assert!(!group.allow_txt_report);
        assert_eq!(group.blocking_addresses, vec!["0.0.0.0", "::"]);
        assert!(group.allowed.is_empty());
        assert!(group.adblock_list_urls.is_empty());
    }

    #[test]
    fn test_list_entry_url_key() {
        let plain = ListEntry::Plain(" https://Example.com/List.txt ".to_string());
        assert_eq!(plain.url_key(), "https://example.com/list.txt");

        let over = ListEntry::Override {
            url: "https://example.com/list.txt".to_string(),
            block_as_nx_domain: Some(false),
            blocking_addresses: None,
        };
        assert_eq!(plain.url_key(), over.url_key());
    }

    #[test]
    fn test_list_entry_untagged_serde() {
        let plain: ListEntry = serde_json::from_str("\"https://example.com/a\"").unwrap();
        assert_eq!(plain.url(), "https://example.com/a");

        let over: ListEntry = serde_json::from_str(
            "{\"url\":\"https://example.com/b\",\"block_as_nx_domain\":true}",
        )
        .unwrap();
        assert_eq!(over.url(), "https://example.com/b");
        assert!(matches!(
            over,
            ListEntry::Override {
                block_as_nx_domain: Some(true),
                ..
            }
        ));
    }

    #[test]
    fn test_string_list_selectors() {
        let mut group = Group::with_defaults("g1");
        group
            .string_list_mut(StringListField::Blocked)
            .push("ads.example".to_string());

        assert_eq!(group.string_list(StringListField::Blocked).len(), 1);
        assert_eq!(group.blocked[0], "ads.example");
    }
}
