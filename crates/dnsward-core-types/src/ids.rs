//! Operation identifiers.
//!
//! Every transport round-trip (a save, a restore, a sync push) is tagged
//! with an [`OpId`] so the log lines on both sides of the await can be
//! matched up, including a completion that arrives after the operator has
//! moved on.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one engine operation.
///
/// Backed by UUIDv7, so ids created later compare lexicographically later
/// at millisecond granularity; useful when grepping interleaved logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpId(String);

impl OpId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OpId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
