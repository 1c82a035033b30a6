//! DNSWard Core - Configuration staging and diffing kernel
//!
//! This crate provides the synchronous domain logic for DNSWard,
//! including:
//! - Filtering configuration models (nodes, groups, mappings, snapshots)
//! - Sanitization (trim, drop-empty, case-insensitive dedup)
//! - Validation (mapping referential integrity, CIDR bounds, URL schemes)
//! - Categorized diffing between two configurations
//! - Draft/baseline staging with cascading group operations
//! - Cross-node divergence computation
//!
//! All I/O-free: the async orchestration lives in `dnsward-engine`.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod rules;
pub mod sanitize;
pub mod sync;

// Re-export commonly used types
pub use diff::{Change, ChangeKind, ChangeScope};
pub use errors::{ErrorKind, Result, ValidationError, WardError};
pub use model::{FilteringConfig, FilteringMethod, Group, ListEntry, Node, NodeRole};
pub use ops::Draft;
pub use rules::validate;
pub use sanitize::sanitize;
pub use sync::{divergence, SyncSelection};
