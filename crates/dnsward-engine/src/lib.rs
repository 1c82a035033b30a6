//! DNSWard Engine - Async orchestration layer
//!
//! Coordinates the synchronous domain kernel in `dnsward-core` with the
//! external node transport: staged editing sessions with gated saves,
//! snapshot history management with a lazy detail cache, and cross-node
//! synchronization.

pub mod api;
pub mod session;
pub mod snapshots;
pub mod sync;

pub use api::NodeTransport;
pub use session::{Selection, StagingSession};
pub use snapshots::{RestoreConfirmation, SnapshotManager};
pub use sync::SyncCoordinator;
