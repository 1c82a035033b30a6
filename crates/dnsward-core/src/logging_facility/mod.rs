//! Logging facility for DNSWard.
//!
//! Thin wrapper over `tracing`/`tracing-subscriber` providing a single
//! initialization point with environment profiles.

pub mod init;

pub use init::{init, Profile};
