//! DNSWard Core Types - Shared foundational types
//!
//! Small, dependency-light types shared across the DNSWard crates:
//! operation identifiers for correlating log lines across async boundaries.

pub mod ids;

pub use ids::OpId;
