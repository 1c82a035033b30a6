//! Categorized diffing between two filtering configurations.
//!
//! The same primitive serves both "what will I save" (draft vs baseline) and
//! "how do nodes differ" (node vs node): the caller decides which side is
//! `before`.

pub mod engine;
pub mod model;

pub use engine::{diff, diff_groups};
pub use model::{Change, ChangeKind, ChangeScope};
