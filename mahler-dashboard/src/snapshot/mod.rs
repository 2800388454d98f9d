//! Market snapshot module.
//!
//! One immutable snapshot per run, with per-field failure tracking.

pub mod builder;

pub use builder::{MarketSnapshot, SnapshotBuilder, SnapshotField};
