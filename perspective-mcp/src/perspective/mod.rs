//! Perspective sequencing
//!
//! Holds the caller-defined perspective list and walks it with a cursor,
//! keeping the latest analysis per role.

pub mod tracker;
pub mod types;

pub use tracker::PerspectiveTracker;
pub use types::{AnalysisEntry, AnalysisOutcome, Perspective, TrackerSnapshot};
