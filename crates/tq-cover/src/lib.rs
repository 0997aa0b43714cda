//! tq-cover: temperature-interval covering for thermoquery.
//!
//! Provides:
//! - `SelectedRecord`, the tagged union of concrete catalogue records and
//!   value-preserving virtual merges
//! - `RecordRangeBuilder`, the three-tier interval-covering algorithm
//! - `OptimalRecordSelector`, the post-hoc multi-objective optimizer

pub mod builder;
pub mod error;
pub mod optimizer;
pub mod selected;

pub use builder::{CoverConfig, RangeCover, RangeGap, RecordRangeBuilder};
pub use error::{CoverError, CoverResult};
pub use optimizer::{OptimalRecordSelector, OptimizedCover, OptimizerConfig, ScoreWeights};
pub use selected::{SelectedRecord, VirtualRecord, from_concrete, transition_points};
