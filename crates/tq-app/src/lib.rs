//! Shared query layer for thermoquery.
//!
//! This crate provides a unified interface for frontends, centralizing
//! pipeline orchestration for single-compound property queries and
//! reaction profiles.

pub mod config;
pub mod error;
pub mod query;

// Re-export key types for convenience
pub use config::PipelineConfig;
pub use error::{AppError, AppResult};
pub use query::{CompoundQuery, CompoundReport, run_compound_query, run_reaction_query};
