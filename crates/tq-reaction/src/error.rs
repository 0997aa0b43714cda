//! Reaction calculation errors.

use thiserror::Error;
use tq_catalog::CatalogError;
use tq_core::TqError;
use tq_cover::CoverError;
use tq_engine::EngineError;

/// Result type for reaction operations.
pub type ReactionResult<T> = Result<T, ReactionError>;

/// Errors that can occur while computing a reaction profile.
#[derive(Error, Debug)]
pub enum ReactionError {
    /// The equation string cannot be interpreted.
    #[error("Malformed equation: {reason}")]
    MalformedEquation { reason: &'static str },

    /// A compound resolved to nothing at every loader stage.
    #[error("Compound not found in catalogue: {formula}")]
    CompoundNotFound { formula: String },

    /// A compound resolved but no record covers any part of the span.
    #[error("No usable records for {formula} over the requested span")]
    NoUsableRecords { formula: String },

    /// A grid point falls in a coverage gap and the policy is to fail.
    #[error("No record covers {formula} at {t_k} K")]
    MissingPointData { formula: String, t_k: f64 },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cover(#[from] CoverError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Core(#[from] TqError),
}
