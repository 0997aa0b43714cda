//! Error types for the tq-app query layer.

use thiserror::Error;

/// Result type for app-level queries.
pub type AppResult<T> = Result<T, AppError>;

/// Unified error interface over the backend crates, for frontends that
/// do not want to match on per-crate error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// A formula resolved to nothing at every loader stage.
    #[error("Compound not found in catalogue: {formula}")]
    CompoundNotFound { formula: String },

    /// A formula resolved but no record covers any part of the span.
    #[error("No usable records for {formula} over the requested span")]
    NoUsableRecords { formula: String },

    /// A grid point falls in a coverage gap and the policy is to fail.
    #[error("No record covers {formula} at {t_k} K")]
    MissingPointData { formula: String, t_k: f64 },

    #[error(transparent)]
    Catalog(#[from] tq_catalog::CatalogError),

    #[error(transparent)]
    Cover(#[from] tq_cover::CoverError),

    #[error(transparent)]
    Engine(#[from] tq_engine::EngineError),

    #[error(transparent)]
    Reaction(#[from] tq_reaction::ReactionError),

    #[error(transparent)]
    Core(#[from] tq_core::TqError),
}
