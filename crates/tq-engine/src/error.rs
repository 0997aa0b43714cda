//! Property engine errors.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during property calculations.
///
/// Out-of-range evaluation is deliberately not here: it annotates the
/// result instead (extrapolation support).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Non-physical values (non-positive temperature, ...).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },
}
