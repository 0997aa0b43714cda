//! Covering and optimization errors.

use thiserror::Error;

/// Result type for covering operations.
pub type CoverResult<T> = Result<T, CoverError>;

/// Errors that can occur while covering a temperature span.
///
/// A range gap is deliberately not here: partial covers are results, not
/// errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoverError {
    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A virtual merge precondition does not hold.
    #[error("Merge rejected: {what}")]
    MergeRejected { what: &'static str },
}
