//! Catalogue access errors.

use thiserror::Error;

/// Result type for catalogue operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while resolving compound data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Storage backend failure (connection, malformed row, ...).
    #[error("Backend error: {message}")]
    Backend { message: String },
}
