//! tq-core: stable foundation for thermoquery.
//!
//! Contains:
//! - constants (gas constant, reference temperature)
//! - numeric (tolerances, float helpers, grids, trapezoidal integration)
//! - error (shared error types)

pub mod constants;
pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use constants::*;
pub use error::{TqError, TqResult};
pub use numeric::*;
