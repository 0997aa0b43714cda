//! tq-reaction: chemical-equation parsing and reaction thermodynamics.
//!
//! Provides:
//! - `parse_equation`: stoichiometry extraction from a pre-balanced
//!   equation string (no balancing is attempted)
//! - `ReactionEngine`: per-compound resolution and covering, aggregated
//!   into a ΔH/ΔS/ΔG/K(T) profile over a temperature grid

pub mod engine;
pub mod equation;
pub mod error;

pub use engine::{
    MissingPointPolicy, ReactionConfig, ReactionEngine, ReactionInput, ReactionPoint,
    ReactionProfile,
};
pub use equation::{ReactionStoichiometry, parse_equation};
pub use error::{ReactionError, ReactionResult};
