//! tq-engine: Shomate-polynomial property calculations for thermoquery.
//!
//! Provides:
//! - the six-coefficient heat-capacity polynomial
//! - numeric integration to Cp/H/S/G at a temperature
//! - a constant-Cp extrapolation variant for temperatures beyond a
//!   record's validity interval

pub mod error;
pub mod properties;
pub mod shomate;

pub use error::{EngineError, EngineResult};
pub use properties::{
    CompoundProperties, Evaluation, calculate_extrapolated, calculate_properties,
};
pub use shomate::heat_capacity;
