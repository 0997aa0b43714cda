//! The immutable compound record value type.

use crate::phase::Phase;
use serde::{Deserialize, Serialize};

/// One temperature-interval record for a compound.
///
/// Created by the loader per query and never mutated afterwards. Melting
/// and boiling points follow catalogue convention: 0.0 means "not given".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub formula: String,
    pub phase: Phase,
    /// Lower bound of the validity interval [K].
    pub tmin_k: f64,
    /// Upper bound of the validity interval [K].
    pub tmax_k: f64,
    /// Standard enthalpy of formation at 298.15 K [kJ/mol].
    pub h298_kj_mol: f64,
    /// Standard entropy at 298.15 K [J/(mol·K)].
    pub s298_j_mol_k: f64,
    /// Shomate heat-capacity coefficients f1..f6.
    pub coefficients: [f64; 6],
    /// Melting point [K], 0.0 when the source gives none.
    pub tmelt_k: f64,
    /// Boiling point [K], 0.0 when the source gives none.
    pub tboil_k: f64,
    /// Ordinal data-quality class of the source.
    pub reliability_class: u8,
    /// Row id of the originating catalogue row.
    pub source_row: i64,
}

impl CompoundRecord {
    /// Width of the validity interval [K].
    pub fn span_k(&self) -> f64 {
        self.tmax_k - self.tmin_k
    }

    /// Whether `t_k` falls inside the validity interval (inclusive).
    pub fn contains(&self, t_k: f64) -> bool {
        t_k >= self.tmin_k && t_k <= self.tmax_k
    }

    /// Whether the record's span contains the 298.15 K reference state.
    pub fn is_reference_state(&self) -> bool {
        self.contains(tq_core::T_REF_K)
    }

    /// Sort rank of the reliability class; lower ranks sort first.
    ///
    /// Catalogue priority order is 1 < 2 < 3 < 0 < 4 < 5: class 0 marks
    /// unclassified sources and slots between the vetted classes and the
    /// low-confidence tail. Classes above 5 keep their natural order.
    pub fn reliability_rank(&self) -> u8 {
        match self.reliability_class {
            1 => 0,
            2 => 1,
            3 => 2,
            0 => 3,
            4 => 4,
            5 => 5,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(class: u8) -> CompoundRecord {
        CompoundRecord {
            formula: "H2O".to_string(),
            phase: Phase::Liquid,
            tmin_k: 273.15,
            tmax_k: 373.15,
            h298_kj_mol: -285.83,
            s298_j_mol_k: 69.95,
            coefficients: [75.3, 0.0, 0.0, 0.0, 0.0, 0.0],
            tmelt_k: 273.15,
            tboil_k: 373.15,
            reliability_class: class,
            source_row: 1,
        }
    }

    #[test]
    fn reliability_ranks_follow_catalogue_priority() {
        let classes = [1u8, 2, 3, 0, 4, 5];
        let ranks: Vec<u8> = classes
            .iter()
            .map(|&c| record(c).reliability_rank())
            .collect();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn contains_is_inclusive() {
        let r = record(1);
        assert!(r.contains(273.15));
        assert!(r.contains(373.15));
        assert!(!r.contains(373.16));
    }

    #[test]
    fn reference_state_detection() {
        let r = record(1);
        assert!(r.is_reference_state());
        let mut hot = record(1);
        hot.tmin_k = 400.0;
        hot.tmax_k = 900.0;
        assert!(!hot.is_reference_state());
    }
}
