//! The relational row shape delivered by external catalogue storage.

use crate::phase::Phase;
use crate::record::CompoundRecord;
use serde::{Deserialize, Serialize};

/// One raw catalogue row, column-for-column.
///
/// SQL construction and retrieval happen outside the core; this struct is
/// the boundary type an external storage layer fills in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub formula: String,
    /// Raw phase label column ("s", "l", "g", "ao", ...).
    pub phase: String,
    pub tmin: f64,
    pub tmax: f64,
    /// Formation enthalpy at 298.15 K [kJ/mol].
    pub h298: f64,
    /// Standard entropy at 298.15 K [J/(mol·K)].
    pub s298: f64,
    pub f1: f64,
    pub f2: f64,
    pub f3: f64,
    pub f4: f64,
    pub f5: f64,
    pub f6: f64,
    /// Melting point [K], 0.0 when absent.
    pub melting_point: f64,
    /// Boiling point [K], 0.0 when absent.
    pub boiling_point: f64,
    pub reliability_class: u8,
    /// Primary display name.
    pub first_name: String,
    /// Alternate display name.
    pub second_name: String,
    pub rowid: i64,
}

impl CatalogRow {
    /// Convert the raw row into the immutable record value type.
    pub fn into_record(self) -> CompoundRecord {
        CompoundRecord {
            phase: Phase::from_label(&self.phase),
            formula: self.formula,
            tmin_k: self.tmin,
            tmax_k: self.tmax,
            h298_kj_mol: self.h298,
            s298_j_mol_k: self.s298,
            coefficients: [self.f1, self.f2, self.f3, self.f4, self.f5, self.f6],
            tmelt_k: self.melting_point,
            tboil_k: self.boiling_point,
            reliability_class: self.reliability_class,
            source_row: self.rowid,
        }
    }

    /// Base formula with any bracketed phase suffix removed: "H2O(g)" → "H2O".
    ///
    /// Only a trailing all-letter group counts as a phase suffix, so
    /// structural groups like "Fe(CO)5" are left intact.
    pub fn base_formula(&self) -> &str {
        if let (Some(open), true) = (self.formula.rfind('('), self.formula.ends_with(')')) {
            let inner = &self.formula[open + 1..self.formula.len() - 1];
            if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_alphabetic()) {
                return &self.formula[..open];
            }
        }
        &self.formula
    }

    /// Whether the formula carries an ionic charge marker ("Na+", "OH-").
    pub fn is_ionic(&self) -> bool {
        self.base_formula().contains('+') || self.base_formula().contains('-')
    }

    /// Whether either display name matches one of `names` (case-insensitive).
    pub fn matches_any_name(&self, names: &[String]) -> bool {
        names.iter().any(|name| {
            let name = name.trim();
            !name.is_empty()
                && (self.first_name.eq_ignore_ascii_case(name)
                    || self.second_name.eq_ignore_ascii_case(name))
        })
    }
}
