//! Concrete and virtual selected records.

use crate::error::{CoverError, CoverResult};
use serde::Serialize;
use tq_catalog::{CompoundRecord, Phase, PhaseTransitionPoint};
use tq_core::{Tolerances, nearly_equal};

/// A synthesized, non-persisted merge of temperature-adjacent catalogue
/// records with numerically identical coefficients.
///
/// Merging is value-preserving: the merged polynomial and reference
/// values are those of every source, so evaluation anywhere inside the
/// merged span equals evaluation of the corresponding unmerged record.
///
/// Constructed only through [`VirtualRecord::merge`]; deserialization is
/// deliberately not derived, it would bypass the merge invariants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualRecord {
    sources: Vec<CompoundRecord>,
    tmin_k: f64,
    tmax_k: f64,
}

impl VirtualRecord {
    /// Merge `sources` (in ascending tmin order) into one virtual record.
    ///
    /// Preconditions: at least two sources, one shared phase, coefficients
    /// AND reference values (h298/s298) equal within
    /// `coefficient_tolerance`, inter-source gap at most `gap_tolerance_k`.
    /// Reference-value agreement is what keeps the merge value-preserving:
    /// every source evaluates from the same integration baseline.
    pub fn merge(
        sources: Vec<CompoundRecord>,
        coefficient_tolerance: f64,
        gap_tolerance_k: f64,
    ) -> CoverResult<VirtualRecord> {
        if sources.len() < 2 {
            return Err(CoverError::MergeRejected {
                what: "virtual record needs at least two sources",
            });
        }

        let tolerances = Tolerances {
            abs: coefficient_tolerance,
            rel: 0.0,
        };
        let head = &sources[0];
        for pair in sources.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.phase != head.phase {
                return Err(CoverError::MergeRejected {
                    what: "sources must share one phase",
                });
            }
            if !coefficients_match(&head.coefficients, &next.coefficients, coefficient_tolerance) {
                return Err(CoverError::MergeRejected {
                    what: "source coefficients differ beyond tolerance",
                });
            }
            if !nearly_equal(head.h298_kj_mol, next.h298_kj_mol, tolerances)
                || !nearly_equal(head.s298_j_mol_k, next.s298_j_mol_k, tolerances)
            {
                return Err(CoverError::MergeRejected {
                    what: "source reference values differ beyond tolerance",
                });
            }
            if (next.tmin_k - prev.tmax_k).abs() > gap_tolerance_k {
                return Err(CoverError::MergeRejected {
                    what: "sources are not temperature-adjacent",
                });
            }
        }

        let tmin_k = sources
            .iter()
            .map(|r| r.tmin_k)
            .fold(f64::INFINITY, f64::min);
        let tmax_k = sources
            .iter()
            .map(|r| r.tmax_k)
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(VirtualRecord {
            sources,
            tmin_k,
            tmax_k,
        })
    }

    pub fn sources(&self) -> &[CompoundRecord] {
        &self.sources
    }

    pub fn tmin_k(&self) -> f64 {
        self.tmin_k
    }

    pub fn tmax_k(&self) -> f64 {
        self.tmax_k
    }

    /// The shared polynomial; identical across sources by construction.
    pub fn coefficients(&self) -> &[f64; 6] {
        &self.sources[0].coefficients
    }

    pub fn phase(&self) -> &Phase {
        &self.sources[0].phase
    }

    /// The shared reference values; identical across sources by
    /// construction.
    pub fn h298_kj_mol(&self) -> f64 {
        self.sources[0].h298_kj_mol
    }

    pub fn s298_j_mol_k(&self) -> f64 {
        self.sources[0].s298_j_mol_k
    }

    /// Best (lowest) reliability rank among the sources.
    pub fn reliability_rank(&self) -> u8 {
        self.sources
            .iter()
            .map(|r| r.reliability_rank())
            .min()
            .unwrap_or(u8::MAX)
    }
}

/// Whether two coefficient sets are numerically identical within `tol`
/// (absolute comparison; the catalogue stores exact repeats, not scaled
/// variants).
pub fn coefficients_match(a: &[f64; 6], b: &[f64; 6], tol: f64) -> bool {
    let tolerances = Tolerances { abs: tol, rel: 0.0 };
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| nearly_equal(*x, *y, tolerances))
}

/// One selected record of a covering sequence: concrete or merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SelectedRecord {
    Concrete(CompoundRecord),
    Virtual(VirtualRecord),
}

impl SelectedRecord {
    pub fn tmin_k(&self) -> f64 {
        match self {
            SelectedRecord::Concrete(r) => r.tmin_k,
            SelectedRecord::Virtual(v) => v.tmin_k(),
        }
    }

    pub fn tmax_k(&self) -> f64 {
        match self {
            SelectedRecord::Concrete(r) => r.tmax_k,
            SelectedRecord::Virtual(v) => v.tmax_k(),
        }
    }

    pub fn phase(&self) -> &Phase {
        match self {
            SelectedRecord::Concrete(r) => &r.phase,
            SelectedRecord::Virtual(v) => v.phase(),
        }
    }

    pub fn coefficients(&self) -> &[f64; 6] {
        match self {
            SelectedRecord::Concrete(r) => &r.coefficients,
            SelectedRecord::Virtual(v) => v.coefficients(),
        }
    }

    pub fn h298_kj_mol(&self) -> f64 {
        match self {
            SelectedRecord::Concrete(r) => r.h298_kj_mol,
            SelectedRecord::Virtual(v) => v.h298_kj_mol(),
        }
    }

    pub fn s298_j_mol_k(&self) -> f64 {
        match self {
            SelectedRecord::Concrete(r) => r.s298_j_mol_k,
            SelectedRecord::Virtual(v) => v.s298_j_mol_k(),
        }
    }

    pub fn reliability_rank(&self) -> u8 {
        match self {
            SelectedRecord::Concrete(r) => r.reliability_rank(),
            SelectedRecord::Virtual(v) => v.reliability_rank(),
        }
    }

    pub fn contains(&self, t_k: f64) -> bool {
        t_k >= self.tmin_k() && t_k <= self.tmax_k()
    }

    /// Whether the span contains the 298.15 K reference state.
    pub fn is_reference_state(&self) -> bool {
        self.contains(tq_core::T_REF_K)
    }

    /// Concrete records backing this selection (one, or the merge sources).
    pub fn concrete_sources(&self) -> Vec<CompoundRecord> {
        match self {
            SelectedRecord::Concrete(r) => vec![r.clone()],
            SelectedRecord::Virtual(v) => v.sources().to_vec(),
        }
    }
}

/// Lift a concrete record sequence into selected form, unchanged.
pub fn from_concrete(records: &[CompoundRecord]) -> Vec<SelectedRecord> {
    records
        .iter()
        .cloned()
        .map(SelectedRecord::Concrete)
        .collect()
}

/// Phase transitions observed along a selected record sequence: every
/// boundary where consecutive records change phase yields one point at the
/// shared boundary temperature.
pub fn transition_points(records: &[SelectedRecord]) -> Vec<PhaseTransitionPoint> {
    records
        .windows(2)
        .filter(|pair| pair[0].phase() != pair[1].phase())
        .map(|pair| PhaseTransitionPoint {
            temperature_k: pair[1].tmin_k(),
            from: pair[0].phase().clone(),
            to: pair[1].phase().clone(),
        })
        .collect()
}
