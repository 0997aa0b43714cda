//! Reaction aggregation over a temperature grid.

use crate::equation::parse_equation;
use crate::error::{ReactionError, ReactionResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tq_catalog::{CatalogStore, CompoundDataLoader, PhaseConsensus, StaticCache, consensus};
use tq_core::{LN_K_CLAMP, R_J_PER_MOL_K, temperature_grid};
use tq_cover::{
    CoverConfig, OptimalRecordSelector, OptimizerConfig, RecordRangeBuilder, SelectedRecord,
    from_concrete,
};
use tq_engine::{calculate_extrapolated, calculate_properties};
use tracing::{debug, warn};

/// Upper bound on compounds per reaction, matching the upstream extractor.
pub const MAX_COMPOUNDS: usize = 10;

/// What to do when a grid point falls inside a coverage gap for one
/// compound: drop that compound's contribution at that point, or abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPointPolicy {
    /// Skip the compound at that point only (logged approximation).
    #[default]
    Skip,
    /// Abort the whole reaction calculation.
    Fail,
}

/// Tuning for a reaction calculation.
#[derive(Debug, Clone, Copy)]
pub struct ReactionConfig {
    /// Run the post-hoc record optimizer; `false` keeps the builder's raw
    /// cover exactly (regression baseline).
    pub use_optimization: bool,
    pub missing_point: MissingPointPolicy,
    pub cover: CoverConfig,
    pub optimizer: OptimizerConfig,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            use_optimization: true,
            missing_point: MissingPointPolicy::default(),
            cover: CoverConfig::default(),
            optimizer: OptimizerConfig::default(),
        }
    }
}

/// Validated reaction parameters, as supplied by the upstream extractor.
#[derive(Debug, Clone)]
pub struct ReactionInput {
    /// Pre-balanced equation; no balancing is attempted here.
    pub equation: String,
    /// All formulas appearing in the equation.
    pub compounds: Vec<String>,
    /// Display names per formula, for the loader's named stage.
    pub compound_names: BTreeMap<String, Vec<String>>,
    pub t_start_k: f64,
    pub t_end_k: f64,
    pub t_step_k: f64,
    /// Formulas that are elements in standard state (zero formation
    /// values are physically correct for these).
    pub is_elemental: BTreeSet<String>,
}

/// One grid point of the reaction profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionPoint {
    pub t_k: f64,
    pub delta_h_j_mol: f64,
    pub delta_s_j_mol_k: f64,
    pub delta_g_j_mol: f64,
    pub ln_k: f64,
    /// exp(ln K), exponent clamped at ±700 to stay finite.
    pub k: f64,
    /// Whether any compound was evaluated outside catalogue coverage here.
    pub extrapolated: bool,
}

/// Ordered ΔH/ΔS/ΔG/K profile over the requested grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionProfile {
    pub points: Vec<ReactionPoint>,
}

struct PreparedCompound {
    formula: String,
    coefficient: f64,
    records: Vec<SelectedRecord>,
}

impl PreparedCompound {
    fn min_tmin(&self) -> f64 {
        self.records
            .iter()
            .map(SelectedRecord::tmin_k)
            .fold(f64::INFINITY, f64::min)
    }

    fn highest(&self) -> Option<&SelectedRecord> {
        self.records
            .iter()
            .max_by(|a, b| a.tmax_k().total_cmp(&b.tmax_k()))
    }

    fn lowest(&self) -> Option<&SelectedRecord> {
        self.records
            .iter()
            .min_by(|a, b| a.tmin_k().total_cmp(&b.tmin_k()))
    }
}

/// Orchestrates resolution, covering and aggregation per compound.
pub struct ReactionEngine<'a> {
    cache: &'a dyn StaticCache,
    store: &'a dyn CatalogStore,
    config: ReactionConfig,
}

impl<'a> ReactionEngine<'a> {
    pub fn new(
        cache: &'a dyn StaticCache,
        store: &'a dyn CatalogStore,
        config: ReactionConfig,
    ) -> Self {
        Self {
            cache,
            store,
            config,
        }
    }

    /// Compute the ΔH/ΔS/ΔG/K profile of a pre-balanced reaction over
    /// [t_start, t_end] in steps of t_step.
    pub fn calculate_reaction(&self, input: &ReactionInput) -> ReactionResult<ReactionProfile> {
        if input.compounds.len() > MAX_COMPOUNDS {
            return Err(ReactionError::MalformedEquation {
                reason: "too many compounds for one reaction",
            });
        }

        let stoichiometry = parse_equation(&input.equation, &input.compounds)?;
        let prepared = self.prepare_compounds(input, &stoichiometry)?;
        let grid = temperature_grid(input.t_start_k, input.t_end_k, input.t_step_k)?;

        let mut points = Vec::with_capacity(grid.len());
        for t_k in grid {
            let mut delta_h = 0.0;
            let mut delta_s = 0.0;
            let mut extrapolated = false;

            for compound in &prepared {
                let props = if let Some(record) =
                    compound.records.iter().find(|r| r.contains(t_k))
                {
                    calculate_properties(record, t_k)?
                } else if let Some(highest) = compound.highest()
                    && t_k > highest.tmax_k()
                {
                    extrapolated = true;
                    calculate_extrapolated(highest, t_k)?
                } else if let Some(lowest) = compound.lowest()
                    && t_k < compound.min_tmin()
                {
                    warn!(
                        formula = %compound.formula,
                        t_k, "below catalogue coverage; evaluating lowest record"
                    );
                    extrapolated = true;
                    calculate_properties(lowest, t_k)?
                } else {
                    match self.config.missing_point {
                        MissingPointPolicy::Skip => {
                            warn!(
                                formula = %compound.formula,
                                t_k, "coverage gap at grid point; compound skipped here"
                            );
                            continue;
                        }
                        MissingPointPolicy::Fail => {
                            return Err(ReactionError::MissingPointData {
                                formula: compound.formula.clone(),
                                t_k,
                            });
                        }
                    }
                };

                delta_h += compound.coefficient * props.h_j_mol;
                delta_s += compound.coefficient * props.s_j_mol_k;
            }

            let delta_g = delta_h - t_k * delta_s;
            let ln_k = -delta_g / (R_J_PER_MOL_K * t_k);
            let k = ln_k.clamp(-LN_K_CLAMP, LN_K_CLAMP).exp();
            points.push(ReactionPoint {
                t_k,
                delta_h_j_mol: delta_h,
                delta_s_j_mol_k: delta_s,
                delta_g_j_mol: delta_g,
                ln_k,
                k,
                extrapolated,
            });
        }

        Ok(ReactionProfile { points })
    }

    fn prepare_compounds(
        &self,
        input: &ReactionInput,
        stoichiometry: &BTreeMap<String, f64>,
    ) -> ReactionResult<Vec<PreparedCompound>> {
        let loader = CompoundDataLoader::new(self.cache, self.store);
        let selector = OptimalRecordSelector::new(self.config.optimizer);
        let span = (input.t_start_k, input.t_end_k);

        let mut prepared = Vec::with_capacity(stoichiometry.len());
        for (formula, &coefficient) in stoichiometry {
            let names = input
                .compound_names
                .get(formula)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let resolved = loader.resolve(formula, names)?;
            if resolved.is_empty() {
                return Err(ReactionError::CompoundNotFound {
                    formula: formula.clone(),
                });
            }

            let compound_consensus: PhaseConsensus = consensus(&resolved.records);
            let builder =
                RecordRangeBuilder::new(&resolved.records, compound_consensus, self.config.cover);
            let cover = builder.build(input.t_start_k, input.t_end_k)?;
            if cover.records.is_empty() {
                return Err(ReactionError::NoUsableRecords {
                    formula: formula.clone(),
                });
            }
            if let Some(gap) = cover.gap {
                warn!(
                    formula = %formula,
                    from_k = gap.from_k,
                    to_k = gap.to_k,
                    "partial cover; profile may skip or extrapolate in the gap"
                );
            }

            let records = if self.config.use_optimization {
                let optimized = selector.optimize(
                    &from_concrete(&cover.records),
                    span,
                    &resolved.records,
                    compound_consensus,
                    input.is_elemental.contains(formula),
                );
                debug!(
                    formula = %formula,
                    score = optimized.score,
                    evaluations = optimized.evaluations,
                    records = optimized.records.len(),
                    "optimized record selection"
                );
                optimized.records
            } else {
                from_concrete(&cover.records)
            };

            prepared.push(PreparedCompound {
                formula: formula.clone(),
                coefficient,
                records,
            });
        }
        Ok(prepared)
    }
}
