//! Single-compound and reaction query entry points.
//!
//! Orchestrates the full pipeline: resolve → consensus → cover →
//! (optionally) optimize → evaluate on a temperature grid.

use crate::config::PipelineConfig;
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tq_catalog::{
    CatalogStore, CompoundDataLoader, PhaseTransitionPoint, StaticCache, consensus,
};
use tq_core::temperature_grid;
use tq_cover::{
    OptimalRecordSelector, RangeGap, RecordRangeBuilder, SelectedRecord, from_concrete,
    transition_points,
};
use tq_engine::{CompoundProperties, calculate_extrapolated, calculate_properties};
use tq_reaction::{MissingPointPolicy, ReactionEngine, ReactionInput, ReactionProfile};
use tracing::warn;

/// A single-compound property request over a temperature span.
#[derive(Debug, Clone)]
pub struct CompoundQuery {
    pub formula: String,
    /// Display names, for the loader's named stage.
    pub names: Vec<String>,
    pub t_start_k: f64,
    pub t_end_k: f64,
    pub t_step_k: f64,
    /// Element in standard state (affects optimizer quality scoring).
    pub is_elemental: bool,
}

/// Full answer to a [`CompoundQuery`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundReport {
    pub formula: String,
    /// Resolution-stage tag ("cache", "db-1", "db-2").
    pub stage: String,
    /// Per-grid-point properties; points in coverage gaps are omitted
    /// under the skip policy.
    pub points: Vec<CompoundProperties>,
    /// Phase changes observed along the selected record sequence.
    pub transitions: Vec<PhaseTransitionPoint>,
    /// Portion of the span the cover could not tile, when any.
    pub gap: Option<RangeGap>,
}

/// Resolve one compound and evaluate its properties over the grid.
pub fn run_compound_query(
    cache: &dyn StaticCache,
    store: &dyn CatalogStore,
    config: &PipelineConfig,
    query: &CompoundQuery,
) -> AppResult<CompoundReport> {
    let loader = CompoundDataLoader::new(cache, store);
    let resolved = loader.resolve(&query.formula, &query.names)?;
    let Some(stage) = resolved.stage else {
        return Err(AppError::CompoundNotFound {
            formula: query.formula.clone(),
        });
    };

    let compound_consensus = consensus(&resolved.records);
    let builder = RecordRangeBuilder::new(&resolved.records, compound_consensus, config.cover);
    let cover = builder.build(query.t_start_k, query.t_end_k)?;
    if cover.records.is_empty() {
        return Err(AppError::NoUsableRecords {
            formula: query.formula.clone(),
        });
    }

    let records = if config.use_optimization {
        OptimalRecordSelector::new(config.optimizer)
            .optimize(
                &from_concrete(&cover.records),
                (query.t_start_k, query.t_end_k),
                &resolved.records,
                compound_consensus,
                query.is_elemental,
            )
            .records
    } else {
        from_concrete(&cover.records)
    };

    let grid = temperature_grid(query.t_start_k, query.t_end_k, query.t_step_k)?;
    let mut points = Vec::with_capacity(grid.len());
    for t_k in grid {
        match evaluate_at(&records, t_k)? {
            Some(props) => points.push(props),
            None => match config.missing_point {
                MissingPointPolicy::Skip => {
                    warn!(
                        formula = %query.formula,
                        t_k, "coverage gap at grid point; point omitted"
                    );
                }
                MissingPointPolicy::Fail => {
                    return Err(AppError::MissingPointData {
                        formula: query.formula.clone(),
                        t_k,
                    });
                }
            },
        }
    }

    Ok(CompoundReport {
        formula: query.formula.clone(),
        stage: stage.tag().to_string(),
        points,
        transitions: transition_points(&records),
        gap: cover.gap,
    })
}

/// Evaluate the record sequence at one temperature; `None` marks an
/// interior coverage gap.
fn evaluate_at(records: &[SelectedRecord], t_k: f64) -> AppResult<Option<CompoundProperties>> {
    if let Some(record) = records.iter().find(|r| r.contains(t_k)) {
        return Ok(Some(calculate_properties(record, t_k)?));
    }
    if let Some(highest) = records.iter().max_by(|a, b| a.tmax_k().total_cmp(&b.tmax_k()))
        && t_k > highest.tmax_k()
    {
        return Ok(Some(calculate_extrapolated(highest, t_k)?));
    }
    if let Some(lowest) = records.iter().min_by(|a, b| a.tmin_k().total_cmp(&b.tmin_k()))
        && t_k < lowest.tmin_k()
    {
        warn!(t_k, "below catalogue coverage; evaluating lowest record");
        return Ok(Some(calculate_properties(lowest, t_k)?));
    }
    Ok(None)
}

/// Thin orchestration over [`ReactionEngine`] with the shared config.
pub fn run_reaction_query(
    cache: &dyn StaticCache,
    store: &dyn CatalogStore,
    config: &PipelineConfig,
    input: &ReactionInput,
) -> AppResult<ReactionProfile> {
    let engine = ReactionEngine::new(cache, store, config.reaction_config());
    Ok(engine.calculate_reaction(input)?)
}
