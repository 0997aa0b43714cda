//! Staged cache-then-database compound resolution.

use crate::error::CatalogResult;
use crate::record::CompoundRecord;
use crate::store::{CatalogStore, StaticCache};
use std::cmp::Ordering;
use tracing::debug;

/// Which search stage produced the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStage {
    /// Static cache hit by formula.
    Cache,
    /// Database match on formula plus a display name.
    DbNamed,
    /// Database match on formula alone.
    DbFormula,
}

impl ResolutionStage {
    /// Short tag used in logs and result metadata.
    pub fn tag(self) -> &'static str {
        match self {
            ResolutionStage::Cache => "cache",
            ResolutionStage::DbNamed => "db-1",
            ResolutionStage::DbFormula => "db-2",
        }
    }
}

/// Ranked candidate records for one formula.
///
/// An empty candidate list is a valid outcome, not an error: the caller
/// decides whether an unresolved compound is fatal.
#[derive(Debug, Clone)]
pub struct ResolvedCompound {
    pub formula: String,
    /// Stage that produced the records; `None` when all stages came up empty.
    pub stage: Option<ResolutionStage>,
    pub records: Vec<CompoundRecord>,
}

impl ResolvedCompound {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Cache-then-database fallback resolver.
pub struct CompoundDataLoader<'a> {
    cache: &'a dyn StaticCache,
    store: &'a dyn CatalogStore,
}

impl<'a> CompoundDataLoader<'a> {
    pub fn new(cache: &'a dyn StaticCache, store: &'a dyn CatalogStore) -> Self {
        Self { cache, store }
    }

    /// Resolve `formula` through the staged search, first non-empty stage
    /// wins. Candidates come back ranked by the uniform post-sort.
    pub fn resolve(&self, formula: &str, names: &[String]) -> CatalogResult<ResolvedCompound> {
        if self.cache.is_available(formula) {
            let mut records = self.cache.compound_phases(formula);
            if !records.is_empty() {
                debug!(formula, stage = ResolutionStage::Cache.tag(), count = records.len(), "resolved from static cache");
                sort_candidates(&mut records);
                return Ok(ResolvedCompound {
                    formula: formula.to_string(),
                    stage: Some(ResolutionStage::Cache),
                    records,
                });
            }
        }

        if !names.is_empty() {
            let rows = self.store.by_formula_and_name(formula, names)?;
            if !rows.is_empty() {
                let mut records: Vec<CompoundRecord> =
                    rows.into_iter().map(|row| row.into_record()).collect();
                debug!(formula, stage = ResolutionStage::DbNamed.tag(), count = records.len(), "resolved by formula and name");
                sort_candidates(&mut records);
                return Ok(ResolvedCompound {
                    formula: formula.to_string(),
                    stage: Some(ResolutionStage::DbNamed),
                    records,
                });
            }
        }

        let rows = self.store.by_formula(formula)?;
        if !rows.is_empty() {
            let mut records: Vec<CompoundRecord> =
                rows.into_iter().map(|row| row.into_record()).collect();
            debug!(formula, stage = ResolutionStage::DbFormula.tag(), count = records.len(), "resolved by formula alone");
            sort_candidates(&mut records);
            return Ok(ResolvedCompound {
                formula: formula.to_string(),
                stage: Some(ResolutionStage::DbFormula),
                records,
            });
        }

        debug!(formula, "no candidates at any resolution stage");
        Ok(ResolvedCompound {
            formula: formula.to_string(),
            stage: None,
            records: Vec::new(),
        })
    }
}

/// Uniform candidate ordering (stable): ascending reliability rank,
/// descending span, ascending formula length, phase priority
/// gas < liquid < solid < aqueous, original storage order.
pub fn sort_candidates(records: &mut [CompoundRecord]) {
    records.sort_by(|a, b| {
        a.reliability_rank()
            .cmp(&b.reliability_rank())
            .then_with(|| b.span_k().total_cmp(&a.span_k()))
            .then_with(|| a.formula.len().cmp(&b.formula.len()))
            .then_with(|| a.phase.sort_priority().cmp(&b.phase.sort_priority()))
            .then(Ordering::Equal)
    });
}
