//! Storage traits isolating the catalogue backends, plus in-memory
//! implementations used by tests and small deployments.

use crate::error::CatalogResult;
use crate::record::CompoundRecord;
use crate::row::CatalogRow;
use std::collections::HashMap;

/// Trait for the relational catalogue backend.
///
/// Implementations must be thread-safe (Send + Sync); concurrent queries
/// run one per task with no locking in the core. Rows must come back in
/// stable storage order; the loader's post-sort relies on it.
pub trait CatalogStore: Send + Sync {
    /// Rows whose formula matches `formula` (exactly or with a bracketed
    /// phase suffix) AND whose display names include one of `names`,
    /// ionic-marker rows excluded.
    fn by_formula_and_name(&self, formula: &str, names: &[String])
    -> CatalogResult<Vec<CatalogRow>>;

    /// Rows whose formula matches `formula` alone, ionic-marker rows
    /// excluded.
    fn by_formula(&self, formula: &str) -> CatalogResult<Vec<CatalogRow>>;
}

/// Trait for the static formula cache substituting for database stage 0.
pub trait StaticCache: Send + Sync {
    /// Whether the cache carries entries for `formula`.
    fn is_available(&self, formula: &str) -> bool;

    /// All cached phase records for `formula` (empty if unavailable).
    fn compound_phases(&self, formula: &str) -> Vec<CompoundRecord>;
}

/// In-memory catalogue over a plain row vector.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    rows: Vec<CatalogRow>,
}

impl MemoryCatalog {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    fn formula_matches(row: &CatalogRow, formula: &str) -> bool {
        row.formula == formula || row.base_formula() == formula
    }
}

impl CatalogStore for MemoryCatalog {
    fn by_formula_and_name(
        &self,
        formula: &str,
        names: &[String],
    ) -> CatalogResult<Vec<CatalogRow>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| {
                Self::formula_matches(row, formula)
                    && !row.is_ionic()
                    && row.matches_any_name(names)
            })
            .cloned()
            .collect())
    }

    fn by_formula(&self, formula: &str) -> CatalogResult<Vec<CatalogRow>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| Self::formula_matches(row, formula) && !row.is_ionic())
            .cloned()
            .collect())
    }
}

/// In-memory static cache keyed by formula.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, Vec<CompoundRecord>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, formula: impl Into<String>, records: Vec<CompoundRecord>) {
        self.entries.insert(formula.into(), records);
    }
}

impl StaticCache for MemoryCache {
    fn is_available(&self, formula: &str) -> bool {
        self.entries
            .get(formula)
            .is_some_and(|records| !records.is_empty())
    }

    fn compound_phases(&self, formula: &str) -> Vec<CompoundRecord> {
        self.entries.get(formula).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;

    fn row(formula: &str, first_name: &str, rowid: i64) -> CatalogRow {
        CatalogRow {
            formula: formula.to_string(),
            phase: "g".to_string(),
            tmin: 298.15,
            tmax: 1500.0,
            h298: 0.0,
            s298: 100.0,
            f1: 30.0,
            f2: 0.0,
            f3: 0.0,
            f4: 0.0,
            f5: 0.0,
            f6: 0.0,
            melting_point: 0.0,
            boiling_point: 0.0,
            reliability_class: 1,
            first_name: first_name.to_string(),
            second_name: String::new(),
            rowid,
        }
    }

    #[test]
    fn formula_match_accepts_bracketed_suffix() {
        let store = MemoryCatalog::new(vec![row("H2O(g)", "Water", 1), row("H2O2", "Peroxide", 2)]);
        let hits = store.by_formula("H2O").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].rowid, 1);
    }

    #[test]
    fn ionic_rows_are_excluded() {
        let store = MemoryCatalog::new(vec![row("Na+", "Sodium ion", 1), row("Na", "Sodium", 2)]);
        let hits = store.by_formula("Na").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].formula, "Na");
    }

    #[test]
    fn named_stage_requires_a_display_name() {
        let store = MemoryCatalog::new(vec![row("H2O", "Water", 1)]);
        let named = store
            .by_formula_and_name("H2O", &["water".to_string()])
            .unwrap();
        assert_eq!(named.len(), 1);

        let miss = store
            .by_formula_and_name("H2O", &["ethanol".to_string()])
            .unwrap();
        assert!(miss.is_empty());
    }

    #[test]
    fn cache_availability_tracks_content() {
        let mut cache = MemoryCache::new();
        assert!(!cache.is_available("H2O"));

        cache.insert(
            "H2O",
            vec![CompoundRecord {
                formula: "H2O".to_string(),
                phase: Phase::Liquid,
                tmin_k: 273.15,
                tmax_k: 373.15,
                h298_kj_mol: -285.83,
                s298_j_mol_k: 69.95,
                coefficients: [75.3, 0.0, 0.0, 0.0, 0.0, 0.0],
                tmelt_k: 273.15,
                tboil_k: 373.15,
                reliability_class: 1,
                source_row: -1,
            }],
        );
        assert!(cache.is_available("H2O"));
        assert_eq!(cache.compound_phases("H2O").len(), 1);
        assert!(cache.compound_phases("CO2").is_empty());
    }
}
