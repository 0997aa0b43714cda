//! Integration tests for the single-compound query pipeline.

use tq_app::{AppError, CompoundQuery, PipelineConfig, run_compound_query};
use tq_catalog::{CatalogRow, MemoryCache, MemoryCatalog, Phase};
use tq_engine::Evaluation;

fn row(phase: &str, tmin: f64, tmax: f64, f1: f64) -> CatalogRow {
    CatalogRow {
        formula: "Ti".to_string(),
        phase: phase.to_string(),
        tmin,
        tmax,
        h298: 0.0,
        s298: 30.7,
        f1,
        f2: 10.0,
        f3: 0.0,
        f4: 0.0,
        f5: 0.0,
        f6: 0.0,
        melting_point: 1650.0,
        boiling_point: 3560.0,
        reliability_class: 1,
        first_name: "Titanium".to_string(),
        second_name: String::new(),
        rowid: 0,
    }
}

fn titanium_store() -> MemoryCatalog {
    MemoryCatalog::new(vec![
        row("s", 298.15, 1650.0, 22.0),
        row("l", 1650.0, 5000.0, 35.0),
    ])
}

fn query(t_start: f64, t_end: f64, t_step: f64) -> CompoundQuery {
    CompoundQuery {
        formula: "Ti".to_string(),
        names: vec!["Titanium".to_string()],
        t_start_k: t_start,
        t_end_k: t_end,
        t_step_k: t_step,
        is_elemental: true,
    }
}

#[test]
fn melting_crossing_yields_exactly_one_transition() {
    let cache = MemoryCache::new();
    let store = titanium_store();
    let report = run_compound_query(
        &cache,
        &store,
        &PipelineConfig::default(),
        &query(1000.0, 2000.0, 500.0),
    )
    .unwrap();

    assert_eq!(report.points.len(), 3);
    assert!(report.gap.is_none());
    assert_eq!(report.transitions.len(), 1);
    let transition = &report.transitions[0];
    assert_eq!(transition.from, Phase::Solid);
    assert_eq!(transition.to, Phase::Liquid);
    assert!(transition.temperature_k <= 1650.0);
}

#[test]
fn cache_and_database_stages_agree_numerically() {
    let store = titanium_store();
    let records: Vec<_> = titanium_store()
        .rows()
        .iter()
        .cloned()
        .map(CatalogRow::into_record)
        .collect();
    let mut cache = MemoryCache::new();
    cache.insert("Ti", records);

    let q = query(1000.0, 2000.0, 500.0);
    let mut unnamed = q.clone();
    unnamed.names.clear();
    let config = PipelineConfig::default();
    let cached = run_compound_query(&cache, &store, &config, &q).unwrap();
    let named = run_compound_query(&MemoryCache::new(), &store, &config, &q).unwrap();
    let by_formula = run_compound_query(&MemoryCache::new(), &store, &config, &unnamed).unwrap();

    assert_eq!(cached.stage, "cache");
    assert_eq!(named.stage, "db-1");
    assert_eq!(by_formula.stage, "db-2");
    assert_eq!(cached.points, named.points);
    assert_eq!(named.points, by_formula.points);
    assert_eq!(cached.transitions, named.transitions);
}

#[test]
fn reference_temperature_returns_tabulated_values() {
    let cache = MemoryCache::new();
    let store = titanium_store();
    let report = run_compound_query(
        &cache,
        &store,
        &PipelineConfig::default(),
        &query(298.15, 298.15, 100.0),
    )
    .unwrap();

    assert_eq!(report.points.len(), 1);
    let point = &report.points[0];
    assert_eq!(point.h_j_mol, 0.0);
    assert_eq!(point.s_j_mol_k, 30.7);
    assert!(point.evaluation.is_in_range());
}

#[test]
fn trailing_gap_is_reported_and_points_extrapolate() {
    let cache = MemoryCache::new();
    let store = MemoryCatalog::new(vec![row("s", 298.15, 900.0, 22.0)]);
    let report = run_compound_query(
        &cache,
        &store,
        &PipelineConfig::default(),
        &query(300.0, 1500.0, 600.0),
    )
    .unwrap();

    let gap = report.gap.expect("cover should report the uncovered tail");
    assert_eq!(gap.from_k, 900.0);
    assert_eq!(gap.to_k, 1500.0);

    // 300 and 900 are covered; 1500 extends past tmax with constant Cp.
    assert_eq!(report.points.len(), 3);
    assert!(report.points[0].evaluation.is_in_range());
    assert!(matches!(
        report.points[2].evaluation,
        Evaluation::Extrapolated { from_tmax_k } if from_tmax_k == 900.0
    ));
}

#[test]
fn unknown_formula_is_not_found() {
    let cache = MemoryCache::new();
    let store = MemoryCatalog::new(vec![]);
    let err = run_compound_query(
        &cache,
        &store,
        &PipelineConfig::default(),
        &query(300.0, 600.0, 100.0),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::CompoundNotFound { formula } if formula == "Ti"));
}

#[test]
fn disabling_optimization_matches_raw_builder_output() {
    let cache = MemoryCache::new();
    let store = titanium_store();
    let q = query(1000.0, 2000.0, 500.0);

    let optimized = run_compound_query(&cache, &store, &PipelineConfig::default(), &q).unwrap();
    let raw_config = PipelineConfig {
        use_optimization: false,
        ..PipelineConfig::default()
    };
    let raw = run_compound_query(&cache, &store, &raw_config, &q).unwrap();

    // Two distinct polynomials, nothing to merge or append: identical output.
    assert_eq!(optimized.points, raw.points);
    assert_eq!(optimized.transitions, raw.transitions);
}

#[test]
fn report_serializes_to_json() {
    let cache = MemoryCache::new();
    let store = titanium_store();
    let report = run_compound_query(
        &cache,
        &store,
        &PipelineConfig::default(),
        &query(1000.0, 2000.0, 500.0),
    )
    .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"stage\":\"db-1\""));
    assert!(json.contains("\"transitions\""));
}
