//! Post-hoc multi-objective record selection.
//!
//! The builder's cover is correct but not necessarily minimal. This pass
//! searches a small move set over the covering sequence:
//! - value-preserving merges of coefficient-identical adjacent runs
//! - appending a straddling candidate when a phase transition inside the
//!   target range is otherwise uncovered (the builder's tiers may have
//!   rejected such a record on phase-dominance grounds; here straddle
//!   coverage is worth the trade and the weights decide)
//!
//! Subsets of non-overlapping moves are enumerated under a record/time
//! budget and scored; the best sequence so far is always returned.

use crate::selected::{SelectedRecord, VirtualRecord, coefficients_match};
use std::time::{Duration, Instant};
use tq_catalog::{CompoundRecord, PhaseConsensus, valid_transition};
use tracing::debug;

/// Relative importance of the three optimization objectives.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub count: f64,
    pub quality: f64,
    pub transition_coverage: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            count: 0.5,
            quality: 0.3,
            transition_coverage: 0.2,
        }
    }
}

/// Tuning for the optimizer.
#[derive(Debug, Clone, Copy)]
pub struct OptimizerConfig {
    pub weights: ScoreWeights,
    /// Numeric identity threshold for coefficient equality.
    pub coefficient_tolerance: f64,
    /// Maximum gap between temperature-adjacent merge sources [K].
    pub gap_tolerance_k: f64,
    /// Straddle window around a transition temperature [K].
    pub transition_tolerance_k: f64,
    /// Hard cap on scored candidate sequences.
    pub max_evaluations: usize,
    /// Soft wall-clock budget for the search.
    pub time_budget: Duration,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            coefficient_tolerance: 1e-6,
            gap_tolerance_k: 1.0,
            transition_tolerance_k: 10.0,
            max_evaluations: 256,
            time_budget: Duration::from_millis(50),
        }
    }
}

/// Optimization outcome: the winning sequence and its score.
#[derive(Debug, Clone)]
pub struct OptimizedCover {
    pub records: Vec<SelectedRecord>,
    pub score: f64,
    /// How many candidate sequences were scored.
    pub evaluations: usize,
}

/// One candidate rewrite of the covering sequence.
#[derive(Debug, Clone)]
enum Move {
    /// Merge the run [start, end] into one virtual record.
    Merge { start: usize, end: usize },
    /// Append a transition-straddling candidate after the sequence tail.
    Append { record: CompoundRecord },
}

impl Move {
    fn span(&self, len: usize) -> (usize, usize) {
        match self {
            Move::Merge { start, end } => (*start, *end),
            Move::Append { .. } => (len, len),
        }
    }
}

/// Minimizes `w1·count − w2·quality − w3·transition_coverage` over the
/// covering sequence.
pub struct OptimalRecordSelector {
    config: OptimizerConfig,
}

impl OptimalRecordSelector {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Optimize a covering sequence over `target_range`.
    ///
    /// `all_candidates` is the loader's full ranked candidate pool; it only
    /// contributes straddling records for otherwise-uncovered transitions.
    /// Idempotent: re-optimizing the output changes nothing.
    pub fn optimize(
        &self,
        selected: &[SelectedRecord],
        target_range: (f64, f64),
        all_candidates: &[CompoundRecord],
        consensus: PhaseConsensus,
        is_elemental: bool,
    ) -> OptimizedCover {
        let started = Instant::now();
        let moves = self.collect_moves(selected, target_range, all_candidates, consensus);

        let mut best_records = selected.to_vec();
        let mut best_score = self.score(selected, target_range, consensus, is_elemental);
        let mut evaluations = 1usize;

        // Bitmask subset enumeration; the baseline (empty mask) is already
        // scored above, and move counts are tiny in practice.
        let n = moves.len().min(usize::BITS as usize - 1);
        for mask in 1u64..(1u64 << n) {
            if evaluations >= self.config.max_evaluations
                || started.elapsed() > self.config.time_budget
            {
                debug!(evaluations, "optimizer budget exhausted, keeping best so far");
                break;
            }
            let Some(candidate) = self.apply(selected, &moves, mask) else {
                continue;
            };
            let score = self.score(&candidate, target_range, consensus, is_elemental);
            evaluations += 1;
            if score < best_score {
                best_score = score;
                best_records = candidate;
            }
        }

        OptimizedCover {
            records: best_records,
            score: best_score,
            evaluations,
        }
    }

    fn collect_moves(
        &self,
        selected: &[SelectedRecord],
        target_range: (f64, f64),
        all_candidates: &[CompoundRecord],
        consensus: PhaseConsensus,
    ) -> Vec<Move> {
        let mut moves = Vec::new();

        // Maximal coefficient-identical adjacent runs.
        let mut start = 0;
        while start < selected.len() {
            let mut end = start;
            while end + 1 < selected.len() && self.mergeable(&selected[end], &selected[end + 1], &selected[start])
            {
                end += 1;
            }
            if end > start {
                moves.push(Move::Merge { start, end });
            }
            start = end + 1;
        }

        // Straddling candidates for uncovered in-range transitions.
        if let Some(last) = selected.last() {
            for t in self.transitions_in_range(target_range, consensus) {
                if self.straddled(selected, t) {
                    continue;
                }
                let append = all_candidates.iter().find(|r| {
                    self.record_straddles(r.tmin_k, r.tmax_k, t)
                        && (r.tmin_k - last.tmax_k()).abs() <= self.config.gap_tolerance_k
                        && valid_transition(last.phase(), &r.phase)
                        && !selected
                            .iter()
                            .flat_map(|s| s.concrete_sources())
                            .any(|s| s == **r)
                });
                if let Some(record) = append {
                    moves.push(Move::Append {
                        record: record.clone(),
                    });
                }
            }
        }

        moves
    }

    fn mergeable(&self, prev: &SelectedRecord, next: &SelectedRecord, head: &SelectedRecord) -> bool {
        let tol = self.config.coefficient_tolerance;
        next.phase() == head.phase()
            && coefficients_match(head.coefficients(), next.coefficients(), tol)
            && (next.h298_kj_mol() - head.h298_kj_mol()).abs() <= tol
            && (next.s298_j_mol_k() - head.s298_j_mol_k()).abs() <= tol
            && (next.tmin_k() - prev.tmax_k()).abs() <= self.config.gap_tolerance_k
    }

    /// Apply the moves in `mask`; `None` when two chosen moves overlap or a
    /// merge precondition fails.
    fn apply(&self, selected: &[SelectedRecord], moves: &[Move], mask: u64) -> Option<Vec<SelectedRecord>> {
        let mut chosen: Vec<&Move> = Vec::new();
        for (i, mv) in moves.iter().enumerate() {
            if mask & (1 << i) != 0 {
                chosen.push(mv);
            }
        }
        // Reject overlapping index ranges (two appends also collide).
        for i in 0..chosen.len() {
            for j in i + 1..chosen.len() {
                let (a0, a1) = chosen[i].span(selected.len());
                let (b0, b1) = chosen[j].span(selected.len());
                if a0 <= b1 && b0 <= a1 {
                    return None;
                }
            }
        }

        let mut result = selected.to_vec();
        // Right-to-left keeps earlier indices valid.
        chosen.sort_by_key(|mv| std::cmp::Reverse(mv.span(selected.len()).0));
        for mv in chosen {
            match mv {
                Move::Append { record } => result.push(SelectedRecord::Concrete(record.clone())),
                Move::Merge { start, end } => {
                    let sources: Vec<CompoundRecord> = result[*start..=*end]
                        .iter()
                        .flat_map(|s| s.concrete_sources())
                        .collect();
                    let merged = VirtualRecord::merge(
                        sources,
                        self.config.coefficient_tolerance,
                        self.config.gap_tolerance_k,
                    )
                    .ok()?;
                    result.splice(*start..=*end, [SelectedRecord::Virtual(merged)]);
                }
            }
        }
        Some(result)
    }

    /// score = w1·count − w2·quality − w3·transition_coverage; lower wins.
    pub fn score(
        &self,
        records: &[SelectedRecord],
        target_range: (f64, f64),
        consensus: PhaseConsensus,
        is_elemental: bool,
    ) -> f64 {
        let w = self.config.weights;
        let count = records.len() as f64;
        let quality = if records.is_empty() {
            0.0
        } else {
            records
                .iter()
                .map(|r| self.record_quality(r, is_elemental))
                .sum::<f64>()
                / count
        };
        let coverage = self.transition_coverage(records, target_range, consensus);
        w.count * count - w.quality * quality - w.transition_coverage * coverage
    }

    /// Quality of one record: reliability reward, minus the missing-data
    /// penalty for zeroed formation values on non-reference records.
    /// Elements in standard state legitimately carry zeros and are exempt.
    fn record_quality(&self, record: &SelectedRecord, is_elemental: bool) -> f64 {
        let reliability = 1.0 / (1.0 + record.reliability_rank() as f64);
        let zeroed = record.h298_kj_mol() == 0.0 && record.s298_j_mol_k() == 0.0;
        if zeroed && !is_elemental && !record.is_reference_state() {
            reliability - 0.5
        } else {
            reliability
        }
    }

    fn transitions_in_range(&self, target_range: (f64, f64), consensus: PhaseConsensus) -> Vec<f64> {
        [consensus.melting_k, consensus.boiling_k]
            .into_iter()
            .flatten()
            .filter(|&t| t > target_range.0 && t < target_range.1)
            .collect()
    }

    fn record_straddles(&self, tmin_k: f64, tmax_k: f64, t: f64) -> bool {
        tmin_k <= t + self.config.transition_tolerance_k
            && tmax_k >= t - self.config.transition_tolerance_k
    }

    fn straddled(&self, records: &[SelectedRecord], t: f64) -> bool {
        records
            .iter()
            .any(|r| self.record_straddles(r.tmin_k(), r.tmax_k(), t))
    }

    /// Fraction of in-range transitions straddled by the sequence (1.0
    /// when the range contains none).
    pub fn transition_coverage(
        &self,
        records: &[SelectedRecord],
        target_range: (f64, f64),
        consensus: PhaseConsensus,
    ) -> f64 {
        let transitions = self.transitions_in_range(target_range, consensus);
        if transitions.is_empty() {
            return 1.0;
        }
        let covered = transitions
            .iter()
            .filter(|&&t| self.straddled(records, t))
            .count();
        covered as f64 / transitions.len() as f64
    }
}
