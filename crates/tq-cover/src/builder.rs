//! Three-tier interval covering over a temperature span.

use crate::error::{CoverError, CoverResult};
use serde::{Deserialize, Serialize};
use tq_catalog::{
    CompoundRecord, Phase, PhaseConsensus, expected_phase, phase_fraction, valid_transition,
};
use tracing::warn;

/// Tuning for the covering loop.
#[derive(Debug, Clone, Copy)]
pub struct CoverConfig {
    /// ±window for matching a record's tmin against the cursor [K].
    pub tmin_tolerance_k: f64,
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            tmin_tolerance_k: 10.0,
        }
    }
}

/// Portion of the requested span the builder could not cover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeGap {
    pub from_k: f64,
    pub to_k: f64,
}

/// Covering result: a contiguous record run, possibly cut short by a gap.
#[derive(Debug, Clone)]
pub struct RangeCover {
    pub records: Vec<CompoundRecord>,
    /// Set when the candidate pool could not tile the full span; the
    /// records up to the gap are still usable.
    pub gap: Option<RangeGap>,
}

impl RangeCover {
    pub fn is_complete(&self) -> bool {
        self.gap.is_none()
    }
}

/// Builds a contiguous record sequence over [t_start, t_target].
///
/// Candidates are expected in loader rank order; each tier takes the first
/// (best-ranked) match.
pub struct RecordRangeBuilder<'a> {
    candidates: &'a [CompoundRecord],
    consensus: PhaseConsensus,
    config: CoverConfig,
}

impl<'a> RecordRangeBuilder<'a> {
    pub fn new(
        candidates: &'a [CompoundRecord],
        consensus: PhaseConsensus,
        config: CoverConfig,
    ) -> Self {
        Self {
            candidates,
            consensus,
            config,
        }
    }

    /// Cover [t_start, t_target]. A degenerate span (start == target) still
    /// selects the one record covering that temperature.
    ///
    /// The cursor always advances to the selected record's tmax; melting or
    /// boiling breakpoints inside a record only influence the next
    /// expected-phase computation, never truncate the record.
    pub fn build(&self, t_start_k: f64, t_target_k: f64) -> CoverResult<RangeCover> {
        if !t_start_k.is_finite() || !t_target_k.is_finite() {
            return Err(CoverError::InvalidArg {
                what: "span bounds must be finite",
            });
        }
        if t_target_k < t_start_k {
            return Err(CoverError::InvalidArg {
                what: "span target must not precede start",
            });
        }

        let mut selected: Vec<CompoundRecord> = Vec::new();
        let mut current = t_start_k;
        let gap;

        loop {
            let expected = expected_phase(current, self.consensus.melting_k, self.consensus.boiling_k);
            let previous_phase = selected.last().map(|r| r.phase.clone());
            let old_phase = previous_phase.as_ref().unwrap_or(&expected);

            let pick = self
                .tier1(current, &expected)
                .or_else(|| self.tier2(current, old_phase))
                .or_else(|| self.tier3(current, old_phase));

            match pick {
                Some(record) => {
                    current = record.tmax_k;
                    selected.push(record.clone());
                    if current >= t_target_k {
                        gap = None;
                        break;
                    }
                }
                None => {
                    if selected.is_empty() || current < t_target_k {
                        warn!(
                            from_k = current,
                            to_k = t_target_k,
                            "no candidate record continues the cover; returning partial sequence"
                        );
                        gap = Some(RangeGap {
                            from_k: current,
                            to_k: t_target_k,
                        });
                    } else {
                        gap = None;
                    }
                    break;
                }
            }
        }

        Ok(RangeCover {
            records: selected,
            gap,
        })
    }

    /// Tier 1: expected phase and tmin aligned with the cursor.
    fn tier1(&self, current: f64, expected: &Phase) -> Option<&CompoundRecord> {
        self.candidates.iter().find(|r| {
            r.tmax_k > current
                && r.phase == *expected
                && (r.tmin_k - current).abs() <= self.config.tmin_tolerance_k
        })
    }

    /// Tier 2: tmin aligned, any phase, if the transition is valid and the
    /// candidate's own phase dominates its interval.
    fn tier2(&self, current: f64, old_phase: &Phase) -> Option<&CompoundRecord> {
        self.candidates.iter().find(|r| {
            r.tmax_k > current
                && (r.tmin_k - current).abs() <= self.config.tmin_tolerance_k
                && valid_transition(old_phase, &r.phase)
                && self.dominant(&r.phase, r.tmin_k, r.tmax_k)
        })
    }

    /// Tier 3: record already covering the cursor, with the same transition
    /// validity, dominance measured over the remaining part of the record.
    fn tier3(&self, current: f64, old_phase: &Phase) -> Option<&CompoundRecord> {
        self.candidates.iter().find(|r| {
            r.tmin_k < current
                && current < r.tmax_k
                && valid_transition(old_phase, &r.phase)
                && self.dominant(&r.phase, current, r.tmax_k)
        })
    }

    fn dominant(&self, phase: &Phase, lo_k: f64, hi_k: f64) -> bool {
        phase_fraction(
            phase,
            lo_k,
            hi_k,
            self.consensus.melting_k,
            self.consensus.boiling_k,
        ) > 0.5
    }
}
