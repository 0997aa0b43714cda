//! Consensus melting/boiling extraction and phase-transition rules.

use crate::phase::Phase;
use crate::record::CompoundRecord;
use serde::{Deserialize, Serialize};

/// A phase change observed along the temperature axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransitionPoint {
    pub temperature_k: f64,
    pub from: Phase,
    pub to: Phase,
}

/// Consensus transition temperatures across a compound's candidate records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseConsensus {
    pub melting_k: Option<f64>,
    pub boiling_k: Option<f64>,
}

/// Most frequent value; ties resolve to the value first observed.
fn mode(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for v in values {
        match counts.iter_mut().find(|(seen, _)| *seen == v) {
            Some(entry) => entry.1 += 1,
            None => counts.push((v, 1)),
        }
    }
    let mut best: Option<(f64, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Consensus melting and boiling points: mode of the non-zero melting
/// values, then mode of the non-zero boiling values above the melting
/// point (when one is known).
pub fn consensus(records: &[CompoundRecord]) -> PhaseConsensus {
    let melting_k = mode(
        records
            .iter()
            .map(|r| r.tmelt_k)
            .filter(|&t| t > 0.0),
    );
    let boiling_k = mode(records.iter().map(|r| r.tboil_k).filter(|&t| {
        t > 0.0 && melting_k.is_none_or(|melt| t > melt)
    }));
    PhaseConsensus {
        melting_k,
        boiling_k,
    }
}

/// Phase a compound is expected to be in at `t_k` given its consensus
/// transition temperatures.
pub fn expected_phase(t_k: f64, melting_k: Option<f64>, boiling_k: Option<f64>) -> Phase {
    if let Some(boil) = boiling_k
        && t_k >= boil
    {
        return Phase::Gas;
    }
    if let Some(melt) = melting_k
        && t_k >= melt
    {
        return Phase::Liquid;
    }
    Phase::Solid
}

/// Whether a heating step from `old` to `new` is physically plausible:
/// no phase-skipping upward (solid → gas is invalid, gas → solid is fine).
///
/// Phases without a heating ordinal (aqueous, unrecognized labels) are
/// always permitted; the catalogue carries irregular labels and rejecting
/// them would drop usable data.
pub fn valid_transition(old: &Phase, new: &Phase) -> bool {
    match (old.heating_ordinal(), new.heating_ordinal()) {
        (Some(o), Some(n)) => n <= o + 1,
        _ => true,
    }
}

/// Fraction of [lo, hi) on which the expected phase equals `phase`,
/// under the melting/boiling-segmented phase function.
pub fn phase_fraction(
    phase: &Phase,
    lo_k: f64,
    hi_k: f64,
    melting_k: Option<f64>,
    boiling_k: Option<f64>,
) -> f64 {
    if !(hi_k > lo_k) {
        return 0.0;
    }

    let mut cuts = vec![lo_k, hi_k];
    for breakpoint in [melting_k, boiling_k].into_iter().flatten() {
        if breakpoint > lo_k && breakpoint < hi_k {
            cuts.push(breakpoint);
        }
    }
    cuts.sort_by(f64::total_cmp);

    let mut matched = 0.0;
    for pair in cuts.windows(2) {
        let midpoint = 0.5 * (pair[0] + pair[1]);
        if expected_phase(midpoint, melting_k, boiling_k) == *phase {
            matched += pair[1] - pair[0];
        }
    }
    matched / (hi_k - lo_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tmelt: f64, tboil: f64) -> CompoundRecord {
        CompoundRecord {
            formula: "X".to_string(),
            phase: Phase::Solid,
            tmin_k: 298.15,
            tmax_k: 1000.0,
            h298_kj_mol: 0.0,
            s298_j_mol_k: 0.0,
            coefficients: [0.0; 6],
            tmelt_k: tmelt,
            tboil_k: tboil,
            reliability_class: 1,
            source_row: 0,
        }
    }

    #[test]
    fn consensus_takes_mode_of_nonzero_values() {
        let records = vec![
            record(1650.0, 2800.0),
            record(1650.0, 2800.0),
            record(1652.0, 0.0),
            record(0.0, 2800.0),
        ];
        let c = consensus(&records);
        assert_eq!(c.melting_k, Some(1650.0));
        assert_eq!(c.boiling_k, Some(2800.0));
    }

    #[test]
    fn consensus_ignores_boiling_below_melting() {
        // A stray row with boiling below the agreed melting point must not
        // poison the boiling consensus.
        let records = vec![
            record(1650.0, 900.0),
            record(1650.0, 900.0),
            record(1650.0, 2800.0),
        ];
        let c = consensus(&records);
        assert_eq!(c.melting_k, Some(1650.0));
        assert_eq!(c.boiling_k, Some(2800.0));
    }

    #[test]
    fn consensus_of_empty_or_zero_is_none() {
        assert_eq!(consensus(&[]), PhaseConsensus::default());
        let c = consensus(&[record(0.0, 0.0)]);
        assert_eq!(c.melting_k, None);
        assert_eq!(c.boiling_k, None);
    }

    #[test]
    fn consensus_tie_resolves_to_first_observed() {
        let records = vec![record(1000.0, 0.0), record(1100.0, 0.0)];
        assert_eq!(consensus(&records).melting_k, Some(1000.0));
    }

    #[test]
    fn expected_phase_brackets() {
        let melt = Some(1650.0);
        let boil = Some(2800.0);
        assert_eq!(expected_phase(300.0, melt, boil), Phase::Solid);
        assert_eq!(expected_phase(1650.0, melt, boil), Phase::Liquid);
        assert_eq!(expected_phase(2000.0, melt, boil), Phase::Liquid);
        assert_eq!(expected_phase(2800.0, melt, boil), Phase::Gas);
        assert_eq!(expected_phase(5000.0, None, None), Phase::Solid);
    }

    #[test]
    fn transition_validity_blocks_phase_skipping() {
        assert!(valid_transition(&Phase::Solid, &Phase::Liquid));
        assert!(valid_transition(&Phase::Solid, &Phase::Solid));
        assert!(valid_transition(&Phase::Gas, &Phase::Solid));
        assert!(!valid_transition(&Phase::Solid, &Phase::Gas));
        // unknown labels always pass
        assert!(valid_transition(
            &Phase::Solid,
            &Phase::Unknown("cr2".to_string())
        ));
        assert!(valid_transition(&Phase::Aqueous, &Phase::Gas));
    }

    #[test]
    fn phase_fraction_splits_at_breakpoints() {
        // [1000, 2000) with melting at 1650: solid for 650 K, liquid for 350 K.
        let melt = Some(1650.0);
        let solid = phase_fraction(&Phase::Solid, 1000.0, 2000.0, melt, None);
        let liquid = phase_fraction(&Phase::Liquid, 1000.0, 2000.0, melt, None);
        assert!((solid - 0.65).abs() < 1e-12);
        assert!((liquid - 0.35).abs() < 1e-12);
    }

    #[test]
    fn phase_fraction_degenerate_interval_is_zero() {
        assert_eq!(phase_fraction(&Phase::Solid, 500.0, 500.0, None, None), 0.0);
    }
}
