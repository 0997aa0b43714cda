//! Thermodynamic state functions at a temperature.

use crate::error::{EngineError, EngineResult};
use crate::shomate::heat_capacity;
use serde::{Deserialize, Serialize};
use tq_core::{T_REF_K, trapezoid};
use tq_cover::SelectedRecord;
use tracing::warn;

/// How the temperature relates to the record's validity interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Evaluation {
    /// Temperature inside [tmin, tmax].
    InRange,
    /// Temperature outside the interval, polynomial evaluated anyway.
    OutOfRange,
    /// Constant-Cp extension beyond the record's tmax.
    Extrapolated { from_tmax_k: f64 },
}

impl Evaluation {
    pub fn is_in_range(self) -> bool {
        self == Evaluation::InRange
    }
}

/// State functions of one compound record at one temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundProperties {
    pub t_k: f64,
    /// Heat capacity [J/(mol·K)].
    pub cp_j_mol_k: f64,
    /// Enthalpy [J/mol].
    pub h_j_mol: f64,
    /// Entropy [J/(mol·K)].
    pub s_j_mol_k: f64,
    /// Gibbs energy [J/mol].
    pub g_j_mol: f64,
    pub evaluation: Evaluation,
}

fn check_temperature(t_k: f64) -> EngineResult<()> {
    if !t_k.is_finite() {
        return Err(EngineError::InvalidArg {
            what: "temperature must be finite",
        });
    }
    if t_k <= 0.0 {
        return Err(EngineError::NonPhysical {
            what: "temperature must be positive",
        });
    }
    Ok(())
}

/// Integration step count between the reference state and the target.
const INTEGRATION_STEPS: usize = 100;

fn integrate(coefficients: &[f64; 6], from_k: f64, to_k: f64) -> (f64, f64) {
    let dh = trapezoid(|t| heat_capacity(coefficients, t), from_k, to_k, INTEGRATION_STEPS);
    let ds = trapezoid(
        |t| heat_capacity(coefficients, t) / t,
        from_k,
        to_k,
        INTEGRATION_STEPS,
    );
    (dh, ds)
}

/// Cp/H/S/G at `t_k` from the record's polynomial and reference values.
///
/// At exactly 298.15 K the reference values are returned with no
/// integration. Temperatures outside [tmin, tmax] still evaluate; the
/// result is annotated `OutOfRange` and logged, never rejected.
pub fn calculate_properties(record: &SelectedRecord, t_k: f64) -> EngineResult<CompoundProperties> {
    check_temperature(t_k)?;

    let coefficients = record.coefficients();
    let cp_j_mol_k = heat_capacity(coefficients, t_k);
    let (h_j_mol, s_j_mol_k) = if t_k == T_REF_K {
        (record.h298_kj_mol() * 1000.0, record.s298_j_mol_k())
    } else {
        let (dh, ds) = integrate(coefficients, T_REF_K, t_k);
        (
            record.h298_kj_mol() * 1000.0 + dh,
            record.s298_j_mol_k() + ds,
        )
    };

    let evaluation = if record.contains(t_k) {
        Evaluation::InRange
    } else {
        warn!(
            t_k,
            tmin_k = record.tmin_k(),
            tmax_k = record.tmax_k(),
            "evaluating record outside its validity interval"
        );
        Evaluation::OutOfRange
    };

    Ok(CompoundProperties {
        t_k,
        cp_j_mol_k,
        h_j_mol,
        s_j_mol_k,
        g_j_mol: h_j_mol - t_k * s_j_mol_k,
        evaluation,
    })
}

/// Like [`calculate_properties`], but beyond the record's tmax the
/// polynomial is frozen: integration runs to tmax, then H and S extend
/// linearly/logarithmically with constant Cp(tmax). The result carries the
/// `Extrapolated` tag so callers can annotate output.
pub fn calculate_extrapolated(
    record: &SelectedRecord,
    t_k: f64,
) -> EngineResult<CompoundProperties> {
    check_temperature(t_k)?;

    let tmax_k = record.tmax_k();
    if t_k <= tmax_k {
        return calculate_properties(record, t_k);
    }

    let coefficients = record.coefficients();
    let cp_end = heat_capacity(coefficients, tmax_k);
    let (mut dh, mut ds) = if tmax_k == T_REF_K {
        (0.0, 0.0)
    } else {
        integrate(coefficients, T_REF_K, tmax_k)
    };
    dh += cp_end * (t_k - tmax_k);
    ds += cp_end * (t_k / tmax_k).ln();

    let h_j_mol = record.h298_kj_mol() * 1000.0 + dh;
    let s_j_mol_k = record.s298_j_mol_k() + ds;
    warn!(
        t_k,
        tmax_k, "extrapolating beyond record tmax with constant heat capacity"
    );

    Ok(CompoundProperties {
        t_k,
        cp_j_mol_k: cp_end,
        h_j_mol,
        s_j_mol_k,
        g_j_mol: h_j_mol - t_k * s_j_mol_k,
        evaluation: Evaluation::Extrapolated { from_tmax_k: tmax_k },
    })
}
