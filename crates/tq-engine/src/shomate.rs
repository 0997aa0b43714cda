//! The six-coefficient Shomate heat-capacity polynomial.

/// Heat capacity [J/(mol·K)] at `t_k` from catalogue coefficients f1..f6:
///
/// Cp(T) = f1 + f2·T/1000 + f3·1e5/T² + f4·T²/1e6 + f5·1e3/T³ + f6·T³/1e-9
///
/// The inverse-power terms are undefined at T = 0; the guard returns the
/// temperature-independent term alone.
pub fn heat_capacity(coefficients: &[f64; 6], t_k: f64) -> f64 {
    if t_k <= 0.0 {
        return coefficients[0];
    }
    let t = t_k;
    coefficients[0]
        + coefficients[1] * t / 1000.0
        + coefficients[2] * 1e5 / (t * t)
        + coefficients[3] * t * t / 1e6
        + coefficients[4] * 1e3 / (t * t * t)
        + coefficients[5] * t * t * t / 1e-9
}
