use crate::TqError;

/// Floating point type for temperatures and properties
pub type Real = f64;

/// Absolute + relative comparison tolerances. Coefficient identity checks
/// use a pure absolute tolerance (`rel: 0.0`).
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TqError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TqError::NonFinite { what, value: v })
    }
}

/// Inclusive temperature grid from `start` to `end` in steps of `step` [K].
///
/// The final point is appended when the stepping does not land on `end`
/// exactly, so the grid always covers the full requested span.
pub fn temperature_grid(start: Real, end: Real, step: Real) -> Result<Vec<Real>, TqError> {
    ensure_finite(start, "grid start")?;
    ensure_finite(end, "grid end")?;
    ensure_finite(step, "grid step")?;
    if step <= 0.0 {
        return Err(TqError::InvalidArg {
            what: "grid step must be positive",
        });
    }
    if end < start {
        return Err(TqError::InvalidArg {
            what: "grid end must not precede start",
        });
    }

    let mut points = Vec::new();
    let mut t = start;
    while t < end - 1e-9 {
        points.push(t);
        t += step;
    }
    points.push(end);
    Ok(points)
}

/// Composite trapezoidal rule over [a, b] with `n` intervals.
///
/// `a > b` is allowed and yields the signed integral.
pub fn trapezoid<F: Fn(Real) -> Real>(f: F, a: Real, b: Real, n: usize) -> Real {
    if n == 0 || a == b {
        return 0.0;
    }
    let h = (b - a) / n as Real;
    let mut sum = 0.5 * (f(a) + f(b));
    for i in 1..n {
        sum += f(a + h * i as Real);
    }
    sum * h
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn grid_includes_both_ends() {
        let grid = temperature_grid(1000.0, 2000.0, 500.0).unwrap();
        assert_eq!(grid, vec![1000.0, 1500.0, 2000.0]);
    }

    #[test]
    fn grid_appends_ragged_end() {
        let grid = temperature_grid(298.15, 1000.0, 300.0).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(*grid.last().unwrap(), 1000.0);
    }

    #[test]
    fn grid_single_point_when_degenerate() {
        let grid = temperature_grid(500.0, 500.0, 100.0).unwrap();
        assert_eq!(grid, vec![500.0]);
    }

    #[test]
    fn grid_rejects_bad_args() {
        assert!(temperature_grid(500.0, 400.0, 100.0).is_err());
        assert!(temperature_grid(400.0, 500.0, 0.0).is_err());
        assert!(temperature_grid(f64::NAN, 500.0, 100.0).is_err());
    }

    #[test]
    fn trapezoid_exact_for_linear() {
        let integral = trapezoid(|t| 2.0 * t + 1.0, 0.0, 10.0, 100);
        assert!((integral - 110.0).abs() < 1e-9);
    }

    #[test]
    fn trapezoid_signed_when_reversed() {
        let forward = trapezoid(|t| t, 1.0, 3.0, 100);
        let backward = trapezoid(|t| t, 3.0, 1.0, 100);
        assert!((forward + backward).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn trapezoid_constant_is_width_times_value(
            c in -1e3f64..1e3,
            a in 200.0f64..2000.0,
            width in 1.0f64..3000.0,
        ) {
            let b = a + width;
            let integral = trapezoid(|_| c, a, b, 100);
            prop_assert!((integral - c * width).abs() < 1e-6 * (1.0 + c.abs() * width));
        }

        #[test]
        fn grid_is_strictly_increasing(
            start in 200.0f64..2000.0,
            span in 1.0f64..5000.0,
            step in 1.0f64..500.0,
        ) {
            let grid = temperature_grid(start, start + span, step).unwrap();
            prop_assert!(grid.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(*grid.first().unwrap(), start);
            prop_assert_eq!(*grid.last().unwrap(), start + span);
        }
    }
}
