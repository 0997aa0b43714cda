//! Physical constants shared across the workspace.

/// Universal gas constant [J/(mol·K)], truncated as the catalogue uses it.
pub const R_J_PER_MOL_K: f64 = 8.314;

/// Standard reference temperature [K] for formation values.
pub const T_REF_K: f64 = 298.15;

/// Saturation bound for ln(K) before exponentiation overflows f64.
pub const LN_K_CLAMP: f64 = 700.0;
