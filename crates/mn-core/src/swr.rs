//! Scalar standing-wave ratio.
//!
//! The reflection magnitude is formed from `|z|` against a real reference, not from
//! the vector reflection coefficient `(z − z0)/(z + z0)`. A reactive load whose
//! magnitude equals `z0` therefore reports SWR = 1.

use crate::{Complex, Real, magnitude};

/// Value reported when the reflection magnitude reaches 1 (short, open, or pole).
pub const SWR_CEILING: Real = 1.0e6;

/// `|(|z| − z0)/(|z| + z0)|`, or 1 when the ratio is undefined.
pub fn reflection_magnitude(z: Complex, z0: Real) -> Real {
    let zm = magnitude(z);
    let denom = zm + z0;
    if !(denom > 0.0) {
        return 1.0;
    }
    let gamma = ((zm - z0) / denom).abs();
    if gamma.is_nan() { 1.0 } else { gamma }
}

/// `(1 + Γ)/(1 − Γ)` with saturation at [`SWR_CEILING`].
pub fn swr(z: Complex, z0: Real) -> Real {
    let gamma = reflection_magnitude(z, z0);
    if !(gamma < 1.0) {
        return SWR_CEILING;
    }
    let ratio = (1.0 + gamma) / (1.0 - gamma);
    if ratio.is_finite() {
        ratio.min(SWR_CEILING)
    } else {
        SWR_CEILING
    }
}
