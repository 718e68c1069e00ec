//! Lossless transmission-line impedance transform.

use crate::{Complex, CoreResult, Real, add, invert, multiply, scale};
use std::f64::consts::TAU;

/// Electrical angle in radians of a line `fraction` wavelengths long (`θ = 2π·d`).
pub fn electrical_angle(fraction: Real) -> Real {
    TAU * fraction
}

/// Input impedance of a line of impedance `z0` and length `fraction` wavelengths
/// terminated in `load`:
///
/// `Zin = Z0·(ZL + j·Z0·tanθ)/(Z0 + j·ZL·tanθ)`, `θ = 2π·fraction`.
pub fn transform_impedance(load: Complex, z0: Real, fraction: Real) -> CoreResult<Complex> {
    let t = electrical_angle(fraction).tan();
    let j_tan = Complex::im(t);
    let numerator = add(load, multiply(j_tan, Complex::re(z0)));
    let denominator = add(Complex::re(z0), multiply(j_tan, load));
    Ok(scale(multiply(numerator, invert(denominator)?), z0))
}
