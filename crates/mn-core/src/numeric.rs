use crate::CoreError;

/// Floating point type used throughout the engine
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Wrap a fraction of a wavelength into `[0, 0.5)`.
///
/// Line and stub lengths repeat every half wavelength.
pub fn wrap_half_wavelength(fraction: Real) -> Real {
    let wrapped = fraction.rem_euclid(0.5);
    // rem_euclid can round up to the modulus itself for tiny negative inputs
    if wrapped >= 0.5 { 0.0 } else { wrapped }
}
