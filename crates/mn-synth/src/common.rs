//! Common utilities for synthesis calculations.

use crate::error::{SynthError, SynthResult};
use mn_core::numeric::ensure_finite;
use std::f64::consts::TAU;

/// Magnitude below which a susceptance (S) or reactance (ohm) counts as zero.
pub const EPSILON_REACTIVE: f64 = 1e-12;

/// Relative tolerance for treating the load resistance as equal to the source impedance.
pub const EPSILON_MATCH: f64 = 1e-12;

/// Ensure a value is finite, returning SynthError if not.
pub fn check_finite(value: f64, what: &'static str) -> SynthResult<()> {
    ensure_finite(value, what).map_err(|_| SynthError::NumericDegeneracy { what })?;
    Ok(())
}

/// Angular frequency `ω = 2π·f` in rad/s for a frequency in MHz.
pub fn angular_frequency(frequency_mhz: f64) -> f64 {
    TAU * frequency_mhz * 1.0e6
}

/// Electrical length, in wavelengths, of a section designed as `fraction` wavelengths
/// at `design_mhz` when driven at `frequency_mhz`. Physical length is fixed, so the
/// fraction scales with `design_mhz / frequency_mhz`.
pub fn scaled_fraction(fraction: f64, design_mhz: f64, frequency_mhz: f64) -> f64 {
    fraction * (design_mhz / frequency_mhz)
}

/// Move `value` away from zero to at least `floor` in magnitude, keeping its sign.
pub fn away_from_zero(value: f64, floor: f64) -> f64 {
    if value.abs() >= floor {
        value
    } else if value.is_sign_negative() {
        -floor
    } else {
        floor
    }
}
