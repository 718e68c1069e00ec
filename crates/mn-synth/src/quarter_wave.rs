//! Single-section quarter-wave transformer for resistive loads.

use crate::common::{check_finite, scaled_fraction};
use crate::error::{SynthError, SynthResult};
use crate::request::DesignRequest;
use crate::traits::MatchingNetwork;
use mn_core::units::{Length, m};
use mn_core::{Complex, Impedance, Real, transform_impedance};
use serde::{Deserialize, Serialize};

/// Electrical length of the transformer section at the design frequency, in wavelengths.
pub const QUARTER_WAVE_FRACTION: Real = 0.25;

/// Result record for a quarter-wave transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterWaveDesign {
    /// Characteristic impedance of the transformer section, `sqrt(Z0s·RL)`
    pub characteristic_impedance_ohms: Real,
    /// Guided wavelength at the design frequency
    pub wavelength_m: Real,
    /// Physical length of the section
    pub quarter_wave_length_m: Real,
    pub load_resistance_ohms: Real,
    pub source_impedance_ohms: Real,
    pub frequency_mhz: Real,
    pub relative_permittivity: Real,
}

/// Synthesize a quarter-wave transformer.
///
/// Fails with [`SynthError::UnsupportedLoad`] for any load with non-zero reactance.
pub fn synthesize(request: &DesignRequest) -> SynthResult<QuarterWaveDesign> {
    request.validate()?;
    if request.load.imag != 0.0 {
        return Err(SynthError::UnsupportedLoad {
            topology: "quarter-wave transformer",
            reactance: request.load.imag,
        });
    }

    let rl = request.load.real;
    let z0s = request.source_impedance_ohms;
    let z0 = (z0s * rl).sqrt();
    let wavelength = request.wavelength().value;
    let quarter = wavelength * QUARTER_WAVE_FRACTION;

    check_finite(z0, "transformer impedance")?;
    check_finite(quarter, "quarter-wave length")?;

    tracing::debug!(z0, quarter_wave_length_m = quarter, "quarter-wave transformer synthesized");

    Ok(QuarterWaveDesign {
        characteristic_impedance_ohms: z0,
        wavelength_m: wavelength,
        quarter_wave_length_m: quarter,
        load_resistance_ohms: rl,
        source_impedance_ohms: z0s,
        frequency_mhz: request.frequency_mhz,
        relative_permittivity: request.relative_permittivity,
    })
}

impl QuarterWaveDesign {
    pub fn wavelength(&self) -> Length {
        m(self.wavelength_m)
    }

    pub fn quarter_wave_length(&self) -> Length {
        m(self.quarter_wave_length_m)
    }

    pub fn network(&self) -> QuarterWaveNetwork {
        QuarterWaveNetwork {
            load: Complex::re(self.load_resistance_ohms),
            line_impedance_ohms: self.characteristic_impedance_ohms,
            source_impedance_ohms: self.source_impedance_ohms,
            design_frequency_mhz: self.frequency_mhz,
        }
    }
}

/// Quarter-wave section of fixed physical length terminated in the load.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterWaveNetwork {
    load: Impedance,
    line_impedance_ohms: Real,
    source_impedance_ohms: Real,
    design_frequency_mhz: Real,
}

impl MatchingNetwork for QuarterWaveNetwork {
    fn topology(&self) -> &'static str {
        "quarter-wave"
    }

    fn load(&self) -> Impedance {
        self.load
    }

    fn design_frequency_mhz(&self) -> Real {
        self.design_frequency_mhz
    }

    fn reference_impedance_ohms(&self) -> Real {
        self.source_impedance_ohms
    }

    fn input_impedance(&self, frequency_mhz: Real) -> SynthResult<Complex> {
        let fraction = scaled_fraction(
            QUARTER_WAVE_FRACTION,
            self.design_frequency_mhz,
            frequency_mhz,
        );
        Ok(transform_impedance(self.load, self.line_impedance_ohms, fraction)?)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::request::TopologyOptions;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn transformer_impedance_is_geometric_mean(rl in 0.1_f64..5000.0, z0s in 0.1_f64..500.0) {
            let request =
                DesignRequest::new(Complex::re(rl), 1000.0, z0s, TopologyOptions::QuarterWave);
            let design = synthesize(&request).unwrap();
            let z0 = design.characteristic_impedance_ohms;
            prop_assert!((z0 - (z0s * rl).sqrt()).abs() <= 1e-12 * z0);
            prop_assert!((z0 * z0 - z0s * rl).abs() <= 1e-9 * z0s * rl);
        }
    }
}
