//! Microstrip trace dimensioning for transmission-line designs.
//!
//! Width synthesis follows Hammerstad/Wheeler: the narrow-strip closed form is
//! used when it yields `W/h < 2`, the wide-strip form otherwise. Lengths are
//! scaled by the guided wavelength `λg = c / (f·sqrt(εeff))`.

use crate::error::{AppError, AppResult};
use mn_core::units::constants::wavelength;
use mn_core::units::{Length, mhz, mm};
use mn_synth::Design;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Free-space wave impedance used by the width synthesis, in ohms.
const ETA0_OHMS: f64 = 377.0;

/// Dielectric board the traces are etched on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Substrate {
    pub height_mm: f64,
    pub relative_permittivity: f64,
}

impl Default for Substrate {
    /// 1.6 mm FR4.
    fn default() -> Self {
        Self {
            height_mm: 1.6,
            relative_permittivity: 4.4,
        }
    }
}

impl Substrate {
    pub fn validate(&self) -> AppResult<()> {
        if !(self.height_mm.is_finite() && self.height_mm > 0.0) {
            return Err(AppError::Validation(format!(
                "substrate height must be positive, got {} mm",
                self.height_mm
            )));
        }
        if !(self.relative_permittivity.is_finite() && self.relative_permittivity >= 1.0) {
            return Err(AppError::Validation(format!(
                "substrate relative permittivity must be >= 1, got {}",
                self.relative_permittivity
            )));
        }
        Ok(())
    }

    pub fn height(&self) -> Length {
        mm(self.height_mm)
    }
}

/// One microstrip trace of a given characteristic impedance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MicrostripLine {
    pub impedance_ohms: f64,
    pub width_mm: f64,
    pub width_to_height: f64,
    pub effective_permittivity: f64,
    pub guided_wavelength_mm: f64,
}

impl MicrostripLine {
    pub fn width(&self) -> Length {
        mm(self.width_mm)
    }

    pub fn guided_wavelength(&self) -> Length {
        mm(self.guided_wavelength_mm)
    }

    /// Physical length of `fraction` guided wavelengths.
    pub fn length_mm(&self, fraction: f64) -> f64 {
        fraction * self.guided_wavelength_mm
    }
}

/// Width-to-height ratio for a trace of impedance `z0` on permittivity `er`.
pub fn width_to_height(z0: f64, er: f64) -> f64 {
    let a = z0 / 60.0 * ((er + 1.0) / 2.0).sqrt() + (er - 1.0) / (er + 1.0) * (0.23 + 0.11 / er);
    let narrow = 8.0 * a.exp() / ((2.0 * a).exp() - 2.0);
    if narrow > 0.0 && narrow < 2.0 {
        return narrow;
    }
    let b = ETA0_OHMS * PI / (2.0 * z0 * er.sqrt());
    2.0 / PI
        * (b - 1.0 - (2.0 * b - 1.0).ln()
            + (er - 1.0) / (2.0 * er) * ((b - 1.0).ln() + 0.39 - 0.61 / er))
}

/// Effective permittivity of a trace with ratio `w_h` on permittivity `er`.
pub fn effective_permittivity(w_h: f64, er: f64) -> f64 {
    (er + 1.0) / 2.0 + (er - 1.0) / 2.0 / (1.0 + 12.0 / w_h).sqrt()
}

/// Dimension a trace of impedance `z0` at `frequency_mhz`.
pub fn synthesize_line(
    z0: f64,
    substrate: &Substrate,
    frequency_mhz: f64,
) -> AppResult<MicrostripLine> {
    substrate.validate()?;
    if !(z0.is_finite() && z0 > 0.0) {
        return Err(AppError::Microstrip {
            message: format!("line impedance must be positive, got {z0} ohm"),
        });
    }
    if !(frequency_mhz.is_finite() && frequency_mhz > 0.0) {
        return Err(AppError::Microstrip {
            message: format!("frequency must be positive, got {frequency_mhz} MHz"),
        });
    }

    let er = substrate.relative_permittivity;
    let w_h = width_to_height(z0, er);
    if !(w_h.is_finite() && w_h > 0.0) {
        return Err(AppError::Microstrip {
            message: format!("no realizable trace width for {z0:.2} ohm on εr = {er}"),
        });
    }
    let e_eff = effective_permittivity(w_h, er);
    let guided = wavelength(mhz(frequency_mhz), e_eff).value * 1e3;

    tracing::debug!(z0, w_h, e_eff, "microstrip line dimensioned");

    Ok(MicrostripLine {
        impedance_ohms: z0,
        width_mm: w_h * substrate.height_mm,
        width_to_height: w_h,
        effective_permittivity: e_eff,
        guided_wavelength_mm: guided,
    })
}

/// Physical layout of a transmission-line design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topology", rename_all = "kebab-case")]
pub enum MicrostripLayout {
    QuarterWave {
        substrate: Substrate,
        line: MicrostripLine,
        length_mm: f64,
    },
    SingleStub {
        substrate: Substrate,
        /// Main line and stub share one width
        line: MicrostripLine,
        /// 1-based solution the layout was drawn for
        solution: usize,
        distance_mm: f64,
        stub_length_mm: f64,
    },
}

/// Lay out the solution at `index` of `design` on `substrate`.
///
/// Lumped-element designs have no trace geometry and are rejected. A single-stub
/// line and its stub are drawn at the design's line impedance rather than a
/// fixed 50 Ω, so a non-50 Ω source still gets matching trace widths.
pub fn dimension(
    design: &Design,
    index: usize,
    substrate: &Substrate,
) -> AppResult<MicrostripLayout> {
    match design {
        Design::QuarterWave(qw) => {
            let line =
                synthesize_line(qw.characteristic_impedance_ohms, substrate, qw.frequency_mhz)?;
            Ok(MicrostripLayout::QuarterWave {
                substrate: *substrate,
                length_mm: line.length_mm(mn_synth::quarter_wave::QUARTER_WAVE_FRACTION),
                line,
            })
        }
        Design::SingleStub(stub) => {
            let solution = stub.solution(index)?;
            let line = synthesize_line(stub.line_impedance_ohms, substrate, stub.frequency_mhz)?;
            Ok(MicrostripLayout::SingleStub {
                substrate: *substrate,
                solution: index + 1,
                distance_mm: line.length_mm(solution.distance_wavelengths),
                stub_length_mm: line.length_mm(solution.stub_length_wavelengths),
                line,
            })
        }
        Design::LumpedElement(_) => Err(AppError::Microstrip {
            message: "lumped-element networks have no microstrip layout".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mn_core::Complex;
    use mn_synth::{
        DesignRequest, LumpedConfiguration, StubConfiguration, StubTermination, TopologyOptions,
        synthesize,
    };

    #[test]
    fn fifty_ohm_on_fr4() {
        let line = synthesize_line(50.0, &Substrate::default(), 1000.0).unwrap();
        assert!((line.width_to_height - 1.91186).abs() < 1e-4);
        assert!((line.width_mm - 3.05897).abs() < 1e-4);
        assert!((line.effective_permittivity - 3.33021).abs() < 1e-4);
        assert!((line.guided_wavelength_mm - 164.2801).abs() < 1e-3);
    }

    #[test]
    fn wide_strip_branch() {
        let w_h = width_to_height(20.0, 4.4);
        assert!((w_h - 6.94103).abs() < 1e-4);
        // Air line: εeff collapses to 1
        let air = Substrate {
            height_mm: 1.0,
            relative_permittivity: 1.0,
        };
        let line = synthesize_line(50.0, &air, 1000.0).unwrap();
        assert_eq!(line.effective_permittivity, 1.0);
        assert!((line.guided_wavelength_mm - 299.792458).abs() < 1e-9);
    }

    #[test]
    fn width_decreases_with_impedance() {
        let er = 4.4;
        let ratios: Vec<f64> = [20.0, 35.0, 50.0, 75.0, 100.0, 150.0]
            .iter()
            .map(|&z0| width_to_height(z0, er))
            .collect();
        assert!(ratios.windows(2).all(|w| w[0] > w[1]), "{ratios:?}");
    }

    #[test]
    fn rejects_bad_substrate() {
        let flat = Substrate { height_mm: 0.0, relative_permittivity: 4.4 };
        assert!(matches!(synthesize_line(50.0, &flat, 1000.0), Err(AppError::Validation(_))));
        let vacuum = Substrate { height_mm: 1.6, relative_permittivity: 0.5 };
        assert!(matches!(synthesize_line(50.0, &vacuum, 1000.0), Err(AppError::Validation(_))));
    }

    #[test]
    fn quarter_wave_layout() {
        let request =
            DesignRequest::new(Complex::re(100.0), 1000.0, 50.0, TopologyOptions::QuarterWave);
        let design = synthesize(&request).unwrap();
        let MicrostripLayout::QuarterWave { line, length_mm, .. } =
            dimension(&design, 0, &Substrate::default()).unwrap()
        else {
            panic!("expected quarter-wave layout");
        };
        assert!((line.impedance_ohms - 70.7107).abs() < 1e-4);
        assert!((line.width_mm - 1.62098).abs() < 1e-3);
        assert!((length_mm - 42.066).abs() < 1e-2);
    }

    #[test]
    fn stub_layout_uses_selected_solution() {
        let request = DesignRequest::new(
            Complex::new(60.0, -80.0),
            1000.0,
            50.0,
            TopologyOptions::SingleStub {
                stub_configuration: StubConfiguration::Shunt,
                stub_type: StubTermination::Short,
            },
        );
        let design = synthesize(&request).unwrap();
        let Design::SingleStub(stub) = &design else {
            panic!("expected stub design");
        };
        let layout = dimension(&design, 1, &Substrate::default()).unwrap();
        let MicrostripLayout::SingleStub {
            line,
            solution,
            distance_mm,
            stub_length_mm,
            ..
        } = layout
        else {
            panic!("expected stub layout");
        };
        assert_eq!(solution, 2);
        assert!((line.width_mm - 3.05897).abs() < 1e-4);
        let expected = stub.solutions[1].distance_wavelengths * line.guided_wavelength_mm;
        assert!((distance_mm - expected).abs() < 1e-12);
        assert!(stub_length_mm > 0.0);

        assert!(dimension(&design, 2, &Substrate::default()).is_err());
    }

    #[test]
    fn stub_layout_follows_line_impedance() {
        let request = DesignRequest::new(
            Complex::new(150.0, -60.0),
            1000.0,
            75.0,
            TopologyOptions::SingleStub {
                stub_configuration: StubConfiguration::Series,
                stub_type: StubTermination::Open,
            },
        );
        let design = synthesize(&request).unwrap();
        let fr4 = Substrate::default();
        let MicrostripLayout::SingleStub { line, .. } = dimension(&design, 0, &fr4).unwrap() else {
            panic!("expected stub layout");
        };
        assert_eq!(line.impedance_ohms, 75.0);
        let expected = synthesize_line(75.0, &fr4, 1000.0).unwrap();
        assert!((line.width_mm - expected.width_mm).abs() < 1e-12);
        assert!(line.width_mm < 3.05897);
    }

    #[test]
    fn lumped_has_no_layout() {
        let request = DesignRequest::new(
            Complex::new(100.0, 50.0),
            1000.0,
            50.0,
            TopologyOptions::LumpedElement { configuration: LumpedConfiguration::ShuntFirst },
        );
        let design = synthesize(&request).unwrap();
        assert!(matches!(
            dimension(&design, 0, &Substrate::default()),
            Err(AppError::Microstrip { .. })
        ));
    }
}
