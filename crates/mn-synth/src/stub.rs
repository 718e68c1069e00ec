//! Single-stub matching on a uniform line of the source impedance.
//!
//! The stub sits a distance `d` from the load and cancels the reactive part there:
//! in shunt it cancels susceptance, in series it cancels reactance. Lengths are
//! reported in wavelengths wrapped into `[0, 0.5)` and in meters at the design
//! frequency. Of the (up to) two solutions, the one with the shorter total track
//! length `d + l` is marked optimal; ties go to solution 1.

use crate::common::{
    EPSILON_MATCH, EPSILON_REACTIVE, away_from_zero, check_finite, scaled_fraction,
};
use crate::error::{SynthError, SynthResult};
use crate::request::{DesignRequest, StubConfiguration, StubTermination};
use crate::traits::MatchingNetwork;
use mn_core::units::{Length, m};
use mn_core::{
    Complex, Impedance, Real, add, divide, electrical_angle, invert, magnitude, multiply, sub,
    transform_impedance, wrap_half_wavelength,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Stub length when the reactive part to cancel is already zero.
const OPEN_CIRCUIT_STUB: Real = 0.25;

/// Smallest |tanθ| used when a series open stub is evaluated off-design.
const TAN_FLOOR: Real = 1e-12;

/// Intermediate root behind a stub solution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StubRoot {
    /// `t = tan(βd)` and the line susceptance B (S) at the stub position
    Shunt { t: Real, susceptance: Real },
    /// Reactance (ohm) the series stub must present, `−Im(Zin(d))`
    Series { reactance: Real },
}

/// One stub position and length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StubSolution {
    pub distance_wavelengths: Real,
    pub stub_length_wavelengths: Real,
    pub distance_m: Real,
    pub stub_length_m: Real,
    pub derived: StubRoot,
}

impl StubSolution {
    fn new(distance: Real, stub_length: Real, wavelength_m: Real, derived: StubRoot) -> Self {
        Self {
            distance_wavelengths: distance,
            stub_length_wavelengths: stub_length,
            distance_m: distance * wavelength_m,
            stub_length_m: stub_length * wavelength_m,
            derived,
        }
    }

    pub fn total_length_wavelengths(&self) -> Real {
        self.distance_wavelengths + self.stub_length_wavelengths
    }

    pub fn total_length_m(&self) -> Real {
        self.distance_m + self.stub_length_m
    }

    pub fn distance(&self) -> Length {
        m(self.distance_m)
    }

    pub fn stub_length(&self) -> Length {
        m(self.stub_length_m)
    }

    /// Electrical distance in degrees at the design frequency.
    pub fn distance_degrees(&self) -> Real {
        self.distance_wavelengths * 360.0
    }

    /// Electrical stub length in degrees at the design frequency.
    pub fn stub_length_degrees(&self) -> Real {
        self.stub_length_wavelengths * 360.0
    }
}

/// Result record for a single-stub design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StubDesign {
    pub configuration: StubConfiguration,
    pub termination: StubTermination,
    pub load: Impedance,
    /// Line and stub characteristic impedance, equal to the source impedance
    pub line_impedance_ohms: Real,
    pub frequency_mhz: Real,
    pub relative_permittivity: Real,
    pub wavelength_m: Real,
    /// Two solutions, or one for a shunt stub with `RL = Z0`
    pub solutions: Vec<StubSolution>,
    /// Index into `solutions` of the shorter total track length
    pub optimal: usize,
    pub justification: String,
}

/// Synthesize a single-stub network.
pub fn synthesize(
    request: &DesignRequest,
    configuration: StubConfiguration,
    termination: StubTermination,
) -> SynthResult<StubDesign> {
    request.validate()?;
    let wavelength_m = request.wavelength().value;
    let load = request.load;
    let z0 = request.source_impedance_ohms;

    let solutions = match configuration {
        StubConfiguration::Shunt => shunt_solutions(load, z0, termination, wavelength_m)?,
        StubConfiguration::Series => series_solutions(load, z0, termination, wavelength_m)?,
    };
    for s in &solutions {
        check_finite(s.distance_wavelengths, "stub distance")?;
        check_finite(s.stub_length_wavelengths, "stub length")?;
    }

    let (optimal, justification) = select_shortest(&solutions)?;
    tracing::debug!(
        %configuration,
        %termination,
        count = solutions.len(),
        optimal = optimal + 1,
        "single stub synthesized"
    );

    Ok(StubDesign {
        configuration,
        termination,
        load,
        line_impedance_ohms: z0,
        frequency_mhz: request.frequency_mhz,
        relative_permittivity: request.relative_permittivity,
        wavelength_m,
        solutions,
        optimal,
        justification,
    })
}

fn shunt_solutions(
    load: Impedance,
    z0: Real,
    termination: StubTermination,
    wavelength_m: Real,
) -> SynthResult<Vec<StubSolution>> {
    let (rl, xl) = (load.real, load.imag);
    let ts = if (rl - z0).abs() <= EPSILON_MATCH * z0 {
        vec![-xl / (2.0 * z0)]
    } else {
        // Roots of Z0(RL − Z0)t² − 2·XL·Z0·t + RL·Z0 − RL² − XL² = 0. The root whose
        // numerator adds like signs comes first, its partner from the root product.
        let discriminant = ((rl / z0) * ((z0 - rl).powi(2) + xl * xl)).sqrt();
        let product_numerator = rl * (z0 - rl) - xl * xl;
        if xl >= 0.0 {
            let q = xl + discriminant;
            vec![q / (rl - z0), product_numerator / (z0 * q)]
        } else {
            let q = xl - discriminant;
            vec![product_numerator / (z0 * q), q / (rl - z0)]
        }
    };

    Ok(ts
        .into_iter()
        .map(|t| {
            let b = line_susceptance(load, z0, t);
            let distance = distance_from_tan(t);
            let length = shunt_stub_length(termination, b, 1.0 / z0);
            StubSolution::new(
                distance,
                length,
                wavelength_m,
                StubRoot::Shunt { t, susceptance: b },
            )
        })
        .collect())
}

fn series_solutions(
    load: Impedance,
    z0: Real,
    termination: StubTermination,
    wavelength_m: Real,
) -> SynthResult<Vec<StubSolution>> {
    let zl = Complex::new(load.real / z0, load.imag / z0);
    let gamma = divide(sub(zl, Complex::ONE), add(zl, Complex::ONE))?;
    let phi = gamma.arg();
    let alpha = magnitude(gamma).clamp(0.0, 1.0).acos();

    let distances = [
        wrap_half_wavelength((phi - alpha) / (4.0 * PI)),
        wrap_half_wavelength((phi + alpha) / (4.0 * PI)),
    ];

    let mut solutions = Vec::with_capacity(distances.len());
    for d in distances {
        let zin = transform_impedance(load, z0, d)?;
        let x_stub = -zin.imag;
        let length = series_stub_length(termination, x_stub, z0);
        solutions.push(StubSolution::new(
            d,
            length,
            wavelength_m,
            StubRoot::Series { reactance: x_stub },
        ));
    }
    Ok(solutions)
}

/// Principal positive stub position for `t = tan(βd)`, in wavelengths.
pub fn distance_from_tan(t: Real) -> Real {
    if t > 0.0 {
        t.atan() / TAU
    } else if t < 0.0 {
        (PI + t.atan()) / TAU
    } else {
        0.0
    }
}

/// Line susceptance at the position where `tan(βd) = t`:
///
/// `B = (RL²·t − (Z0 − XL·t)·(XL + Z0·t)) / (Z0·(RL² + (XL + Z0·t)²))`
pub fn line_susceptance(load: Impedance, z0: Real, t: Real) -> Real {
    let (rl, xl) = (load.real, load.imag);
    let shifted = xl + z0 * t;
    (rl * rl * t - (z0 - xl * t) * shifted) / (z0 * (rl * rl + shifted * shifted))
}

/// Shunt stub length (wavelengths) cancelling line susceptance `b`.
///
/// Short: `atan(Y0/B)/2π`; open: `−atan(B/Y0)/2π`. A vanishing `B` needs a
/// quarter-wave short stub.
pub fn shunt_stub_length(termination: StubTermination, b: Real, y0: Real) -> Real {
    let raw = match termination {
        StubTermination::Short => {
            if b.abs() < EPSILON_REACTIVE {
                tracing::warn!(b, "shunt short stub saturated to a quarter wavelength");
                OPEN_CIRCUIT_STUB
            } else {
                (y0 / b).atan() / TAU
            }
        }
        StubTermination::Open => -(b / y0).atan() / TAU,
    };
    wrap_half_wavelength(raw)
}

/// Series stub length (wavelengths) presenting reactance `x`.
///
/// Short: `atan(X/Z0)/2π`; open: `−atan(Z0/X)/2π`. A vanishing `X` needs a
/// zero-length short or a quarter-wave open stub.
pub fn series_stub_length(termination: StubTermination, x: Real, z0: Real) -> Real {
    let raw = match termination {
        StubTermination::Short => (x / z0).atan() / TAU,
        StubTermination::Open => {
            if x.abs() < EPSILON_REACTIVE {
                tracing::warn!(x, "series open stub saturated to a quarter wavelength");
                OPEN_CIRCUIT_STUB
            } else {
                -(z0 / x).atan() / TAU
            }
        }
    };
    wrap_half_wavelength(raw)
}

const SHORTER_TRACK: &str = "the shorter total track length";

fn select_shortest(solutions: &[StubSolution]) -> SynthResult<(usize, String)> {
    match solutions {
        [only] => Ok((
            0,
            format!(
                "Solution 1 is the only solution (total track length {:.2} mm).",
                only.total_length_m() * 1e3
            ),
        )),
        [first, second] => {
            let (l1, l2) = (first.total_length_m() * 1e3, second.total_length_m() * 1e3);
            if first.total_length_wavelengths() <= second.total_length_wavelengths() {
                Ok((
                    0,
                    format!("Solution 1 requires {SHORTER_TRACK} ({l1:.2} mm vs {l2:.2} mm)."),
                ))
            } else {
                Ok((
                    1,
                    format!("Solution 2 requires {SHORTER_TRACK} ({l2:.2} mm vs {l1:.2} mm)."),
                ))
            }
        }
        _ => Err(SynthError::NumericDegeneracy {
            what: "stub solution count",
        }),
    }
}

impl StubDesign {
    pub fn solution(&self, index: usize) -> SynthResult<&StubSolution> {
        self.solutions.get(index).ok_or(SynthError::SolutionIndex {
            index,
            count: self.solutions.len(),
        })
    }

    pub fn optimal_solution(&self) -> &StubSolution {
        &self.solutions[self.optimal]
    }

    pub fn wavelength(&self) -> Length {
        m(self.wavelength_m)
    }

    /// Fixed network for the solution at `index`.
    pub fn network(&self, index: usize) -> SynthResult<StubNetwork> {
        let solution = *self.solution(index)?;
        Ok(StubNetwork {
            configuration: self.configuration,
            termination: self.termination,
            load: self.load,
            line_impedance_ohms: self.line_impedance_ohms,
            design_frequency_mhz: self.frequency_mhz,
            distance_wavelengths: solution.distance_wavelengths,
            stub_length_wavelengths: solution.stub_length_wavelengths,
        })
    }
}

/// Stub network with line section and stub of fixed physical length.
#[derive(Debug, Clone, PartialEq)]
pub struct StubNetwork {
    configuration: StubConfiguration,
    termination: StubTermination,
    load: Impedance,
    line_impedance_ohms: Real,
    design_frequency_mhz: Real,
    distance_wavelengths: Real,
    stub_length_wavelengths: Real,
}

impl MatchingNetwork for StubNetwork {
    fn topology(&self) -> &'static str {
        "single-stub"
    }

    fn load(&self) -> Impedance {
        self.load
    }

    fn design_frequency_mhz(&self) -> Real {
        self.design_frequency_mhz
    }

    fn reference_impedance_ohms(&self) -> Real {
        self.line_impedance_ohms
    }

    fn input_impedance(&self, frequency_mhz: Real) -> SynthResult<Complex> {
        let f0 = self.design_frequency_mhz;
        let z0 = self.line_impedance_ohms;
        let d = scaled_fraction(self.distance_wavelengths, f0, frequency_mhz);
        let l = scaled_fraction(self.stub_length_wavelengths, f0, frequency_mhz);

        let z_line = transform_impedance(self.load, z0, d)?;
        let tan = electrical_angle(l).tan();

        let zin = match (self.configuration, self.termination) {
            (StubConfiguration::Shunt, StubTermination::Short) => {
                // Z_line ∥ jZ0·tanθ
                let z_stub = Complex::im(z0 * tan);
                divide(multiply(z_line, z_stub), add(z_line, z_stub))?
            }
            (StubConfiguration::Shunt, StubTermination::Open) => {
                let y_stub = Complex::im(tan / z0);
                invert(add(invert(z_line)?, y_stub))?
            }
            (StubConfiguration::Series, StubTermination::Short) => {
                add(z_line, Complex::im(z0 * tan))
            }
            (StubConfiguration::Series, StubTermination::Open) => {
                let x_stub = -z0 / away_from_zero(tan, TAN_FLOOR);
                add(z_line, Complex::im(x_stub))
            }
        };
        Ok(zin)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::request::TopologyOptions;
    use proptest::prelude::*;

    fn configurations() -> impl Strategy<Value = (StubConfiguration, StubTermination)> {
        prop_oneof![
            Just((StubConfiguration::Shunt, StubTermination::Short)),
            Just((StubConfiguration::Shunt, StubTermination::Open)),
            Just((StubConfiguration::Series, StubTermination::Short)),
            Just((StubConfiguration::Series, StubTermination::Open)),
        ]
    }

    proptest! {
        #[test]
        fn every_solution_matches(
            rl in 1.0_f64..500.0,
            xl in -300.0_f64..300.0,
            (configuration, termination) in configurations(),
        ) {
            let request = DesignRequest::new(
                Complex::new(rl, xl),
                900.0,
                50.0,
                TopologyOptions::SingleStub {
                    stub_configuration: configuration,
                    stub_type: termination,
                },
            );
            let design = synthesize(&request, configuration, termination).unwrap();
            prop_assert!(!design.solutions.is_empty());
            for i in 0..design.solutions.len() {
                let zin = design.network(i).unwrap().input_impedance(900.0).unwrap();
                prop_assert!((zin.real - 50.0).abs() < 1e-5, "zin = {:?}", zin);
                prop_assert!(zin.imag.abs() < 1e-5, "zin = {:?}", zin);
            }
        }
    }
}
