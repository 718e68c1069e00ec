//! Two-element lumped L/C matching network.
//!
//! Shunt-first places a shunt susceptance `B` across the load and a series
//! reactance `X` toward the source; series-first reverses the order. Each
//! configuration has two algebraic roots and both are valid matches at the design
//! frequency, so both are returned and the caller picks one.

use crate::common::{EPSILON_REACTIVE, angular_frequency, check_finite};
use crate::error::{SynthError, SynthResult};
use crate::request::{DesignRequest, LumpedConfiguration};
use crate::traits::MatchingNetwork;
use mn_core::units::{Capacitance, Inductance, farad, henry};
use mn_core::{Complex, Impedance, Real, add, invert};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Inductor,
    Capacitor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentUnit {
    #[serde(rename = "H")]
    Henry,
    #[serde(rename = "F")]
    Farad,
}

/// An ideal inductor or capacitor. `value` is a non-negative magnitude in `unit`.
///
/// A zero-valued capacitor stands for an absent shunt element (open) and a
/// zero-valued inductor for an absent series element (through connection).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactiveComponent {
    pub kind: ComponentKind,
    pub value: Real,
    pub unit: ComponentUnit,
}

impl ReactiveComponent {
    pub fn inductor(henries: Real) -> Self {
        Self {
            kind: ComponentKind::Inductor,
            value: henries,
            unit: ComponentUnit::Henry,
        }
    }

    pub fn capacitor(farads: Real) -> Self {
        Self {
            kind: ComponentKind::Capacitor,
            value: farads,
            unit: ComponentUnit::Farad,
        }
    }

    /// Element realizing shunt susceptance `b` at angular frequency `omega`.
    ///
    /// `B > 0` → capacitor `B/ω`; `B < 0` → inductor `−1/(B·ω)`.
    pub fn from_susceptance(b: Real, omega: Real) -> Self {
        if b.abs() < EPSILON_REACTIVE {
            Self::capacitor(0.0)
        } else if b > 0.0 {
            Self::capacitor(b / omega)
        } else {
            Self::inductor(-1.0 / (b * omega))
        }
    }

    /// Element realizing series reactance `x` at angular frequency `omega`.
    ///
    /// `X > 0` → inductor `X/ω`; `X < 0` → capacitor `−1/(X·ω)`.
    pub fn from_reactance(x: Real, omega: Real) -> Self {
        if x.abs() < EPSILON_REACTIVE {
            Self::inductor(0.0)
        } else if x > 0.0 {
            Self::inductor(x / omega)
        } else {
            Self::capacitor(-1.0 / (x * omega))
        }
    }

    /// Susceptance in siemens when connected in shunt.
    pub fn susceptance_at(&self, omega: Real) -> Real {
        match self.kind {
            ComponentKind::Capacitor => omega * self.value,
            ComponentKind::Inductor => -1.0 / (omega * self.value),
        }
    }

    /// Reactance in ohms when connected in series.
    pub fn reactance_at(&self, omega: Real) -> Real {
        match self.kind {
            ComponentKind::Inductor => omega * self.value,
            ComponentKind::Capacitor => -1.0 / (omega * self.value),
        }
    }

    pub fn capacitance(&self) -> Option<Capacitance> {
        match self.kind {
            ComponentKind::Capacitor => Some(farad(self.value)),
            ComponentKind::Inductor => None,
        }
    }

    pub fn inductance(&self) -> Option<Inductance> {
        match self.kind {
            ComponentKind::Inductor => Some(henry(self.value)),
            ComponentKind::Capacitor => None,
        }
    }
}

/// One root of the lumped design equations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumpedSolution {
    pub shunt: ReactiveComponent,
    pub series: ReactiveComponent,
    /// Shunt susceptance B (S)
    pub susceptance: Real,
    /// Series reactance X (ohm)
    pub reactance: Real,
}

impl LumpedSolution {
    fn from_roots(b: Real, x: Real, omega: Real) -> SynthResult<Self> {
        check_finite(b, "shunt susceptance")?;
        check_finite(x, "series reactance")?;
        Ok(Self {
            shunt: ReactiveComponent::from_susceptance(b, omega),
            series: ReactiveComponent::from_reactance(x, omega),
            susceptance: b,
            reactance: x,
        })
    }
}

/// Result record for a lumped-element design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpedDesign {
    pub configuration: LumpedConfiguration,
    pub load: Impedance,
    pub source_impedance_ohms: Real,
    pub frequency_mhz: Real,
    pub discriminant: Real,
    /// Two solutions, or one when the roots coincide
    pub solutions: Vec<LumpedSolution>,
}

/// Synthesize both roots of the lumped network for `configuration`.
///
/// Fails with [`SynthError::NoRealSolution`] when the discriminant is negative.
pub fn synthesize(
    request: &DesignRequest,
    configuration: LumpedConfiguration,
) -> SynthResult<LumpedDesign> {
    request.validate()?;
    let omega = request.angular_frequency();
    let (discriminant, roots) = match configuration {
        LumpedConfiguration::ShuntFirst => {
            shunt_first_roots(request.load, request.source_impedance_ohms)?
        }
        LumpedConfiguration::SeriesFirst => {
            series_first_roots(request.load, request.source_impedance_ohms)?
        }
    };

    let solutions = roots
        .into_iter()
        .map(|(b, x)| LumpedSolution::from_roots(b, x, omega))
        .collect::<SynthResult<Vec<_>>>()?;

    tracing::debug!(
        %configuration,
        discriminant,
        count = solutions.len(),
        "lumped network synthesized"
    );

    Ok(LumpedDesign {
        configuration,
        load: request.load,
        source_impedance_ohms: request.source_impedance_ohms,
        frequency_mhz: request.frequency_mhz,
        discriminant,
        solutions,
    })
}

/// `(B, X)` roots with the shunt element nearest the load.
fn shunt_first_roots(load: Impedance, z0: Real) -> SynthResult<(Real, Vec<(Real, Real)>)> {
    let (rl, xl) = (load.real, load.imag);
    let mag_sq = rl * rl + xl * xl;
    let discriminant = (rl / z0) * (mag_sq - z0 * rl);
    if discriminant < 0.0 {
        return Err(SynthError::NoRealSolution {
            configuration: LumpedConfiguration::ShuntFirst,
            discriminant,
        });
    }

    let sqrt_d = discriminant.sqrt();
    let bs = distinct_roots((xl + sqrt_d) / mag_sq, (xl - sqrt_d) / mag_sq, sqrt_d);

    let mut roots = Vec::with_capacity(bs.len());
    for b in bs {
        let x = if b.abs() < EPSILON_REACTIVE {
            // Closed form is 0/0 here; a vanishing B only occurs for RL = Z0.
            residual_series_reactance(load, b)?
        } else {
            1.0 / b + xl * z0 / rl - z0 / (b * rl)
        };
        roots.push((b, x));
    }
    Ok((discriminant, roots))
}

/// `(B, X)` roots with the series element nearest the load.
fn series_first_roots(load: Impedance, z0: Real) -> SynthResult<(Real, Vec<(Real, Real)>)> {
    let (rl, xl) = (load.real, load.imag);
    let discriminant = rl * (z0 - rl);
    if discriminant < 0.0 {
        return Err(SynthError::NoRealSolution {
            configuration: LumpedConfiguration::SeriesFirst,
            discriminant,
        });
    }

    let sqrt_d = discriminant.sqrt();
    let roots = distinct_roots(sqrt_d, -sqrt_d, sqrt_d)
        .into_iter()
        .map(|s| (s / (z0 * rl), s - xl))
        .collect();
    Ok((discriminant, roots))
}

fn distinct_roots(first: Real, second: Real, sqrt_d: Real) -> Vec<Real> {
    if sqrt_d == 0.0 {
        vec![first]
    } else {
        vec![first, second]
    }
}

/// Series reactance cancelling the imaginary part left after shunt `b` across `load`.
fn residual_series_reactance(load: Impedance, b: Real) -> SynthResult<Real> {
    let z = invert(add(invert(load)?, Complex::im(b)))?;
    Ok(-z.imag)
}

impl LumpedDesign {
    pub fn solution(&self, index: usize) -> SynthResult<&LumpedSolution> {
        self.solutions.get(index).ok_or(SynthError::SolutionIndex {
            index,
            count: self.solutions.len(),
        })
    }

    /// Index of the root whose first-solved element has the smaller magnitude:
    /// `|B|` for shunt-first, `|X|` for series-first. Ties go to the first root.
    ///
    /// Optional secondary policy; callers normally choose between both roots.
    pub fn minimal_magnitude_index(&self) -> usize {
        let key = |s: &LumpedSolution| match self.configuration {
            LumpedConfiguration::ShuntFirst => s.susceptance.abs(),
            LumpedConfiguration::SeriesFirst => s.reactance.abs(),
        };
        let mut best = 0;
        for (i, s) in self.solutions.iter().enumerate().skip(1) {
            if key(s) < key(&self.solutions[best]) {
                best = i;
            }
        }
        best
    }

    /// Fixed network for the solution at `index`.
    pub fn network(&self, index: usize) -> SynthResult<LumpedNetwork> {
        let solution = *self.solution(index)?;
        Ok(LumpedNetwork {
            configuration: self.configuration,
            load: self.load,
            solution,
            source_impedance_ohms: self.source_impedance_ohms,
            design_frequency_mhz: self.frequency_mhz,
        })
    }
}

/// Lumped network with component values fixed at the design.
#[derive(Debug, Clone, PartialEq)]
pub struct LumpedNetwork {
    configuration: LumpedConfiguration,
    load: Impedance,
    solution: LumpedSolution,
    source_impedance_ohms: Real,
    design_frequency_mhz: Real,
}

impl LumpedNetwork {
    pub fn solution(&self) -> &LumpedSolution {
        &self.solution
    }
}

impl MatchingNetwork for LumpedNetwork {
    fn topology(&self) -> &'static str {
        "lumped-element"
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
        let omega = angular_frequency(frequency_mhz);
        let b = self.solution.shunt.susceptance_at(omega);
        let x = self.solution.series.reactance_at(omega);

        let zin = match self.configuration {
            LumpedConfiguration::ShuntFirst => {
                let y = add(invert(self.load)?, Complex::im(b));
                add(invert(y)?, Complex::im(x))
            }
            LumpedConfiguration::SeriesFirst => {
                let z = add(self.load, Complex::im(x));
                invert(add(invert(z)?, Complex::im(b)))?
            }
        };
        Ok(zin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::TopologyOptions;

    fn request(rl: f64, xl: f64, z0: f64, configuration: LumpedConfiguration) -> DesignRequest {
        DesignRequest::new(
            Complex::new(rl, xl),
            1000.0,
            z0,
            TopologyOptions::LumpedElement { configuration },
        )
    }

    fn assert_matched(design: &LumpedDesign) {
        for i in 0..design.solutions.len() {
            let zin = design.network(i).unwrap().input_impedance(design.frequency_mhz).unwrap();
            assert!(
                (zin.real - design.source_impedance_ohms).abs() < 1e-6,
                "solution {i}: zin = {zin:?}"
            );
            assert!(zin.imag.abs() < 1e-6, "solution {i}: zin = {zin:?}");
        }
    }

    #[test]
    fn shunt_first_scenario() {
        let r = request(100.0, 50.0, 50.0, LumpedConfiguration::ShuntFirst);
        let design = synthesize(&r, LumpedConfiguration::ShuntFirst).unwrap();
        assert!((design.discriminant - 15000.0).abs() < 1e-9);
        assert_eq!(design.solutions.len(), 2);

        let omega = r.angular_frequency();
        let s1 = &design.solutions[0];
        assert!((s1.susceptance - 0.013798).abs() < 1e-6);
        assert!((s1.reactance - 61.24).abs() < 1e-2);
        assert_eq!(s1.shunt.kind, ComponentKind::Capacitor);
        assert!((s1.shunt.value - s1.susceptance / omega).abs() < 1e-18);
        assert_eq!(s1.series.kind, ComponentKind::Inductor);

        let s2 = &design.solutions[1];
        assert!((s2.susceptance + 0.0057976).abs() < 1e-6);
        assert!((s2.reactance + 61.24).abs() < 1e-2);
        assert_eq!(s2.shunt.kind, ComponentKind::Inductor);
        assert_eq!(s2.series.kind, ComponentKind::Capacitor);

        assert_matched(&design);
    }

    #[test]
    fn series_first_matches_low_resistance_load() {
        let r = request(25.0, 10.0, 50.0, LumpedConfiguration::SeriesFirst);
        let design = synthesize(&r, LumpedConfiguration::SeriesFirst).unwrap();
        assert!((design.discriminant - 625.0).abs() < 1e-9);
        assert_eq!(design.solutions.len(), 2);

        let s1 = &design.solutions[0];
        assert!((s1.reactance - 15.0).abs() < 1e-12);
        assert!((s1.susceptance - 0.02).abs() < 1e-15);
        let s2 = &design.solutions[1];
        assert!((s2.reactance + 35.0).abs() < 1e-12);
        assert!((s2.susceptance + 0.02).abs() < 1e-15);

        assert_matched(&design);
    }

    #[test]
    fn negative_discriminant_fails() {
        let r = request(100.0, 0.0, 50.0, LumpedConfiguration::SeriesFirst);
        let err = synthesize(&r, LumpedConfiguration::SeriesFirst).unwrap_err();
        assert!(matches!(
            err,
            SynthError::NoRealSolution {
                configuration: LumpedConfiguration::SeriesFirst,
                ..
            }
        ));

        let r = request(20.0, 0.0, 50.0, LumpedConfiguration::ShuntFirst);
        let err = synthesize(&r, LumpedConfiguration::ShuntFirst).unwrap_err();
        assert!(matches!(
            err,
            SynthError::NoRealSolution { discriminant, .. } if discriminant < 0.0
        ));
    }

    #[test]
    fn vanishing_susceptance_root_uses_limit() {
        // RL = Z0 with reactive load: one shunt-first root has B = 0 and X = -XL
        let r = request(50.0, 50.0, 50.0, LumpedConfiguration::ShuntFirst);
        let design = synthesize(&r, LumpedConfiguration::ShuntFirst).unwrap();
        assert_eq!(design.solutions.len(), 2);
        let zero_root = &design.solutions[1];
        assert_eq!(zero_root.susceptance, 0.0);
        assert!((zero_root.reactance + 50.0).abs() < 1e-9);
        assert_eq!(zero_root.shunt, ReactiveComponent::capacitor(0.0));
        assert_matched(&design);
    }

    #[test]
    fn coincident_roots_collapse() {
        let r = request(50.0, 20.0, 50.0, LumpedConfiguration::SeriesFirst);
        let design = synthesize(&r, LumpedConfiguration::SeriesFirst).unwrap();
        assert_eq!(design.discriminant, 0.0);
        assert_eq!(design.solutions.len(), 1);
        assert!((design.solutions[0].reactance + 20.0).abs() < 1e-12);
        assert_matched(&design);
    }

    #[test]
    fn minimal_magnitude_policy() {
        let r = request(100.0, 50.0, 50.0, LumpedConfiguration::ShuntFirst);
        let design = synthesize(&r, LumpedConfiguration::ShuntFirst).unwrap();
        // |B2| = 0.0058 < |B1| = 0.0138
        assert_eq!(design.minimal_magnitude_index(), 1);

        let r = request(25.0, 10.0, 50.0, LumpedConfiguration::SeriesFirst);
        let design = synthesize(&r, LumpedConfiguration::SeriesFirst).unwrap();
        // |X1| = 15 < |X2| = 35
        assert_eq!(design.minimal_magnitude_index(), 0);
    }

    #[test]
    fn solution_index_out_of_range() {
        let r = request(100.0, 50.0, 50.0, LumpedConfiguration::ShuntFirst);
        let design = synthesize(&r, LumpedConfiguration::ShuntFirst).unwrap();
        assert!(matches!(
            design.network(2),
            Err(SynthError::SolutionIndex { index: 2, count: 2 })
        ));
    }

    #[test]
    fn component_mapping() {
        let omega = 1.0e9;
        let close = |c: ReactiveComponent, kind: ComponentKind, value: f64| {
            c.kind == kind && (c.value - value).abs() <= 1e-12 * value
        };
        assert!(close(
            ReactiveComponent::from_susceptance(0.01, omega),
            ComponentKind::Capacitor,
            1.0e-11
        ));
        assert!(close(
            ReactiveComponent::from_susceptance(-0.01, omega),
            ComponentKind::Inductor,
            1.0e-7
        ));
        assert!(close(
            ReactiveComponent::from_reactance(50.0, omega),
            ComponentKind::Inductor,
            5.0e-8
        ));
        assert!(close(
            ReactiveComponent::from_reactance(-50.0, omega),
            ComponentKind::Capacitor,
            2.0e-11
        ));
        assert_eq!(
            ReactiveComponent::from_reactance(0.0, omega),
            ReactiveComponent::inductor(0.0)
        );

        let c = ReactiveComponent::from_susceptance(0.01, omega);
        assert!((c.susceptance_at(omega) - 0.01).abs() < 1e-15);
        assert_eq!(c.unit, ComponentUnit::Farad);
        assert!(c.capacitance().is_some());
        assert!(c.inductance().is_none());
    }

    #[test]
    fn detunes_away_from_design_frequency() {
        let r = request(100.0, 50.0, 50.0, LumpedConfiguration::ShuntFirst);
        let design = synthesize(&r, LumpedConfiguration::ShuntFirst).unwrap();
        let network = design.network(0).unwrap();
        assert!(network.swr(1000.0).unwrap() < 1.0 + 1e-9);
        assert!(network.swr(500.0).unwrap() > 1.5);
    }
}
