//! Design request: the load, operating point and topology options.

use crate::common::angular_frequency;
use crate::error::{SynthError, SynthResult};
use mn_core::units::{Frequency, Length, constants, mhz};
use mn_core::{Impedance, Real};
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_source_impedance() -> Real {
    50.0
}

fn default_relative_permittivity() -> Real {
    1.0
}

/// Inputs shared by every synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRequest {
    /// Load impedance in ohms
    pub load: Impedance,
    /// Operating frequency in MHz
    pub frequency_mhz: Real,
    /// Real source (and line) impedance in ohms
    #[serde(default = "default_source_impedance")]
    pub source_impedance_ohms: Real,
    /// Relative permittivity of the line dielectric, >= 1
    #[serde(default = "default_relative_permittivity")]
    pub relative_permittivity: Real,
    pub topology: TopologyOptions,
}

/// Which topology to synthesize and its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TopologyOptions {
    QuarterWave,
    LumpedElement {
        configuration: LumpedConfiguration,
    },
    SingleStub {
        stub_configuration: StubConfiguration,
        stub_type: StubTermination,
    },
}

/// Element order of a two-element lumped network, seen from the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LumpedConfiguration {
    /// Shunt element across the load, series element toward the source (RL > Z0)
    ShuntFirst,
    /// Series element at the load, shunt element toward the source (RL < Z0)
    SeriesFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StubConfiguration {
    Shunt,
    Series,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StubTermination {
    Short,
    Open,
}

impl DesignRequest {
    /// Create a request with free-space line dielectric (`εr = 1`).
    pub fn new(
        load: Impedance,
        frequency_mhz: Real,
        source_impedance_ohms: Real,
        topology: TopologyOptions,
    ) -> Self {
        Self {
            load,
            frequency_mhz,
            source_impedance_ohms,
            relative_permittivity: default_relative_permittivity(),
            topology,
        }
    }

    pub fn with_relative_permittivity(mut self, relative_permittivity: Real) -> Self {
        self.relative_permittivity = relative_permittivity;
        self
    }

    pub fn with_topology(mut self, topology: TopologyOptions) -> Self {
        self.topology = topology;
        self
    }

    /// Check the request invariants shared by all topologies.
    pub fn validate(&self) -> SynthResult<()> {
        let load = self.load;
        require(load.real.is_finite() && load.real > 0.0, "load resistance", load.real)?;
        require(load.imag.is_finite(), "load reactance", load.imag)?;
        require(
            self.frequency_mhz.is_finite() && self.frequency_mhz > 0.0,
            "frequency (MHz)",
            self.frequency_mhz,
        )?;
        require(
            self.source_impedance_ohms.is_finite() && self.source_impedance_ohms > 0.0,
            "source impedance",
            self.source_impedance_ohms,
        )?;
        require(
            self.relative_permittivity.is_finite() && self.relative_permittivity >= 1.0,
            "relative permittivity",
            self.relative_permittivity,
        )
    }

    pub fn frequency(&self) -> Frequency {
        mhz(self.frequency_mhz)
    }

    /// `ω = 2π·f` in rad/s.
    pub fn angular_frequency(&self) -> Real {
        angular_frequency(self.frequency_mhz)
    }

    /// Guided wavelength on the line, `c / sqrt(εr) / f`.
    pub fn wavelength(&self) -> Length {
        constants::wavelength(self.frequency(), self.relative_permittivity)
    }
}

fn require(ok: bool, what: &'static str, value: Real) -> SynthResult<()> {
    if ok {
        Ok(())
    } else {
        Err(SynthError::InvalidInput { what, value })
    }
}

impl fmt::Display for LumpedConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShuntFirst => write!(f, "shunt-first"),
            Self::SeriesFirst => write!(f, "series-first"),
        }
    }
}

impl fmt::Display for StubConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shunt => write!(f, "shunt"),
            Self::Series => write!(f, "series"),
        }
    }
}

impl fmt::Display for StubTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => write!(f, "short-circuited"),
            Self::Open => write!(f, "open-circuited"),
        }
    }
}

impl fmt::Display for TopologyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuarterWave => write!(f, "quarter-wave transformer"),
            Self::LumpedElement { configuration } => {
                write!(f, "lumped element ({})", configuration)
            }
            Self::SingleStub {
                stub_configuration,
                stub_type,
            } => write!(f, "single {} stub ({})", stub_configuration, stub_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mn_core::Complex;
    use uom::si::length::millimeter;

    fn base() -> DesignRequest {
        DesignRequest::new(
            Complex::new(100.0, 0.0),
            1000.0,
            50.0,
            TopologyOptions::QuarterWave,
        )
    }

    #[test]
    fn valid_request_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_fields() {
        let mut r = base();
        r.load.real = 0.0;
        assert!(matches!(
            r.validate(),
            Err(SynthError::InvalidInput { what: "load resistance", .. })
        ));

        let mut r = base();
        r.frequency_mhz = -1.0;
        assert!(matches!(
            r.validate(),
            Err(SynthError::InvalidInput { what: "frequency (MHz)", .. })
        ));

        let mut r = base();
        r.source_impedance_ohms = 0.0;
        assert!(matches!(
            r.validate(),
            Err(SynthError::InvalidInput { what: "source impedance", .. })
        ));

        let r = base().with_relative_permittivity(0.5);
        assert!(matches!(
            r.validate(),
            Err(SynthError::InvalidInput { what: "relative permittivity", .. })
        ));
    }

    #[test]
    fn rejects_nan_reactance() {
        let mut r = base();
        r.load.imag = f64::NAN;
        assert!(r.validate().is_err());
    }

    #[test]
    fn wavelength_scales_with_permittivity() {
        let r = base().with_relative_permittivity(4.0);
        assert!((r.wavelength().get::<millimeter>() - 149.896229).abs() < 1e-6);
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "load": { "real": 25.0, "imag": -10.0 },
            "frequency_mhz": 433.0,
            "topology": {
                "type": "single-stub",
                "stub_configuration": "series",
                "stub_type": "open"
            }
        }"#;
        let r: DesignRequest = serde_json::from_str(json).unwrap();
        assert_eq!(r.source_impedance_ohms, 50.0);
        assert_eq!(r.relative_permittivity, 1.0);
        assert_eq!(
            r.topology,
            TopologyOptions::SingleStub {
                stub_configuration: StubConfiguration::Series,
                stub_type: StubTermination::Open,
            }
        );
    }

    #[test]
    fn topology_display() {
        let t = TopologyOptions::LumpedElement {
            configuration: LumpedConfiguration::ShuntFirst,
        };
        assert_eq!(t.to_string(), "lumped element (shunt-first)");
        assert_eq!(TopologyOptions::QuarterWave.to_string(), "quarter-wave transformer");
        let t = TopologyOptions::SingleStub {
            stub_configuration: StubConfiguration::Shunt,
            stub_type: StubTermination::Short,
        };
        assert_eq!(t.to_string(), "single shunt stub (short-circuited)");
    }
}
