//! Topology recommendation from a coarse load classification.

use mn_synth::{
    DesignRequest, LumpedConfiguration, StubConfiguration, StubTermination, TopologyOptions,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Resistance and reactance tolerance for treating a load as resistive or matched.
pub const RESISTIVE_TOLERANCE_OHMS: f64 = 0.01;

/// Above this scalar SWR a single shunt stub is preferred over lumped elements.
pub const HIGH_SWR: f64 = 10.0;

/// Suggested topology, or `None` for an already matched load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub topology: Option<TopologyOptions>,
    /// Transformer impedance when a quarter-wave section is suggested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_z0_ohms: Option<f64>,
    /// Scalar SWR of the unmatched load
    pub load_swr: f64,
    pub reason: String,
}

impl Recommendation {
    /// `request` with the recommended topology, or `None` when no network is needed.
    pub fn apply(&self, request: &DesignRequest) -> Option<DesignRequest> {
        self.topology
            .map(|topology| request.clone().with_topology(topology))
    }
}

/// Suggest a topology for `request`. Runs no synthesis.
pub fn recommend(request: &DesignRequest) -> AppResult<Recommendation> {
    request.validate()?;

    let rl = request.load.real;
    let xl = request.load.imag;
    let z0 = request.source_impedance_ohms;
    let load_swr = mn_core::swr(request.load, z0);

    let recommendation = if xl.abs() < RESISTIVE_TOLERANCE_OHMS {
        if (rl - z0).abs() < RESISTIVE_TOLERANCE_OHMS {
            Recommendation {
                topology: None,
                suggested_z0_ohms: None,
                load_swr,
                reason: "The load is already matched to the source impedance.".to_string(),
            }
        } else {
            Recommendation {
                topology: Some(TopologyOptions::QuarterWave),
                suggested_z0_ohms: Some((z0 * rl).sqrt()),
                load_swr,
                reason: "The load is purely resistive; a quarter-wave transformer matches it."
                    .to_string(),
            }
        }
    } else if load_swr > HIGH_SWR {
        Recommendation {
            topology: Some(TopologyOptions::SingleStub {
                stub_configuration: StubConfiguration::Shunt,
                stub_type: StubTermination::Short,
            }),
            suggested_z0_ohms: None,
            load_swr,
            reason: "The load SWR is high; a single-stub network gives the most flexibility."
                .to_string(),
        }
    } else if rl > z0 {
        Recommendation {
            topology: Some(TopologyOptions::LumpedElement {
                configuration: LumpedConfiguration::ShuntFirst,
            }),
            suggested_z0_ohms: None,
            load_swr,
            reason: "Load resistance exceeds the source impedance; use a shunt-first L network."
                .to_string(),
        }
    } else {
        Recommendation {
            topology: Some(TopologyOptions::LumpedElement {
                configuration: LumpedConfiguration::SeriesFirst,
            }),
            suggested_z0_ohms: None,
            load_swr,
            reason: "Load resistance is at most the source impedance; use a series-first L network."
                .to_string(),
        }
    };

    tracing::debug!(
        load_swr,
        topology = ?recommendation.topology,
        "recommendation computed"
    );
    Ok(recommendation)
}
