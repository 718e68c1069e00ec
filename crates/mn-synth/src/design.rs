//! Topology dispatch over the three synthesizers.

use crate::error::{SynthError, SynthResult};
use crate::lumped::{self, LumpedDesign};
use crate::quarter_wave::{self, QuarterWaveDesign};
use crate::request::{DesignRequest, TopologyOptions};
use crate::stub::{self, StubDesign};
use crate::traits::MatchingNetwork;
use serde::{Deserialize, Serialize};

/// Result record of any topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topology", rename_all = "kebab-case")]
pub enum Design {
    QuarterWave(QuarterWaveDesign),
    LumpedElement(LumpedDesign),
    SingleStub(StubDesign),
}

/// Synthesize the topology named by `request.topology`.
pub fn synthesize(request: &DesignRequest) -> SynthResult<Design> {
    match request.topology {
        TopologyOptions::QuarterWave => quarter_wave::synthesize(request).map(Design::QuarterWave),
        TopologyOptions::LumpedElement { configuration } => {
            lumped::synthesize(request, configuration).map(Design::LumpedElement)
        }
        TopologyOptions::SingleStub {
            stub_configuration,
            stub_type,
        } => stub::synthesize(request, stub_configuration, stub_type).map(Design::SingleStub),
    }
}

impl Design {
    pub fn topology_name(&self) -> &'static str {
        match self {
            Design::QuarterWave(_) => "quarter-wave",
            Design::LumpedElement(_) => "lumped-element",
            Design::SingleStub(_) => "single-stub",
        }
    }

    pub fn solution_count(&self) -> usize {
        match self {
            Design::QuarterWave(_) => 1,
            Design::LumpedElement(d) => d.solutions.len(),
            Design::SingleStub(d) => d.solutions.len(),
        }
    }

    /// Solution used when the caller does not pick one: the shorter stub track,
    /// otherwise the first root.
    pub fn default_solution(&self) -> usize {
        match self {
            Design::SingleStub(d) => d.optimal,
            _ => 0,
        }
    }

    /// Boxed network for the solution at `index`.
    pub fn network(&self, index: usize) -> SynthResult<Box<dyn MatchingNetwork>> {
        match self {
            Design::QuarterWave(d) => {
                if index != 0 {
                    return Err(SynthError::SolutionIndex { index, count: 1 });
                }
                Ok(Box::new(d.network()))
            }
            Design::LumpedElement(d) => Ok(Box::new(d.network(index)?)),
            Design::SingleStub(d) => Ok(Box::new(d.network(index)?)),
        }
    }
}
