//! Sweeps over every topology.

use mn_core::Complex;
use mn_synth::{
    DesignRequest, LumpedConfiguration, MatchingNetwork, StubConfiguration, StubTermination,
    SynthError, SynthResult, TopologyOptions, synthesize,
};
use mn_sweep::{FrequencyBand, SweepError, sample_band, sample_response, summarize};
use proptest::prelude::*;

fn all_topologies() -> Vec<TopologyOptions> {
    let mut topologies = vec![
        TopologyOptions::LumpedElement {
            configuration: LumpedConfiguration::ShuntFirst,
        },
        TopologyOptions::LumpedElement {
            configuration: LumpedConfiguration::SeriesFirst,
        },
    ];
    for stub_configuration in [StubConfiguration::Shunt, StubConfiguration::Series] {
        for stub_type in [StubTermination::Short, StubTermination::Open] {
            topologies.push(TopologyOptions::SingleStub {
                stub_configuration,
                stub_type,
            });
        }
    }
    topologies
}

fn load_for(topology: &TopologyOptions) -> Complex {
    match topology {
        TopologyOptions::LumpedElement {
            configuration: LumpedConfiguration::SeriesFirst,
        } => Complex::new(20.0, 15.0),
        _ => Complex::new(120.0, -45.0),
    }
}

#[test]
fn test_every_topology_sweeps_101_points() {
    for topology in all_topologies() {
        let request = DesignRequest::new(load_for(&topology), 2400.0, 50.0, topology);
        let design = synthesize(&request).expect("synthesis should succeed");
        for index in 0..design.solution_count() {
            let network = design.network(index).expect("solution in range");
            let points = sample_response(network.as_ref()).expect("sweep should succeed");

            assert_eq!(points.len(), 101);
            assert!(points.iter().all(|p| p.swr >= 1.0 && p.swr.is_finite()));

            let summary = summarize(&points, 2.0).expect("non-empty sweep");
            assert_eq!(
                summary.best.frequency_mhz, 2400.0,
                "{} solution {index} should match best at the design frequency",
                design.topology_name()
            );
            assert!(summary.best.swr < 1.0 + 1e-6);
        }
    }
}

#[test]
fn test_sweep_is_deterministic() {
    let request = DesignRequest::new(
        Complex::new(75.0, 30.0),
        433.0,
        50.0,
        TopologyOptions::SingleStub {
            stub_configuration: StubConfiguration::Series,
            stub_type: StubTermination::Open,
        },
    );
    let first = {
        let design = synthesize(&request).expect("synthesis");
        let network = design.network(design.default_solution()).expect("network");
        sample_response(network.as_ref()).expect("sweep")
    };
    let second = {
        let design = synthesize(&request).expect("synthesis");
        let network = design.network(design.default_solution()).expect("network");
        sample_response(network.as_ref()).expect("sweep")
    };
    assert_eq!(first, second);
}

/// Network that cannot be evaluated above a cutoff.
struct Failing;

impl MatchingNetwork for Failing {
    fn topology(&self) -> &'static str {
        "failing"
    }

    fn load(&self) -> Complex {
        Complex::re(50.0)
    }

    fn design_frequency_mhz(&self) -> f64 {
        100.0
    }

    fn reference_impedance_ohms(&self) -> f64 {
        50.0
    }

    fn input_impedance(&self, frequency_mhz: f64) -> SynthResult<Complex> {
        if frequency_mhz > 120.0 {
            Err(SynthError::NumericDegeneracy { what: "test cutoff" })
        } else {
            Ok(Complex::re(50.0))
        }
    }
}

#[test]
fn test_failure_names_frequency() {
    let err = sample_response(&Failing).unwrap_err();
    match err {
        SweepError::Evaluation { frequency_mhz, .. } => {
            assert!(frequency_mhz > 120.0 && frequency_mhz < 122.0, "{frequency_mhz}");
        }
        other => panic!("unexpected error {other:?}"),
    }

    let band = FrequencyBand::new(50.0, 120.0, 7).expect("valid band");
    assert_eq!(sample_band(&Failing, &band).expect("below cutoff").len(), 8);
}

proptest! {
    #[test]
    fn swr_never_below_one(
        rl in 60.0_f64..400.0,
        xl in -200.0_f64..200.0,
        f in 10.0_f64..5000.0,
    ) {
        let request = DesignRequest::new(
            Complex::new(rl, xl),
            f,
            50.0,
            TopologyOptions::LumpedElement { configuration: LumpedConfiguration::ShuntFirst },
        );
        let design = synthesize(&request).unwrap();
        let network = design.network(0).unwrap();
        for p in sample_response(network.as_ref()).unwrap() {
            prop_assert!(p.swr >= 1.0);
        }
    }
}
