//! mn-synth: narrow-band impedance-matching synthesis.
//!
//! Provides closed-form designs for three topologies:
//! - Quarter-wave transformer (resistive loads)
//! - Two-element lumped L/C network, shunt-first or series-first
//! - Single stub on a transmission line, shunt or series, short or open
//!
//! Every synthesizer is a pure function of a [`DesignRequest`]. A finished design
//! can be turned into a [`MatchingNetwork`], which evaluates the input impedance of
//! the fixed network at any frequency.
//!
//! # Example
//!
//! ```
//! use mn_core::Complex;
//! use mn_synth::{DesignRequest, LumpedConfiguration, MatchingNetwork, TopologyOptions};
//!
//! let request = DesignRequest::new(
//!     Complex::new(100.0, 50.0),
//!     1000.0,
//!     50.0,
//!     TopologyOptions::LumpedElement {
//!         configuration: LumpedConfiguration::ShuntFirst,
//!     },
//! );
//!
//! let design = mn_synth::lumped::synthesize(&request, LumpedConfiguration::ShuntFirst).unwrap();
//! assert_eq!(design.solutions.len(), 2);
//!
//! let network = design.network(0).unwrap();
//! let zin = network.input_impedance(1000.0).unwrap();
//! assert!((zin.real - 50.0).abs() < 1e-6);
//! ```

pub mod common;
pub mod design;
pub mod error;
pub mod lumped;
pub mod quarter_wave;
pub mod request;
pub mod stub;
pub mod traits;

// Re-exports
pub use design::{Design, synthesize};
pub use error::{SynthError, SynthResult};
pub use lumped::{
    ComponentKind, ComponentUnit, LumpedDesign, LumpedNetwork, LumpedSolution, ReactiveComponent,
};
pub use quarter_wave::{QuarterWaveDesign, QuarterWaveNetwork};
pub use request::{
    DesignRequest, LumpedConfiguration, StubConfiguration, StubTermination, TopologyOptions,
};
pub use stub::{StubDesign, StubNetwork, StubRoot, StubSolution};
pub use traits::MatchingNetwork;
