//! mn-sweep: frequency response of synthesized matching networks.
//!
//! A [`FrequencyBand`] defines linearly spaced sample frequencies; the sampler
//! evaluates any [`mn_synth::MatchingNetwork`] at each one and reports input
//! impedance and scalar SWR against the network's reference impedance.

pub mod band;
pub mod error;
pub mod sampler;

pub use band::{DEFAULT_STEPS, FrequencyBand};
pub use error::{SweepError, SweepResult};
pub use sampler::{SweepPoint, SweepSummary, sample_band, sample_response, summarize};
