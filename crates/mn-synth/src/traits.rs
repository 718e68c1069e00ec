//! Core trait for synthesized networks.

use crate::error::SynthResult;
use mn_core::{Complex, Impedance, Real};

/// A matching network with every element fixed at its design value.
///
/// Networks are immutable values and deterministic functions of frequency, suitable
/// for sampling a response across a band from any number of callers.
pub trait MatchingNetwork: Send + Sync {
    /// Topology name for reports and logs.
    fn topology(&self) -> &'static str;

    /// Load the network terminates in.
    fn load(&self) -> Impedance;

    /// Frequency the network was synthesized for, in MHz.
    fn design_frequency_mhz(&self) -> Real;

    /// Real impedance the network is meant to present to the source, in ohms.
    fn reference_impedance_ohms(&self) -> Real;

    /// Impedance seen looking into the network from the source at `frequency_mhz`.
    ///
    /// # Arguments
    /// * `frequency_mhz` - Evaluation frequency (MHz), > 0
    ///
    /// # Returns
    /// Input impedance in ohms
    fn input_impedance(&self, frequency_mhz: Real) -> SynthResult<Complex>;

    /// Scalar SWR of the input impedance against the reference impedance.
    fn swr(&self, frequency_mhz: Real) -> SynthResult<Real> {
        let zin = self.input_impedance(frequency_mhz)?;
        Ok(mn_core::swr(zin, self.reference_impedance_ohms()))
    }
}
