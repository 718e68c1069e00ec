//! Sampling a fixed network across a band.

use crate::band::FrequencyBand;
use crate::error::{SweepError, SweepResult};
use mn_core::{Complex, SWR_CEILING};
use mn_synth::MatchingNetwork;
use serde::{Deserialize, Serialize};

/// Input impedance and mismatch at one sample frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub frequency_mhz: f64,
    pub real: f64,
    pub imag: f64,
    pub swr: f64,
}

impl SweepPoint {
    pub fn impedance(&self) -> Complex {
        Complex::new(self.real, self.imag)
    }
}

/// Sample `network` over the default band around its design frequency.
pub fn sample_response(network: &dyn MatchingNetwork) -> SweepResult<Vec<SweepPoint>> {
    let band = FrequencyBand::around_design(network.design_frequency_mhz())?;
    sample_band(network, &band)
}

/// Sample `network` at every frequency of `band`.
///
/// The first failing evaluation aborts the sweep; no partial sequence is returned.
pub fn sample_band(
    network: &dyn MatchingNetwork,
    band: &FrequencyBand,
) -> SweepResult<Vec<SweepPoint>> {
    band.validate()?;
    let z0 = network.reference_impedance_ohms();

    let points = band
        .frequencies()
        .into_iter()
        .map(|frequency_mhz| {
            let zin = network
                .input_impedance(frequency_mhz)
                .map_err(|source| SweepError::Evaluation {
                    frequency_mhz,
                    source,
                })?;
            Ok(SweepPoint {
                frequency_mhz,
                real: zin.real,
                imag: zin.imag,
                swr: mn_core::swr(zin, z0),
            })
        })
        .collect::<SweepResult<Vec<_>>>()?;

    let saturated = points.iter().filter(|p| p.swr >= SWR_CEILING).count();
    if saturated > 0 {
        tracing::warn!(
            topology = network.topology(),
            saturated,
            "SWR saturated at some sweep points"
        );
    }
    tracing::debug!(
        topology = network.topology(),
        points = points.len(),
        start_mhz = band.start_mhz,
        end_mhz = band.end_mhz,
        "sweep complete"
    );

    Ok(points)
}

/// Best match in a sweep and the contiguous band around it below an SWR limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub best: SweepPoint,
    pub swr_limit: f64,
    /// Lowest and highest sample frequency of the run below `swr_limit`
    /// containing `best`, if `best` itself is below the limit
    pub matched_band_mhz: Option<(f64, f64)>,
}

impl SweepSummary {
    pub fn bandwidth_mhz(&self) -> f64 {
        self.matched_band_mhz.map_or(0.0, |(lo, hi)| hi - lo)
    }
}

/// Summarize a sweep. Returns `None` for an empty sequence.
pub fn summarize(points: &[SweepPoint], swr_limit: f64) -> Option<SweepSummary> {
    let (best_index, best) = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.swr.total_cmp(&b.swr))?;

    let matched_band_mhz = (best.swr <= swr_limit).then(|| {
        let mut lo = best_index;
        while lo > 0 && points[lo - 1].swr <= swr_limit {
            lo -= 1;
        }
        let mut hi = best_index;
        while hi + 1 < points.len() && points[hi + 1].swr <= swr_limit {
            hi += 1;
        }
        (points[lo].frequency_mhz, points[hi].frequency_mhz)
    });

    Some(SweepSummary {
        best: *best,
        swr_limit,
        matched_band_mhz,
    })
}
