//! Linearly spaced sweep bands.

use crate::error::{SweepError, SweepResult};
use serde::{Deserialize, Serialize};

/// Number of equal steps across the default band (101 samples).
pub const DEFAULT_STEPS: usize = 100;

/// Closed frequency interval sampled at `steps + 1` equally spaced points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    pub start_mhz: f64,
    pub end_mhz: f64,
    pub steps: usize,
}

impl FrequencyBand {
    pub fn new(start_mhz: f64, end_mhz: f64, steps: usize) -> SweepResult<Self> {
        let band = Self {
            start_mhz,
            end_mhz,
            steps,
        };
        band.validate()?;
        Ok(band)
    }

    /// Band from half to one and a half times the design frequency.
    pub fn around_design(design_mhz: f64) -> SweepResult<Self> {
        Self::new(design_mhz * 0.5, design_mhz * 1.5, DEFAULT_STEPS)
    }

    pub fn validate(&self) -> SweepResult<()> {
        let fail = |what| SweepError::InvalidBand {
            what,
            start_mhz: self.start_mhz,
            end_mhz: self.end_mhz,
            steps: self.steps,
        };
        if !self.start_mhz.is_finite() || self.start_mhz <= 0.0 {
            return Err(fail("start frequency must be positive"));
        }
        if !self.end_mhz.is_finite() || self.end_mhz <= self.start_mhz {
            return Err(fail("end frequency must exceed start frequency"));
        }
        if self.steps == 0 {
            return Err(fail("at least one step is required"));
        }
        Ok(())
    }

    pub fn sample_count(&self) -> usize {
        self.steps + 1
    }

    /// Sample frequencies in ascending order, both ends included.
    pub fn frequencies(&self) -> Vec<f64> {
        let span = self.end_mhz - self.start_mhz;
        let n = self.steps as f64;
        (0..=self.steps)
            .map(|i| {
                if i == self.steps {
                    // Pin the last sample to the band edge
                    self.end_mhz
                } else {
                    self.start_mhz + span * (i as f64) / n
                }
            })
            .collect()
    }
}
