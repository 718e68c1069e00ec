use mn_synth::SynthError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Invalid band {start_mhz}..{end_mhz} MHz over {steps} steps: {what}")]
    InvalidBand {
        what: &'static str,
        start_mhz: f64,
        end_mhz: f64,
        steps: usize,
    },

    #[error("Evaluation failed at {frequency_mhz} MHz: {source}")]
    Evaluation {
        frequency_mhz: f64,
        #[source]
        source: SynthError,
    },
}

pub type SweepResult<T> = Result<T, SweepError>;
