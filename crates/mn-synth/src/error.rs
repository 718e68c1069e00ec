//! Error types for synthesis operations.

use crate::request::LumpedConfiguration;
use mn_core::CoreError;
use thiserror::Error;

/// Errors that can occur while synthesizing or evaluating a matching network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthError {
    #[error("Invalid input: {what} = {value}")]
    InvalidInput { what: &'static str, value: f64 },

    #[error("Unsupported load for {topology}: reactance {reactance} ohm (load must be resistive)")]
    UnsupportedLoad {
        topology: &'static str,
        reactance: f64,
    },

    #[error("No real solution for {configuration} configuration (discriminant = {discriminant})")]
    NoRealSolution {
        configuration: LumpedConfiguration,
        discriminant: f64,
    },

    #[error("Numeric degeneracy: {what}")]
    NumericDegeneracy { what: &'static str },

    #[error("Solution index {index} out of range ({count} available)")]
    SolutionIndex { index: usize, count: usize },
}

pub type SynthResult<T> = Result<T, SynthError>;

impl From<CoreError> for SynthError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NumericDegeneracy { what, .. } => SynthError::NumericDegeneracy { what },
            CoreError::NonFinite { what, .. } => SynthError::NumericDegeneracy { what },
            CoreError::InvalidArg { what } => SynthError::InvalidInput {
                what,
                value: f64::NAN,
            },
        }
    }
}
