//! Error types for the mn-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the engine crates, shared by every frontend.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read request file: {path}")]
    RequestFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse request file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported request file format (expected .yaml, .yml or .json): {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Request validation failed: {0}")]
    Validation(String),

    #[error("Synthesis error: {0}")]
    Synth(String),

    #[error("Sweep error: {0}")]
    Sweep(String),

    #[error("Microstrip error: {message}")]
    Microstrip { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for mn-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<mn_synth::SynthError> for AppError {
    fn from(err: mn_synth::SynthError) -> Self {
        match err {
            mn_synth::SynthError::InvalidInput { .. } => AppError::Validation(err.to_string()),
            other => AppError::Synth(other.to_string()),
        }
    }
}

impl From<mn_sweep::SweepError> for AppError {
    fn from(err: mn_sweep::SweepError) -> Self {
        AppError::Sweep(err.to_string())
    }
}
