//! Shared application service layer for matchnet.
//!
//! Centralizes what every frontend needs around the synthesis engine: request
//! files, running a design with its sweep, topology recommendation and
//! microstrip dimensioning.

pub mod advisor;
pub mod design_service;
pub mod error;
pub mod microstrip;
pub mod request_service;

// Re-export key types for convenience
pub use advisor::{Recommendation, recommend};
pub use design_service::{
    DesignReport, MATCHED_SWR, run_design, run_design_file, select_solution, sweep_csv,
};
pub use error::{AppError, AppResult};
pub use microstrip::{MicrostripLayout, MicrostripLine, Substrate, dimension, synthesize_line};
pub use request_service::{DesignFile, load_request, save_request, validate_request};
