//! Synthesis, solution selection and sweep for one request.

use mn_sweep::{SweepPoint, SweepSummary, sample_response, summarize};
use mn_synth::{Design, DesignRequest, synthesize};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::request_service::{DesignFile, validate_request};

/// SWR at or below which a sweep point counts as matched in the summary.
pub const MATCHED_SWR: f64 = 2.0;

/// Everything a frontend shows for one design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    pub design: Design,
    /// 1-based solution the sweep was computed for
    pub selected_solution: usize,
    pub sweep: Vec<SweepPoint>,
    pub summary: Option<SweepSummary>,
}

/// Synthesize `request` and sweep the chosen solution.
///
/// `solution` is 1-based; `None` picks the design's default solution.
pub fn run_design(request: &DesignRequest, solution: Option<usize>) -> AppResult<DesignReport> {
    let design = synthesize(request)?;
    let index = select_solution(&design, solution)?;

    let network = design.network(index)?;
    let sweep = sample_response(network.as_ref())?;
    let summary = summarize(&sweep, MATCHED_SWR);

    tracing::info!(
        topology = design.topology_name(),
        solutions = design.solution_count(),
        selected = index + 1,
        points = sweep.len(),
        "design complete"
    );

    Ok(DesignReport {
        design,
        selected_solution: index + 1,
        sweep,
        summary,
    })
}

/// Validate a request file and run it.
pub fn run_design_file(file: &DesignFile) -> AppResult<DesignReport> {
    validate_request(file)?;
    run_design(&file.request, file.solution)
}

/// 0-based index for a 1-based `solution`, or the design's default.
pub fn select_solution(design: &Design, solution: Option<usize>) -> AppResult<usize> {
    let count = design.solution_count();
    match solution {
        None => Ok(design.default_solution()),
        Some(n) if (1..=count).contains(&n) => Ok(n - 1),
        Some(n) => Err(AppError::InvalidInput(format!(
            "solution {n} requested but the {} design has {count}",
            design.topology_name()
        ))),
    }
}

/// Sweep as CSV with a `frequency_mhz,real,imag,swr` header.
pub fn sweep_csv(points: &[SweepPoint]) -> String {
    let mut csv = String::from("frequency_mhz,real,imag,swr\n");
    for p in points {
        csv.push_str(&format!("{},{},{},{}\n", p.frequency_mhz, p.real, p.imag, p.swr));
    }
    csv
}
