use clap::{Parser, Subcommand, ValueEnum};
use mn_app::{
    AppError, AppResult, DesignReport, MicrostripLayout, Substrate, design_service,
    request_service,
};
use mn_synth::{Design, LumpedDesign, QuarterWaveDesign, ReactiveComponent, StubDesign};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mn-cli")]
#[command(
    about = "MatchNet CLI - Narrow-band impedance matching network synthesis",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate request file syntax and values
    Validate {
        /// Path to the request YAML or JSON file
        request_path: PathBuf,
    },
    /// Synthesize the requested network
    Design {
        /// Path to the request YAML or JSON file
        request_path: PathBuf,
        /// Solution number to report (1-based, defaults to the file or the engine's pick)
        #[arg(long)]
        solution: Option<usize>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Export the frequency response of the chosen solution as CSV
    Sweep {
        /// Path to the request YAML or JSON file
        request_path: PathBuf,
        /// Solution number to sweep (1-based)
        #[arg(long)]
        solution: Option<usize>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Suggest a topology for the load in a request file
    Recommend {
        /// Path to the request YAML or JSON file
        request_path: PathBuf,
    },
    /// Dimension microstrip traces for a transmission-line design
    Microstrip {
        /// Path to the request YAML or JSON file
        request_path: PathBuf,
        /// Substrate height in millimeters
        #[arg(long)]
        height_mm: Option<f64>,
        /// Substrate relative permittivity
        #[arg(long)]
        substrate_er: Option<f64>,
        /// Solution number to lay out (1-based)
        #[arg(long)]
        solution: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { request_path } => cmd_validate(&request_path),
        Commands::Design {
            request_path,
            solution,
            format,
        } => cmd_design(&request_path, solution, format),
        Commands::Sweep {
            request_path,
            solution,
            output,
        } => cmd_sweep(&request_path, solution, output.as_deref()),
        Commands::Recommend { request_path } => cmd_recommend(&request_path),
        Commands::Microstrip {
            request_path,
            height_mm,
            substrate_er,
            solution,
        } => cmd_microstrip(&request_path, height_mm, substrate_er, solution),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_validate(request_path: &Path) -> AppResult<()> {
    println!("Validating request: {}", request_path.display());
    let file = request_service::load_request(request_path)?;
    request_service::validate_request(&file)?;
    println!("✓ Request is valid");
    Ok(())
}

fn cmd_design(request_path: &Path, solution: Option<usize>, format: OutputFormat) -> AppResult<()> {
    let mut file = request_service::load_request(request_path)?;
    if solution.is_some() {
        file.solution = solution;
    }
    let report = design_service::run_design_file(&file)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Serialize(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml =
                serde_yaml::to_string(&report).map_err(|e| AppError::Serialize(e.to_string()))?;
            print!("{}", yaml);
        }
        OutputFormat::Text => print_report(&report),
    }
    Ok(())
}

fn cmd_sweep(request_path: &Path, solution: Option<usize>, output: Option<&Path>) -> AppResult<()> {
    let mut file = request_service::load_request(request_path)?;
    if solution.is_some() {
        file.solution = solution;
    }
    let report = design_service::run_design_file(&file)?;
    let csv = design_service::sweep_csv(&report.sweep);

    if let Some(path) = output {
        std::fs::write(path, csv).map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        println!(
            "✓ Exported {} sweep points to {}",
            report.sweep.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn cmd_recommend(request_path: &Path) -> AppResult<()> {
    let file = request_service::load_request(request_path)?;
    let rec = mn_app::recommend(&file.request)?;

    println!("Load SWR: {:.2}", rec.load_swr);
    match rec.topology {
        None => println!("No matching network needed"),
        Some(topology) => println!("Recommended: {}", topology),
    }
    if let Some(z0) = rec.suggested_z0_ohms {
        println!("Suggested Z0: {:.2} Ω", z0);
    }
    println!("{}", rec.reason);
    Ok(())
}

fn cmd_microstrip(
    request_path: &Path,
    height_mm: Option<f64>,
    substrate_er: Option<f64>,
    solution: Option<usize>,
) -> AppResult<()> {
    let mut file = request_service::load_request(request_path)?;
    if solution.is_some() {
        file.solution = solution;
    }
    let mut substrate = file.substrate.unwrap_or_default();
    if let Some(h) = height_mm {
        substrate.height_mm = h;
    }
    if let Some(er) = substrate_er {
        substrate.relative_permittivity = er;
    }
    file.substrate = Some(substrate);

    let report = design_service::run_design_file(&file)?;
    let layout = mn_app::dimension(&report.design, report.selected_solution - 1, &substrate)?;
    print_layout(&layout, &substrate);
    Ok(())
}

fn print_report(report: &DesignReport) {
    match &report.design {
        Design::QuarterWave(qw) => print_quarter_wave(qw),
        Design::LumpedElement(lumped) => print_lumped(lumped),
        Design::SingleStub(stub) => print_stub(stub),
    }

    println!(
        "\nSweep (solution {}, {} points):",
        report.selected_solution,
        report.sweep.len()
    );
    if let Some(summary) = &report.summary {
        println!(
            "  Best SWR: {:.4} at {:.2} MHz",
            summary.best.swr, summary.best.frequency_mhz
        );
        match summary.matched_band_mhz {
            Some((lo, hi)) => println!(
                "  SWR <= {:.1}: {:.2} - {:.2} MHz ({:.2} MHz)",
                summary.swr_limit,
                lo,
                hi,
                summary.bandwidth_mhz()
            ),
            None => println!("  SWR never reaches {:.1}", summary.swr_limit),
        }
    }
}

fn print_quarter_wave(qw: &QuarterWaveDesign) {
    println!("Quarter-wave transformer:");
    println!("  Z0: {:.2} Ω", qw.characteristic_impedance_ohms);
    println!("  Wavelength: {:.3} mm", qw.wavelength_m * 1e3);
    println!("  Section length: {:.3} mm", qw.quarter_wave_length_m * 1e3);
}

fn print_lumped(lumped: &LumpedDesign) {
    println!("Lumped element network ({}):", lumped.configuration);
    println!("  Discriminant: {:.4}", lumped.discriminant);
    for (i, s) in lumped.solutions.iter().enumerate() {
        println!("\nSolution {}:", i + 1);
        println!(
            "  Shunt:  {} (B = {:.6} S)",
            format_component(&s.shunt),
            s.susceptance
        );
        println!(
            "  Series: {} (X = {:.3} Ω)",
            format_component(&s.series),
            s.reactance
        );
    }
}

fn print_stub(stub: &StubDesign) {
    println!(
        "Single stub network ({}, {}):",
        stub.configuration, stub.termination
    );
    println!("  Line impedance: {:.2} Ω", stub.line_impedance_ohms);
    println!("  Wavelength: {:.3} mm", stub.wavelength_m * 1e3);
    for (i, s) in stub.solutions.iter().enumerate() {
        let marker = if i == stub.optimal { " (optimal)" } else { "" };
        println!("\nSolution {}{}:", i + 1, marker);
        println!(
            "  Distance:    {:.4} λ  {:7.2}°  {:.3} mm",
            s.distance_wavelengths,
            s.distance_degrees(),
            s.distance_m * 1e3
        );
        println!(
            "  Stub length: {:.4} λ  {:7.2}°  {:.3} mm",
            s.stub_length_wavelengths,
            s.stub_length_degrees(),
            s.stub_length_m * 1e3
        );
    }
    println!("\n{}", stub.justification);
}

fn print_layout(layout: &MicrostripLayout, substrate: &Substrate) {
    println!(
        "Substrate: h = {:.3} mm, εr = {:.2}",
        substrate.height_mm, substrate.relative_permittivity
    );
    match layout {
        MicrostripLayout::QuarterWave {
            line, length_mm, ..
        } => {
            println!("Quarter-wave section ({:.2} Ω):", line.impedance_ohms);
            println!("  Width: {:.3} mm", line.width_mm);
            println!("  Length: {:.3} mm", length_mm);
            println!("  εeff: {:.3}", line.effective_permittivity);
        }
        MicrostripLayout::SingleStub {
            line,
            solution,
            distance_mm,
            stub_length_mm,
            ..
        } => {
            println!("Single stub, solution {} ({:.2} Ω):", solution, line.impedance_ohms);
            println!("  Line and stub width: {:.3} mm", line.width_mm);
            println!("  Distance from load: {:.3} mm", distance_mm);
            println!("  Stub length: {:.3} mm", stub_length_mm);
            println!("  εeff: {:.3}", line.effective_permittivity);
        }
    }
}

/// Component value with an engineering prefix, e.g. `2.196 pF`.
fn format_component(component: &ReactiveComponent) -> String {
    const PREFIXES: [(f64, &str); 5] = [
        (1e-15, "f"),
        (1e-12, "p"),
        (1e-9, "n"),
        (1e-6, "µ"),
        (1e-3, "m"),
    ];
    let unit = match component.unit {
        mn_synth::ComponentUnit::Henry => "H",
        mn_synth::ComponentUnit::Farad => "F",
    };
    let value = component.value;
    if value == 0.0 {
        return format!("none ({:?})", component.kind);
    }
    let (scale, prefix) = PREFIXES
        .iter()
        .rev()
        .find(|(scale, _)| value >= *scale)
        .copied()
        .unwrap_or(PREFIXES[0]);
    format!("{:?} {:.3} {}{}", component.kind, value / scale, prefix, unit)
}
