use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use vd_calc::{
    evaluate, filter_catalog, voltage_profile, CachedEngine, CalcError, CircuitConfiguration,
    CircuitType, ComplianceStatus, ConductorMaterial, ConductorSize, ConduitMaterial,
    PhaseConfiguration, VoltageDropInputs,
};
use vd_downsample::{estimate_optimal_point_count, lttb};
use vd_optimize::{
    compare_conductors, find_optimal_conductor_size, recommend_conductor, EconomicAssumptions,
    OptimizeError,
};

#[derive(Parser)]
#[command(name = "vd-cli")]
#[command(about = "Voltdrop CLI - conductor voltage drop and sizing tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Circuit parameters shared by the calculating subcommands.
#[derive(Args)]
struct CircuitArgs {
    /// System voltage in volts
    #[arg(long, default_value_t = 230.0)]
    voltage: f64,
    /// Load current in amperes
    #[arg(long)]
    current: f64,
    /// One-way conductor length in feet
    #[arg(long)]
    length: f64,
    /// Conductor size catalog key (e.g. "12 AWG", "250 kcmil")
    #[arg(long, default_value = "12 AWG")]
    size: ConductorSize,
    /// Conductor material: copper or aluminum
    #[arg(long, default_value = "copper")]
    material: ConductorMaterial,
    /// Conduit material: pvc, steel, or aluminum
    #[arg(long, default_value = "pvc")]
    conduit: ConduitMaterial,
    /// Phase configuration: single or three
    #[arg(long, default_value = "single")]
    phase: PhaseConfiguration,
    /// Ambient temperature in degrees Celsius
    #[arg(long, default_value_t = 30.0)]
    temperature: f64,
    /// Load power factor
    #[arg(long, default_value_t = 0.85)]
    power_factor: f64,
    /// Circuit type: branch, feeder, service, or motor
    #[arg(long, default_value = "branch")]
    circuit_type: CircuitType,
    /// Motor circuits: starting-current multiple of full-load current
    #[arg(long)]
    starting_multiplier: Option<f64>,
    /// Motor circuits: fed from a variable-frequency drive
    #[arg(long)]
    vfd: bool,
}

impl CircuitArgs {
    fn to_inputs(&self) -> VoltageDropInputs {
        let mut circuit = CircuitConfiguration::new(self.circuit_type);
        circuit.starting_current_multiplier = self.starting_multiplier;
        circuit.vfd_driven = self.vfd;
        VoltageDropInputs {
            system_voltage_v: self.voltage,
            load_current_a: self.current,
            conductor_length_ft: self.length,
            conductor_size: self.size,
            conductor_material: self.material,
            conduit_material: self.conduit,
            phase: self.phase,
            ambient_temperature_c: self.temperature,
            power_factor: self.power_factor,
            circuit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate voltage drop and compliance for one configuration
    Evaluate {
        #[command(flatten)]
        circuit: CircuitArgs,
        /// Emit the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },
    /// Find the minimum conductor size meeting drop and ampacity limits
    Optimize {
        #[command(flatten)]
        circuit: CircuitArgs,
    },
    /// Compare candidate sizes economically and recommend one
    Compare {
        #[command(flatten)]
        circuit: CircuitArgs,
        /// Candidate sizes (comma separated); defaults to the whole catalog
        #[arg(long, value_delimiter = ',')]
        candidates: Vec<ConductorSize>,
        /// Energy price in $/kWh
        #[arg(long, default_value_t = 0.12)]
        energy_price: f64,
        /// Operating hours per year
        #[arg(long, default_value_t = 3000.0)]
        hours: f64,
    },
    /// List the conductor catalog
    Catalog {
        /// Optional free-text filter
        query: Option<String>,
    },
    /// Export the downsampled voltage profile as CSV
    Profile {
        #[command(flatten)]
        circuit: CircuitArgs,
        /// Raw samples generated along the run
        #[arg(long, default_value_t = 500)]
        samples: usize,
        /// Chart container width in pixels
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error(transparent)]
    Optimize(#[from] OptimizeError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate { circuit, json } => cmd_evaluate(&circuit.to_inputs(), json),
        Commands::Optimize { circuit } => cmd_optimize(&circuit.to_inputs()),
        Commands::Compare {
            circuit,
            candidates,
            energy_price,
            hours,
        } => cmd_compare(&circuit.to_inputs(), candidates, energy_price, hours),
        Commands::Catalog { query } => cmd_catalog(query.as_deref().unwrap_or("")),
        Commands::Profile {
            circuit,
            samples,
            width,
            output,
        } => cmd_profile(&circuit.to_inputs(), samples, width, output.as_deref()),
    }
}

fn cmd_evaluate(inputs: &VoltageDropInputs, json: bool) -> CliResult<()> {
    let mut engine = CachedEngine::new();
    let result = engine.evaluate(inputs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {} over {} ft at {} A, {} V {}-phase",
        inputs.conductor_size,
        inputs.conductor_material,
        inputs.conductor_length_ft,
        inputs.load_current_a,
        inputs.system_voltage_v,
        inputs.phase,
    );
    println!(
        "  Voltage drop:   {:.2} V ({:.2}%, limit {:.1}%)",
        result.voltage_drop_v, result.voltage_drop_percent, result.max_allowed_drop_percent
    );
    println!("  Receiving end:  {:.2} V", result.receiving_end_voltage_v);
    println!(
        "  Losses:         {:.1} W resistive, {:.1} var reactive, {:.1} VA total",
        result.resistive_loss_w, result.reactive_loss_var, result.total_loss_va
    );
    println!(
        "  Ampacity:       {:.0} A ({})",
        result.ampacity.rating_a,
        if result.ampacity.adequate {
            "adequate"
        } else {
            "inadequate"
        }
    );
    match result.compliance {
        ComplianceStatus::Compliant => println!("✓ Compliant"),
        ComplianceStatus::NonCompliant => println!("✗ Non-compliant"),
    }
    for recommendation in &result.recommendations {
        println!("  - {recommendation}");
    }
    Ok(())
}

fn cmd_optimize(inputs: &VoltageDropInputs) -> CliResult<()> {
    let outcome = find_optimal_conductor_size(inputs)?;
    if outcome.satisfied {
        println!("✓ Minimum size meeting both constraints: {}", outcome.size);
    } else {
        println!(
            "⚠ No size in the catalog satisfies both constraints; largest is {}",
            outcome.size
        );
    }

    let mut sized = inputs.clone();
    sized.conductor_size = outcome.size;
    let result = evaluate(&sized)?;
    println!(
        "  Drop at {}: {:.2}% (limit {:.1}%), ampacity {:.0} A",
        outcome.size,
        result.voltage_drop_percent,
        result.max_allowed_drop_percent,
        result.ampacity.rating_a
    );
    Ok(())
}

fn cmd_compare(
    inputs: &VoltageDropInputs,
    candidates: Vec<ConductorSize>,
    energy_price: f64,
    hours: f64,
) -> CliResult<()> {
    let candidates = if candidates.is_empty() {
        ConductorSize::ALL.to_vec()
    } else {
        candidates
    };
    let assumptions = EconomicAssumptions {
        energy_price_per_kwh: energy_price,
        operating_hours_per_year: hours,
        ..EconomicAssumptions::default()
    };

    let rows = compare_conductors(inputs, &candidates, &assumptions)?;
    println!(
        "{:<12} {:>8} {:>10} {:>10} {:>10} {:>10} {:>9}",
        "Size", "Drop %", "Capital $", "Annual $", "5yr TCO $", "Payback", "Status"
    );
    for row in &rows {
        let payback = match row.payback_years {
            Some(years) => format!("{years:.1} yr"),
            None => "-".to_string(),
        };
        println!(
            "{:<12} {:>8.2} {:>10.0} {:>10.0} {:>10.0} {:>10} {:>9}",
            row.size.to_string(),
            row.voltage_drop_percent,
            row.capital_cost(),
            row.annual_operating_cost,
            row.total_cost_of_ownership,
            payback,
            if row.compliant { "ok" } else { "over" },
        );
    }

    let recommendation = recommend_conductor(inputs, &candidates, &assumptions)?;
    println!("\n✓ Recommended: {}", recommendation.recommended);
    println!("  {}", recommendation.reason);
    Ok(())
}

fn cmd_catalog(query: &str) -> CliResult<()> {
    let entries = filter_catalog(query);
    if entries.is_empty() {
        println!("No catalog entries match '{query}'");
        return Ok(());
    }
    println!(
        "{:<12} {:>12} {:>10} {:>10}",
        "Size", "Area (cmil)", "Cu (A)", "Al (A)"
    );
    for entry in entries {
        let fmt_ampacity = |a: Option<f64>| match a {
            Some(a) => format!("{a:.0}"),
            None => "-".to_string(),
        };
        println!(
            "{:<12} {:>12.0} {:>10} {:>10}",
            entry.size.to_string(),
            entry.area_cmil,
            fmt_ampacity(entry.ampacity_copper_a),
            fmt_ampacity(entry.ampacity_aluminum_a),
        );
    }
    Ok(())
}

fn cmd_profile(
    inputs: &VoltageDropInputs,
    samples: usize,
    width: f64,
    output: Option<&std::path::Path>,
) -> CliResult<()> {
    let raw = voltage_profile(inputs, samples)?;
    let budget = estimate_optimal_point_count(width, 1.0);
    let reduced = lttb(&raw, budget);
    tracing::debug!(raw = raw.len(), reduced = reduced.len(), "profile downsampled");

    let mut csv = String::from("distance_ft,voltage_v\n");
    for (distance, voltage) in &reduced {
        csv.push_str(&format!("{distance},{voltage}\n"));
    }

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} points ({} raw) to {}",
            reduced.len(),
            raw.len(),
            path.display()
        );
    } else {
        print!("{csv}");
        io::stdout().flush()?;
    }
    Ok(())
}
