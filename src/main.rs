//! Roster optimizer CLI.
//!
//! Solve a roster from scored candidate pairings, or evaluate a published
//! roster against nurse preferences.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_roster::config::{DoubleBooking, OptimizerConfig, SolverBackend};
use u_roster::kpi::RosterKpi;
use u_roster::models::{CandidatePairing, Roster, ShiftPreference, StaffingMode};
use u_roster::optimizer::RosterOptimizer;

/// Exit code for a proven-infeasible model.
const EXIT_INFEASIBLE: u8 = 2;

#[derive(Parser)]
#[command(name = "u-roster")]
#[command(about = "Nurse roster optimizer: staffing- and hours-constrained assignment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a roster from candidate pairings.
    Solve {
        /// Candidate pairings (JSON array)
        #[arg(short, long)]
        candidates: PathBuf,
        /// Optimizer configuration (JSON); flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        /// Minimum hours per nurse per fortnight
        #[arg(long)]
        min_hours: Option<f64>,
        /// Staffing rule for listed wards
        #[arg(long, value_enum)]
        staffing: Option<StaffingArg>,
        /// Forbid two pairings for one nurse at the same date and start time
        #[arg(long)]
        no_double_booking: bool,
        /// Solver backend
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,
        /// Wall-clock solve budget in milliseconds
        #[arg(long)]
        time_budget_ms: Option<u64>,
        /// Output file for the roster (JSON); stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Evaluate a roster against nurse preferences.
    Evaluate {
        /// Roster (JSON)
        #[arg(short, long)]
        roster: PathBuf,
        /// Preferences (JSON array)
        #[arg(short, long)]
        preferences: PathBuf,
        /// Optimizer configuration (JSON), for ward coverage
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StaffingArg {
    Exact,
    Minimum,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Milp,
    Bnb,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<OptimizerConfig> {
    match path {
        Some(p) => read_json(p),
        None => Ok(OptimizerConfig::default()),
    }
}

fn write_roster(roster: &Roster, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, roster)?;
            writer.flush()?;
            info!(path = %path.display(), "roster written");
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, roster)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

fn print_summary(kpi: &RosterKpi) {
    eprintln!("\n=== Roster Summary ===");
    eprintln!("Assignments: {}", kpi.assignment_count);
    eprintln!("Nurses: {}", kpi.nurse_count);
    eprintln!("Total score: {:.4}", kpi.total_score);
    eprintln!("Mean score: {:.4}", kpi.mean_score);
    for (ward, cov) in &kpi.coverage_by_ward {
        eprintln!(
            "Ward {}: {} slots, {} understaffed, coverage {:.1}%",
            ward,
            cov.slots,
            cov.understaffed_slots,
            cov.rate * 100.0
        );
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve {
            candidates,
            config,
            min_hours,
            staffing,
            no_double_booking,
            backend,
            time_budget_ms,
            output,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(hours) = min_hours {
                config = config.with_min_fortnight_hours(hours);
            }
            if let Some(staffing) = staffing {
                config = config.with_staffing_mode(match staffing {
                    StaffingArg::Exact => StaffingMode::Exact,
                    StaffingArg::Minimum => StaffingMode::Minimum,
                });
            }
            if no_double_booking {
                config = config.with_double_booking(DoubleBooking::Enabled);
            }
            if let Some(backend) = backend {
                config = config.with_backend(match backend {
                    BackendArg::Milp => SolverBackend::Milp,
                    BackendArg::Bnb => SolverBackend::BranchAndBound,
                });
            }
            if let Some(ms) = time_budget_ms {
                config = config.with_time_budget_ms(ms);
            }

            let pairings: Vec<CandidatePairing> = read_json(&candidates)?;
            info!(candidates = pairings.len(), "loaded candidate pairings");

            let optimizer = RosterOptimizer::new(config);
            let outcome = optimizer.solve(pairings).context("roster solve failed")?;
            let infeasible = outcome.is_infeasible();

            // An infeasible solve still publishes an (empty) roster.
            let roster = outcome.into_roster();
            write_roster(&roster, output.as_deref())?;

            if infeasible {
                eprintln!("No feasible roster: staffing and hour requirements conflict.");
                return Ok(ExitCode::from(EXIT_INFEASIBLE));
            }
            print_summary(&RosterKpi::calculate(&roster, optimizer.config()));
        }

        Commands::Evaluate {
            roster,
            preferences,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let roster: Roster = read_json(&roster)?;
            let preferences: Vec<ShiftPreference> = read_json(&preferences)?;

            let kpi = RosterKpi::evaluate(&roster, &config, &preferences);
            print_summary(&kpi);

            match kpi.preference_match_rate {
                Some(rate) => println!("Preference match rate: {:.2}%", rate * 100.0),
                None => println!("Preference match rate: n/a (empty roster)"),
            }
            println!("\nPer nurse preference match rate:");
            for (nurse, rate) in &kpi.preference_match_by_nurse {
                println!("  {nurse}: {:.2}%", rate * 100.0);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
