//! Command-line parsing for the flight-operations KPI dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the engine code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fops", version, about = "Flight-operations KPI dashboard (terminal)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load an operations log CSV, compute the KPI reports, and print them.
    Report(ReportArgs),
    /// Generate a synthetic operations log CSV for demos and testing.
    Sample(SampleArgs),
}

/// Options for `fops report`.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Path to the operations log CSV.
    pub csv: PathBuf,

    /// Compute only the named metrics (repeatable; default: all standard KPIs).
    #[arg(long = "metric")]
    pub metrics: Vec<String>,

    /// Export the computed report set to a JSON file.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Options for `fops sample`.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short, long, default_value = "flight_log.csv")]
    pub out: PathBuf,

    /// Number of calendar days to generate, ending at the anchor date.
    #[arg(long, default_value_t = 540)]
    pub days: u32,

    /// Anchor ("today") date of the generated log, YYYY-MM-DD.
    #[arg(long, default_value = "2024-05-15")]
    pub anchor: NaiveDate,

    /// Random seed (same seed, same log).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Mean flights per day before weekday seasonality.
    #[arg(long, default_value_t = 48.0)]
    pub flights_per_day: f64,
}
