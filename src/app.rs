//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads (or generates) the operations log
//! - runs the KPI report pipeline
//! - prints reports and writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, ReportArgs, SampleArgs};
use crate::data::SampleConfig;
use crate::domain::MetricSpec;
use crate::error::AppError;
use crate::kpi::report::standard_metrics;

pub mod pipeline;

/// Entry point for the `fops` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let log = crate::io::ingest::load_event_log(&args.csv)?;
    let specs = select_metrics(&args.metrics)?;

    let run = pipeline::run_reports(&log.dataset, &specs)?;

    print!("{}", crate::report::format_ingest_summary(&log));
    println!();
    print!("{}", crate::report::format_run(&run));

    if let Some(path) = &args.json {
        crate::io::export::write_report_json(path, &run)?;
        println!("Report set written to {}", path.display());
    }

    Ok(())
}

/// Resolve `--metric` selections against the standard set.
fn select_metrics(names: &[String]) -> Result<Vec<MetricSpec>, AppError> {
    let all = standard_metrics();
    if names.is_empty() {
        return Ok(all);
    }

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        match all.iter().find(|m| m.name == *name) {
            Some(spec) => selected.push(spec.clone()),
            None => {
                let known: Vec<&str> = all.iter().map(|m| m.name.as_str()).collect();
                return Err(AppError::new(
                    2,
                    format!("Unknown metric '{name}'. Known metrics: {}", known.join(", ")),
                ));
            }
        }
    }
    Ok(selected)
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        anchor: args.anchor,
        days: args.days,
        seed: args.seed,
        flights_per_day: args.flights_per_day,
    };
    let dataset = crate::data::generate_log(&config)?;
    crate::io::export::write_log_csv(&args.out, &dataset)?;

    println!(
        "Wrote {} flights across {} days (anchor {}) to {}",
        dataset.len(),
        args.days,
        args.anchor,
        args.out.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_means_all_standard_metrics() {
        let specs = select_metrics(&[]).unwrap();
        assert_eq!(specs.len(), 5);
    }

    #[test]
    fn selection_keeps_request_order() {
        let specs =
            select_metrics(&["cancellations".to_string(), "flights".to_string()]).unwrap();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["cancellations", "flights"]);
    }

    #[test]
    fn unknown_metric_is_a_usage_error() {
        let err = select_metrics(&["runway-incursions".to_string()]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("cargo-weight"));
    }
}
