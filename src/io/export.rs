//! Exports: report-set JSON and operations-log CSV.
//!
//! Both formats are meant to be easy to consume in spreadsheets or
//! downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::data::Dataset;
use crate::error::AppError;
use crate::domain::KpiReport;

/// JSON envelope for a computed report set.
#[derive(Debug, Serialize)]
struct ReportFile<'a> {
    tool: &'static str,
    anchor_date: NaiveDate,
    metrics: Vec<MetricEntry<'a>>,
}

/// One metric inside the envelope: either a report or its failure text.
#[derive(Debug, Serialize)]
struct MetricEntry<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a KpiReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Write the computed report set to a JSON file.
pub fn write_report_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let metrics = run
        .outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(report) => MetricEntry {
                name: &outcome.spec.name,
                report: Some(report),
                error: None,
            },
            Err(err) => MetricEntry {
                name: &outcome.spec.name,
                report: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    let envelope = ReportFile {
        tool: "fops",
        anchor_date: run.anchor,
        metrics,
    };

    let json = serde_json::to_string_pretty(&envelope)
        .map_err(|e| AppError::new(4, format!("Failed to serialize report JSON: {e}")))?;
    std::fs::write(path, json).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to write report JSON '{}': {e}", path.display()),
        )
    })
}

/// Write a dataset back out as an ingest-compatible operations log CSV.
pub fn write_log_csv(path: &Path, dataset: &Dataset) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display()))
    })?;

    writeln!(
        file,
        "date,hour,passengers,cargo_kg,delay,cancelled,arrival,time_of_day"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;

    for r in dataset.records() {
        writeln!(
            file,
            "{},{},{},{:.1},{},{},{},{}",
            r.date,
            r.hour,
            r.passengers,
            r.cargo_kg,
            r.delay.display_name(),
            r.cancelled,
            r.arrival,
            r.time_of_day.display_name(),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DelayCategory, EventRecord, TimeOfDay};
    use crate::io::ingest::load_event_log;

    #[test]
    fn log_csv_round_trips_through_ingest() {
        let dataset = Dataset::from_records(vec![EventRecord {
            date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            hour: 19,
            passengers: 142,
            cargo_kg: 2310.5,
            delay: DelayCategory::Minor,
            cancelled: false,
            arrival: "OVB".to_string(),
            time_of_day: TimeOfDay::Evening,
        }]);

        let mut path = std::env::temp_dir();
        path.push(format!("fops-export-roundtrip-{}.csv", std::process::id()));
        write_log_csv(&path, &dataset).unwrap();
        let log = load_event_log(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(log.rows_used, 1);
        assert_eq!(log.dataset.records(), dataset.records());
    }
}
