//! CSV ingest and normalization.
//!
//! This module turns a heterogeneous operations-log CSV into a clean
//! [`Dataset`] that is safe to index and aggregate.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden inference beyond the alias map)
//! - **Separation of concerns**: no KPI logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::data::Dataset;
use crate::domain::{DelayCategory, EventRecord, TimeOfDay};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the loaded dataset plus row-level accounting.
#[derive(Debug, Clone)]
pub struct IngestedLog {
    pub dataset: Dataset,
    pub rows_read: usize,
    pub rows_used: usize,
    pub row_errors: Vec<RowError>,
}

/// Canonical column names, in required-first order.
const COL_DATE: &str = "date";
const COL_HOUR: &str = "hour";
const COL_PASSENGERS: &str = "passengers";
const COL_CARGO: &str = "cargo_kg";
const COL_DELAY: &str = "delay";
const COL_CANCELLED: &str = "cancelled";
const COL_ARRIVAL: &str = "arrival";
const COL_TIME_OF_DAY: &str = "time_of_day";

/// Load and normalize an operations log CSV.
pub fn load_event_log(path: &Path) -> Result<IngestedLog, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row, and CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(row) => records.push(row),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = records.len();
    Ok(IngestedLog {
        dataset: Dataset::from_records(records),
        rows_read,
        rows_used,
        row_errors,
    })
}

/// Map canonical column names to indices, resolving common aliases.
fn build_header_map(headers: &StringRecord) -> HashMap<&'static str, usize> {
    let mut map = HashMap::new();
    for (idx, raw) in headers.iter().enumerate() {
        let name = raw.trim().to_ascii_lowercase();
        let canonical = match name.as_str() {
            "date" | "day" => COL_DATE,
            "hour" => COL_HOUR,
            "passengers" | "total_passengers" => COL_PASSENGERS,
            "cargo_kg" | "cargo" | "total_cargo" => COL_CARGO,
            "delay" | "delay_category" | "delaycategory" => COL_DELAY,
            "cancelled" | "is_cancelled" | "iscancelled" => COL_CANCELLED,
            "arrival" | "arrival_airport" | "arrivalairport" => COL_ARRIVAL,
            "time_of_day" | "timeofday" => COL_TIME_OF_DAY,
            _ => continue,
        };
        // First occurrence wins; later duplicates are ignored.
        map.entry(canonical).or_insert(idx);
    }
    map
}

fn ensure_required_columns_exist(header_map: &HashMap<&'static str, usize>) -> Result<(), AppError> {
    let required = [
        COL_DATE,
        COL_PASSENGERS,
        COL_CARGO,
        COL_DELAY,
        COL_CANCELLED,
        COL_ARRIVAL,
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|c| !header_map.contains_key(**c))
        .copied()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::new(
            2,
            format!("CSV is missing required column(s): {}", missing.join(", ")),
        ))
    }
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<&'static str, usize>,
) -> Result<EventRecord, String> {
    let field = |name: &'static str| -> Option<&str> {
        header_map.get(name).and_then(|&idx| record.get(idx))
    };

    let date_text = field(COL_DATE).ok_or("missing date cell")?;
    let date = parse_date(date_text)?;

    // Hour is optional; intra-day metrics degrade gracefully without it.
    let hour = match field(COL_HOUR) {
        Some(text) if !text.is_empty() => text
            .parse::<u8>()
            .ok()
            .filter(|h| *h < 24)
            .ok_or_else(|| format!("invalid hour '{text}'"))?,
        _ => 0,
    };

    let passengers_text = field(COL_PASSENGERS).ok_or("missing passengers cell")?;
    let passengers = passengers_text
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u32)
        .ok_or_else(|| format!("invalid passengers '{passengers_text}'"))?;

    let cargo_text = field(COL_CARGO).ok_or("missing cargo cell")?;
    let cargo_kg = cargo_text
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| format!("invalid cargo weight '{cargo_text}'"))?;

    let delay_text = field(COL_DELAY).ok_or("missing delay cell")?;
    let delay: DelayCategory = delay_text.parse()?;

    let cancelled_text = field(COL_CANCELLED).ok_or("missing cancelled cell")?;
    let cancelled = parse_bool(cancelled_text)?;

    let arrival = field(COL_ARRIVAL)
        .filter(|s| !s.is_empty())
        .ok_or("missing arrival cell")?
        .to_string();

    // Time-of-day bucket is derivable from the hour when absent.
    let time_of_day = match field(COL_TIME_OF_DAY) {
        Some(text) if !text.is_empty() => parse_time_of_day(text)?,
        _ => TimeOfDay::from_hour(hour),
    };

    Ok(EventRecord {
        date,
        hour,
        passengers,
        cargo_kg,
        delay,
        cancelled,
        arrival,
        time_of_day,
    })
}

/// Accept ISO (`2024-05-15`) and dotted (`15.05.2024`) dates.
fn parse_date(text: &str) -> Result<NaiveDate, String> {
    text.parse::<NaiveDate>()
        .or_else(|_| NaiveDate::parse_from_str(text, "%d.%m.%Y"))
        .map_err(|_| format!("invalid date '{text}'"))
}

fn parse_bool(text: &str) -> Result<bool, String> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(format!("invalid boolean '{other}'")),
    }
}

fn parse_time_of_day(text: &str) -> Result<TimeOfDay, String> {
    match text.to_ascii_lowercase().as_str() {
        "night" => Ok(TimeOfDay::Night),
        "morning" => Ok(TimeOfDay::Morning),
        "afternoon" | "day" => Ok(TimeOfDay::Afternoon),
        "evening" => Ok(TimeOfDay::Evening),
        other => Err(format!("unknown time-of-day bucket '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_from_str(stem: &str, contents: &str) -> Result<IngestedLog, AppError> {
        let mut path = std::env::temp_dir();
        path.push(format!("fops-ingest-{stem}-{}.csv", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        let result = load_event_log(&path);
        let _ = std::fs::remove_file(&path);
        result
    }

    #[test]
    fn loads_well_formed_rows() {
        let log = load_from_str(
            "well-formed",
            "date,hour,passengers,cargo_kg,delay,cancelled,arrival\n\
             2024-05-14,9,120,1500.5,minor,false,SVO\n\
             2024-05-15,18,90,800.0,on-time,true,LED\n",
        )
        .unwrap();

        assert_eq!(log.rows_read, 2);
        assert_eq!(log.rows_used, 2);
        assert!(log.row_errors.is_empty());

        let records = log.dataset.records();
        assert_eq!(records[0].passengers, 120);
        assert_eq!(records[0].delay, DelayCategory::Minor);
        assert_eq!(records[1].cancelled, true);
        // Derived from hour 18 because the column is absent.
        assert_eq!(records[1].time_of_day, TimeOfDay::Evening);
    }

    #[test]
    fn header_aliases_are_resolved() {
        let log = load_from_str(
            "aliases",
            "Date,Hour,Total_Passengers,Total_Cargo,DelayCategory,IsCancelled,ArrivalAirport\n\
             15.05.2024,7,200,2500,severe,no,KZN\n",
        )
        .unwrap();

        assert_eq!(log.rows_used, 1);
        let r = &log.dataset.records()[0];
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
        assert_eq!(r.delay, DelayCategory::Severe);
        assert!(!r.cancelled);
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let log = load_from_str(
            "bad-rows",
            "date,passengers,cargo_kg,delay,cancelled,arrival\n\
             2024-05-14,120,1500,minor,false,SVO\n\
             not-a-date,120,1500,minor,false,SVO\n\
             2024-05-15,-5,1500,minor,false,SVO\n\
             2024-05-15,90,800,weird,false,SVO\n",
        )
        .unwrap();

        assert_eq!(log.rows_read, 4);
        assert_eq!(log.rows_used, 1);
        assert_eq!(log.row_errors.len(), 3);
        // Line numbers are 1-based CSV lines, headers on line 1.
        assert_eq!(log.row_errors[0].line, 3);
    }

    #[test]
    fn missing_required_column_is_a_usage_error() {
        let err =
            load_from_str("missing-column", "date,passengers\n2024-05-14,120\n").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
