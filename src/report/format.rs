//! Formatted terminal output for KPI report sets.
//!
//! We keep formatting code in one place so:
//! - the engine stays clean and testable
//! - output changes are localized (important for future snapshot tests)
//!
//! All functions return `String`; the caller decides where it goes.

use crate::app::pipeline::{MetricOutcome, RunOutput};
use crate::domain::{KpiReport, Trend};
use crate::io::ingest::IngestedLog;

/// How many row-level ingest errors to show before truncating.
const MAX_ROW_ERRORS_SHOWN: usize = 5;

/// Format the ingest accounting (rows read/used + sample of row errors).
pub fn format_ingest_summary(log: &IngestedLog) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Loaded {} of {} rows",
        log.rows_used, log.rows_read
    ));
    if log.row_errors.is_empty() {
        out.push_str(".\n");
        return out;
    }

    out.push_str(&format!(" ({} skipped):\n", log.row_errors.len()));
    for err in log.row_errors.iter().take(MAX_ROW_ERRORS_SHOWN) {
        out.push_str(&format!("  line {}: {}\n", err.line, err.message));
    }
    if log.row_errors.len() > MAX_ROW_ERRORS_SHOWN {
        out.push_str(&format!(
            "  ... and {} more\n",
            log.row_errors.len() - MAX_ROW_ERRORS_SHOWN
        ));
    }
    out
}

/// Format the full run: header plus one block per metric outcome.
pub fn format_run(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== fops - Flight Operations KPIs ===\n");
    out.push_str(&format!("Anchor date: {}\n\n", run.anchor));

    for outcome in &run.outcomes {
        out.push_str(&format_outcome(outcome));
        out.push('\n');
    }

    out
}

/// Format one metric outcome (report table or failure line).
pub fn format_outcome(outcome: &MetricOutcome) -> String {
    match &outcome.result {
        Ok(report) => format_report(report),
        Err(err) => format!("(failed {}) {err}\n", outcome.spec.name),
    }
}

/// Format a single KPI report as a fixed-width table.
pub fn format_report(report: &KpiReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} - today: {} ({})\n",
        report.metric.name,
        fmt_value(report.today),
        report.metric.direction.display_name(),
    ));
    out.push_str(&format!(
        "{:<12} {:>10} {:>10} {:>9} {:>9}\n",
        "Period", "Mean", "Median", "D mean", "D median"
    ));

    for c in &report.comparisons {
        let trend = match report.metric.direction.classify(c.delta_mean) {
            Trend::Improved => "+",
            Trend::Flat => " ",
            Trend::Degraded => "-",
        };
        out.push_str(&format!(
            "{:<12} {:>10} {:>10} {:>9} {:>9}  {trend}\n",
            c.period.display_name(),
            fmt_value(c.baseline),
            c.median.map_or("-".to_string(), fmt_value),
            fmt_delta(c.delta_mean),
            c.delta_median.map_or("-".to_string(), fmt_delta),
        ));
    }

    out
}

/// One decimal place, with a trailing `.0` trimmed for whole values.
fn fmt_value(v: f64) -> String {
    let text = format!("{v:.1}");
    text.strip_suffix(".0").map(str::to_string).unwrap_or(text)
}

/// Signed percentage with an explicit `+` on positive deltas.
fn fmt_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{delta}%")
    } else {
        format!("{delta}%")
    }
}
