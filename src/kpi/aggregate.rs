//! Window aggregation: daily series and their reductions.
//!
//! For each aggregated window the metric's extractor runs once per calendar
//! day that has at least one matching row; days with none are simply absent
//! from the series (no zero-filling). The series then reduces to:
//!
//! - a **central value**, with a deliberate dual convention:
//!   count/sum metrics divide the window total by the inclusive calendar day
//!   count (absent days dilute the rate), while per-event-mean metrics take
//!   the mean of the series (only days with qualifying activity count);
//! - a **median** over the series values.
//!
//! `BaselineMode::WindowTotal` short-circuits both: the baseline is the plain
//! window total and no median is reported.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::data::DatasetIndex;
use crate::domain::{BaselineMode, MetricKind, MetricSpec, PeriodWindow};
use crate::error::KpiError;
use crate::kpi::extract::day_value;
use crate::math::{mean, median};

/// Per-day scalar values for one metric over one window.
///
/// Ordered by date; days without matching rows are absent.
pub type DailySeries = BTreeMap<NaiveDate, f64>;

/// A window baseline ready for delta computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowBaseline {
    pub central: f64,
    /// `None` for window-total baselines.
    pub median: Option<f64>,
}

/// Build the daily series for a window.
///
/// Only days with at least one matching row reach the extractor, so the
/// per-event-mean empty-day error cannot surface from here.
pub fn daily_series(
    index: &DatasetIndex<'_>,
    window: &PeriodWindow,
    spec: &MetricSpec,
) -> Result<DailySeries, KpiError> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&crate::domain::EventRecord>> = BTreeMap::new();
    for row in index.rows_matching(window.start, window.end, &spec.filter) {
        by_day.entry(row.date).or_default().push(row);
    }

    let mut series = DailySeries::new();
    for (date, rows) in by_day {
        let value = day_value(spec.kind, date, rows.into_iter())?;
        series.insert(date, value);
    }
    Ok(series)
}

/// Reduce a window to its baseline central value and median.
///
/// Errors with `InsufficientData` when the window is degenerate (first day of
/// a month/quarter/year) or when no day in range had matching rows.
pub fn reduce_window(
    window: &PeriodWindow,
    series: &DailySeries,
    spec: &MetricSpec,
) -> Result<WindowBaseline, KpiError> {
    if window.is_empty() {
        return Err(KpiError::insufficient(format!(
            "{} window is empty for this anchor date",
            window.period.display_name()
        )));
    }
    if series.is_empty() {
        return Err(KpiError::insufficient(format!(
            "no matching rows in the {} window {}..={}",
            window.period.display_name(),
            window.start,
            window.end
        )));
    }

    let values: Vec<f64> = series.values().copied().collect();
    let total: f64 = values.iter().sum();

    if spec.baseline == BaselineMode::WindowTotal && !matches!(spec.kind, MetricKind::PerEventMean(_)) {
        return Ok(WindowBaseline {
            central: total,
            median: None,
        });
    }

    let central = match spec.kind {
        // Per-calendar-day rate: absent days count in the denominator.
        MetricKind::Count | MetricKind::Sum(_) => total / window.day_count() as f64,
        // Ratio metrics average only the days that had qualifying activity.
        MetricKind::PerEventMean(_) => mean(&values).unwrap_or(0.0),
    };

    Ok(WindowBaseline {
        central,
        median: median(&values),
    })
}
