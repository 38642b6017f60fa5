//! Per-day metric extraction.
//!
//! A metric turns one day's (already filtered) rows into a scalar:
//!
//! - `Count`: number of rows
//! - `Sum(field)`: sum of a numeric field
//! - `PerEventMean(field)`: within-day per-row average
//!
//! Count and sum are well defined over an empty day (both zero). The
//! per-row average is not; extracting it from an empty day is
//! `InsufficientData`, and the aggregator skips such days so NaN never
//! reaches the downstream statistics.

use chrono::NaiveDate;

use crate::domain::{EventRecord, MetricKind, MetricSpec};
use crate::error::KpiError;

/// Reduce one day's matching rows to the metric's daily scalar.
pub fn day_value<'a, I>(kind: MetricKind, date: NaiveDate, rows: I) -> Result<f64, KpiError>
where
    I: IntoIterator<Item = &'a EventRecord>,
{
    let mut count = 0usize;
    let mut sum = 0.0f64;
    for row in rows {
        count += 1;
        if let MetricKind::Sum(field) | MetricKind::PerEventMean(field) = kind {
            sum += field.value(row);
        }
    }

    match kind {
        MetricKind::Count => Ok(count as f64),
        MetricKind::Sum(_) => Ok(sum),
        MetricKind::PerEventMean(_) => {
            if count == 0 {
                Err(KpiError::insufficient(format!(
                    "no matching rows on {date} for a per-event average"
                )))
            } else {
                Ok(sum / count as f64)
            }
        }
    }
}

/// [`day_value`] over a raw row slice, applying the metric's filter first.
pub fn day_value_filtered(
    spec: &MetricSpec,
    date: NaiveDate,
    rows: &[EventRecord],
) -> Result<f64, KpiError> {
    day_value(
        spec.kind,
        date,
        rows.iter().filter(|r| spec.filter.matches(r)),
    )
}
