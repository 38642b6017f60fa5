//! Report construction: one metric, all comparison periods.
//!
//! `compute_report` is the engine's top-level pure function. Given an indexed
//! dataset and a metric configuration it produces an immutable [`KpiReport`]
//! with comparisons in fixed order: Week, Month, Quarter, Year, LastYear.

use crate::data::DatasetIndex;
use crate::domain::{
    BaselineMode, Direction, Field, KpiReport, MetricKind, MetricSpec, Period, PeriodComparison,
    Predicate, DelayCategory,
};
use crate::error::KpiError;
use crate::kpi::aggregate::{daily_series, reduce_window};
use crate::kpi::delta::pct_delta;
use crate::kpi::extract::day_value_filtered;
use crate::kpi::windows::{last_year_date, resolve_window};

/// Compute the full period-comparison report for one metric.
///
/// Any window that cannot produce a baseline (degenerate month/quarter/year
/// windows, or no matching rows anywhere in range) fails the whole metric
/// with `InsufficientData`; the pipeline isolates that failure per metric.
pub fn compute_report(index: &DatasetIndex<'_>, spec: &MetricSpec) -> Result<KpiReport, KpiError> {
    let anchor = index.anchor();
    let today = day_value_filtered(spec, anchor, index.rows_on(anchor))?;

    let mut comparisons = Vec::with_capacity(Period::AGGREGATED.len() + 1);
    for period in Period::AGGREGATED {
        let window = resolve_window(period, anchor);
        let series = daily_series(index, &window, spec)?;
        let baseline = reduce_window(&window, &series, spec)?;

        comparisons.push(PeriodComparison {
            period,
            baseline: baseline.central,
            median: baseline.median,
            delta_mean: pct_delta(today, baseline.central),
            delta_median: baseline.median.map(|m| pct_delta(today, m)),
        });
    }

    comparisons.push(last_year_comparison(index, spec, today)?);

    Ok(KpiReport {
        metric: spec.clone(),
        anchor,
        today,
        comparisons,
    })
}

/// Single-day lookup one year back. No median: there is no daily series.
///
/// A day with no matching rows yields a baseline of `0.0` (the delta then
/// saturates) rather than failing the report; last year's log legitimately
/// may not reach back that far.
fn last_year_comparison(
    index: &DatasetIndex<'_>,
    spec: &MetricSpec,
    today: f64,
) -> Result<PeriodComparison, KpiError> {
    let date = last_year_date(index.anchor());
    let rows = index.rows_on(date);

    let baseline = match day_value_filtered(spec, date, rows) {
        Ok(v) => v,
        Err(KpiError::InsufficientData { .. }) => 0.0,
        Err(e) => return Err(e),
    };

    Ok(PeriodComparison {
        period: Period::LastYear,
        baseline,
        median: None,
        delta_mean: pct_delta(today, baseline),
        delta_median: None,
    })
}

/// The dashboard's standard KPI set.
pub fn standard_metrics() -> Vec<MetricSpec> {
    vec![
        MetricSpec {
            name: "flights".to_string(),
            kind: MetricKind::Count,
            filter: Predicate::Any,
            baseline: BaselineMode::DailyRate,
            direction: Direction::HigherIsBetter,
        },
        MetricSpec {
            name: "passengers".to_string(),
            kind: MetricKind::Sum(Field::Passengers),
            filter: Predicate::Any,
            baseline: BaselineMode::DailyRate,
            direction: Direction::HigherIsBetter,
        },
        MetricSpec {
            name: "cargo-weight".to_string(),
            kind: MetricKind::PerEventMean(Field::Cargo),
            filter: Predicate::Any,
            baseline: BaselineMode::DailyRate,
            direction: Direction::HigherIsBetter,
        },
        MetricSpec {
            name: "minor-delays".to_string(),
            kind: MetricKind::Count,
            filter: Predicate::DelayIs(DelayCategory::Minor),
            baseline: BaselineMode::DailyRate,
            direction: Direction::LowerIsBetter,
        },
        MetricSpec {
            name: "cancellations".to_string(),
            kind: MetricKind::Count,
            filter: Predicate::Cancelled(true),
            baseline: BaselineMode::WindowTotal,
            direction: Direction::LowerIsBetter,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::domain::{EventRecord, TimeOfDay};
    use chrono::{Datelike, NaiveDate};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, passengers: u32) -> EventRecord {
        EventRecord {
            date,
            hour: 12,
            passengers,
            cargo_kg: 1500.0,
            delay: DelayCategory::OnTime,
            cancelled: false,
            arrival: "VKO".to_string(),
            time_of_day: TimeOfDay::Afternoon,
        }
    }

    fn flights_spec() -> MetricSpec {
        MetricSpec {
            name: "flights".to_string(),
            kind: MetricKind::Count,
            filter: Predicate::Any,
            baseline: BaselineMode::DailyRate,
            direction: Direction::HigherIsBetter,
        }
    }

    /// A log with one flight per day across the anchor's week, month, quarter
    /// and the same day last year.
    fn spanning_dataset(anchor: NaiveDate) -> Dataset {
        let mut records = Vec::new();
        let mut d = day(anchor.year(), 1, 1);
        while d <= anchor {
            records.push(record(d, 100));
            d = d.succ_opt().unwrap();
        }
        records.push(record(last_year_date(anchor), 100));
        Dataset::from_records(records)
    }

    #[test]
    fn report_has_the_fixed_period_order() {
        let dataset = spanning_dataset(day(2024, 5, 15));
        let index = DatasetIndex::new(&dataset).unwrap();

        let report = compute_report(&index, &flights_spec()).unwrap();
        let order: Vec<Period> = report.comparisons.iter().map(|c| c.period).collect();
        assert_eq!(
            order,
            vec![Period::Week, Period::Month, Period::Quarter, Period::Year, Period::LastYear]
        );
    }

    #[test]
    fn uniform_log_has_zero_deltas_everywhere() {
        let dataset = spanning_dataset(day(2024, 5, 15));
        let index = DatasetIndex::new(&dataset).unwrap();

        let report = compute_report(&index, &flights_spec()).unwrap();
        assert_eq!(report.today, 1.0);
        for c in &report.comparisons {
            assert_eq!(c.delta_mean, 0.0, "{:?}", c.period);
            if let Some(dm) = c.delta_median {
                assert_eq!(dm, 0.0, "{:?}", c.period);
            }
        }
    }

    #[test]
    fn single_record_dataset_counts_one_today() {
        // With only the anchor day present, today's extraction yields 1 while
        // the full report fails: no aggregated window has any data.
        let dataset = Dataset::from_records(vec![record(day(2024, 5, 15), 100)]);
        let index = DatasetIndex::new(&dataset).unwrap();

        let today =
            day_value_filtered(&flights_spec(), index.anchor(), index.rows_on(index.anchor()))
                .unwrap();
        assert_eq!(today, 1.0);

        let err = compute_report(&index, &flights_spec()).unwrap_err();
        assert!(matches!(err, KpiError::InsufficientData { .. }));
    }

    #[test]
    fn first_of_month_anchor_fails_cleanly() {
        // Anchor 2024-04-01: the month window is degenerate. The failure is
        // InsufficientData, never a division by zero.
        let mut records = Vec::new();
        let mut d = day(2024, 1, 1);
        while d <= day(2024, 4, 1) {
            records.push(record(d, 100));
            d = d.succ_opt().unwrap();
        }
        let dataset = Dataset::from_records(records);
        let index = DatasetIndex::new(&dataset).unwrap();

        let err = compute_report(&index, &flights_spec()).unwrap_err();
        assert!(matches!(err, KpiError::InsufficientData { .. }));
    }

    #[test]
    fn report_construction_is_deterministic() {
        let dataset = spanning_dataset(day(2024, 5, 15));
        let index = DatasetIndex::new(&dataset).unwrap();
        let spec = flights_spec();

        let a = compute_report(&index, &spec).unwrap();
        let b = compute_report(&index, &spec).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_last_year_day_saturates_instead_of_failing() {
        let anchor = day(2024, 5, 15);
        let mut records = Vec::new();
        let mut d = day(2024, 1, 1);
        while d <= anchor {
            records.push(record(d, 100));
            d = d.succ_opt().unwrap();
        }
        // No rows in 2023 at all.
        let dataset = Dataset::from_records(records);
        let index = DatasetIndex::new(&dataset).unwrap();

        let report = compute_report(&index, &flights_spec()).unwrap();
        let last_year = report.comparisons.last().unwrap();
        assert_eq!(last_year.period, Period::LastYear);
        assert_eq!(last_year.baseline, 0.0);
        assert_eq!(last_year.delta_mean, 0.0);
        assert_eq!(last_year.median, None);
    }

    #[test]
    fn standard_set_matches_the_dashboard() {
        let names: Vec<String> = standard_metrics().into_iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec!["flights", "passengers", "cargo-weight", "minor-delays", "cancellations"]
        );
    }
}
