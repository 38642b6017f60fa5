//! Shared report pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! index dataset -> compute one report per metric -> bundle outcomes.
//!
//! Each metric's computation is a pure function of the immutable dataset, so
//! the set fans out across rayon workers with no shared mutable state. One
//! failing metric never aborts the others; its error travels in the outcome.

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::data::{Dataset, DatasetIndex};
use crate::domain::{KpiReport, MetricSpec};
use crate::error::KpiError;
use crate::kpi::report::compute_report;

/// One metric's result, failure included.
#[derive(Debug, Clone)]
pub struct MetricOutcome {
    pub spec: MetricSpec,
    pub result: Result<KpiReport, KpiError>,
}

/// All computed outputs of a single `fops report` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub anchor: NaiveDate,
    pub outcomes: Vec<MetricOutcome>,
}

/// Compute a report per metric against one consistent dataset snapshot.
///
/// Only an empty dataset fails the run as a whole (the anchor date is
/// undefined); every per-metric failure is isolated into its outcome.
pub fn run_reports(dataset: &Dataset, specs: &[MetricSpec]) -> Result<RunOutput, KpiError> {
    let index = DatasetIndex::new(dataset)?;

    let outcomes = specs
        .par_iter()
        .map(|spec| MetricOutcome {
            spec: spec.clone(),
            result: compute_report(&index, spec),
        })
        .collect();

    Ok(RunOutput {
        anchor: index.anchor(),
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BaselineMode, DelayCategory, Direction, EventRecord, MetricKind, Predicate, TimeOfDay,
    };
    use crate::kpi::report::standard_metrics;
    use chrono::NaiveDate;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn record(date: NaiveDate) -> EventRecord {
        EventRecord {
            date,
            hour: 9,
            passengers: 120,
            cargo_kg: 1800.0,
            delay: DelayCategory::OnTime,
            cancelled: false,
            arrival: "AER".to_string(),
            time_of_day: TimeOfDay::Morning,
        }
    }

    fn dense_dataset() -> Dataset {
        let mut records = Vec::new();
        let mut d = day(1, 1);
        while d <= day(5, 15) {
            records.push(record(d));
            d = d.succ_opt().unwrap();
        }
        Dataset::from_records(records)
    }

    #[test]
    fn empty_dataset_fails_the_whole_run() {
        let err = run_reports(&Dataset::default(), &standard_metrics()).unwrap_err();
        assert_eq!(err, KpiError::EmptyDataset);
    }

    #[test]
    fn failures_are_isolated_per_metric() {
        // No flight in this log is ever cancelled or delayed, so the
        // cancellations and minor-delays metrics find empty series while
        // flights/passengers/cargo succeed.
        let run = run_reports(&dense_dataset(), &standard_metrics()).unwrap();
        assert_eq!(run.anchor, day(5, 15));

        let by_name = |name: &str| {
            run.outcomes
                .iter()
                .find(|o| o.spec.name == name)
                .unwrap()
        };

        assert!(by_name("flights").result.is_ok());
        assert!(by_name("passengers").result.is_ok());
        assert!(by_name("cargo-weight").result.is_ok());
        assert!(matches!(
            &by_name("minor-delays").result,
            Err(KpiError::InsufficientData { .. })
        ));
        assert!(matches!(
            &by_name("cancellations").result,
            Err(KpiError::InsufficientData { .. })
        ));
    }

    #[test]
    fn outcomes_preserve_spec_order() {
        let specs = vec![
            MetricSpec {
                name: "a".to_string(),
                kind: MetricKind::Count,
                filter: Predicate::Any,
                baseline: BaselineMode::DailyRate,
                direction: Direction::HigherIsBetter,
            },
            MetricSpec {
                name: "b".to_string(),
                kind: MetricKind::Count,
                filter: Predicate::Cancelled(true),
                baseline: BaselineMode::WindowTotal,
                direction: Direction::LowerIsBetter,
            },
        ];
        let run = run_reports(&dense_dataset(), &specs).unwrap();
        let names: Vec<&str> = run.outcomes.iter().map(|o| o.spec.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
