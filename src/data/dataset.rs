//! In-memory dataset and date-bounded row access.
//!
//! The loader (CSV ingest or the synthetic generator) produces a [`Dataset`];
//! everything downstream reads it through a [`DatasetIndex`], which is a
//! borrowed, read-only view. A full dataset replacement is a new `Dataset`
//! value, so a report in flight never observes a partial load.

use chrono::NaiveDate;

use crate::domain::{EventRecord, Predicate};
use crate::error::KpiError;

/// The loaded operational log, ordered by `(date, hour)`.
///
/// Invariant: records are sorted on construction and never mutated afterwards,
/// which is what allows `DatasetIndex` to slice by date with binary search.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<EventRecord>,
}

impl Dataset {
    /// Build a dataset from records in any order.
    pub fn from_records(mut records: Vec<EventRecord>) -> Self {
        records.sort_by_key(|r| (r.date, r.hour));
        Self { records }
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read-only, date-indexed view over a non-empty [`Dataset`].
///
/// Constructing the index resolves the anchor date once; all window and
/// day-subset queries are then cheap slice operations.
#[derive(Debug, Clone, Copy)]
pub struct DatasetIndex<'a> {
    records: &'a [EventRecord],
    anchor: NaiveDate,
}

impl<'a> DatasetIndex<'a> {
    /// Errors with [`KpiError::EmptyDataset`] when there are no rows, since
    /// the anchor date is undefined in that case.
    pub fn new(dataset: &'a Dataset) -> Result<Self, KpiError> {
        let records = dataset.records();
        let anchor = records
            .last()
            .map(|r| r.date)
            .ok_or(KpiError::EmptyDataset)?;
        Ok(Self { records, anchor })
    }

    /// The maximum date in the dataset, treated as "today" for all
    /// comparisons. Never the wall-clock date.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// All rows on one calendar day.
    pub fn rows_on(&self, date: NaiveDate) -> &'a [EventRecord] {
        self.rows_in(date, date)
    }

    /// All rows with `start <= date <= end` (inclusive both ends).
    pub fn rows_in(&self, start: NaiveDate, end: NaiveDate) -> &'a [EventRecord] {
        if end < start {
            return &[];
        }
        let lo = self.records.partition_point(|r| r.date < start);
        let hi = self.records.partition_point(|r| r.date <= end);
        &self.records[lo..hi]
    }

    /// Date-bounded rows with a metric's filter applied.
    pub fn rows_matching<'f>(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        filter: &'f Predicate,
    ) -> impl Iterator<Item = &'a EventRecord> + use<'a, 'f> {
        self.rows_in(start, end).iter().filter(|r| filter.matches(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DelayCategory, TimeOfDay};

    fn record(date: NaiveDate, hour: u8, cancelled: bool) -> EventRecord {
        EventRecord {
            date,
            hour,
            passengers: 100,
            cargo_kg: 1000.0,
            delay: DelayCategory::OnTime,
            cancelled,
            arrival: "SVO".to_string(),
            time_of_day: TimeOfDay::from_hour(hour),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_dataset_has_no_anchor() {
        let dataset = Dataset::default();
        let err = DatasetIndex::new(&dataset).unwrap_err();
        assert_eq!(err, KpiError::EmptyDataset);
    }

    #[test]
    fn anchor_is_max_date_regardless_of_input_order() {
        let dataset = Dataset::from_records(vec![
            record(day(2024, 5, 3), 10, false),
            record(day(2024, 5, 1), 8, false),
            record(day(2024, 5, 2), 14, false),
        ]);
        let index = DatasetIndex::new(&dataset).unwrap();
        assert_eq!(index.anchor(), day(2024, 5, 3));
    }

    #[test]
    fn rows_in_is_inclusive_on_both_ends() {
        let dataset = Dataset::from_records(vec![
            record(day(2024, 5, 1), 8, false),
            record(day(2024, 5, 2), 9, false),
            record(day(2024, 5, 2), 15, false),
            record(day(2024, 5, 3), 10, false),
            record(day(2024, 5, 5), 10, false),
        ]);
        let index = DatasetIndex::new(&dataset).unwrap();

        assert_eq!(index.rows_in(day(2024, 5, 2), day(2024, 5, 3)).len(), 3);
        assert_eq!(index.rows_on(day(2024, 5, 2)).len(), 2);
        // A gap day yields an empty slice, not an error.
        assert!(index.rows_on(day(2024, 5, 4)).is_empty());
        // Inverted range is empty.
        assert!(index.rows_in(day(2024, 5, 3), day(2024, 5, 2)).is_empty());
    }

    #[test]
    fn rows_matching_applies_the_filter() {
        let dataset = Dataset::from_records(vec![
            record(day(2024, 5, 1), 8, true),
            record(day(2024, 5, 1), 9, false),
            record(day(2024, 5, 2), 9, true),
        ]);
        let index = DatasetIndex::new(&dataset).unwrap();

        let filter = Predicate::Cancelled(true);
        let hits: Vec<_> = index
            .rows_matching(day(2024, 5, 1), day(2024, 5, 2), &filter)
            .collect();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|r| r.cancelled));
    }
}
