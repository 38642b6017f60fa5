//! Comparison-window resolution.
//!
//! Given the anchor date `A` (the dataset's maximum date), each named period
//! resolves to a deterministic inclusive calendar-date range:
//!
//! - **Week**: the most recently completed Monday-Sunday week strictly before
//!   the week containing `A`.
//! - **Month / Quarter / Year**: period-to-date ending at `A - 1` day, so a
//!   metric is never compared against itself. When `A` is the first day of
//!   the period the window is degenerate (`end < start`); the aggregator
//!   turns that into `InsufficientData` instead of dividing by zero.
//! - **LastYear**: a single calendar date, not a range (see
//!   [`last_year_date`]).
//!
//! Quarters are calendar quarters (Jan-Mar, Apr-Jun, Jul-Sep, Oct-Dec).
//! All boundaries are plain dates; time of day never enters windowing.

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{Period, PeriodWindow};

/// Resolve an aggregated period to its window for the given anchor date.
///
/// `Period::LastYear` is not an aggregated window; use [`last_year_date`].
pub fn resolve_window(period: Period, anchor: NaiveDate) -> PeriodWindow {
    let (start, end) = match period {
        Period::Week => {
            let offset = i64::from(anchor.weekday().num_days_from_monday()) + 7;
            let start = anchor - Duration::days(offset);
            (start, start + Duration::days(6))
        }
        Period::Month => (first_of_month(anchor), anchor - Duration::days(1)),
        Period::Quarter => (first_of_quarter(anchor), anchor - Duration::days(1)),
        Period::Year => (first_of_year(anchor), anchor - Duration::days(1)),
        Period::LastYear => {
            let day = last_year_date(anchor);
            (day, day)
        }
    };
    PeriodWindow { period, start, end }
}

/// The same calendar day one year before the anchor.
///
/// Policy: a 29 Feb anchor resolves to 28 Feb of the previous year. This is a
/// deliberate deterministic fallback, not an error case.
pub fn last_year_date(anchor: NaiveDate) -> NaiveDate {
    let year = anchor.year() - 1;
    NaiveDate::from_ymd_opt(year, anchor.month(), anchor.day())
        // Only a 29 Feb anchor can miss here.
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).unwrap_or(anchor))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn first_of_quarter(date: NaiveDate) -> NaiveDate {
    let quarter_month = 3 * ((date.month() - 1) / 3) + 1;
    NaiveDate::from_ymd_opt(date.year(), quarter_month, 1).unwrap_or(date)
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}
