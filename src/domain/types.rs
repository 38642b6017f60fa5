//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while computing reports
//! - exported to JSON for downstream tooling
//! - reloaded later for comparisons across runs

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::KpiError;

/// Delay severity bucket assigned to a flight in the source log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelayCategory {
    /// On time (no recorded delay).
    OnTime,
    Minor,
    Moderate,
    Severe,
}

impl DelayCategory {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            DelayCategory::OnTime => "on-time",
            DelayCategory::Minor => "minor",
            DelayCategory::Moderate => "moderate",
            DelayCategory::Severe => "severe",
        }
    }
}

impl FromStr for DelayCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on-time" | "ontime" | "none" => Ok(DelayCategory::OnTime),
            "minor" | "small" => Ok(DelayCategory::Minor),
            "moderate" | "medium" => Ok(DelayCategory::Moderate),
            "severe" | "major" => Ok(DelayCategory::Severe),
            other => Err(format!("unknown delay category '{other}'")),
        }
    }
}

/// Intra-day bucket derived from the scheduled hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Bucket an hour-of-day (0..=23) the way the source log does.
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            0..=5 => TimeOfDay::Night,
            6..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TimeOfDay::Night => "night",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }
}

/// One row of the daily flight-operations log.
///
/// Immutable once loaded. `date` is day-granular for all windowing; `hour`
/// exists for intra-day metrics only and never affects window boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub hour: u8,
    pub passengers: u32,
    pub cargo_kg: f64,
    pub delay: DelayCategory,
    pub cancelled: bool,
    pub arrival: String,
    pub time_of_day: TimeOfDay,
}

/// Numeric fields a metric may reference.
///
/// Parsed from configuration text; unknown names are an
/// [`KpiError::InvalidField`], raised at configuration time rather than
/// mid-computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Passengers,
    Cargo,
}

impl Field {
    pub fn display_name(self) -> &'static str {
        match self {
            Field::Passengers => "passengers",
            Field::Cargo => "cargo",
        }
    }

    /// Read this field's value from a record.
    pub fn value(self, record: &EventRecord) -> f64 {
        match self {
            Field::Passengers => f64::from(record.passengers),
            Field::Cargo => record.cargo_kg,
        }
    }
}

impl FromStr for Field {
    type Err = KpiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passengers" => Ok(Field::Passengers),
            "cargo" | "cargo_kg" => Ok(Field::Cargo),
            other => Err(KpiError::InvalidField {
                name: other.to_string(),
            }),
        }
    }
}

/// Row filter applied before extraction.
///
/// Part of a metric's configuration, not a separate pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Predicate {
    /// No filtering.
    Any,
    DelayIs(DelayCategory),
    Cancelled(bool),
    ArrivalIs(String),
    TimeOfDayIs(TimeOfDay),
}

impl Predicate {
    pub fn matches(&self, record: &EventRecord) -> bool {
        match self {
            Predicate::Any => true,
            Predicate::DelayIs(cat) => record.delay == *cat,
            Predicate::Cancelled(flag) => record.cancelled == *flag,
            Predicate::ArrivalIs(code) => record.arrival == *code,
            Predicate::TimeOfDayIs(bucket) => record.time_of_day == *bucket,
        }
    }
}

/// How one day's rows reduce to a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Number of matching rows (flights/day, cancellations/day, ...).
    Count,
    /// Sum of a numeric field across matching rows (passengers/day).
    Sum(Field),
    /// Per-row average within the day (average cargo per flight).
    ///
    /// Extraction over a day with zero matching rows is an error; the
    /// aggregator skips such days instead of propagating NaN.
    PerEventMean(Field),
}

/// How a window reduces to a baseline for count/sum metrics.
///
/// Ratio metrics ([`MetricKind::PerEventMean`]) always reduce by the mean of
/// the daily series, regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineMode {
    /// Window total divided by the inclusive calendar day count.
    ///
    /// Days with no activity contribute zero to the numerator but still count
    /// in the denominator, so this is a true per-calendar-day rate.
    DailyRate,
    /// Plain window total, compared directly against today's value.
    ///
    /// No median is reported: a single total is not a per-day distribution.
    WindowTotal,
}

/// Whether a positive delta is an improvement or a degradation.
///
/// Presentation-only: the delta arithmetic never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Sign classification of a delta under a direction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Improved,
    Flat,
    Degraded,
}

impl Direction {
    pub fn display_name(self) -> &'static str {
        match self {
            Direction::HigherIsBetter => "higher is better",
            Direction::LowerIsBetter => "lower is better",
        }
    }

    /// Classify a signed delta (percent) for presentation.
    pub fn classify(self, delta: f64) -> Trend {
        if delta == 0.0 {
            return Trend::Flat;
        }
        let up_is_good = self == Direction::HigherIsBetter;
        if (delta > 0.0) == up_is_good {
            Trend::Improved
        } else {
            Trend::Degraded
        }
    }
}

/// Full configuration of one KPI instance.
///
/// This is the engine's entire parameterization surface: extraction kind,
/// optional row filter, baseline convention, and direction policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    /// Stable identifier used for CLI selection and report headings.
    pub name: String,
    pub kind: MetricKind,
    pub filter: Predicate,
    pub baseline: BaselineMode,
    pub direction: Direction,
}

/// Named comparison period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// The most recently completed Monday-Sunday week before the anchor's week.
    Week,
    /// Month-to-date excluding the anchor day.
    Month,
    /// Calendar-quarter-to-date excluding the anchor day.
    Quarter,
    /// Year-to-date excluding the anchor day.
    Year,
    /// The same calendar day one year earlier (single-day lookup).
    LastYear,
}

impl Period {
    pub fn display_name(self) -> &'static str {
        match self {
            Period::Week => "Week",
            Period::Month => "Month",
            Period::Quarter => "Quarter",
            Period::Year => "Year",
            Period::LastYear => "Last year",
        }
    }

    /// The aggregated periods, in report order. `LastYear` is handled
    /// separately as a single-day lookup.
    pub const AGGREGATED: [Period; 4] = [Period::Week, Period::Month, Period::Quarter, Period::Year];
}

/// An inclusive calendar-date range used as a comparison baseline.
///
/// Computed fresh per anchor date; never persisted. `end < start` marks a
/// degenerate window (e.g., month-to-date on the 1st of the month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Inclusive calendar day count, zero for degenerate windows.
    pub fn day_count(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }
}

/// One baseline comparison inside a [`KpiReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub period: Period,
    /// Baseline central value: per-day rate, series mean, window total, or the
    /// last-year day value, depending on metric kind and baseline mode.
    pub baseline: f64,
    /// Median of the daily series; `None` for single-day and window-total
    /// baselines.
    pub median: Option<f64>,
    /// Signed percentage delta of today's value from `baseline`.
    pub delta_mean: f64,
    /// Signed percentage delta of today's value from `median`.
    pub delta_median: Option<f64>,
}

/// The engine's immutable output for one metric.
///
/// Construction is pure: the same dataset and metric spec always produce an
/// identical report. Consumed by presentation only, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    pub metric: MetricSpec,
    /// The anchor date ("today"): the maximum date in the dataset.
    pub anchor: NaiveDate,
    /// Today's scalar value for this metric.
    pub today: f64,
    /// Comparisons in fixed order: Week, Month, Quarter, Year, LastYear.
    pub comparisons: Vec<PeriodComparison>,
}
