//! Domain types used throughout the KPI pipeline.
//!
//! This module defines:
//!
//! - the operational log row (`EventRecord`) and its categorical enums
//! - metric configuration (`MetricSpec`, `MetricKind`, `Predicate`, ...)
//! - comparison-period types (`Period`, `PeriodWindow`)
//! - the engine's immutable output (`KpiReport`, `PeriodComparison`)

pub mod types;

pub use types::*;
