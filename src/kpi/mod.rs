//! The period-comparison KPI engine.
//!
//! The pipeline is a chain of small pure stages:
//!
//! ```text
//! DatasetIndex -> windows -> extract -> aggregate -> delta -> KpiReport
//! ```
//!
//! Each configured metric (flights/day, passengers/day, ...) is an independent
//! instantiation of the same chain with a different [`crate::domain::MetricSpec`].

pub mod aggregate;
pub mod delta;
pub mod extract;
pub mod report;
pub mod windows;

pub use aggregate::*;
pub use delta::*;
pub use extract::*;
pub use report::*;
pub use windows::*;
