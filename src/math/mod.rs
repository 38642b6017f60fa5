//! Scalar statistics shared by the aggregation code.

pub mod stats;

pub use stats::*;
