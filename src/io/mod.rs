//! File input/output: CSV ingest and exports.

pub mod export;
pub mod ingest;
