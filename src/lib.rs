//! `flightops` library crate.
//!
//! The binary (`fops`) is a thin wrapper around this library so that:
//!
//! - the KPI engine is testable without spawning processes
//! - modules are reusable (e.g., a future GUI front-end, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod kpi;
pub mod math;
pub mod report;
