//! Error types.
//!
//! Two layers:
//!
//! - [`KpiError`] is the engine's typed taxonomy. Every failure a KPI
//!   computation can hit is one of three unrecoverable data-shape problems,
//!   raised synchronously and never retried.
//! - [`AppError`] is the binary-boundary error: a message plus a process exit
//!   code, so `main` can stay a one-line match.

use thiserror::Error;

/// Engine-level failures for a single KPI computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KpiError {
    /// The dataset has zero rows, so the anchor date ("today") is undefined.
    #[error("dataset contains no rows; anchor date is undefined")]
    EmptyDataset,

    /// A required window or day-subset has no matching rows.
    ///
    /// Includes the degenerate month/quarter/year windows when the anchor is
    /// the first day of the period.
    #[error("insufficient data: {context}")]
    InsufficientData { context: String },

    /// A metric configuration references a field absent from the schema.
    #[error("unknown metric field '{name}'")]
    InvalidField { name: String },
}

impl KpiError {
    pub fn insufficient(context: impl Into<String>) -> Self {
        KpiError::InsufficientData {
            context: context.into(),
        }
    }
}

/// Top-level application error with a process exit code.
///
/// Exit codes: 2 = usage/input problem, 3 = data shape problem, 4 = internal.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<KpiError> for AppError {
    fn from(err: KpiError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
