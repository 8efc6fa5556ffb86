//! Error types for solver operations.

use pvt_core::PvtError;
use thiserror::Error;

/// Errors that can occur during scalar root finding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid solver config: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Invalid bracket: {what}")]
    InvalidBracket { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Numeric error: {0}")]
    Numeric(#[from] PvtError),
}

pub type SolverResult<T> = Result<T, SolverError>;
