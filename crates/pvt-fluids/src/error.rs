//! Fluid property errors.

use pvt_core::PvtError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during PVT property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Pressure or temperature outside the physical domain, or a correlation
    /// evaluated where it is undefined (e.g. oil compressibility at zero pressure).
    #[error("Invalid state: {what}")]
    InvalidState { what: String },

    /// Root finding for the z-factor did not converge.
    #[error("No convergence: {what}")]
    NonConvergence { what: String },

    /// A correlation was selected that has no working formula.
    #[error("Correlation not implemented: {correlation}")]
    UnimplementedCorrelation { correlation: &'static str },

    /// Invalid non-state argument (specific gravity, water cut, rate).
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}

impl From<PvtError> for FluidError {
    fn from(err: PvtError) -> Self {
        FluidError::InvalidState {
            what: err.to_string(),
        }
    }
}
