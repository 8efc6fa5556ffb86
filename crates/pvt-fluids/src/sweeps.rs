//! Pressure and temperature sweep generation.
//!
//! Sweeps produce the independent variable for PVT tables and plots.

use crate::sweep_executor::SweepError;
use crate::units::{Quantity, parse_quantity};
use pvt_core::{Tolerances, nearly_equal};
use std::fmt;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Definition of a single parameter sweep.
///
/// Keeps the user's text bounds next to the parsed canonical values.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    /// Quantity being swept (Temperature or Pressure)
    pub quantity: Quantity,
    /// Start value in canonical units (Pa or K)
    pub start_si: f64,
    pub start_raw: String,
    /// End value in canonical units (Pa or K)
    pub end_si: f64,
    pub end_raw: String,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    /// Create a sweep from user text inputs.
    pub fn from_text(
        start_raw: impl Into<String>,
        end_raw: impl Into<String>,
        quantity: Quantity,
        num_points: usize,
        sweep_type: SweepType,
    ) -> Result<Self, SweepError> {
        let start_text = start_raw.into();
        let end_text = end_raw.into();

        let start_si = parse_quantity(&start_text, quantity).map_err(|e| {
            SweepError::InvalidConfiguration(format!("start value error: {e}"))
        })?;
        let end_si = parse_quantity(&end_text, quantity)
            .map_err(|e| SweepError::InvalidConfiguration(format!("end value error: {e}")))?;

        if num_points < 2 {
            return Err(SweepError::InvalidConfiguration(
                "sweep must have at least 2 points".to_string(),
            ));
        }

        if nearly_equal(start_si, end_si, Tolerances::default()) {
            return Err(SweepError::InvalidConfiguration(
                "start and end values must be different".to_string(),
            ));
        }

        Ok(SweepDefinition {
            quantity,
            start_si,
            start_raw: start_text,
            end_si,
            end_raw: end_text,
            num_points,
            sweep_type,
        })
    }

    /// Generate all points in the sweep.
    pub fn generate_points(&self) -> Vec<f64> {
        match self.sweep_type {
            SweepType::Linear => self.generate_linear(),
            SweepType::Logarithmic => self.generate_logarithmic(),
        }
    }

    fn generate_linear(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start_si];
        }

        let delta = (self.end_si - self.start_si) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| self.start_si + i as f64 * delta)
            .collect();

        // Exact endpoint
        points[self.num_points - 1] = self.end_si;
        points
    }

    fn generate_logarithmic(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start_si];
        }

        if self.start_si <= 0.0 || self.end_si <= 0.0 {
            return self.generate_linear();
        }

        let log_start = self.start_si.ln();
        let log_delta = (self.end_si.ln() - log_start) / (self.num_points - 1) as f64;
        let mut points: Vec<f64> = (0..self.num_points)
            .map(|i| (log_start + i as f64 * log_delta).exp())
            .collect();

        points[self.num_points - 1] = self.end_si;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} from {} to {} ({} points, {})",
            self.quantity, self.start_raw, self.end_raw, self.num_points, self.sweep_type
        )
    }
}
