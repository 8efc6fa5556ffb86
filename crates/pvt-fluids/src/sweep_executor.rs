//! Sweep execution: evaluate a fluid over a pressure or temperature range.
//!
//! Every point gets its own clone of the fluid, so points are evaluated in
//! parallel without sharing component state.

use crate::fluid::{Fluid, FluidPvt};
use crate::sweeps::SweepDefinition;
use crate::units::Quantity;
use pvt_core::units::{k, pa};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Error in sweep execution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Not a single point could be evaluated.
    #[error("Every point failed ({failed} points); first error: {first_error}")]
    AllPointsFailed { failed: usize, first_error: String },
}

/// Which variable a sweep varied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SweepVariable {
    /// Pressure in Pa, temperature fixed
    Pressure,
    /// Temperature in K, pressure fixed
    Temperature,
}

/// Result of a fluid property sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepResult {
    pub variable: SweepVariable,
    /// Fixed value of the other variable (Pa or K)
    pub fixed_value: f64,
    /// Independent variable values in canonical units (Pa or K)
    pub independent_values: Vec<f64>,
    /// Snapshot per point, `None` where evaluation failed
    pub points: Vec<Option<FluidPvt>>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    /// Extract one property over the successful points.
    pub fn series(&self, property: impl Fn(&FluidPvt) -> f64) -> Vec<f64> {
        self.points.iter().flatten().map(property).collect()
    }

    pub fn z(&self) -> Vec<f64> {
        self.series(|p| p.z)
    }

    pub fn bo_m3m3(&self) -> Vec<f64> {
        self.series(|p| p.bo_m3m3)
    }

    pub fn rs_m3m3(&self) -> Vec<f64> {
        self.series(|p| p.rs_m3m3)
    }

    pub fn bg_m3m3(&self) -> Vec<f64> {
        self.series(|p| p.bg_m3m3)
    }

    /// Independent values of the successful points.
    pub fn successful_independent_values(&self) -> Vec<f64> {
        self.independent_values
            .iter()
            .zip(&self.points)
            .filter_map(|(value, point)| point.as_ref().map(|_| *value))
            .collect()
    }
}

fn run_sweep(
    fluid: &Fluid,
    variable: SweepVariable,
    fixed_value: f64,
    independent_values: Vec<f64>,
) -> Result<SweepResult, SweepError> {
    let outcomes: Vec<_> = independent_values
        .par_iter()
        .map(|&value| {
            let (p_pa, t_k) = match variable {
                SweepVariable::Pressure => (value, fixed_value),
                SweepVariable::Temperature => (fixed_value, value),
            };
            let mut local = fluid.clone();
            local.calc_pvt(pa(p_pa), k(t_k))
        })
        .collect();

    let mut points = Vec::with_capacity(outcomes.len());
    let mut first_error = None;
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(pvt) => points.push(Some(pvt)),
            Err(err) => {
                tracing::warn!(index, value = independent_values[index], %err, "sweep point failed");
                first_error.get_or_insert_with(|| err.to_string());
                points.push(None);
            }
        }
    }

    let num_successful = points.iter().filter(|p| p.is_some()).count();
    let num_failed = points.len() - num_successful;
    if num_successful == 0 {
        return Err(SweepError::AllPointsFailed {
            failed: num_failed,
            first_error: first_error.unwrap_or_default(),
        });
    }

    tracing::debug!(?variable, num_successful, num_failed, "sweep finished");
    Ok(SweepResult {
        variable,
        fixed_value,
        independent_values,
        points,
        num_successful,
        num_failed,
    })
}

/// Execute a temperature sweep at fixed pressure.
///
/// - `sweep_def`: temperature sweep (K)
/// - `fixed_pressure_pa`: absolute pressure in Pa
pub fn execute_temperature_sweep_at_pressure(
    fluid: &Fluid,
    sweep_def: &SweepDefinition,
    fixed_pressure_pa: f64,
) -> Result<SweepResult, SweepError> {
    if sweep_def.quantity != Quantity::Temperature {
        return Err(SweepError::InvalidConfiguration(
            "sweep definition must be for Temperature quantity".to_string(),
        ));
    }

    run_sweep(
        fluid,
        SweepVariable::Temperature,
        fixed_pressure_pa,
        sweep_def.generate_points(),
    )
}

/// Execute a pressure sweep at fixed temperature.
///
/// - `sweep_def`: absolute or gauge pressure sweep (Pa, absolute)
/// - `fixed_temperature_k`: temperature in K
pub fn execute_pressure_sweep_at_temperature(
    fluid: &Fluid,
    sweep_def: &SweepDefinition,
    fixed_temperature_k: f64,
) -> Result<SweepResult, SweepError> {
    if sweep_def.quantity != Quantity::Pressure {
        return Err(SweepError::InvalidConfiguration(
            "sweep definition must be for Pressure quantity".to_string(),
        ));
    }

    run_sweep(
        fluid,
        SweepVariable::Pressure,
        fixed_temperature_k,
        sweep_def.generate_points(),
    )
}
