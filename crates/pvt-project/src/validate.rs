//! Project validation logic.

use crate::schema::{ConditionDef, FluidDef, LATEST_VERSION, PvtProject};
use pvt_fluids::OilCorrelation;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate name: {name} in {context}")]
    DuplicateName { name: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &PvtProject) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    if project.name.trim().is_empty() {
        return Err(invalid("name", "\"\"", "must not be empty"));
    }

    project
        .constants
        .validate()
        .map_err(|e| invalid("constants", "..", &e.to_string()))?;

    validate_fluid(&project.fluid)?;

    let mut names = HashSet::new();
    for condition in &project.conditions {
        if !names.insert(&condition.name) {
            return Err(ValidationError::DuplicateName {
                name: condition.name.clone(),
                context: "conditions".to_string(),
            });
        }
        validate_condition(condition)?;
    }

    Ok(())
}

fn validate_fluid(fluid: &FluidDef) -> Result<(), ValidationError> {
    if let OilCorrelation::Standing = fluid.oil.correlation {
        return Err(ValidationError::Unsupported {
            feature: "oil correlation Standing".to_string(),
            reason: "no formulas implemented, use Calibrated".to_string(),
        });
    }

    let gammas = [
        ("fluid.gas.gamma", fluid.gas.gamma),
        ("fluid.oil.gamma", fluid.oil.gamma),
        ("fluid.water.gamma", fluid.water.gamma),
    ];
    for (field, gamma) in gammas {
        if let Some(value) = gamma {
            check_positive(field, value)?;
        }
    }

    fluid
        .oil
        .calibration
        .validate()
        .map_err(|e| invalid("fluid.oil.calibration", "..", &e.to_string()))?;

    if !fluid.water_cut.is_finite() || !(0.0..=1.0).contains(&fluid.water_cut) {
        return Err(invalid(
            "fluid.water_cut",
            &fluid.water_cut.to_string(),
            "must be in [0, 1]",
        ));
    }
    check_positive("fluid.liquid_rate_m3day", fluid.liquid_rate_m3day)?;

    Ok(())
}

fn validate_condition(condition: &ConditionDef) -> Result<(), ValidationError> {
    check_positive(&format!("conditions.{}.p_bar", condition.name), condition.p_bar)?;
    if !condition.t_c.is_finite() || pvt_core::c_to_k(condition.t_c) <= 0.0 {
        return Err(invalid(
            &format!("conditions.{}.t_c", condition.name),
            &condition.t_c.to_string(),
            "must be above absolute zero",
        ));
    }
    Ok(())
}

fn check_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, &value.to_string(), "must be positive and finite"));
    }
    Ok(())
}

fn invalid(field: &str, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
