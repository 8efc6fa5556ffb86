//! pvt-project: fluid definition file format, validation and fluid construction.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_project};

use pvt_fluids::{Fluid, FluidError, OilProperties, PvtComponent, WaterProperties};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<PvtProject> {
    let content = std::fs::read_to_string(path)?;
    let project: PvtProject = serde_yaml::from_str(&content)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_yaml(path: &std::path::Path, project: &PvtProject) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_yaml::to_string(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<PvtProject> {
    let content = std::fs::read_to_string(path)?;
    let project: PvtProject = serde_json::from_str(&content)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_json(path: &std::path::Path, project: &PvtProject) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_json::to_string_pretty(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &std::path::Path) -> ProjectResult<PvtProject> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}

/// Build the fluid a project describes, evaluated at standard conditions.
///
/// Does not re-run project validation; component constructors apply their own
/// checks, so an unimplemented correlation surfaces as `FluidError::UnimplementedCorrelation`.
pub fn build_fluid(project: &PvtProject) -> ProjectResult<Fluid> {
    let constants = &project.constants;
    let def = &project.fluid;

    let mut oil = OilProperties::with_correlations(
        constants,
        def.oil.calibration,
        def.oil.correlation,
        def.gas.correlation,
    )?;
    if let Some(gamma) = def.oil.gamma {
        oil.set_gamma(gamma)?;
    }
    if let Some(gamma) = def.gas.gamma {
        oil.set_gas_gamma(gamma)?;
    }

    let mut water = WaterProperties::new(constants)?;
    if let Some(gamma) = def.water.gamma {
        water.set_gamma(gamma)?;
    }

    tracing::debug!(name = %project.name, "fluid built from project");
    Ok(Fluid::new(oil, water, def.liquid_rate_m3day, def.water_cut)?)
}
