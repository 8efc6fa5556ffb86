//! Fluid definition file schema.

use pvt_fluids::{GasCorrelation, OilCalibration, OilCorrelation, PvtConstants};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PvtProject {
    pub version: u32,
    pub name: String,
    /// Standard conditions and defaults; missing entries take the built-in values.
    #[serde(default)]
    pub constants: PvtConstants,
    pub fluid: FluidDef,
    /// Named (p, T) points evaluated by `pvt-cli eval`.
    #[serde(default)]
    pub conditions: Vec<ConditionDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluidDef {
    #[serde(default)]
    pub gas: GasDef,
    #[serde(default)]
    pub oil: OilDef,
    #[serde(default)]
    pub water: WaterDef,
    /// Water cut, fraction in [0, 1]
    #[serde(default)]
    pub water_cut: f64,
    #[serde(default = "default_liquid_rate")]
    pub liquid_rate_m3day: f64,
}

fn default_liquid_rate() -> f64 {
    pvt_fluids::DEFAULT_QLIQ_M3DAY
}

impl Default for FluidDef {
    fn default() -> Self {
        Self {
            gas: GasDef::default(),
            oil: OilDef::default(),
            water: WaterDef::default(),
            water_cut: 0.0,
            liquid_rate_m3day: default_liquid_rate(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GasDef {
    /// Specific gravity; `constants.gamma_gas_default` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(default)]
    pub correlation: GasCorrelation,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OilDef {
    /// Specific gravity; `constants.gamma_oil_default` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(default)]
    pub correlation: OilCorrelation,
    #[serde(default)]
    pub calibration: OilCalibration,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WaterDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionDef {
    pub name: String,
    /// Absolute pressure [bar]
    pub p_bar: f64,
    /// Temperature [°C]
    pub t_c: f64,
}

impl PvtProject {
    /// Starter project with the default black-oil fluid and a few reservoir points.
    pub fn starter(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            constants: PvtConstants::default(),
            fluid: FluidDef::default(),
            conditions: vec![
                ConditionDef {
                    name: "separator".to_string(),
                    p_bar: 10.0,
                    t_c: 40.0,
                },
                ConditionDef {
                    name: "bubble point".to_string(),
                    p_bar: 100.0,
                    t_c: 50.0,
                },
                ConditionDef {
                    name: "reservoir".to_string(),
                    p_bar: 250.0,
                    t_c: 90.0,
                },
            ],
        }
    }
}
