//! Reference constants passed explicitly to every component.

use crate::error::{FluidError, FluidResult};
use pvt_core::units::constants::*;
use serde::{Deserialize, Serialize};

/// Regional set of standard conditions and defaults.
///
/// Components copy this at construction, so two fluids built from different
/// constant sets evaluate independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PvtConstants {
    /// Standard pressure [bar]
    pub psc_bar: f64,
    /// Standard temperature [°C]
    pub tsc_c: f64,
    /// Air density at standard conditions [kg/m³]
    pub air_density_sc_kg_m3: f64,
    /// Water density at standard conditions [kg/m³]
    pub water_density_sc_kg_m3: f64,
    pub gamma_gas_default: f64,
    pub gamma_oil_default: f64,
    pub gamma_water_default: f64,
    /// z-factor used by the constant-z gas correlation
    pub z_default: f64,
    /// Solution gas-oil ratio at bubble point [m³/m³]
    pub rsb_default_m3m3: f64,
}

impl Default for PvtConstants {
    fn default() -> Self {
        Self {
            psc_bar: PSC_BAR,
            tsc_c: TSC_C,
            air_density_sc_kg_m3: AIR_DENSITY_SC_KG_M3,
            water_density_sc_kg_m3: WATER_DENSITY_SC_KG_M3,
            gamma_gas_default: GAMMA_GAS_DEFAULT,
            gamma_oil_default: GAMMA_OIL_DEFAULT,
            gamma_water_default: GAMMA_WATER_DEFAULT,
            z_default: Z_DEFAULT,
            rsb_default_m3m3: RSB_DEFAULT_M3M3,
        }
    }
}

impl PvtConstants {
    /// All entries must be positive and finite, standard temperature above absolute zero.
    pub fn validate(&self) -> FluidResult<()> {
        let positive = [
            ("psc_bar", self.psc_bar),
            ("air_density_sc_kg_m3", self.air_density_sc_kg_m3),
            ("water_density_sc_kg_m3", self.water_density_sc_kg_m3),
            ("gamma_gas_default", self.gamma_gas_default),
            ("gamma_oil_default", self.gamma_oil_default),
            ("gamma_water_default", self.gamma_water_default),
            ("z_default", self.z_default),
            ("rsb_default_m3m3", self.rsb_default_m3m3),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(FluidError::InvalidArg {
                    what: format!("constant {name} must be positive and finite, got {value}"),
                });
            }
        }
        if !self.tsc_c.is_finite() || pvt_core::c_to_k(self.tsc_c) <= 0.0 {
            return Err(FluidError::InvalidArg {
                what: format!("standard temperature {} °C is below absolute zero", self.tsc_c),
            });
        }
        Ok(())
    }

    /// Standard temperature [K].
    pub fn tsc_k(&self) -> f64 {
        pvt_core::c_to_k(self.tsc_c)
    }
}
