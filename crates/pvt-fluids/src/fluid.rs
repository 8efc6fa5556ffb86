//! Black-oil fluid: oil (with its solution gas), water, water cut and liquid rate.

use crate::component::PvtComponent;
use crate::constants::PvtConstants;
use crate::error::{FluidError, FluidResult};
use crate::oil::{BubblePointRegion, OilCalibration, OilProperties};
use crate::state::ThermobaricState;
use crate::water::WaterProperties;
use pvt_core::units::{Pressure, Temperature};
use serde::{Deserialize, Serialize};

/// Liquid rate of a freshly built black-oil fluid [m³/day].
pub const DEFAULT_QLIQ_M3DAY: f64 = 10.0;

/// Every derived property of a fluid at one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluidPvt {
    pub p_bar: f64,
    pub t_c: f64,
    pub region: BubblePointRegion,

    pub z: f64,
    pub p_pr: f64,
    pub t_pr: f64,
    pub bg_m3m3: f64,
    pub mu_gas_cp: f64,
    pub cg_1bar: f64,
    pub rho_gas_kg_m3: f64,

    pub rs_m3m3: f64,
    pub bo_m3m3: f64,
    pub mu_oil_cp: f64,
    pub co_1bar: f64,
    pub rho_oil_kg_m3: f64,

    pub bw_m3m3: f64,
    pub mu_water_cp: f64,
    pub rho_water_kg_m3: f64,

    pub fw: f64,
    pub qliq_m3day: f64,
}

/// Fluid composite. Evaluating it evaluates every component at the same state.
#[derive(Debug, Clone, PartialEq)]
pub struct Fluid {
    oil: OilProperties,
    water: WaterProperties,
    qliq_m3day: f64,
    fw: f64,
}

fn validate_fw(fw: f64) -> FluidResult<f64> {
    if !fw.is_finite() || !(0.0..=1.0).contains(&fw) {
        return Err(FluidError::InvalidArg {
            what: format!("water cut must be in [0, 1], got {fw}"),
        });
    }
    Ok(fw)
}

fn validate_qliq(qliq_m3day: f64) -> FluidResult<f64> {
    if !qliq_m3day.is_finite() || qliq_m3day <= 0.0 {
        return Err(FluidError::InvalidArg {
            what: format!("liquid rate must be positive and finite, got {qliq_m3day} m³/day"),
        });
    }
    Ok(qliq_m3day)
}

impl Fluid {
    pub fn new(
        oil: OilProperties,
        water: WaterProperties,
        qliq_m3day: f64,
        fw: f64,
    ) -> FluidResult<Self> {
        Ok(Self {
            oil,
            water,
            qliq_m3day: validate_qliq(qliq_m3day)?,
            fw: validate_fw(fw)?,
        })
    }

    /// Default calibrated oil, constant water, no water cut.
    pub fn black_oil(constants: &PvtConstants) -> FluidResult<Self> {
        let oil = OilProperties::new(constants, OilCalibration::with_constants(constants))?;
        let water = WaterProperties::new(constants)?;
        Self::new(oil, water, DEFAULT_QLIQ_M3DAY, 0.0)
    }

    pub fn oil(&self) -> &OilProperties {
        &self.oil
    }

    pub fn water(&self) -> &WaterProperties {
        &self.water
    }

    pub fn fw(&self) -> f64 {
        self.fw
    }

    pub fn qliq_m3day(&self) -> f64 {
        self.qliq_m3day
    }

    pub fn set_fw(&mut self, fw: f64) -> FluidResult<()> {
        self.fw = validate_fw(fw)?;
        Ok(())
    }

    pub fn set_qliq_m3day(&mut self, qliq_m3day: f64) -> FluidResult<()> {
        self.qliq_m3day = validate_qliq(qliq_m3day)?;
        Ok(())
    }

    pub fn set_oil_gamma(&mut self, gamma: f64) -> FluidResult<()> {
        self.oil.set_gamma(gamma)
    }

    pub fn set_gas_gamma(&mut self, gamma: f64) -> FluidResult<()> {
        self.oil.set_gas_gamma(gamma)
    }

    pub fn set_water_gamma(&mut self, gamma: f64) -> FluidResult<()> {
        self.water.set_gamma(gamma)
    }

    /// Current state shared by all components.
    pub fn state(&self) -> &ThermobaricState {
        self.oil.state()
    }

    /// Evaluate oil, solution gas and water at `state`.
    ///
    /// Water cannot fail, so a failed oil recompute leaves every component
    /// at the previous state.
    pub fn recompute(&mut self, state: &ThermobaricState) -> FluidResult<()> {
        self.oil.recompute(state)?;
        self.water.recompute(state)?;
        Ok(())
    }

    /// Evaluate at (p, T) and return a snapshot of every derived property.
    pub fn calc_pvt(&mut self, p: Pressure, t: Temperature) -> FluidResult<FluidPvt> {
        let state = ThermobaricState::new(p, t)?;
        self.recompute(&state)?;
        Ok(self.pvt())
    }

    /// Snapshot at the current state without recomputing.
    pub fn pvt(&self) -> FluidPvt {
        let state = self.state();
        let gas = self.oil.gas();
        FluidPvt {
            p_bar: state.p_bar(),
            t_c: state.t_c(),
            region: self.oil.region(),
            z: gas.z(),
            p_pr: gas.p_pr(),
            t_pr: gas.t_pr(),
            bg_m3m3: gas.fvf_m3m3(),
            mu_gas_cp: gas.mu_cp(),
            cg_1bar: gas.co_1bar(),
            rho_gas_kg_m3: gas.rho_kg_m3(),
            rs_m3m3: self.oil.rs_m3m3(),
            bo_m3m3: self.oil.bo_m3m3(),
            mu_oil_cp: self.oil.mu_cp(),
            co_1bar: self.oil.co_1bar(),
            rho_oil_kg_m3: self.oil.rho_kg_m3(),
            bw_m3m3: self.water.fvf_m3m3(),
            mu_water_cp: self.water.mu_cp(),
            rho_water_kg_m3: self.water.rho_kg_m3(),
            fw: self.fw,
            qliq_m3day: self.qliq_m3day,
        }
    }
}
