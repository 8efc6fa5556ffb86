//! The recompute-at-state contract shared by every fluid component.

use crate::error::{FluidError, FluidResult};
use crate::state::ThermobaricState;
use pvt_core::units::{Density, DynVisc, centipoise, kg_m3};
use serde::{Deserialize, Serialize};

/// Which phase a component represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    Gas,
    Oil,
    Water,
}

/// State common to all components: calibration input plus derived values.
///
/// Only `gamma` is an input; everything else is written by the owning
/// component during `recompute` and read-only to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentProps {
    pub(crate) gamma: f64,
    pub(crate) rho_ref_sc_kg_m3: f64,
    pub(crate) mu_cp: f64,
    pub(crate) fvf_m3m3: f64,
    pub(crate) co_1bar: f64,
    pub(crate) state: ThermobaricState,
}

impl ComponentProps {
    pub(crate) fn new(gamma: f64, rho_ref_sc_kg_m3: f64, state: ThermobaricState) -> Self {
        Self {
            gamma,
            rho_ref_sc_kg_m3,
            mu_cp: 1.0,
            fvf_m3m3: 1.0,
            co_1bar: 1e-5,
            state,
        }
    }

    /// Specific gravity (dimensionless).
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Reference density the specific gravity is relative to [kg/m³].
    pub fn rho_ref_sc_kg_m3(&self) -> f64 {
        self.rho_ref_sc_kg_m3
    }

    pub fn state(&self) -> &ThermobaricState {
        &self.state
    }
}

/// Trait for PVT fluid components.
///
/// Implementations re-derive every property from the passed state on each
/// `recompute`; nothing computed at a previous state survives the call.
pub trait PvtComponent {
    fn kind(&self) -> ComponentKind;

    /// Shared input and derived values.
    fn props(&self) -> &ComponentProps;

    /// Copy `state` into the component and re-derive all properties at it.
    ///
    /// On error the component keeps the values of its last successful recompute.
    fn recompute(&mut self, state: &ThermobaricState) -> FluidResult<()>;

    /// Change specific gravity and recompute at the current state.
    fn set_gamma(&mut self, gamma: f64) -> FluidResult<()>;

    /// Formation volume factor at the current state [m³/m³].
    fn fvf_m3m3(&self) -> f64;

    /// Density at the current state [kg/m³].
    ///
    /// Defaults to γ × reference density × FVF.
    fn rho_kg_m3(&self) -> f64 {
        let props = self.props();
        props.gamma * props.rho_ref_sc_kg_m3 * self.fvf_m3m3()
    }

    /// Density at standard conditions [kg/m³], independent of the current state.
    fn rho_sc_kg_m3(&self) -> f64 {
        let props = self.props();
        props.gamma * props.rho_ref_sc_kg_m3
    }

    /// Dynamic viscosity at the current state [cP].
    fn mu_cp(&self) -> f64 {
        self.props().mu_cp
    }

    /// Isothermal compressibility at the current state [1/bar].
    fn co_1bar(&self) -> f64 {
        self.props().co_1bar
    }

    fn gamma(&self) -> f64 {
        self.props().gamma
    }

    fn state(&self) -> &ThermobaricState {
        &self.props().state
    }

    fn density(&self) -> Density {
        kg_m3(self.rho_kg_m3())
    }

    fn viscosity(&self) -> DynVisc {
        centipoise(self.mu_cp())
    }

    fn p_bar(&self) -> f64 {
        self.state().p_bar()
    }

    fn p_atm(&self) -> f64 {
        self.state().p_atm()
    }

    fn p_psi(&self) -> f64 {
        self.state().p_psi()
    }

    fn t_c(&self) -> f64 {
        self.state().t_c()
    }

    fn t_k(&self) -> f64 {
        self.state().t_k()
    }
}

/// Validation helpers for component inputs and outputs.
pub(crate) mod validation {
    use super::*;

    /// Ensure specific gravity is positive and finite.
    pub fn validate_gamma(gamma: f64) -> FluidResult<f64> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(FluidError::InvalidArg {
                what: format!("specific gravity must be positive and finite, got {gamma}"),
            });
        }
        Ok(gamma)
    }

    /// Ensure a derived property is positive and finite.
    pub fn validate_positive(value: f64, what: &'static str) -> FluidResult<f64> {
        Ok(pvt_core::ensure_positive(value, what)?)
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;

    #[test]
    fn validate_gamma_positive() {
        assert!(validate_gamma(0.7).is_ok());
        assert!(validate_gamma(0.0).is_err());
        assert!(validate_gamma(-1.0).is_err());
        assert!(validate_gamma(f64::NAN).is_err());
    }

    #[test]
    fn validate_positive_rejects_non_physical() {
        assert!(validate_positive(1.2, "fvf").is_ok());
        assert!(validate_positive(0.0, "fvf").is_err());
        assert!(validate_positive(f64::INFINITY, "fvf").is_err());
    }
}
