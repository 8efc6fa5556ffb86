//! Thermobaric state definitions.

use crate::constants::PvtConstants;
use crate::error::{FluidError, FluidResult};
use pvt_core::units::{Pressure, Temperature, bar, degc, degf, psia};
use uom::si::pressure::{atmosphere, pascal};
use uom::si::thermodynamic_temperature::{
    degree_celsius, degree_fahrenheit, degree_rankine, kelvin,
};

/// Pressure/temperature pair at which fluid components are evaluated.
///
/// Immutable once built. Components store their own copy on every recompute,
/// so a state can be reused across any number of evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermobaricState {
    p: Pressure,
    t: Temperature,
}

impl ThermobaricState {
    /// Create a state from absolute pressure and temperature.
    ///
    /// Validates that pressure and absolute temperature are positive and finite.
    pub fn new(p: Pressure, t: Temperature) -> FluidResult<Self> {
        let p_val = p.get::<pascal>();
        if !p_val.is_finite() || p_val <= 0.0 {
            return Err(FluidError::InvalidState {
                what: format!("pressure must be positive and finite, got {p_val} Pa"),
            });
        }

        let t_val = t.get::<kelvin>();
        if !t_val.is_finite() || t_val <= 0.0 {
            return Err(FluidError::InvalidState {
                what: format!("temperature must be above absolute zero, got {t_val} K"),
            });
        }

        Ok(Self { p, t })
    }

    /// Absolute pressure in bar, temperature in °C.
    pub fn from_bar_c(p_bar: f64, t_c: f64) -> FluidResult<Self> {
        Self::new(bar(p_bar), degc(t_c))
    }

    /// Absolute pressure in psia, temperature in °F.
    pub fn from_psia_f(p_psia: f64, t_f: f64) -> FluidResult<Self> {
        Self::new(psia(p_psia), degf(t_f))
    }

    /// Standard conditions of the given constant set.
    pub fn standard(constants: &PvtConstants) -> FluidResult<Self> {
        Self::from_bar_c(constants.psc_bar, constants.tsc_c)
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }

    pub fn p_bar(&self) -> f64 {
        self.p.get::<uom::si::pressure::bar>()
    }

    pub fn p_atm(&self) -> f64 {
        self.p.get::<atmosphere>()
    }

    pub fn p_psi(&self) -> f64 {
        pvt_core::bar_to_psi(self.p_bar())
    }

    pub fn t_c(&self) -> f64 {
        self.t.get::<degree_celsius>()
    }

    pub fn t_k(&self) -> f64 {
        self.t.get::<kelvin>()
    }

    pub fn t_f(&self) -> f64 {
        self.t.get::<degree_fahrenheit>()
    }

    pub fn t_r(&self) -> f64 {
        self.t.get::<degree_rankine>()
    }
}
