//! Water as a constant-property component.

use crate::component::validation::validate_gamma;
use crate::component::{ComponentKind, ComponentProps, PvtComponent};
use crate::constants::PvtConstants;
use crate::error::FluidResult;
use crate::state::ThermobaricState;

/// Water with pressure- and temperature-independent properties.
///
/// FVF 1, viscosity 1 cP, compressibility 1e-5 1/bar. Only the state and
/// specific gravity change.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterProperties {
    props: ComponentProps,
}

impl WaterProperties {
    pub fn new(constants: &PvtConstants) -> FluidResult<Self> {
        constants.validate()?;
        let state = ThermobaricState::standard(constants)?;
        Ok(Self {
            props: ComponentProps::new(
                constants.gamma_water_default,
                constants.water_density_sc_kg_m3,
                state,
            ),
        })
    }
}

impl PvtComponent for WaterProperties {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Water
    }

    fn props(&self) -> &ComponentProps {
        &self.props
    }

    fn recompute(&mut self, state: &ThermobaricState) -> FluidResult<()> {
        self.props.state = *state;
        tracing::trace!(p_bar = state.p_bar(), t_c = state.t_c(), "water recomputed");
        Ok(())
    }

    fn set_gamma(&mut self, gamma: f64) -> FluidResult<()> {
        self.props.gamma = validate_gamma(gamma)?;
        Ok(())
    }

    fn fvf_m3m3(&self) -> f64 {
        self.props.fvf_m3m3
    }
}
