//! Black-oil properties from bubble-point calibration values.
//!
//! Below the calibrated bubble-point pressure `Pb` every property is a straight
//! line in pressure that reaches its calibration value at `Pb`. At and above
//! `Pb` the calibration value is returned unchanged. Compressibility uses a
//! closed-form correlation in both regions.

use crate::component::validation::{validate_gamma, validate_positive};
use crate::component::{ComponentKind, ComponentProps, PvtComponent};
use crate::constants::PvtConstants;
use crate::error::{FluidError, FluidResult};
use crate::gas::{GasCorrelation, GasProperties};
use crate::state::ThermobaricState;
use serde::{Deserialize, Serialize};

/// Ratio of zero-pressure density to bubble-point density on the linear branch.
const RHO_ZERO_PRESSURE_FACTOR: f64 = 1.8;

/// Measured oil properties at the bubble point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OilCalibration {
    /// Bubble-point pressure [bar]
    pub pb_bar: f64,
    /// Temperature the bubble point was measured at [°C]
    pub tb_c: f64,
    /// Oil formation volume factor at Pb [m³/m³]
    pub bob_m3m3: f64,
    /// Oil viscosity at Pb [cP]
    pub muob_cp: f64,
    /// Oil density at Pb [kg/m³]
    pub rhob_kg_m3: f64,
    /// Solution gas-oil ratio at Pb [m³/m³]
    pub rsb_m3m3: f64,
}

impl Default for OilCalibration {
    fn default() -> Self {
        Self {
            pb_bar: 100.0,
            tb_c: 50.0,
            bob_m3m3: 1.2,
            muob_cp: 1.0,
            rhob_kg_m3: 700.0,
            rsb_m3m3: pvt_core::units::constants::RSB_DEFAULT_M3M3,
        }
    }
}

impl OilCalibration {
    /// Default calibration with the gas-oil ratio taken from `constants`.
    pub fn with_constants(constants: &PvtConstants) -> Self {
        Self {
            rsb_m3m3: constants.rsb_default_m3m3,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> FluidResult<()> {
        let positive = [
            ("pb_bar", self.pb_bar),
            ("bob_m3m3", self.bob_m3m3),
            ("muob_cp", self.muob_cp),
            ("rhob_kg_m3", self.rhob_kg_m3),
            ("rsb_m3m3", self.rsb_m3m3),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(FluidError::InvalidArg {
                    what: format!("calibration {name} must be positive and finite, got {value}"),
                });
            }
        }
        if !self.tb_c.is_finite() || pvt_core::c_to_k(self.tb_c) <= 0.0 {
            return Err(FluidError::InvalidArg {
                what: format!("calibration tb_c {} °C is below absolute zero", self.tb_c),
            });
        }
        Ok(())
    }
}

/// Oil correlation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OilCorrelation {
    /// Straight lines through the bubble-point calibration.
    #[default]
    Calibrated,
    /// Standing correlations. No formulas yet; selecting it fails.
    Standing,
}

impl OilCorrelation {
    pub fn name(&self) -> &'static str {
        match self {
            OilCorrelation::Calibrated => "Calibrated",
            OilCorrelation::Standing => "Standing",
        }
    }

    /// Fails with `UnimplementedCorrelation` for families without formulas.
    pub fn ensure_implemented(&self) -> FluidResult<()> {
        match self {
            OilCorrelation::Calibrated => Ok(()),
            OilCorrelation::Standing => Err(FluidError::UnimplementedCorrelation {
                correlation: self.name(),
            }),
        }
    }
}

/// Which side of the bubble point the last recompute landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubblePointRegion {
    BelowBubblePoint,
    AtOrAboveBubblePoint,
}

impl BubblePointRegion {
    pub fn classify(p_bar: f64, pb_bar: f64) -> Self {
        if p_bar < pb_bar {
            BubblePointRegion::BelowBubblePoint
        } else {
            BubblePointRegion::AtOrAboveBubblePoint
        }
    }
}

/// Oil isothermal compressibility [1/bar].
///
/// `t_c` in °C, `p_bar` absolute. Undefined at zero pressure.
pub fn oil_compressibility(
    rsb_m3m3: f64,
    t_c: f64,
    gamma_gas: f64,
    gamma_oil: f64,
    p_bar: f64,
) -> FluidResult<f64> {
    if !p_bar.is_finite() || p_bar <= 0.0 {
        return Err(FluidError::InvalidState {
            what: format!("oil compressibility is undefined at pressure {p_bar} bar"),
        });
    }
    let co = (28.1 * rsb_m3m3 + 30.6 * (t_c + 273.0) - 1180.0 * gamma_gas + 1784.0 / gamma_oil
        - 10910.0)
        / (100_000.0 * p_bar);
    if !co.is_finite() {
        return Err(FluidError::InvalidState {
            what: format!("oil compressibility is not finite at {p_bar} bar, {t_c} °C"),
        });
    }
    Ok(co)
}

/// Values produced by one evaluation of the calibrated model.
struct OilBranch {
    region: BubblePointRegion,
    rs_m3m3: f64,
    bo_m3m3: f64,
    mu_cp: f64,
    rho_kg_m3: f64,
}

fn calibrated_branch(calibration: &OilCalibration, p_bar: f64) -> OilBranch {
    let pb = calibration.pb_bar;
    match BubblePointRegion::classify(p_bar, pb) {
        BubblePointRegion::BelowBubblePoint => OilBranch {
            region: BubblePointRegion::BelowBubblePoint,
            rs_m3m3: calibration.rsb_m3m3 / pb * p_bar,
            bo_m3m3: calibration.bob_m3m3 / pb * p_bar,
            mu_cp: calibration.muob_cp / pb * p_bar,
            // Inverted slope: reaches 0.8·ρb at Pb, not ρb
            rho_kg_m3: -calibration.rhob_kg_m3 / pb * p_bar
                + RHO_ZERO_PRESSURE_FACTOR * calibration.rhob_kg_m3,
        },
        BubblePointRegion::AtOrAboveBubblePoint => OilBranch {
            region: BubblePointRegion::AtOrAboveBubblePoint,
            rs_m3m3: calibration.rsb_m3m3,
            bo_m3m3: calibration.bob_m3m3,
            mu_cp: calibration.muob_cp,
            rho_kg_m3: calibration.rhob_kg_m3,
        },
    }
}

/// Oil component with its own solution gas.
#[derive(Debug, Clone, PartialEq)]
pub struct OilProperties {
    props: ComponentProps,
    calibration: OilCalibration,
    correlation: OilCorrelation,
    gas: GasProperties,
    rs_m3m3: f64,
    rho_kg_m3: f64,
    region: BubblePointRegion,
}

impl OilProperties {
    /// Calibrated oil with default gas, evaluated at standard conditions.
    pub fn new(constants: &PvtConstants, calibration: OilCalibration) -> FluidResult<Self> {
        Self::with_correlations(
            constants,
            calibration,
            OilCorrelation::default(),
            GasCorrelation::default(),
        )
    }

    pub fn with_correlations(
        constants: &PvtConstants,
        calibration: OilCalibration,
        correlation: OilCorrelation,
        gas_correlation: GasCorrelation,
    ) -> FluidResult<Self> {
        correlation.ensure_implemented()?;
        calibration.validate()?;
        let gas = GasProperties::with_correlation(constants, gas_correlation)?;
        let state = ThermobaricState::standard(constants)?;

        let mut oil = Self {
            props: ComponentProps::new(
                constants.gamma_oil_default,
                constants.water_density_sc_kg_m3,
                state,
            ),
            calibration,
            correlation,
            gas,
            rs_m3m3: 0.0,
            rho_kg_m3: calibration.rhob_kg_m3,
            region: BubblePointRegion::BelowBubblePoint,
        };
        oil.recompute(&state)?;
        Ok(oil)
    }

    pub fn calibration(&self) -> &OilCalibration {
        &self.calibration
    }

    pub fn correlation(&self) -> OilCorrelation {
        self.correlation
    }

    /// Solution gas, evaluated at the same state as the oil.
    pub fn gas(&self) -> &GasProperties {
        &self.gas
    }

    /// Solution gas-oil ratio [m³/m³].
    pub fn rs_m3m3(&self) -> f64 {
        self.rs_m3m3
    }

    /// Oil formation volume factor [m³/m³].
    pub fn bo_m3m3(&self) -> f64 {
        self.props.fvf_m3m3
    }

    pub fn region(&self) -> BubblePointRegion {
        self.region
    }

    /// Change the solution gas specific gravity and recompute oil and gas.
    pub fn set_gas_gamma(&mut self, gamma: f64) -> FluidResult<()> {
        let mut next = self.clone();
        next.gas.set_gamma(gamma)?;
        let state = next.props.state;
        next.recompute(&state)?;
        *self = next;
        Ok(())
    }

    /// Replace the bubble-point calibration and recompute at the current state.
    pub fn set_calibration(&mut self, calibration: OilCalibration) -> FluidResult<()> {
        calibration.validate()?;
        let mut next = self.clone();
        next.calibration = calibration;
        let state = next.props.state;
        next.recompute(&state)?;
        *self = next;
        Ok(())
    }
}

impl PvtComponent for OilProperties {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Oil
    }

    fn props(&self) -> &ComponentProps {
        &self.props
    }

    fn recompute(&mut self, state: &ThermobaricState) -> FluidResult<()> {
        self.correlation.ensure_implemented()?;
        let p_bar = state.p_bar();
        let branch = calibrated_branch(&self.calibration, p_bar);
        let bo = validate_positive(branch.bo_m3m3, "oil formation volume factor")?;
        let co = oil_compressibility(
            self.calibration.rsb_m3m3,
            state.t_c(),
            self.gas.gamma(),
            self.props.gamma,
            p_bar,
        )?;

        self.gas.recompute(state)?;

        self.props.state = *state;
        self.props.fvf_m3m3 = bo;
        self.props.mu_cp = branch.mu_cp;
        self.props.co_1bar = co;
        self.rs_m3m3 = branch.rs_m3m3;
        self.rho_kg_m3 = branch.rho_kg_m3;
        self.region = branch.region;

        tracing::debug!(
            p_bar,
            t_c = state.t_c(),
            region = ?branch.region,
            rs = branch.rs_m3m3,
            bo,
            "oil recomputed"
        );
        Ok(())
    }

    fn set_gamma(&mut self, gamma: f64) -> FluidResult<()> {
        let mut next = self.clone();
        next.props.gamma = validate_gamma(gamma)?;
        let state = next.props.state;
        next.recompute(&state)?;
        *self = next;
        Ok(())
    }

    fn fvf_m3m3(&self) -> f64 {
        self.props.fvf_m3m3
    }

    fn rho_kg_m3(&self) -> f64 {
        self.rho_kg_m3
    }
}
