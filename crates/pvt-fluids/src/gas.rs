//! Free and solution gas properties.
//!
//! Pipeline on every recompute:
//! 1. pseudo-critical pressure and temperature from specific gravity
//! 2. pseudo-reduced coordinates from the current state
//! 3. z-factor (constant or Dranchuk–Abu-Kassem)
//! 4. formation volume factor, Lee–Gonzalez–Eakin viscosity, compressibility
//!
//! Nothing is carried over from the previous state.

use crate::component::validation::{validate_gamma, validate_positive};
use crate::component::{ComponentKind, ComponentProps, PvtComponent};
use crate::constants::PvtConstants;
use crate::error::FluidResult;
use crate::state::ThermobaricState;
use crate::zfactor::{ZFactorMethod, ZFactorSolver, dak_dz_dppr};
use pvt_core::BAR_PER_ATM;
use serde::{Deserialize, Serialize};

/// Molar mass of air [kg/kmol].
const AIR_MOLAR_MASS: f64 = 28.97;

/// How the z-factor is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GasCorrelation {
    /// z fixed at `PvtConstants::z_default`; the solver is never invoked.
    ConstantZ,
    /// z from the Dranchuk–Abu-Kassem equation of state.
    DranchukAbuKassem {
        #[serde(default)]
        method: ZFactorMethod,
    },
}

impl Default for GasCorrelation {
    fn default() -> Self {
        GasCorrelation::DranchukAbuKassem {
            method: ZFactorMethod::default(),
        }
    }
}

/// Pseudo-critical pressure [MPa] from gas specific gravity.
pub fn pseudo_critical_pressure_mpa(gamma_gas: f64) -> f64 {
    4.9 - 0.4 * gamma_gas
}

/// Pseudo-critical temperature [K] from gas specific gravity.
pub fn pseudo_critical_temperature_k(gamma_gas: f64) -> f64 {
    95.0 + 171.0 * gamma_gas
}

/// Pseudo-reduced pressure: pressure in atm over ten times the pseudo-critical pressure in MPa.
pub fn pseudo_reduced_pressure(p_atm: f64, p_pc_mpa: f64) -> f64 {
    p_atm / (p_pc_mpa * 10.0)
}

pub fn pseudo_reduced_temperature(t_k: f64, t_pc_k: f64) -> f64 {
    t_k / t_pc_k
}

/// Gas formation volume factor [m³/m³] from the real-gas law.
pub fn gas_fvf_m3m3(z: f64, state: &ThermobaricState, constants: &PvtConstants) -> f64 {
    z * (state.t_k() / constants.tsc_k()) * (constants.psc_bar / state.p_bar())
}

/// Lee–Gonzalez–Eakin gas viscosity [cP].
///
/// Field units: pressure in psia, temperature in °R.
pub fn lee_gonzalez_eakin_viscosity_cp(gamma_gas: f64, z: f64, p_psia: f64, t_r: f64) -> f64 {
    let molar_mass = AIR_MOLAR_MASS * gamma_gas;
    let rho_g_cm3 = 1.4935e-3 * p_psia * molar_mass / (z * t_r);
    let k = (9.379 + 0.01607 * molar_mass) * t_r.powf(1.5) / (209.2 + 19.26 * molar_mass + t_r);
    let x = 3.448 + 986.4 / t_r + 0.01009 * molar_mass;
    let y = 2.447 - 0.2224 * x;
    1e-4 * k * (x * rho_g_cm3.powf(y)).exp()
}

/// Hydrocarbon gas component.
#[derive(Debug, Clone, PartialEq)]
pub struct GasProperties {
    props: ComponentProps,
    constants: PvtConstants,
    correlation: GasCorrelation,
    solver: ZFactorSolver,
    p_pc_mpa: f64,
    t_pc_k: f64,
    p_pr: f64,
    t_pr: f64,
    z: f64,
    z_iterations: usize,
}

impl GasProperties {
    /// Gas with the default correlation, evaluated at standard conditions.
    pub fn new(constants: &PvtConstants) -> FluidResult<Self> {
        Self::with_correlation(constants, GasCorrelation::default())
    }

    pub fn with_correlation(
        constants: &PvtConstants,
        correlation: GasCorrelation,
    ) -> FluidResult<Self> {
        constants.validate()?;
        let state = ThermobaricState::standard(constants)?;
        let solver = match correlation {
            GasCorrelation::DranchukAbuKassem { method } => ZFactorSolver::new(method),
            GasCorrelation::ConstantZ => ZFactorSolver::default(),
        };

        let mut gas = Self {
            props: ComponentProps::new(
                constants.gamma_gas_default,
                constants.air_density_sc_kg_m3,
                state,
            ),
            constants: *constants,
            correlation,
            solver,
            p_pc_mpa: 0.0,
            t_pc_k: 0.0,
            p_pr: 0.0,
            t_pr: 0.0,
            z: constants.z_default,
            z_iterations: 0,
        };
        gas.recompute(&state)?;
        Ok(gas)
    }

    pub fn correlation(&self) -> GasCorrelation {
        self.correlation
    }

    /// Compressibility factor at the current state.
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Solver iterations spent on the current z (0 for constant z).
    pub fn z_iterations(&self) -> usize {
        self.z_iterations
    }

    pub fn p_pc_mpa(&self) -> f64 {
        self.p_pc_mpa
    }

    pub fn t_pc_k(&self) -> f64 {
        self.t_pc_k
    }

    pub fn p_pr(&self) -> f64 {
        self.p_pr
    }

    pub fn t_pr(&self) -> f64 {
        self.t_pr
    }
}

impl PvtComponent for GasProperties {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Gas
    }

    fn props(&self) -> &ComponentProps {
        &self.props
    }

    fn recompute(&mut self, state: &ThermobaricState) -> FluidResult<()> {
        let gamma = self.props.gamma;
        let p_pc_mpa = validate_positive(
            pseudo_critical_pressure_mpa(gamma),
            "pseudo-critical pressure",
        )?;
        let t_pc_k = pseudo_critical_temperature_k(gamma);
        let p_pr = pseudo_reduced_pressure(state.p_atm(), p_pc_mpa);
        let t_pr = validate_positive(
            pseudo_reduced_temperature(state.t_k(), t_pc_k),
            "pseudo-reduced temperature",
        )?;

        let (z, z_iterations, dz_dppr) = match self.correlation {
            GasCorrelation::ConstantZ => (self.constants.z_default, 0, 0.0),
            GasCorrelation::DranchukAbuKassem { .. } => {
                let solution = self.solver.solve(p_pr, t_pr)?;
                let slope = dak_dz_dppr(solution.z, p_pr, t_pr)?;
                (solution.z, solution.iterations, slope)
            }
        };

        let fvf = validate_positive(
            gas_fvf_m3m3(z, state, &self.constants),
            "gas formation volume factor",
        )?;
        let mu = validate_positive(
            lee_gonzalez_eakin_viscosity_cp(gamma, z, state.p_psi(), state.t_r()),
            "gas viscosity",
        )?;
        // cg = 1/p - (1/z)·(dz/dPpr)·(dPpr/dp)
        let dppr_dp_bar = 1.0 / (BAR_PER_ATM * 10.0 * p_pc_mpa);
        let cg = 1.0 / state.p_bar() - dz_dppr * dppr_dp_bar / z;

        self.props.state = *state;
        self.props.fvf_m3m3 = fvf;
        self.props.mu_cp = mu;
        self.props.co_1bar = cg;
        self.p_pc_mpa = p_pc_mpa;
        self.t_pc_k = t_pc_k;
        self.p_pr = p_pr;
        self.t_pr = t_pr;
        self.z = z;
        self.z_iterations = z_iterations;

        tracing::debug!(
            p_bar = state.p_bar(),
            t_c = state.t_c(),
            gamma,
            p_pr,
            t_pr,
            z,
            "gas recomputed"
        );
        Ok(())
    }

    fn set_gamma(&mut self, gamma: f64) -> FluidResult<()> {
        let previous = self.props.gamma;
        self.props.gamma = validate_gamma(gamma)?;
        let state = self.props.state;
        if let Err(err) = self.recompute(&state) {
            self.props.gamma = previous;
            return Err(err);
        }
        Ok(())
    }

    fn fvf_m3m3(&self) -> f64 {
        self.props.fvf_m3m3
    }
}
