//! pvt-fluids: black-oil PVT properties of reservoir fluids.
//!
//! Provides:
//! - Thermobaric state representation
//! - `PvtComponent` recompute contract shared by gas, oil and water
//! - Dranchuk–Abu-Kassem z-factor solver (Newton–Raphson with bisection fallback)
//! - Gas pseudo-critical / pseudo-reduced pipeline with correlation-backed FVF,
//!   viscosity and compressibility
//! - Calibrated oil model branching on the bubble point
//! - `Fluid` composite and parallel property sweeps
//!
//! # Example
//!
//! ```no_run
//! use pvt_fluids::{Fluid, PvtConstants};
//! use pvt_core::units::{bar, degc};
//!
//! let mut fluid = Fluid::black_oil(&PvtConstants::default()).unwrap();
//! let pvt = fluid.calc_pvt(bar(150.0), degc(80.0)).unwrap();
//! println!("z = {:.4}, Bo = {:.3}", pvt.z, pvt.bo_m3m3);
//! ```

pub mod component;
pub mod constants;
pub mod error;
pub mod fluid;
pub mod gas;
pub mod oil;
pub mod state;
pub mod sweep_executor;
pub mod sweeps;
pub mod units;
pub mod water;
pub mod zfactor;

// Re-exports for ergonomics
pub use component::{ComponentKind, ComponentProps, PvtComponent};
pub use constants::PvtConstants;
pub use error::{FluidError, FluidResult};
pub use fluid::{DEFAULT_QLIQ_M3DAY, Fluid, FluidPvt};
pub use gas::{GasCorrelation, GasProperties};
pub use oil::{
    BubblePointRegion, OilCalibration, OilCorrelation, OilProperties, oil_compressibility,
};
pub use state::ThermobaricState;
pub use sweep_executor::{
    SweepError, SweepResult, SweepVariable, execute_pressure_sweep_at_temperature,
    execute_temperature_sweep_at_pressure,
};
pub use sweeps::{SweepDefinition, SweepType};
pub use units::{Quantity, UnitError, parse_quantity};
pub use water::WaterProperties;
pub use zfactor::{ZFactorMethod, ZFactorSolution, ZFactorSolver};
