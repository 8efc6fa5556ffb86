// pvt-core/src/units.rs

use uom::si::f64::{
    DynamicViscosity as UomDynamicViscosity, MassDensity as UomMassDensity,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type DynVisc = UomDynamicViscosity;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

pub const BAR_PER_ATM: f64 = 1.013_25;
pub const PSI_PER_BAR: f64 = 14.503_773_8;
pub const KELVIN_OFFSET: f64 = 273.15;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn atm(v: f64) -> Pressure {
    use uom::si::pressure::atmosphere;
    Pressure::new::<atmosphere>(v)
}

#[inline]
pub fn psia(v: f64) -> Pressure {
    bar(psi_to_bar(v))
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn degf(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn centipoise(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::millipascal_second;
    DynVisc::new::<millipascal_second>(v)
}

#[inline]
pub fn kg_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

// Plain field-unit conversions for correlation code that works in f64.

#[inline]
pub fn bar_to_atm(p_bar: f64) -> f64 {
    p_bar / BAR_PER_ATM
}

#[inline]
pub fn atm_to_bar(p_atm: f64) -> f64 {
    p_atm * BAR_PER_ATM
}

#[inline]
pub fn bar_to_psi(p_bar: f64) -> f64 {
    p_bar * PSI_PER_BAR
}

#[inline]
pub fn psi_to_bar(p_psi: f64) -> f64 {
    p_psi / PSI_PER_BAR
}

#[inline]
pub fn c_to_k(t_c: f64) -> f64 {
    t_c + KELVIN_OFFSET
}

#[inline]
pub fn k_to_c(t_k: f64) -> f64 {
    t_k - KELVIN_OFFSET
}

#[inline]
pub fn c_to_f(t_c: f64) -> f64 {
    t_c * 9.0 / 5.0 + 32.0
}

#[inline]
pub fn f_to_c(t_f: f64) -> f64 {
    (t_f - 32.0) * 5.0 / 9.0
}

#[inline]
pub fn k_to_r(t_k: f64) -> f64 {
    t_k * 9.0 / 5.0
}

/// Named reference values for black-oil correlations.
pub mod constants {
    /// Standard (stock-tank) pressure [bar].
    pub const PSC_BAR: f64 = 1.013_25;
    /// Standard (stock-tank) temperature [°C].
    pub const TSC_C: f64 = 15.0;
    /// Air density at standard conditions [kg/m³].
    pub const AIR_DENSITY_SC_KG_M3: f64 = 1.2217;
    /// Fresh water density at standard conditions [kg/m³].
    pub const WATER_DENSITY_SC_KG_M3: f64 = 1000.0;
    pub const GAMMA_GAS_DEFAULT: f64 = 0.6;
    pub const GAMMA_OIL_DEFAULT: f64 = 0.86;
    pub const GAMMA_WATER_DEFAULT: f64 = 1.0;
    pub const Z_DEFAULT: f64 = 0.9;
    /// Solution gas-oil ratio at bubble point [m³/m³].
    pub const RSB_DEFAULT_M3M3: f64 = 100.0;
}
