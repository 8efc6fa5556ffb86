//! Property tests for the recompute contract.

use proptest::prelude::*;
use pvt_fluids::{
    BubblePointRegion, Fluid, OilCalibration, OilProperties, PvtComponent, PvtConstants,
    ThermobaricState,
};

proptest! {
    #[test]
    fn recompute_is_idempotent(p_bar in 2.0..400.0f64, t_c in 20.0..150.0f64, fw in 0.0..1.0f64) {
        let mut fluid = Fluid::black_oil(&PvtConstants::default()).unwrap();
        fluid.set_fw(fw).unwrap();
        let state = ThermobaricState::from_bar_c(p_bar, t_c).unwrap();

        fluid.recompute(&state).unwrap();
        let first = fluid.pvt();
        fluid.recompute(&state).unwrap();
        prop_assert_eq!(first, fluid.pvt());
    }

    #[test]
    fn result_independent_of_history(
        p_prev in 2.0..400.0f64,
        t_prev in 20.0..150.0f64,
        p_bar in 2.0..400.0f64,
        t_c in 20.0..150.0f64,
    ) {
        let constants = PvtConstants::default();
        let state = ThermobaricState::from_bar_c(p_bar, t_c).unwrap();

        let mut fresh = Fluid::black_oil(&constants).unwrap();
        fresh.recompute(&state).unwrap();

        let mut visited = Fluid::black_oil(&constants).unwrap();
        visited.recompute(&ThermobaricState::from_bar_c(p_prev, t_prev).unwrap()).unwrap();
        visited.recompute(&state).unwrap();

        prop_assert_eq!(fresh.pvt(), visited.pvt());
    }

    #[test]
    fn plateau_ignores_pressure(pb in 50.0..250.0f64, excess in 0.001..300.0f64, t_c in 20.0..150.0f64) {
        let calibration = OilCalibration { pb_bar: pb, ..OilCalibration::default() };
        let mut oil = OilProperties::new(&PvtConstants::default(), calibration).unwrap();
        oil.recompute(&ThermobaricState::from_bar_c(pb + excess, t_c).unwrap()).unwrap();

        prop_assert_eq!(oil.region(), BubblePointRegion::AtOrAboveBubblePoint);
        prop_assert_eq!(oil.bo_m3m3(), calibration.bob_m3m3);
        prop_assert_eq!(oil.rs_m3m3(), calibration.rsb_m3m3);
        prop_assert_eq!(oil.mu_cp(), calibration.muob_cp);
        prop_assert_eq!(oil.rho_kg_m3(), calibration.rhob_kg_m3);
    }

    #[test]
    fn below_bubble_point_is_proportional(frac in 0.01..0.99f64) {
        let calibration = OilCalibration::default();
        let mut oil = OilProperties::new(&PvtConstants::default(), calibration).unwrap();
        let p_bar = frac * calibration.pb_bar;
        oil.recompute(&ThermobaricState::from_bar_c(p_bar, 60.0).unwrap()).unwrap();

        prop_assert_eq!(oil.region(), BubblePointRegion::BelowBubblePoint);
        prop_assert!((oil.bo_m3m3() - frac * calibration.bob_m3m3).abs() < 1e-9);
        prop_assert!((oil.rs_m3m3() - frac * calibration.rsb_m3m3).abs() < 1e-9);
        prop_assert!(oil.rho_kg_m3() > 0.8 * calibration.rhob_kg_m3);
    }

    #[test]
    fn gas_properties_are_physical(gamma in 0.55..1.1f64, p_bar in 5.0..400.0f64, t_c in 30.0..150.0f64) {
        let mut fluid = Fluid::black_oil(&PvtConstants::default()).unwrap();
        fluid.set_gas_gamma(gamma).unwrap();
        fluid.recompute(&ThermobaricState::from_bar_c(p_bar, t_c).unwrap()).unwrap();
        let pvt = fluid.pvt();

        prop_assert!(pvt.z > 0.0 && pvt.z <= 2.0);
        prop_assert!(pvt.bg_m3m3 > 0.0);
        prop_assert!(pvt.mu_gas_cp > 0.0 && pvt.mu_gas_cp < 0.2);
        prop_assert!(pvt.cg_1bar > 0.0);
    }
}
