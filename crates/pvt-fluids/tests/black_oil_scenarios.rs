//! Reference scenarios for the black-oil model.

use pvt_core::units::{bar, degc};
use pvt_fluids::gas::{pseudo_critical_pressure_mpa, pseudo_critical_temperature_k};
use pvt_fluids::zfactor::dak_residual;
use pvt_fluids::{
    BubblePointRegion, Fluid, FluidError, GasCorrelation, GasProperties, OilCalibration,
    OilCorrelation, OilProperties, PvtComponent, PvtConstants, ThermobaricState, ZFactorMethod,
    ZFactorSolver, oil_compressibility,
};

fn state(p_bar: f64, t_c: f64) -> ThermobaricState {
    ThermobaricState::from_bar_c(p_bar, t_c).unwrap()
}

#[test]
fn pseudo_criticals_for_gamma_0_8() {
    assert!((pseudo_critical_pressure_mpa(0.8) - 4.58).abs() < 1e-12);
    assert!((pseudo_critical_temperature_k(0.8) - 231.8).abs() < 1e-12);
}

#[test]
fn newton_reference_point() {
    let solution = ZFactorSolver::new(ZFactorMethod::Newton)
        .solve(1.0, 1.5)
        .unwrap();
    assert!((solution.z - 0.9034).abs() < 1e-3, "z = {}", solution.z);
    assert!(solution.iterations <= 20);
    assert!(dak_residual(solution.z, 1.0, 1.5).abs() < 1e-3);
}

#[test]
fn ideal_gas_limit() {
    for method in [
        ZFactorMethod::Newton,
        ZFactorMethod::Bisection,
        ZFactorMethod::NewtonWithBisectionFallback,
    ] {
        let z = ZFactorSolver::new(method).solve(0.0, 1.7).unwrap().z;
        assert!((z - 1.0).abs() < 1e-3, "{method:?}: z = {z}");
    }
}

#[test]
fn bo_scenario_below_and_above_bubble_point() {
    let calibration = OilCalibration {
        pb_bar: 100.0,
        bob_m3m3: 1.2,
        ..OilCalibration::default()
    };
    let mut oil = OilProperties::new(&PvtConstants::default(), calibration).unwrap();

    oil.recompute(&state(50.0, 60.0)).unwrap();
    assert!((oil.bo_m3m3() - 0.6).abs() < 1e-12);

    oil.recompute(&state(150.0, 60.0)).unwrap();
    assert_eq!(oil.bo_m3m3(), 1.2);
}

#[test]
fn oil_compressibility_at_zero_pressure_is_invalid_state() {
    let err = oil_compressibility(100.0, 50.0, 0.6, 0.86, 0.0).unwrap_err();
    assert!(matches!(err, FluidError::InvalidState { .. }));
}

#[test]
fn continuity_at_bubble_point() {
    let calibration = OilCalibration::default();
    let pb = calibration.pb_bar;
    let mut oil = OilProperties::new(&PvtConstants::default(), calibration).unwrap();

    oil.recompute(&state(pb, 70.0)).unwrap();
    let (rs_b, bo_b, mu_b) = (oil.rs_m3m3(), oil.bo_m3m3(), oil.mu_cp());

    oil.recompute(&state(pb * (1.0 - 1e-9), 70.0)).unwrap();
    assert_eq!(oil.region(), BubblePointRegion::BelowBubblePoint);
    assert!((oil.rs_m3m3() - rs_b).abs() < 1e-6);
    assert!((oil.bo_m3m3() - bo_b).abs() < 1e-6);
    assert!((oil.mu_cp() - mu_b).abs() < 1e-6);
}

#[test]
fn density_jumps_at_bubble_point() {
    let calibration = OilCalibration::default();
    let rhob = calibration.rhob_kg_m3;
    let mut oil = OilProperties::new(&PvtConstants::default(), calibration).unwrap();

    oil.recompute(&state(calibration.pb_bar * (1.0 - 1e-9), 70.0))
        .unwrap();
    let below = oil.rho_kg_m3();
    oil.recompute(&state(calibration.pb_bar, 70.0)).unwrap();
    let at = oil.rho_kg_m3();

    // Linear branch ends at 0.8·ρb while the plateau is ρb
    assert!((below - 0.8 * rhob).abs() < 1e-4);
    assert_eq!(at, rhob);
}

#[test]
fn newton_and_bisection_agree_over_reservoir_conditions() {
    let newton = ZFactorSolver::new(ZFactorMethod::Newton);
    let bisection = ZFactorSolver::new(ZFactorMethod::Bisection);

    for gamma in [0.55, 0.65, 0.8, 0.95, 1.09] {
        for t_c in [40.0, 80.0, 120.0, 150.0] {
            for p_bar in [10.0, 50.0, 100.0, 200.0, 300.0, 400.0] {
                let s = state(p_bar, t_c);
                let p_pr = s.p_atm() / (10.0 * pseudo_critical_pressure_mpa(gamma));
                let t_pr = s.t_k() / pseudo_critical_temperature_k(gamma);
                let zn = newton.solve(p_pr, t_pr).unwrap();
                let zb = bisection.solve(p_pr, t_pr).unwrap();
                assert!(
                    (zn.z - zb.z).abs() < 1e-3,
                    "γ={gamma} T={t_c} p={p_bar}: newton {} bisection {}",
                    zn.z,
                    zb.z
                );
                assert!(zn.iterations <= 20);
            }
        }
    }
}

#[test]
fn default_solver_holds_for_heavy_gas_and_cool_conditions() {
    let solver = ZFactorSolver::default();
    let bisection = ZFactorSolver::new(ZFactorMethod::Bisection);

    for gamma in [0.55, 0.65, 0.8, 0.95, 1.09, 1.19] {
        for t_c in [10.0, 20.0, 40.0, 80.0, 120.0, 150.0] {
            for p_bar in [10.0, 50.0, 100.0, 130.0, 200.0, 300.0, 400.0] {
                let s = state(p_bar, t_c);
                let p_pr = s.p_atm() / (10.0 * pseudo_critical_pressure_mpa(gamma));
                let t_pr = s.t_k() / pseudo_critical_temperature_k(gamma);
                let z = solver.solve(p_pr, t_pr).unwrap().z;
                let zb = bisection.solve(p_pr, t_pr).unwrap().z;
                assert!(
                    (z - zb).abs() < 1e-3,
                    "γ={gamma} T={t_c} p={p_bar}: solved {z} bisection {zb}"
                );
                assert!(dak_residual(z, p_pr, t_pr).abs() < 1e-3);
            }
        }
    }
}

#[test]
fn heavy_gas_near_critical_keeps_physical_z() {
    let mut gas = GasProperties::new(&PvtConstants::default()).unwrap();
    gas.set_gamma(1.15).unwrap();
    gas.recompute(&state(130.0, 20.0)).unwrap();

    assert!((gas.z() - 0.4242).abs() < 1e-3, "z = {}", gas.z());
    assert!((gas.p_pr() - 2.8896).abs() < 1e-3);
    assert!((gas.t_pr() - 1.0051).abs() < 1e-3);
}

#[test]
fn near_critical_temperature_falls_back_to_bisection() {
    let solver = ZFactorSolver::default();
    assert!(matches!(
        ZFactorSolver::new(ZFactorMethod::Newton).solve(3.0, 1.0),
        Err(FluidError::NonConvergence { .. })
    ));

    let solution = solver.solve(3.0, 1.0).unwrap();
    assert_eq!(solution.method, ZFactorMethod::Bisection);
    assert!((solution.z - 0.4375).abs() < 1e-3);
}

#[test]
fn stale_z_is_never_reused() {
    let mut gas = GasProperties::new(&PvtConstants::default()).unwrap();
    gas.recompute(&state(100.0, 60.0)).unwrap();
    let z_100 = gas.z();

    gas.recompute(&state(250.0, 60.0)).unwrap();
    gas.recompute(&state(100.0, 60.0)).unwrap();
    assert_eq!(gas.z(), z_100);

    gas.recompute(&state(100.0, 110.0)).unwrap();
    assert_ne!(gas.z(), z_100);
}

#[test]
fn standing_correlation_is_unimplemented() {
    let result = OilProperties::with_correlations(
        &PvtConstants::default(),
        OilCalibration::default(),
        OilCorrelation::Standing,
        GasCorrelation::default(),
    );
    assert!(matches!(
        result,
        Err(FluidError::UnimplementedCorrelation { .. })
    ));
}

#[test]
fn fluid_pvt_snapshot_matches_components() {
    let mut fluid = Fluid::black_oil(&PvtConstants::default()).unwrap();
    fluid.set_fw(0.3).unwrap();
    let pvt = fluid.calc_pvt(bar(80.0), degc(75.0)).unwrap();

    assert_eq!(pvt.region, BubblePointRegion::BelowBubblePoint);
    assert_eq!(pvt.z, fluid.oil().gas().z());
    assert_eq!(pvt.bo_m3m3, fluid.oil().bo_m3m3());
    assert_eq!(pvt.rho_water_kg_m3, 1000.0);
    assert_eq!(pvt.fw, 0.3);
    assert_eq!(pvt.qliq_m3day, 10.0);
}

#[test]
fn regional_constants_change_results() {
    let metric = Fluid::black_oil(&PvtConstants::default());
    let field = Fluid::black_oil(&PvtConstants {
        tsc_c: 15.556,
        psc_bar: 1.01353,
        ..PvtConstants::default()
    });
    let mut metric = metric.unwrap();
    let mut field = field.unwrap();

    let a = metric.calc_pvt(bar(120.0), degc(90.0)).unwrap();
    let b = field.calc_pvt(bar(120.0), degc(90.0)).unwrap();
    assert_eq!(a.z, b.z);
    assert_ne!(a.bg_m3m3, b.bg_m3m3);
}
