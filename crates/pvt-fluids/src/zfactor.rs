//! Gas compressibility factor from the Dranchuk–Abu-Kassem equation of state.
//!
//! With reduced density `ρr = 0.27·Ppr / (z·Tpr)` the z-factor is the root of
//!
//! ```text
//! F(z) = -z + 1 + H(ρr)
//! H(ρ) = (A1 + A2/Tpr + A3/Tpr³ + A4/Tpr⁴ + A5/Tpr⁵)·ρ
//!      + (A6 + A7/Tpr + A8/Tpr²)·ρ²
//!      - A9·(A7/Tpr + A8/Tpr²)·ρ⁵
//!      + A10·(1 + A11·ρ²)·(ρ²/Tpr³)·exp(-A11·ρ²)
//! ```
//!
//! The equation is implicit in z. Newton–Raphson with the analytic derivative
//! is the fast path; bracketing bisection on [0.1, 5] is the robust one.

use crate::error::{FluidError, FluidResult};
use pvt_solver::{
    BisectionConfig, NewtonConfig, SolverError, bisection_solve, newton_solve,
};
use serde::{Deserialize, Serialize};

/// A1..A11 of the Dranchuk–Abu-Kassem correlation.
pub const DAK_COEFFICIENTS: [f64; 11] = [
    0.3265, -1.07, -0.5339, 0.01569, -0.05165, 0.5475, -0.7361, 0.1844, 0.1056, 0.6134, 0.721,
];

/// Temperature-only groups of the correlation, evaluated once per Tpr.
#[derive(Debug, Clone, Copy)]
struct DakTerms {
    linear: f64,
    quadratic: f64,
    quintic: f64,
    exponential: f64,
}

impl DakTerms {
    fn new(tpr: f64) -> Self {
        let [a1, a2, a3, a4, a5, a6, a7, a8, a9, a10, _] = DAK_COEFFICIENTS;
        let t2 = tpr * tpr;
        let t3 = t2 * tpr;
        Self {
            linear: a1 + a2 / tpr + a3 / t3 + a4 / (t3 * tpr) + a5 / (t3 * t2),
            quadratic: a6 + a7 / tpr + a8 / t2,
            quintic: a9 * (a7 / tpr + a8 / t2),
            exponential: a10 / t3,
        }
    }

    /// H(ρ)
    fn excess(&self, rho: f64) -> f64 {
        let a11 = DAK_COEFFICIENTS[10];
        let rho2 = rho * rho;
        self.linear * rho + self.quadratic * rho2 - self.quintic * rho2 * rho2 * rho
            + self.exponential * (1.0 + a11 * rho2) * rho2 * (-a11 * rho2).exp()
    }

    /// dH/dρ
    fn excess_slope(&self, rho: f64) -> f64 {
        let a11 = DAK_COEFFICIENTS[10];
        let rho2 = rho * rho;
        self.linear + 2.0 * self.quadratic * rho - 5.0 * self.quintic * rho2 * rho2
            + self.exponential
                * 2.0
                * rho
                * (1.0 + a11 * rho2 - a11 * a11 * rho2 * rho2)
                * (-a11 * rho2).exp()
    }
}

#[inline]
fn reduced_density(z: f64, ppr: f64, tpr: f64) -> f64 {
    0.27 * ppr / (z * tpr)
}

/// F(z) at the given pseudo-reduced coordinates.
pub fn dak_residual(z: f64, ppr: f64, tpr: f64) -> f64 {
    let rho = reduced_density(z, ppr, tpr);
    -z + DakTerms::new(tpr).excess(rho) + 1.0
}

/// ∂F/∂z, closed form.
pub fn dak_derivative(z: f64, ppr: f64, tpr: f64) -> f64 {
    let rho = reduced_density(z, ppr, tpr);
    -1.0 - DakTerms::new(tpr).excess_slope(rho) * rho / z
}

/// ∂F/∂Ppr at fixed z, closed form.
pub fn dak_pressure_derivative(z: f64, ppr: f64, tpr: f64) -> f64 {
    let rho = reduced_density(z, ppr, tpr);
    DakTerms::new(tpr).excess_slope(rho) * 0.27 / (z * tpr)
}

/// dz/dPpr along the solution curve F(z, Ppr) = 0 (implicit differentiation).
pub fn dak_dz_dppr(z: f64, ppr: f64, tpr: f64) -> FluidResult<f64> {
    let dfdz = dak_derivative(z, ppr, tpr);
    if !dfdz.is_finite() || dfdz.abs() < 1e-12 {
        return Err(FluidError::NonConvergence {
            what: format!("singular dF/dz = {dfdz} at z = {z}"),
        });
    }
    Ok(-dak_pressure_derivative(z, ppr, tpr) / dfdz)
}

/// Root-finding strategy for the z-factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZFactorMethod {
    Newton,
    Bisection,
    /// Newton–Raphson first; one bisection attempt if it fails.
    #[default]
    NewtonWithBisectionFallback,
}

/// A solved z-factor and how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZFactorSolution {
    pub z: f64,
    pub iterations: usize,
    /// Strategy that produced `z` (never the fallback variant).
    pub method: ZFactorMethod,
}

/// Dranchuk–Abu-Kassem z-factor solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZFactorSolver {
    method: ZFactorMethod,
    newton: NewtonConfig,
    bisection: BisectionConfig,
}

impl Default for ZFactorSolver {
    fn default() -> Self {
        Self::new(ZFactorMethod::default())
    }
}

impl ZFactorSolver {
    /// Initial guess for Newton–Raphson (ideal gas).
    pub const INITIAL_GUESS: f64 = 1.0;

    pub fn new(method: ZFactorMethod) -> Self {
        Self {
            method,
            newton: NewtonConfig {
                max_iterations: 200,
                step_tol: 1e-3,
                min_derivative: 1e-12,
                floor: Some(0.0),
                residual_tol: Some(1e-3),
            },
            bisection: BisectionConfig {
                lower: 0.1,
                upper: 5.0,
                min_iterations: 25,
                max_iterations: 200,
                x_tol: 1e-3,
            },
        }
    }

    pub fn method(&self) -> ZFactorMethod {
        self.method
    }

    /// Solve for z at the given pseudo-reduced pressure and temperature.
    pub fn solve(&self, ppr: f64, tpr: f64) -> FluidResult<ZFactorSolution> {
        validate_reduced(ppr, tpr)?;
        match self.method {
            ZFactorMethod::Newton => self.solve_newton(ppr, tpr),
            ZFactorMethod::Bisection => self.solve_bisection(ppr, tpr),
            ZFactorMethod::NewtonWithBisectionFallback => match self.solve_newton(ppr, tpr) {
                Ok(solution) => Ok(solution),
                Err(FluidError::NonConvergence { what }) => {
                    tracing::warn!(ppr, tpr, reason = %what, "newton z-factor failed, falling back to bisection");
                    self.solve_bisection(ppr, tpr)
                }
                Err(other) => Err(other),
            },
        }
    }

    /// Newton–Raphson from z = 1 with the analytic derivative.
    ///
    /// The accepted z must satisfy |F(z)| ≤ 1e-3. Close to Tpr = 1 the first
    /// step can land near z ≈ 0.003 where dF/dz is huge and the steps are
    /// short; that is reported as `NonConvergence`.
    pub fn solve_newton(&self, ppr: f64, tpr: f64) -> FluidResult<ZFactorSolution> {
        validate_reduced(ppr, tpr)?;
        let result = newton_solve(
            Self::INITIAL_GUESS,
            |z| dak_residual(z, ppr, tpr),
            |z| dak_derivative(z, ppr, tpr),
            &self.newton,
        )
        .map_err(|e| map_solver_error(e, "newton"))?;

        tracing::debug!(ppr, tpr, z = result.x, iterations = result.iterations, "newton z-factor converged");
        Ok(ZFactorSolution {
            z: result.x,
            iterations: result.iterations,
            method: ZFactorMethod::Newton,
        })
    }

    /// Bisection on [0.1, 5].
    pub fn solve_bisection(&self, ppr: f64, tpr: f64) -> FluidResult<ZFactorSolution> {
        validate_reduced(ppr, tpr)?;
        let result = bisection_solve(|z| dak_residual(z, ppr, tpr), &self.bisection)
            .map_err(|e| map_solver_error(e, "bisection"))?;

        tracing::debug!(ppr, tpr, z = result.x, iterations = result.iterations, "bisection z-factor converged");
        Ok(ZFactorSolution {
            z: result.x,
            iterations: result.iterations,
            method: ZFactorMethod::Bisection,
        })
    }
}

fn validate_reduced(ppr: f64, tpr: f64) -> FluidResult<()> {
    if !ppr.is_finite() || ppr < 0.0 {
        return Err(FluidError::InvalidState {
            what: format!("pseudo-reduced pressure must be finite and non-negative, got {ppr}"),
        });
    }
    if !tpr.is_finite() || tpr <= 0.0 {
        return Err(FluidError::InvalidState {
            what: format!("pseudo-reduced temperature must be positive and finite, got {tpr}"),
        });
    }
    Ok(())
}

fn map_solver_error(err: SolverError, strategy: &'static str) -> FluidError {
    match err {
        SolverError::InvalidConfig { what } => FluidError::InvalidArg {
            what: format!("{strategy} z-factor config: {what}"),
        },
        other => FluidError::NonConvergence {
            what: format!("{strategy} z-factor: {other}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn coefficient_table_is_complete() {
        assert_eq!(DAK_COEFFICIENTS.len(), 11);
        assert_eq!(DAK_COEFFICIENTS[0], 0.3265);
        assert_eq!(DAK_COEFFICIENTS[10], 0.721);
    }

    #[test]
    fn ideal_gas_limit_at_zero_pressure() {
        assert_eq!(dak_residual(1.0, 0.0, 1.5), 0.0);
        for method in [ZFactorMethod::Newton, ZFactorMethod::Bisection] {
            let solution = ZFactorSolver::new(method).solve(0.0, 1.5).unwrap();
            assert!((solution.z - 1.0).abs() < 1e-3, "{method:?}: {}", solution.z);
        }
    }

    #[test]
    fn newton_reference_point() {
        let solution = ZFactorSolver::new(ZFactorMethod::Newton)
            .solve(1.0, 1.5)
            .unwrap();
        assert!((solution.z - 0.9034).abs() < 1e-3, "z = {}", solution.z);
        assert!(solution.iterations <= 20);
        assert_eq!(solution.method, ZFactorMethod::Newton);
    }

    #[test]
    fn derivative_matches_central_difference() {
        for &(z, ppr, tpr) in &[(0.9, 1.0, 1.5), (0.5, 3.0, 1.2), (1.2, 10.0, 2.0), (0.3, 2.0, 1.05)] {
            let h = 1e-6;
            let numeric = (dak_residual(z + h, ppr, tpr) - dak_residual(z - h, ppr, tpr)) / (2.0 * h);
            let analytic = dak_derivative(z, ppr, tpr);
            assert!(
                (numeric - analytic).abs() < 1e-5 * analytic.abs().max(1.0),
                "z={z} ppr={ppr} tpr={tpr}: {numeric} vs {analytic}"
            );
        }
    }

    #[test]
    fn pressure_derivative_matches_central_difference() {
        for &(z, ppr, tpr) in &[(0.9, 1.0, 1.5), (0.8, 5.0, 1.5), (1.1, 10.0, 2.0)] {
            let h = 1e-6;
            let numeric = (dak_residual(z, ppr + h, tpr) - dak_residual(z, ppr - h, tpr)) / (2.0 * h);
            let analytic = dak_pressure_derivative(z, ppr, tpr);
            assert!(
                (numeric - analytic).abs() < 1e-5 * analytic.abs().max(1.0),
                "{numeric} vs {analytic}"
            );
        }
    }

    #[test]
    fn fallback_recovers_where_newton_leaves_domain() {
        // At Tpr = 1 and Ppr = 3 Newton from z = 1 steps to negative z.
        let newton = ZFactorSolver::new(ZFactorMethod::Newton).solve(3.0, 1.0);
        assert!(matches!(newton, Err(FluidError::NonConvergence { .. })));

        let solution = ZFactorSolver::default().solve(3.0, 1.0).unwrap();
        assert_eq!(solution.method, ZFactorMethod::Bisection);
        assert!((solution.z - 0.4375).abs() < 1e-3, "z = {}", solution.z);
    }

    #[test]
    fn rejects_invalid_reduced_coordinates() {
        let solver = ZFactorSolver::default();
        assert!(matches!(solver.solve(-1.0, 1.5), Err(FluidError::InvalidState { .. })));
        assert!(matches!(solver.solve(1.0, 0.0), Err(FluidError::InvalidState { .. })));
        assert!(matches!(solver.solve(f64::NAN, 1.5), Err(FluidError::InvalidState { .. })));
    }

    #[test]
    fn dz_dppr_is_negative_at_low_pressure() {
        // Below the z minimum the curve z(Ppr) falls with pressure.
        let z = ZFactorSolver::default().solve(1.0, 1.5).unwrap().z;
        assert!(dak_dz_dppr(z, 1.0, 1.5).unwrap() < 0.0);
    }

    #[test]
    fn near_critical_short_steps_fall_back_to_bisection() {
        // γg = 1.15 at 130 bar and 20 °C
        let (ppr, tpr) = (2.8896, 1.0051);
        assert!(matches!(
            ZFactorSolver::new(ZFactorMethod::Newton).solve(ppr, tpr),
            Err(FluidError::NonConvergence { .. })
        ));

        let solution = ZFactorSolver::default().solve(ppr, tpr).unwrap();
        assert_eq!(solution.method, ZFactorMethod::Bisection);
        assert!((solution.z - 0.4242).abs() < 1e-3, "z = {}", solution.z);
        assert!(dak_residual(solution.z, ppr, tpr).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn z_is_physical_over_domain(ppr in 0.0f64..15.0, tpr in 1.0f64..3.0) {
            let z = ZFactorSolver::default().solve(ppr, tpr).unwrap().z;
            prop_assert!(z > 0.0 && z <= 2.0, "z = {} at ppr={} tpr={}", z, ppr, tpr);
            prop_assert!(dak_residual(z, ppr, tpr).abs() < 1e-3,
                "F = {} at z={} ppr={} tpr={}", dak_residual(z, ppr, tpr), z, ppr, tpr);
        }

        #[test]
        fn default_solver_matches_bisection(ppr in 0.0f64..15.0, tpr in 1.0f64..3.0) {
            // Up to three roots exist for Tpr just above 1 around Ppr = 1.
            prop_assume!(tpr >= 1.03 || !(0.7..1.3).contains(&ppr));
            let solved = ZFactorSolver::default().solve(ppr, tpr).unwrap();
            let bisection = ZFactorSolver::new(ZFactorMethod::Bisection).solve(ppr, tpr).unwrap();
            prop_assert!((solved.z - bisection.z).abs() < 1e-3,
                "{:?} {} vs bisection {} at ppr={} tpr={}", solved.method, solved.z, bisection.z, ppr, tpr);
        }

        #[test]
        fn newton_and_bisection_agree(ppr in 0.0f64..15.0, tpr in 1.2f64..3.0) {
            let newton = ZFactorSolver::new(ZFactorMethod::Newton).solve(ppr, tpr).unwrap();
            let bisection = ZFactorSolver::new(ZFactorMethod::Bisection).solve(ppr, tpr).unwrap();
            prop_assert!((newton.z - bisection.z).abs() < 1e-3,
                "newton {} vs bisection {} at ppr={} tpr={}", newton.z, bisection.z, ppr, tpr);
        }
    }
}
