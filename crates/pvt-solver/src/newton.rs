//! Newton–Raphson solver with analytic derivative and positivity floor.

use crate::error::{SolverError, SolverResult};
use pvt_core::ensure_finite;

/// Newton solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Convergence tolerance on the step size |Δx|
    pub step_tol: f64,
    /// Smallest derivative magnitude accepted before the step is considered singular
    pub min_derivative: f64,
    /// Iterates at or below this value are rejected (e.g. 0.0 for strictly positive roots)
    pub floor: Option<f64>,
    /// Largest |f(x)| accepted at the converged iterate
    pub residual_tol: Option<f64>,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            step_tol: 1e-3,
            min_derivative: 1e-12,
            floor: None,
            residual_tol: None,
        }
    }
}

impl NewtonConfig {
    fn validate(&self) -> SolverResult<()> {
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must be at least 1",
            });
        }
        if !self.step_tol.is_finite() || self.step_tol <= 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "step_tol must be positive and finite",
            });
        }
        if self
            .residual_tol
            .is_some_and(|tol| !tol.is_finite() || tol <= 0.0)
        {
            return Err(SolverError::InvalidConfig {
                what: "residual_tol must be positive and finite",
            });
        }
        Ok(())
    }
}

/// Newton iteration result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonResult {
    /// Root estimate
    pub x: f64,
    /// Magnitude of the final step
    pub last_step: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Solve `f(x) = 0` from `x0` using the derivative `df`.
///
/// Converges when a step satisfies `|Δx| < step_tol`; the returned root is the
/// iterate after that step. With `residual_tol` set, that iterate must also
/// satisfy `|f(x)| <= residual_tol`, otherwise a short step on a steep residual
/// is reported as `ConvergenceFailed`.
pub fn newton_solve<F, D>(x0: f64, f: F, df: D, config: &NewtonConfig) -> SolverResult<NewtonResult>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    config.validate()?;
    let mut x = ensure_finite(x0, "initial guess")?;

    for iter in 0..config.max_iterations {
        let fx = ensure_finite(f(x), "residual")?;
        let dfx = ensure_finite(df(x), "derivative")?;

        if dfx.abs() < config.min_derivative {
            return Err(SolverError::ConvergenceFailed {
                what: format!("derivative vanished at x = {x} (iteration {iter})"),
            });
        }

        let step = fx / dfx;
        let x_new = ensure_finite(x - step, "iterate")?;
        tracing::trace!(iter, x, fx, dfx, x_new, "newton step");

        if let Some(floor) = config.floor {
            if x_new <= floor {
                return Err(SolverError::ConvergenceFailed {
                    what: format!("iterate {x_new} left the domain above {floor} at iteration {iter}"),
                });
            }
        }

        x = x_new;
        if step.abs() < config.step_tol {
            if let Some(tol) = config.residual_tol {
                let residual = f(x);
                if !residual.is_finite() || residual.abs() > tol {
                    return Err(SolverError::ConvergenceFailed {
                        what: format!(
                            "step {} below tolerance but |f| = {residual:e} at x = {x} (iteration {iter})",
                            step.abs()
                        ),
                    });
                }
            }
            return Ok(NewtonResult {
                x,
                last_step: step.abs(),
                iterations: iter + 1,
            });
        }
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "Maximum iterations {} reached, last iterate = {}",
            config.max_iterations, x
        ),
    })
}
