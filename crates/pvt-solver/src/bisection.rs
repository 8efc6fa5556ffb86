//! Bracketing bisection.
//!
//! Deterministic and bounded: runs at least `min_iterations` halvings and then
//! continues until the bracket is narrower than `x_tol`, never exceeding
//! `max_iterations`. Requires a sign change across the initial bracket.

use crate::error::{SolverError, SolverResult};
use pvt_core::ensure_finite;

/// Bisection solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionConfig {
    /// Lower end of the initial bracket
    pub lower: f64,
    /// Upper end of the initial bracket
    pub upper: f64,
    /// Halvings performed regardless of bracket width
    pub min_iterations: usize,
    /// Hard cap on halvings
    pub max_iterations: usize,
    /// Bracket width at which iteration may stop
    pub x_tol: f64,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
            min_iterations: 25,
            max_iterations: 200,
            x_tol: 1e-3,
        }
    }
}

impl BisectionConfig {
    fn validate(&self) -> SolverResult<()> {
        if !(self.lower.is_finite() && self.upper.is_finite()) || self.lower >= self.upper {
            return Err(SolverError::InvalidConfig {
                what: "bracket must be finite with lower < upper",
            });
        }
        if self.max_iterations < self.min_iterations.max(1) {
            return Err(SolverError::InvalidConfig {
                what: "max_iterations must cover min_iterations",
            });
        }
        if !self.x_tol.is_finite() || self.x_tol <= 0.0 {
            return Err(SolverError::InvalidConfig {
                what: "x_tol must be positive and finite",
            });
        }
        Ok(())
    }
}

/// Bisection result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionResult {
    /// Midpoint of the last evaluated bracket
    pub x: f64,
    /// Width of the final bracket
    pub width: f64,
    /// Number of halvings
    pub iterations: usize,
}

/// Solve `f(x) = 0` inside `[config.lower, config.upper]`.
///
/// Each iteration evaluates `f` at the lower bound and the midpoint and keeps
/// the half that still contains the sign change.
pub fn bisection_solve<F>(f: F, config: &BisectionConfig) -> SolverResult<BisectionResult>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;

    let mut lo = config.lower;
    let mut hi = config.upper;

    let f_lo = ensure_finite(f(lo), "residual at lower bound")?;
    let f_hi = ensure_finite(f(hi), "residual at upper bound")?;
    if f_lo * f_hi > 0.0 {
        return Err(SolverError::InvalidBracket {
            what: format!(
                "no sign change on [{lo}, {hi}] (f = {f_lo:.4e}, {f_hi:.4e})"
            ),
        });
    }

    let mut mid = 0.5 * (lo + hi);
    let mut iterations = 0;
    while iterations < config.min_iterations || (hi - lo).abs() > config.x_tol {
        if iterations >= config.max_iterations {
            return Err(SolverError::ConvergenceFailed {
                what: format!(
                    "bracket [{lo}, {hi}] still wider than {} after {iterations} halvings",
                    config.x_tol
                ),
            });
        }

        mid = 0.5 * (lo + hi);
        let y_lo = ensure_finite(f(lo), "residual")?;
        let y_mid = ensure_finite(f(mid), "residual")?;
        if y_lo == 0.0 {
            hi = lo;
            mid = lo;
        } else if y_mid == 0.0 {
            lo = mid;
            hi = mid;
        } else if y_lo * y_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
        iterations += 1;
    }

    tracing::trace!(x = mid, width = hi - lo, iterations, "bisection finished");
    Ok(BisectionResult {
        x: mid,
        width: (hi - lo).abs(),
        iterations,
    })
}
