//! Scalar root finders for implicit property equations.
//!
//! Two strategies are provided and share one error type:
//! - [`newton_solve`]: Newton–Raphson with an analytic derivative and an
//!   optional positivity floor on the iterate
//! - [`bisection_solve`]: bracketing bisection with a minimum iteration count

pub mod bisection;
pub mod error;
pub mod newton;

pub use bisection::{BisectionConfig, BisectionResult, bisection_solve};
pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
