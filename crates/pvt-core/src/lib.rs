//! pvt-core: stable foundation for the black-oil PVT workspace.
//!
//! Contains:
//! - units (uom SI types, field-unit constructors and conversions, standard constants)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PvtError, PvtResult};
pub use numeric::*;
pub use units::*;
