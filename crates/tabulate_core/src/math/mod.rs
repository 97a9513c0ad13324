//! Numerical kernels shared by the tabulation crates.
//!
//! This module provides:
//! - `interpolation`: Linear/logarithmic processing and 1-D/2-D interpolation policies
//! - `unit_base`: Mapping of secondary domains onto `[0, 1]` and fuzzy bounds
//! - `comparison`: Relative error and absolute distance used by convergence checks

pub mod comparison;
pub mod interpolation;
pub mod unit_base;

pub use comparison::{absolute_distance, relative_error};
pub use interpolation::{InterpolationType, Processing, TwoDInterpolationType};
