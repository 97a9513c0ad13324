//! # tabulate_core: Numerical Foundation for Adaptive Tabulation
//!
//! ## Layer 1 (Foundation) Role
//!
//! tabulate_core serves as the bottom layer of the tabulation workspace, providing:
//! - Linear/logarithmic processing and interpolation policies (`math::interpolation`)
//! - Unit-base mapping and fuzzy domain bounds (`math::unit_base`)
//! - Relative error and distance comparisons (`math::comparison`)
//! - The univariate tabulated distribution interface and its lin-lin
//!   implementation (`distribution`)
//! - Error types: `DistributionError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other tabulate_* crates, with minimal external dependencies:
//! - num-traits: Generic floating-point kernels
//! - rand: Random number source for sampling
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use tabulate_core::distribution::{TabularDistribution, TabularUnivariate};
//! use tabulate_core::math::InterpolationType;
//!
//! // Geometric interpolation between two points
//! let y: f64 = InterpolationType::LogLin.interpolate(0.0, 1.0, 0.5, 1.0, 100.0);
//! assert!((y - 10.0).abs() < 1e-12);
//!
//! // Tabulated density and its CDF
//! let dist = TabularDistribution::new(&[0.0, 1.0], &[0.0, 2.0]).unwrap();
//! assert!((dist.evaluate_cdf(0.5) - 0.25).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for interpolation types and tabulated distributions

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod distribution;
pub mod math;
pub mod types;
