//! # tabulate_grid
//!
//! Adaptive grid generation for tabulated functions and distributions.
//!
//! ## Architecture Position
//!
//! Layer 3 of the workspace. Depends on `tabulate_core` (L1) for the
//! interpolation policies and on `tabulate_bivariate` (L2) for the
//! distributions assembled from generated grids.
//!
//! ## Modules
//!
//! - `generator`: 1-D and 2-D adaptive generators
//! - `convergence`: Interval tests and dirty-convergence classification
//! - `config`: Tolerances and the dirty-convergence policy
//! - `sequence`: Containers the generators can fill in place
//!
//! ## Example
//!
//! ```rust
//! use tabulate_core::math::InterpolationType;
//! use tabulate_grid::{GridGenerator, GridGeneratorConfig};
//!
//! let generator = GridGenerator::new(InterpolationType::LinLin, GridGeneratorConfig::default())?;
//! let evaluated = generator.generate_and_evaluate(&[0.0, 10.0], f64::cos)?;
//!
//! assert_eq!(evaluated.len(), 129);
//! assert_eq!(evaluated.values[0], 1.0);
//! # Ok::<(), tabulate_grid::GridError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Refine the seed intervals of the 2-D generator on
//!   the rayon thread pool
//! - `serde`: Enable serialisation of `GridGeneratorConfig` and
//!   `GridGeneratorConfig::from_toml_str`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod convergence;
pub mod generator;
pub mod sequence;

mod error;

pub use config::{DirtyConvergencePolicy, GridGeneratorConfig, GridGeneratorConfigBuilder};
pub use convergence::{ConvergencePolicy, ConvergenceStatus, DirtyConvergence};
pub use error::GridError;
pub use generator::{EvaluatedGrid, GridGenerator, TwoDEstimator, TwoDGrid, TwoDGridGenerator};
pub use sequence::GridSequence;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::convergence::*;
    pub use crate::generator::*;
    pub use crate::sequence::*;
    pub use crate::GridError;
    pub use tabulate_core::math::{InterpolationType, TwoDInterpolationType};
}
