//! Adaptive grid generators.
//!
//! - [`GridGenerator`]: refines a scalar function's grid until interpolation
//!   between adjacent points reproduces every midpoint.
//! - [`TwoDGridGenerator`]: refines the primary grid of a bivariate function,
//!   building a secondary grid at every primary point.

mod one_d;
mod two_d;

pub use one_d::{EvaluatedGrid, GridGenerator};
pub use two_d::{TwoDEstimator, TwoDGrid, TwoDGridGenerator};

use crate::config::DirtyConvergencePolicy;
use crate::convergence::DirtyConvergence;
use crate::error::GridError;
use tracing::warn;

/// Apply the dirty-convergence policy to an accepted interval.
pub(crate) fn report_dirty(
    policy: DirtyConvergencePolicy,
    dirty: DirtyConvergence,
    generator: &'static str,
) -> Result<(), GridError> {
    match policy {
        DirtyConvergencePolicy::Throw => Err(GridError::DirtyConvergence(dirty)),
        DirtyConvergencePolicy::Warn => {
            warn!(generator, "{}", dirty);
            Ok(())
        }
    }
}

/// Check that a seed grid has at least two strictly ascending points that
/// the independent processing accepts.
pub(crate) fn validate_seed(
    seed: &[f64],
    is_valid: impl Fn(f64) -> bool,
) -> Result<(), GridError> {
    if seed.len() < 2 {
        return Err(GridError::insufficient_data(2, seed.len()));
    }

    if let Some(&x) = seed.iter().find(|&&x| !is_valid(x)) {
        return Err(GridError::invalid_argument(format!(
            "seed point {} cannot be processed",
            x
        )));
    }

    if let Some(pair) = seed.windows(2).find(|w| w[0] >= w[1]) {
        return Err(GridError::invalid_argument(format!(
            "seed grid must be strictly ascending: {} is followed by {}",
            pair[0], pair[1]
        )));
    }

    Ok(())
}
