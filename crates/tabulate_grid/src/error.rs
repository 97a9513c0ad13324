//! Grid generation error types.

use crate::convergence::DirtyConvergence;
use tabulate_core::types::DistributionError;
use thiserror::Error;

/// Errors that can occur during grid generation.
///
/// # Variants
///
/// - `InvalidArgument`: Malformed tolerances, seeds or evaluated values
/// - `InsufficientData`: Seed grid with fewer than 2 points
/// - `DirtyConvergence`: Distance floor reached before the error tolerance
///   under the `Throw` policy
/// - `Distribution`: Wrapped error from building secondary distributions
///
/// # Examples
///
/// ```
/// use tabulate_grid::GridError;
///
/// let err = GridError::insufficient_data(2, 1);
/// assert_eq!(
///     format!("{}", err),
///     "Insufficient grid points: need at least 2, got 1"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Precondition violation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Seed grid too small.
    #[error("Insufficient grid points: need at least {required}, got {provided}")]
    InsufficientData {
        /// Minimum number of points required
        required: usize,
        /// Number of points provided
        provided: usize,
    },

    /// An interval hit the distance floor before converging.
    #[error("Dirty convergence: {0}")]
    DirtyConvergence(DirtyConvergence),

    /// Wrapped distribution error.
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),
}

impl GridError {
    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(required: usize, provided: usize) -> Self {
        Self::InsufficientData { required, provided }
    }

    /// Check if this is a precondition violation.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::InsufficientData { .. })
    }

    /// Check if this is a dirty convergence error.
    pub fn is_dirty_convergence(&self) -> bool {
        matches!(self, Self::DirtyConvergence(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = GridError::invalid_argument("seed grid is not ascending");
        assert_eq!(format!("{}", err), "Invalid argument: seed grid is not ascending");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_dirty_convergence_display() {
        let err = GridError::DirtyConvergence(DirtyConvergence::DistanceTolerance {
            lower: 1.0,
            upper: 1.0 + 1e-15,
            relative_distance: 1e-15,
        });
        let msg = format!("{}", err);
        assert!(msg.starts_with("Dirty convergence: "));
        assert!(msg.contains("distance tolerance"));
        assert!(err.is_dirty_convergence());
    }

    #[test]
    fn test_from_distribution_error() {
        let err: GridError = DistributionError::invalid_argument("bad table").into();
        assert!(matches!(err, GridError::Distribution(_)));
        assert!(!err.is_invalid_argument());
    }
}
