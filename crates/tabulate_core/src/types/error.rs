//! Error types for structured error handling.
//!
//! This module provides:
//! - `DistributionError`: Errors from tabulated distribution construction,
//!   evaluation and sampling (including the bivariate query path)

use thiserror::Error;

/// Tabulated distribution errors.
///
/// Covers construction of univariate tables, out-of-domain queries against
/// bivariate tables and failures of the bisection CDF matcher.
///
/// # Variants
/// - `InvalidArgument`: Precondition violation (malformed table, bad random number, ...)
/// - `InsufficientData`: Fewer points than the table requires
/// - `OutOfRange`: Query outside the tabulated domain with limits not extended
/// - `ConvergenceFailure`: Bisection exhausted its iteration cap
///
/// # Examples
/// ```
/// use tabulate_core::types::DistributionError;
///
/// let err = DistributionError::OutOfRange { value: 25.0, min: 1.0, max: 20.0 };
/// assert_eq!(
///     format!("{}", err),
///     "Query value 25 outside tabulated domain [1, 20]"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// Invalid argument or malformed table data.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Not enough points to build the table.
    #[error("Insufficient data: need at least {need} points, got {got}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Query value outside the tabulated domain.
    #[error("Query value {value} outside tabulated domain [{min}, {max}]")]
    OutOfRange {
        /// The query value
        value: f64,
        /// Lower limit of the tabulated domain
        min: f64,
        /// Upper limit of the tabulated domain
        max: f64,
    },

    /// Bisection CDF matcher hit its iteration cap without meeting either
    /// the relative or the absolute tolerance.
    #[error(
        "max number of iterations ({max_iterations}) hit before convergence ({tolerance}): \
         relative error = {rel_error}, error = {error} (error tolerance {error_tolerance})"
    )]
    ConvergenceFailure {
        /// Iteration cap that was exceeded
        max_iterations: u32,
        /// Relative error of the last estimate
        rel_error: f64,
        /// Relative error tolerance that was requested
        tolerance: f64,
        /// Absolute error of the last estimate
        error: f64,
        /// Absolute fallback tolerance
        error_tolerance: f64,
    },
}

impl DistributionError {
    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an out-of-range error.
    pub fn out_of_range(value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange { value, min, max }
    }

    /// Check if this is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::InsufficientData { .. }
        )
    }

    /// Check if this is an out-of-range error.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Check if this is a convergence failure.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, Self::ConvergenceFailure { .. })
    }
}
