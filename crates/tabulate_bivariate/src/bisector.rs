//! Bisection CDF matcher.
//!
//! Correlated interpolation between two bin-boundary distributions pairs the
//! points of equal cumulative probability. Evaluating at a known secondary
//! value therefore needs the probability `c` at which the interpolated pair
//! `(s_lo(c), s_hi(c))` reproduces that value. [`CdfBisector`] finds `c` by
//! bisection over `[0, 1]`.

use crate::config::EvaluationConfig;
use tabulate_core::types::DistributionError;
use tracing::trace;

/// Matched boundary points for one trial cumulative probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchedPoints {
    /// Value at the lower bin boundary
    pub lower_value: f64,
    /// Value at the upper bin boundary
    pub upper_value: f64,
    /// Interpolated estimate compared against the target
    pub estimate: f64,
}

/// Result of a converged bisection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionOutcome {
    /// Matching point in `[0, 1]` (a cumulative probability for
    /// correlated matching)
    pub cdf: f64,
    /// Value at the lower bin boundary for `cdf`
    pub lower_value: f64,
    /// Value at the upper bin boundary for `cdf`
    pub upper_value: f64,
    /// Interpolated estimate at `cdf`
    pub estimate: f64,
    /// Number of bisection steps taken
    pub iterations: u32,
}

/// Bisection solver over cumulative probability.
///
/// The estimate closure must be non-decreasing in its argument.
///
/// # Algorithm
///
/// 1. Widen `[lo, hi]` geometrically until it brackets the target
/// 2. Bisect: estimate at the midpoint and stop on an exact hit or when the
///    relative error is within tolerance. A zero target is normalised by the
///    largest bracket estimate magnitude (at least 1), so wide secondary
///    domains still resolve to the error tolerance.
/// 3. On reaching the iteration cap, accept only if the absolute error is
///    within the error tolerance
///
/// # Example
///
/// ```
/// use tabulate_bivariate::bisector::{CdfBisector, MatchedPoints};
/// use tabulate_bivariate::EvaluationConfig;
///
/// let bisector = CdfBisector::new(EvaluationConfig::default());
///
/// // Two uniform boundaries on [0, 1] and [2, 4], halfway between them
/// let outcome = bisector
///     .solve(2.0, 0.0, 1.0, |c| {
///         let lower_value = c;
///         let upper_value = 2.0 + 2.0 * c;
///         MatchedPoints { lower_value, upper_value, estimate: 0.5 * (lower_value + upper_value) }
///     })
///     .unwrap();
/// assert!((outcome.cdf - 2.0 / 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct CdfBisector {
    config: EvaluationConfig,
    widening_factor: f64,
}

impl CdfBisector {
    /// Create a bisector with the given configuration.
    pub fn new(config: EvaluationConfig) -> Self {
        Self {
            config,
            widening_factor: 0.01,
        }
    }

    /// Create a bisector with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EvaluationConfig::default())
    }

    /// Set the relative step used when widening the bracket.
    ///
    /// A factor `w` moves the lower end to `lo * (1 - w)` and the upper end
    /// to `hi * (1 + w)` per widening step.
    ///
    /// # Errors
    ///
    /// * `DistributionError::InvalidArgument` - `factor` is not in `(0, 1)`
    pub fn with_widening_factor(mut self, factor: f64) -> Result<Self, DistributionError> {
        if !(factor > 0.0 && factor < 1.0) {
            return Err(DistributionError::invalid_argument(format!(
                "widening factor must be in (0, 1): got {}",
                factor
            )));
        }
        self.widening_factor = factor;
        Ok(self)
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Widen `[lo, hi]` within `[0, 1]` until it brackets `target`.
    ///
    /// Falls back to the full range `[0, 1]` on an end that still fails to
    /// bracket after `max_iterations` steps.
    pub fn widen_bracket<F>(&self, target: f64, lo: f64, hi: f64, estimate: &mut F) -> (f64, f64)
    where
        F: FnMut(f64) -> MatchedPoints,
    {
        let mut lo = lo.clamp(0.0, 1.0);
        let mut hi = hi.clamp(0.0, 1.0);
        let shrink = 1.0 - self.widening_factor;
        let grow = 1.0 + self.widening_factor;

        let mut steps = 0;
        while lo > 0.0 && estimate(lo).estimate > target {
            hi = lo;
            lo *= shrink;
            steps += 1;
            if steps >= self.config.max_iterations {
                lo = 0.0;
            }
        }

        steps = 0;
        while hi < 1.0 && estimate(hi).estimate < target {
            lo = hi;
            hi = (hi * grow).min(1.0);
            if hi == 0.0 {
                hi = self.widening_factor.min(1.0);
            }
            steps += 1;
            if steps >= self.config.max_iterations {
                hi = 1.0;
            }
        }

        (lo, hi)
    }

    /// Find the cumulative probability whose interpolated estimate matches
    /// `target`, starting from the bracket `[lo, hi]`.
    ///
    /// # Errors
    ///
    /// * `DistributionError::ConvergenceFailure` - the iteration cap was hit
    ///   with neither the relative nor the absolute tolerance satisfied
    pub fn solve<F>(
        &self,
        target: f64,
        lo: f64,
        hi: f64,
        mut estimate: F,
    ) -> Result<BisectionOutcome, DistributionError>
    where
        F: FnMut(f64) -> MatchedPoints,
    {
        let (mut lo, mut hi) = self.widen_bracket(target, lo, hi, &mut estimate);

        let (norm, tolerance) = if target == 0.0 {
            let scale = estimate(lo).estimate.abs().max(estimate(hi).estimate.abs());
            (scale.max(1.0), self.config.error_tolerance)
        } else {
            (target, self.config.relative_error_tolerance)
        };

        let mut iterations = 0u32;
        loop {
            let cdf = 0.5 * (lo + hi);
            let points = estimate(cdf);
            iterations += 1;

            let outcome = BisectionOutcome {
                cdf,
                lower_value: points.lower_value,
                upper_value: points.upper_value,
                estimate: points.estimate,
                iterations,
            };

            if points.estimate == target {
                return Ok(outcome);
            }

            let rel_error = ((target - points.estimate) / norm).abs();
            if rel_error <= tolerance {
                return Ok(outcome);
            }

            trace!(iterations, cdf, estimate = points.estimate, rel_error, "bisection step");

            if points.estimate < target {
                lo = cdf;
            } else {
                hi = cdf;
            }

            if iterations >= self.config.max_iterations {
                let error = (target - points.estimate).abs();
                if error < self.config.error_tolerance {
                    return Ok(outcome);
                }
                return Err(DistributionError::ConvergenceFailure {
                    max_iterations: self.config.max_iterations,
                    rel_error,
                    tolerance,
                    error,
                    error_tolerance: self.config.error_tolerance,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linear_pair(c: f64) -> MatchedPoints {
        // Uniform on [0, 2] and [4, 8], interpolated halfway
        let lower_value = 2.0 * c;
        let upper_value = 4.0 + 4.0 * c;
        MatchedPoints {
            lower_value,
            upper_value,
            estimate: 0.5 * (lower_value + upper_value),
        }
    }

    #[test]
    fn test_solve_interior_target() {
        let bisector = CdfBisector::with_defaults();
        let outcome = bisector.solve(5.0, 0.0, 1.0, linear_pair).unwrap();
        // 2 + 3c = 5
        assert_relative_eq!(outcome.cdf, 1.0, epsilon = 1e-6);

        let outcome = bisector.solve(3.5, 0.0, 1.0, linear_pair).unwrap();
        assert_relative_eq!(outcome.cdf, 0.5, epsilon = 1e-6);
        assert_relative_eq!(outcome.lower_value, 1.0, epsilon = 1e-6);
        assert_relative_eq!(outcome.upper_value, 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_solve_widens_narrow_bracket() {
        let bisector = CdfBisector::with_defaults();
        // Target at c = 0.2, initial bracket [0.6, 0.7]
        let outcome = bisector.solve(2.6, 0.6, 0.7, linear_pair).unwrap();
        assert_relative_eq!(outcome.cdf, 0.2, epsilon = 1e-6);

        // Target at c = 0.9, initial bracket [0.1, 0.2]
        let outcome = bisector.solve(4.7, 0.1, 0.2, linear_pair).unwrap();
        assert_relative_eq!(outcome.cdf, 0.9, epsilon = 1e-6);
    }

    #[test]
    fn test_widen_bracket_brackets_target() {
        let bisector = CdfBisector::with_defaults().with_widening_factor(0.1).unwrap();
        let mut estimate = linear_pair;
        let (lo, hi) = bisector.widen_bracket(2.6, 0.6, 0.7, &mut estimate);
        assert!(linear_pair(lo).estimate <= 2.6);
        assert!(linear_pair(hi).estimate >= 2.6);
    }

    #[test]
    fn test_solve_zero_target_uses_absolute_tolerance() {
        let bisector = CdfBisector::with_defaults();
        // Estimate -1 + 2c crosses zero at c = 0.5
        let outcome = bisector
            .solve(0.0, 0.0, 1.0, |c| MatchedPoints {
                lower_value: -1.0,
                upper_value: 1.0,
                estimate: -1.0 + 2.0 * c,
            })
            .unwrap();
        assert_relative_eq!(outcome.cdf, 0.5, epsilon = 1e-12);
        assert!(outcome.iterations < 500);
    }

    #[test]
    fn test_solve_zero_target_over_wide_domain() {
        let bisector = CdfBisector::with_defaults();
        // Uniform on [-1000, 1000] and [-3000, 1000], interpolated halfway
        let outcome = bisector
            .solve(0.0, 0.0, 1.0, |c| {
                let lower_value = -1000.0 + 2000.0 * c;
                let upper_value = -3000.0 + 4000.0 * c;
                MatchedPoints {
                    lower_value,
                    upper_value,
                    estimate: 0.5 * (lower_value + upper_value),
                }
            })
            .unwrap();
        assert_relative_eq!(outcome.cdf, 2.0 / 3.0, epsilon = 1e-12);
        assert!(outcome.estimate.abs() <= 2000.0 * 1e-15);
        assert!(outcome.iterations < 500);
    }

    #[test]
    fn test_widening_factor_range() {
        for factor in [0.0, 1.0, 1.5, -0.1, f64::NAN] {
            let err = CdfBisector::with_defaults()
                .with_widening_factor(factor)
                .unwrap_err();
            assert!(err.is_invalid_argument());
        }
        assert!(CdfBisector::with_defaults().with_widening_factor(0.5).is_ok());
    }

    #[test]
    fn test_solve_exact_hit_stops_immediately() {
        let bisector = CdfBisector::with_defaults();
        let outcome = bisector.solve(3.5, 0.0, 1.0, linear_pair).unwrap();
        assert_eq!(outcome.iterations, 1);
    }

    #[test]
    fn test_solve_iteration_cap_raises_convergence_failure() {
        let config = EvaluationConfig::default()
            .with_max_iterations(1)
            .with_relative_error_tolerance(1e-15)
            .with_error_tolerance(1e-300);
        let bisector = CdfBisector::new(config);

        let result = bisector.solve(2.7, 0.0, 1.0, linear_pair);
        let err = result.unwrap_err();
        assert!(err.is_convergence_failure());
        assert!(format!("{}", err).contains("max number of iterations (1)"));
    }

    #[test]
    fn test_solve_iteration_cap_accepts_small_absolute_error() {
        let config = EvaluationConfig::default()
            .with_max_iterations(2)
            .with_relative_error_tolerance(0.0)
            .with_error_tolerance(1.0);
        let bisector = CdfBisector::new(config);

        let outcome = bisector.solve(2.7, 0.0, 1.0, linear_pair).unwrap();
        assert_eq!(outcome.iterations, 2);
    }
}
