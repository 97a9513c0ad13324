//! Convergence tests shared by the 1-D and 2-D grid generators.
//!
//! An interval `[lower, upper]` is tested by comparing the exact function
//! value at a probe point with the value interpolated from the interval's
//! endpoints:
//!
//! ```text
//! rel = |exact - estimate| / max(|exact|, |estimate|)
//! abs = |exact - estimate|
//!
//! rel <= convergence_tolerance                  => Converged
//! relError(lower, upper) <= distance_tolerance  => Dirty(DistanceTolerance)
//! abs <= absolute_difference_tolerance          => Dirty(AbsoluteDifference)
//! otherwise                                     => NotConverged
//! ```

use crate::config::GridGeneratorConfig;
use std::fmt;
use tabulate_core::math::{absolute_distance, relative_error};

/// Why an interval was accepted before its relative tolerance was met.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirtyConvergence {
    /// The interval endpoints are closer than the distance floor.
    DistanceTolerance {
        /// Lower endpoint
        lower: f64,
        /// Upper endpoint
        upper: f64,
        /// Relative distance between the endpoints
        relative_distance: f64,
    },

    /// The probe value differs from its estimate by less than the absolute
    /// difference tolerance.
    AbsoluteDifference {
        /// Lower endpoint
        lower: f64,
        /// Upper endpoint
        upper: f64,
        /// Abscissa of the probe point
        abscissa: f64,
        /// Exact function value at the probe point
        exact: f64,
        /// Interpolated value at the probe point
        estimate: f64,
    },
}

impl fmt::Display for DirtyConvergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirtyConvergence::DistanceTolerance {
                lower,
                upper,
                relative_distance,
            } => write!(
                f,
                "distance tolerance hit before convergence: relError({:e}, {:e}) = {:e}",
                lower, upper, relative_distance
            ),
            DirtyConvergence::AbsoluteDifference {
                lower,
                upper,
                abscissa,
                exact,
                estimate,
            } => write!(
                f,
                "absolute difference tolerance hit before convergence in [{:e}, {:e}]: \
                 f({:e}) = {:e}, estimate = {:e}",
                lower, upper, abscissa, exact, estimate
            ),
        }
    }
}

/// Outcome of a single convergence test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvergenceStatus {
    /// The relative tolerance is met.
    Converged,
    /// The interval is accepted without meeting the relative tolerance.
    Dirty(DirtyConvergence),
    /// The interval must be refined.
    NotConverged,
}

impl ConvergenceStatus {
    /// Returns true unless the interval must be refined.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, ConvergenceStatus::NotConverged)
    }
}

/// Tolerance set applied to a candidate interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergencePolicy {
    convergence_tolerance: f64,
    absolute_difference_tolerance: f64,
    distance_tolerance: f64,
}

impl ConvergencePolicy {
    /// Create a policy from explicit tolerances.
    pub fn new(
        convergence_tolerance: f64,
        absolute_difference_tolerance: f64,
        distance_tolerance: f64,
    ) -> Self {
        Self {
            convergence_tolerance,
            absolute_difference_tolerance,
            distance_tolerance,
        }
    }

    /// Create a policy from the tolerances of a generator configuration.
    pub fn from_config(config: &GridGeneratorConfig) -> Self {
        Self::new(
            config.convergence_tolerance,
            config.absolute_difference_tolerance,
            config.distance_tolerance,
        )
    }

    /// Relative error tolerance.
    pub fn convergence_tolerance(&self) -> f64 {
        self.convergence_tolerance
    }

    /// Absolute difference tolerance.
    pub fn absolute_difference_tolerance(&self) -> f64 {
        self.absolute_difference_tolerance
    }

    /// Distance tolerance.
    pub fn distance_tolerance(&self) -> f64 {
        self.distance_tolerance
    }

    /// Returns `Some` if `[lower, upper]` is already at the distance floor.
    pub fn check_primary_distance(&self, lower: f64, upper: f64) -> Option<DirtyConvergence> {
        let relative_distance = relative_error(lower, upper);
        (relative_distance <= self.distance_tolerance).then_some(
            DirtyConvergence::DistanceTolerance {
                lower,
                upper,
                relative_distance,
            },
        )
    }

    /// Test the value at `abscissa` against its estimate.
    ///
    /// Used for every secondary probe of the 2-D generator, where the
    /// primary distance floor has already been checked.
    pub fn check_secondary_point(
        &self,
        lower: f64,
        upper: f64,
        abscissa: f64,
        exact: f64,
        estimate: f64,
    ) -> ConvergenceStatus {
        if relative_error(exact, estimate) <= self.convergence_tolerance {
            return ConvergenceStatus::Converged;
        }

        if absolute_distance(exact, estimate) <= self.absolute_difference_tolerance {
            ConvergenceStatus::Dirty(DirtyConvergence::AbsoluteDifference {
                lower,
                upper,
                abscissa,
                exact,
                estimate,
            })
        } else {
            ConvergenceStatus::NotConverged
        }
    }

    /// Test the interval `[lower, upper]` with its midpoint as probe.
    ///
    /// A midpoint that does not lie strictly inside the interval counts as
    /// hitting the distance floor, so refinement always terminates.
    pub fn check_interval(
        &self,
        lower: f64,
        midpoint: f64,
        upper: f64,
        exact: f64,
        estimate: f64,
    ) -> ConvergenceStatus {
        if relative_error(exact, estimate) <= self.convergence_tolerance {
            return ConvergenceStatus::Converged;
        }

        if let Some(dirty) = self.check_primary_distance(lower, upper) {
            return ConvergenceStatus::Dirty(dirty);
        }

        if !(midpoint > lower && midpoint < upper) {
            return ConvergenceStatus::Dirty(DirtyConvergence::DistanceTolerance {
                lower,
                upper,
                relative_distance: relative_error(lower, upper),
            });
        }

        self.check_secondary_point(lower, upper, midpoint, exact, estimate)
    }
}

impl Default for ConvergencePolicy {
    fn default() -> Self {
        Self::from_config(&GridGeneratorConfig::default())
    }
}
