//! Sampling policies for interpolating between bin-boundary distributions.
//!
//! Each policy answers the secondary conditional queries (bounds, value,
//! PDF, CDF, sampling) for a primary value strictly inside a primary bin:
//!
//! | Policy | Secondary domain | Sampling |
//! |--------|------------------|----------|
//! | `Direct` | union of the boundary domains | stochastic bin choice |
//! | `UnitBase` | interpolated limits, unit-base rescaling | stochastic bin choice |
//! | `Correlated` | interpolated limits | one random number on both boundaries |
//! | `UnitBaseCorrelated` | interpolated limits, correlated in unit base | one random number on both boundaries |
//! | `CumulativePoints` | interpolated limits, unit-base CDF mixture | CDF inversion |

mod correlated;
mod cumulative_points;
mod direct;
mod unit_base;
mod unit_base_correlated;

use crate::bin_boundary::PrimaryGridEntry;
use crate::bisector::CdfBisector;
use crate::config::EvaluationConfig;
use std::fmt;
use tabulate_core::distribution::TabularUnivariate;
use tabulate_core::math::interpolation::{Processing, TwoDInterpolationType};
use tabulate_core::math::unit_base as unit_mapping;
use tabulate_core::types::DistributionError;

/// Strategy used to interpolate between two bin-boundary distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SamplingPolicy {
    /// Interpolate the queried quantity at the same secondary value.
    Direct,
    /// Map each boundary onto a unit base and pick a boundary at random.
    UnitBase,
    /// Match equal cumulative probabilities and interpolate secondary values.
    #[default]
    Correlated,
    /// Match equal cumulative probabilities on the unit base.
    UnitBaseCorrelated,
    /// Mix the boundary CDFs on the unit base and invert the mixture.
    CumulativePoints,
}

impl SamplingPolicy {
    /// Returns true when sampling consumes a second random number to pick a
    /// bin boundary.
    #[inline]
    pub fn is_stochastic(self) -> bool {
        matches!(self, SamplingPolicy::Direct | SamplingPolicy::UnitBase)
    }

    /// Returns true when the secondary domain is rescaled through a unit base.
    #[inline]
    pub fn uses_unit_base(self) -> bool {
        matches!(
            self,
            SamplingPolicy::UnitBase
                | SamplingPolicy::UnitBaseCorrelated
                | SamplingPolicy::CumulativePoints
        )
    }

    /// Policy name.
    pub fn name(self) -> &'static str {
        match self {
            SamplingPolicy::Direct => "Direct",
            SamplingPolicy::UnitBase => "UnitBase",
            SamplingPolicy::Correlated => "Correlated",
            SamplingPolicy::UnitBaseCorrelated => "UnitBaseCorrelated",
            SamplingPolicy::CumulativePoints => "CumulativePoints",
        }
    }

    pub(crate) fn lower_bound<D: TabularUnivariate>(self, bin: &Bin<'_, D>) -> f64 {
        match self {
            SamplingPolicy::Direct => direct::lower_bound(bin),
            _ => bin.intermediate_lower_limit(),
        }
    }

    pub(crate) fn upper_bound<D: TabularUnivariate>(self, bin: &Bin<'_, D>) -> f64 {
        match self {
            SamplingPolicy::Direct => direct::upper_bound(bin),
            _ => bin.intermediate_upper_limit(),
        }
    }

    pub(crate) fn evaluate<D: TabularUnivariate>(
        self,
        bin: &Bin<'_, D>,
        y: f64,
        quantity: Quantity,
    ) -> Result<f64, DistributionError> {
        match self {
            SamplingPolicy::Direct => Ok(direct::evaluate(bin, y, quantity)),
            SamplingPolicy::UnitBase => Ok(unit_base::evaluate(bin, y, quantity)),
            SamplingPolicy::Correlated => correlated::evaluate(bin, y, quantity),
            SamplingPolicy::UnitBaseCorrelated => unit_base_correlated::evaluate(bin, y, quantity),
            SamplingPolicy::CumulativePoints => Ok(cumulative_points::evaluate(bin, y, quantity)),
        }
    }

    pub(crate) fn evaluate_cdf<D: TabularUnivariate>(
        self,
        bin: &Bin<'_, D>,
        y: f64,
    ) -> Result<f64, DistributionError> {
        match self {
            SamplingPolicy::Direct => Ok(direct::evaluate_cdf(bin, y)),
            SamplingPolicy::UnitBase => Ok(unit_base::evaluate_cdf(bin, y)),
            SamplingPolicy::Correlated => correlated::evaluate_cdf(bin, y),
            SamplingPolicy::UnitBaseCorrelated => unit_base_correlated::evaluate_cdf(bin, y),
            SamplingPolicy::CumulativePoints => Ok(cumulative_points::evaluate_cdf(bin, y)),
        }
    }

    pub(crate) fn sample<D: TabularUnivariate>(
        self,
        bin: &Bin<'_, D>,
        bin_random_number: f64,
        random_number: f64,
    ) -> Result<SecondarySample, DistributionError> {
        match self {
            SamplingPolicy::Direct => Ok(direct::sample(bin, bin_random_number, random_number)),
            SamplingPolicy::UnitBase => Ok(unit_base::sample(bin, bin_random_number, random_number)),
            SamplingPolicy::Correlated => Ok(correlated::sample(bin, random_number)),
            SamplingPolicy::UnitBaseCorrelated => Ok(unit_base_correlated::sample(bin, random_number)),
            SamplingPolicy::CumulativePoints => cumulative_points::sample(bin, random_number),
        }
    }

    pub(crate) fn sample_in_subrange<D: TabularUnivariate>(
        self,
        bin: &Bin<'_, D>,
        bin_random_number: f64,
        random_number: f64,
        max_value: f64,
    ) -> Result<f64, DistributionError> {
        match self {
            SamplingPolicy::Direct => Ok(direct::sample_in_subrange(
                bin,
                bin_random_number,
                random_number,
                max_value,
            )),
            SamplingPolicy::UnitBase => Ok(unit_base::sample_in_subrange(
                bin,
                bin_random_number,
                random_number,
                max_value,
            )),
            SamplingPolicy::Correlated => {
                correlated::sample_in_subrange(bin, random_number, max_value)
            }
            SamplingPolicy::UnitBaseCorrelated => {
                unit_base_correlated::sample_in_subrange(bin, random_number, max_value)
            }
            SamplingPolicy::CumulativePoints => {
                cumulative_points::sample_in_subrange(bin, random_number, max_value)
            }
        }
    }
}

impl fmt::Display for SamplingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A secondary sample together with the bin-boundary information used to
/// produce it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondarySample {
    /// Sample on the intermediate secondary grid
    pub sample: f64,
    /// Sample drawn from the chosen boundary distribution before any
    /// unit-base rescaling (equal to `sample` for correlated policies)
    pub raw_sample: f64,
    /// Index of the primary grid entry the sample was drawn from (the lower
    /// boundary for correlated policies)
    pub primary_bin_index: usize,
}

/// Quantity evaluated by the evaluate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Quantity {
    /// Tabulated (unnormalised) dependent value
    Value,
    /// Normalised probability density
    Pdf,
}

impl Quantity {
    #[inline]
    pub(crate) fn of<D: TabularUnivariate>(self, distribution: &D, y: f64) -> f64 {
        match self {
            Quantity::Value => distribution.evaluate(y),
            Quantity::Pdf => distribution.evaluate_pdf(y),
        }
    }
}

/// Interior primary bin: two distinct boundary entries and the query's
/// processed primary fraction.
pub(crate) struct Bin<'a, D> {
    pub lower: &'a PrimaryGridEntry<D>,
    pub upper: &'a PrimaryGridEntry<D>,
    pub lower_index: usize,
    pub upper_index: usize,
    /// Fraction of the query within the bin in processed primary space
    pub beta: f64,
    pub interpolation: TwoDInterpolationType,
    pub config: &'a EvaluationConfig,
}

impl<'a, D: TabularUnivariate> Bin<'a, D> {
    #[inline]
    pub(crate) fn lower_distribution(&self) -> &'a D {
        &self.lower.distribution
    }

    #[inline]
    pub(crate) fn upper_distribution(&self) -> &'a D {
        &self.upper.distribution
    }

    #[inline]
    pub(crate) fn secondary(&self) -> Processing {
        self.interpolation.secondary()
    }

    #[inline]
    pub(crate) fn fuzzy_tolerance(&self) -> f64 {
        self.config.fuzzy_boundary_tolerance
    }

    /// Interpolate secondary values across the bin.
    #[inline]
    pub(crate) fn interpolate_secondary(&self, lower: f64, upper: f64) -> f64 {
        self.interpolation
            .yx()
            .interpolate_with_ratio(self.beta, lower, upper)
    }

    /// Interpolate dependent values across the bin.
    #[inline]
    pub(crate) fn interpolate_dependent(&self, lower: f64, upper: f64) -> f64 {
        self.interpolation
            .dependent()
            .interpolate_with_ratio_or_linear(self.beta, lower, upper)
    }

    pub(crate) fn intermediate_lower_limit(&self) -> f64 {
        self.interpolate_secondary(
            self.lower_distribution().lower_bound(),
            self.upper_distribution().lower_bound(),
        )
    }

    pub(crate) fn intermediate_upper_limit(&self) -> f64 {
        self.interpolate_secondary(
            self.lower_distribution().upper_bound(),
            self.upper_distribution().upper_bound(),
        )
    }

    pub(crate) fn lower_grid_length(&self) -> f64 {
        let d = self.lower_distribution();
        unit_mapping::grid_length(self.secondary(), d.lower_bound(), d.upper_bound())
    }

    pub(crate) fn upper_grid_length(&self) -> f64 {
        let d = self.upper_distribution();
        unit_mapping::grid_length(self.secondary(), d.lower_bound(), d.upper_bound())
    }

    /// Processed length of the intermediate secondary grid.
    pub(crate) fn intermediate_grid_length(&self) -> f64 {
        let l0 = self.lower_grid_length();
        let l1 = self.upper_grid_length();
        l0 + (l1 - l0) * self.beta
    }

    /// Returns true when `y` lies outside the fuzzy intermediate bounds.
    pub(crate) fn outside_fuzzy_bounds(&self, y: f64, y_min: f64, y_max: f64) -> bool {
        let tol = self.fuzzy_tolerance();
        y < unit_mapping::fuzzy_lower_bound(y_min, tol) || y > unit_mapping::fuzzy_upper_bound(y_max, tol)
    }

    /// Derivative of a secondary value with respect to its unit-base value.
    #[inline]
    pub(crate) fn unit_base_jacobian(&self, y: f64, length: f64) -> f64 {
        length * self.secondary().recover_derivative(y)
    }

    pub(crate) fn bisector(&self) -> CdfBisector {
        CdfBisector::new(*self.config)
    }

    /// Pick a boundary by the bin random number: the upper boundary is
    /// chosen with probability `beta`.
    pub(crate) fn choose_boundary(&self, bin_random_number: f64) -> (&'a D, usize) {
        if bin_random_number < self.beta {
            (self.upper_distribution(), self.upper_index)
        } else {
            (self.lower_distribution(), self.lower_index)
        }
    }
}

/// Shared state for the unit-base mapping of a bin.
pub(crate) struct UnitBaseFrame {
    pub y_min: f64,
    pub y_max: f64,
    pub length: f64,
    pub lower_min: f64,
    pub lower_length: f64,
    pub upper_min: f64,
    pub upper_length: f64,
}

impl UnitBaseFrame {
    pub(crate) fn new<D: TabularUnivariate>(bin: &Bin<'_, D>) -> Self {
        Self {
            y_min: bin.intermediate_lower_limit(),
            y_max: bin.intermediate_upper_limit(),
            length: bin.intermediate_grid_length(),
            lower_min: bin.lower_distribution().lower_bound(),
            lower_length: bin.lower_grid_length(),
            upper_min: bin.upper_distribution().lower_bound(),
            upper_length: bin.upper_grid_length(),
        }
    }

    /// Unit-base value of `y` on the intermediate grid.
    pub(crate) fn eta<D>(&self, bin: &Bin<'_, D>, y: f64) -> f64 {
        unit_mapping::unit_base_indep_var(
            bin.interpolation.secondary(),
            y,
            self.y_min,
            self.length,
            bin.config.fuzzy_boundary_tolerance,
        )
    }

    /// Secondary value on the intermediate grid for a unit-base value.
    pub(crate) fn intermediate_value<D>(&self, bin: &Bin<'_, D>, eta: f64) -> f64 {
        unit_mapping::indep_var(
            bin.interpolation.secondary(),
            eta,
            self.y_min,
            self.length,
            bin.config.fuzzy_boundary_tolerance,
        )
    }

    /// Secondary values on the lower and upper boundary grids for a
    /// unit-base value.
    pub(crate) fn boundary_values<D>(&self, bin: &Bin<'_, D>, eta: f64) -> (f64, f64) {
        let processing = bin.interpolation.secondary();
        let tol = bin.config.fuzzy_boundary_tolerance;
        (
            unit_mapping::indep_var(processing, eta, self.lower_min, self.lower_length, tol),
            unit_mapping::indep_var(processing, eta, self.upper_min, self.upper_length, tol),
        )
    }

    /// Unit-base value of a sample on the lower (`on_upper == false`) or
    /// upper boundary grid.
    pub(crate) fn boundary_eta<D>(&self, bin: &Bin<'_, D>, on_upper: bool, y: f64) -> f64 {
        let (min, length) = if on_upper {
            (self.upper_min, self.upper_length)
        } else {
            (self.lower_min, self.lower_length)
        };
        unit_mapping::unit_base_indep_var(
            bin.interpolation.secondary(),
            y,
            min,
            length,
            bin.config.fuzzy_boundary_tolerance,
        )
    }

    /// Unit-base values of boundary samples on their own grids.
    pub(crate) fn boundary_etas<D>(&self, bin: &Bin<'_, D>, lower: f64, upper: f64) -> (f64, f64) {
        (
            self.boundary_eta(bin, false, lower),
            self.boundary_eta(bin, true, upper),
        )
    }
}
