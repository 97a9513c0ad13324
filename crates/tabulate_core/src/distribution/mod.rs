//! Univariate tabulated distributions.
//!
//! This module provides:
//! - [`TabularUnivariate`]: The query interface consumed by the bivariate
//!   distribution and the grid generators
//! - [`TabularDistribution`]: Lin-lin tabulated PDF with exact CDF and
//!   analytic inverse-CDF sampling

mod tabular;

pub use tabular::{TabularDistribution, TabularValues};

use crate::types::DistributionError;
use rand::Rng;

/// Query interface of a tabulated one-dimensional distribution.
///
/// `evaluate` returns the raw tabulated dependent value, `evaluate_pdf` the
/// normalised density. All sampling is by CDF inversion, so the
/// `*_with_random_number` variants are deterministic functions of the
/// supplied random number in `[0, 1]`.
pub trait TabularUnivariate {
    /// Evaluate the tabulated (unnormalised) dependent value.
    fn evaluate(&self, x: f64) -> f64;

    /// Evaluate the normalised probability density.
    fn evaluate_pdf(&self, x: f64) -> f64;

    /// Evaluate the cumulative distribution.
    fn evaluate_cdf(&self, x: f64) -> f64;

    /// Invert the CDF at `random_number`.
    fn sample_with_random_number(&self, random_number: f64) -> f64;

    /// Invert the CDF restricted to `[lower_bound, max_value]`.
    fn sample_with_random_number_in_subrange(&self, random_number: f64, max_value: f64) -> f64;

    /// Lower bound of the independent variable.
    fn lower_bound(&self) -> f64;

    /// Upper bound of the independent variable.
    fn upper_bound(&self) -> f64;

    /// Draw a sample.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64
    where
        Self: Sized,
    {
        self.sample_with_random_number(rng.gen::<f64>())
    }

    /// Draw a sample from `[lower_bound, max_value]`.
    fn sample_in_subrange<R: Rng + ?Sized>(&self, max_value: f64, rng: &mut R) -> f64
    where
        Self: Sized,
    {
        self.sample_with_random_number_in_subrange(rng.gen::<f64>(), max_value)
    }

    /// Invert the CDF after checking that `random_number` lies in `[0, 1]`.
    fn sample_with_random_number_checked(&self, random_number: f64) -> Result<f64, DistributionError> {
        if !(0.0..=1.0).contains(&random_number) {
            return Err(DistributionError::invalid_argument(format!(
                "random number {} is not in [0, 1]",
                random_number
            )));
        }
        Ok(self.sample_with_random_number(random_number))
    }
}
