//! Lin-lin tabulated distribution.

use super::TabularUnivariate;
use crate::types::DistributionError;

/// Raw (independent, dependent) table of a [`TabularDistribution`].
///
/// This is the serialised form of the distribution; deserialising goes
/// through [`TabularDistribution::new`], so malformed tables are rejected.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabularValues {
    /// Independent values
    pub independent: Vec<f64>,
    /// Unnormalised density values
    pub dependent: Vec<f64>,
}

/// Piecewise-linear tabulated distribution.
///
/// The dependent values are an unnormalised density that is linear between
/// adjacent independent values. The CDF is tabulated exactly (trapezoid
/// areas) and sampling inverts the quadratic CDF on each segment.
///
/// # Construction
///
/// Requires at least 2 points, strictly ascending independent values and
/// finite non-negative dependent values with a positive integral.
///
/// # Example
///
/// ```
/// use tabulate_core::distribution::{TabularDistribution, TabularUnivariate};
///
/// let dist = TabularDistribution::new(&[0.0, 1.0, 2.0], &[1.0, 1.0, 1.0]).unwrap();
/// assert!((dist.evaluate_pdf(0.5) - 0.5).abs() < 1e-15);
/// assert!((dist.evaluate_cdf(1.0) - 0.5).abs() < 1e-15);
/// assert!((dist.sample_with_random_number(0.25) - 0.5).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "TabularValues", try_from = "TabularValues")
)]
pub struct TabularDistribution {
    /// Strictly ascending independent values
    independent: Vec<f64>,
    /// Unnormalised density at each independent value
    dependent: Vec<f64>,
    /// Unnormalised CDF at each independent value
    cdf: Vec<f64>,
    /// Density slope of each segment (last entry is zero)
    slopes: Vec<f64>,
    /// Reciprocal of the total integral
    norm_constant: f64,
}

impl TabularDistribution {
    /// Build the distribution from (independent, dependent) values.
    ///
    /// # Errors
    ///
    /// * `DistributionError::InsufficientData` - fewer than 2 points
    /// * `DistributionError::InvalidArgument` - mismatched lengths, values not
    ///   strictly ascending, negative or non-finite densities, zero integral
    pub fn new(independent: &[f64], dependent: &[f64]) -> Result<Self, DistributionError> {
        if independent.len() != dependent.len() {
            return Err(DistributionError::invalid_argument(format!(
                "independent and dependent values must have same length: got {} and {}",
                independent.len(),
                dependent.len()
            )));
        }

        if independent.len() < 2 {
            return Err(DistributionError::InsufficientData {
                got: independent.len(),
                need: 2,
            });
        }

        if independent.iter().any(|x| !x.is_finite()) {
            return Err(DistributionError::invalid_argument(
                "independent values must be finite",
            ));
        }

        if let Some(w) = independent.windows(2).find(|w| w[0] >= w[1]) {
            return Err(DistributionError::invalid_argument(format!(
                "independent values must be strictly ascending: {} followed by {}",
                w[0], w[1]
            )));
        }

        if let Some(y) = dependent.iter().find(|y| !y.is_finite() || **y < 0.0) {
            return Err(DistributionError::invalid_argument(format!(
                "dependent values must be finite and non-negative: found {}",
                y
            )));
        }

        let n = independent.len();
        let mut cdf = Vec::with_capacity(n);
        let mut slopes = Vec::with_capacity(n);
        cdf.push(0.0);

        for i in 0..n - 1 {
            let dx = independent[i + 1] - independent[i];
            let area = 0.5 * dx * (dependent[i] + dependent[i + 1]);
            cdf.push(cdf[i] + area);
            slopes.push((dependent[i + 1] - dependent[i]) / dx);
        }
        slopes.push(0.0);

        let total = cdf[n - 1];
        if !(total > 0.0 && total.is_finite()) {
            return Err(DistributionError::invalid_argument(format!(
                "distribution integral must be positive and finite: got {}",
                total
            )));
        }

        Ok(Self {
            independent: independent.to_vec(),
            dependent: dependent.to_vec(),
            cdf,
            slopes,
            norm_constant: 1.0 / total,
        })
    }

    /// Tabulated independent values.
    #[inline]
    pub fn independent_values(&self) -> &[f64] {
        &self.independent
    }

    /// Tabulated dependent values.
    #[inline]
    pub fn dependent_values(&self) -> &[f64] {
        &self.dependent
    }

    /// Number of tabulated points.
    #[inline]
    pub fn len(&self) -> usize {
        self.independent.len()
    }

    /// Always false for a constructed distribution.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.independent.is_empty()
    }

    /// Integral of the unnormalised density.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.cdf[self.cdf.len() - 1]
    }

    /// Segment index `i` with `x[i] <= x < x[i+1]`, clamped to `[0, n-2]`.
    #[inline]
    fn find_segment(&self, x: f64) -> usize {
        let pos = self.independent.partition_point(|&xi| xi <= x);
        pos.saturating_sub(1).min(self.independent.len() - 2)
    }

    fn unnormalised_cdf(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        let dx = x - self.independent[i];
        self.cdf[i] + dx * self.dependent[i] + 0.5 * dx * dx * self.slopes[i]
    }

    fn invert_unnormalised_cdf(&self, target: f64) -> f64 {
        let n = self.independent.len();
        let i = self
            .cdf
            .partition_point(|&c| c < target)
            .saturating_sub(1)
            .min(n - 2);

        let x0 = self.independent[i];
        let f0 = self.dependent[i];
        let slope = self.slopes[i];
        let dc = (target - self.cdf[i]).max(0.0);

        // Rationalised form of (sqrt(f0^2 + 2 m dc) - f0) / m
        let denominator = f0 + (f0 * f0 + 2.0 * slope * dc).max(0.0).sqrt();
        let x = if denominator > 0.0 {
            x0 + 2.0 * dc / denominator
        } else {
            x0
        };

        x.min(self.independent[i + 1])
    }
}

impl TabularUnivariate for TabularDistribution {
    fn evaluate(&self, x: f64) -> f64 {
        let n = self.independent.len();
        if x < self.independent[0] || x > self.independent[n - 1] {
            return 0.0;
        }
        if x == self.independent[n - 1] {
            return self.dependent[n - 1];
        }

        let i = self.find_segment(x);
        self.dependent[i] + self.slopes[i] * (x - self.independent[i])
    }

    #[inline]
    fn evaluate_pdf(&self, x: f64) -> f64 {
        self.evaluate(x) * self.norm_constant
    }

    fn evaluate_cdf(&self, x: f64) -> f64 {
        if x <= self.lower_bound() {
            0.0
        } else if x >= self.upper_bound() {
            1.0
        } else {
            (self.unnormalised_cdf(x) * self.norm_constant).min(1.0)
        }
    }

    fn sample_with_random_number(&self, random_number: f64) -> f64 {
        if random_number <= 0.0 {
            return self.lower_bound();
        }
        if random_number >= 1.0 {
            return self.upper_bound();
        }
        self.invert_unnormalised_cdf(random_number * self.norm())
    }

    fn sample_with_random_number_in_subrange(&self, random_number: f64, max_value: f64) -> f64 {
        if max_value <= self.lower_bound() {
            return self.lower_bound();
        }
        let max_value = max_value.min(self.upper_bound());

        let scaled = random_number * self.evaluate_cdf(max_value);
        self.sample_with_random_number(scaled).min(max_value)
    }

    #[inline]
    fn lower_bound(&self) -> f64 {
        self.independent[0]
    }

    #[inline]
    fn upper_bound(&self) -> f64 {
        self.independent[self.independent.len() - 1]
    }
}

impl TryFrom<TabularValues> for TabularDistribution {
    type Error = DistributionError;

    fn try_from(values: TabularValues) -> Result<Self, Self::Error> {
        Self::new(&values.independent, &values.dependent)
    }
}

impl From<TabularDistribution> for TabularValues {
    fn from(dist: TabularDistribution) -> Self {
        Self {
            independent: dist.independent,
            dependent: dist.dependent,
        }
    }
}
