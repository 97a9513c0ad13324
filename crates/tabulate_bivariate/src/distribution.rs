//! Interpolated bivariate distribution.

use crate::bin_boundary::{BinBoundaries, PrimaryGrid};
use crate::config::EvaluationConfig;
use crate::policy::{Bin, Quantity, SamplingPolicy, SecondarySample};
use rand::Rng;
use tabulate_core::distribution::{TabularDistribution, TabularUnivariate};
use tabulate_core::math::interpolation::TwoDInterpolationType;
use tabulate_core::types::DistributionError;

/// Bivariate distribution tabulated on a primary grid of secondary
/// distributions.
///
/// Queries at a primary value between two grid points are answered by the
/// configured [`SamplingPolicy`]. Queries at a grid point, or outside the
/// grid with limits extended, use that point's distribution verbatim.
///
/// # Example
///
/// ```
/// use tabulate_bivariate::{
///     EvaluationConfig, InterpolatedBivariateDistribution, PrimaryGrid, SamplingPolicy,
/// };
/// use tabulate_core::distribution::TabularDistribution;
/// use tabulate_core::math::TwoDInterpolationType;
///
/// let grid = PrimaryGrid::new(
///     vec![1.0, 2.0],
///     vec![
///         TabularDistribution::new(&[0.0, 1.0], &[1.0, 1.0]).unwrap(),
///         TabularDistribution::new(&[0.0, 3.0], &[1.0, 1.0]).unwrap(),
///     ],
/// )
/// .unwrap();
///
/// let dist = InterpolatedBivariateDistribution::new(
///     grid,
///     SamplingPolicy::Correlated,
///     TwoDInterpolationType::LinLinLin,
///     EvaluationConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(dist.secondary_conditional_upper_bound(1.5).unwrap(), 2.0);
/// let y = dist.sample_secondary_conditional_with_random_number(1.5, 0.5).unwrap();
/// assert!((y - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedBivariateDistribution<D = TabularDistribution> {
    grid: PrimaryGrid<D>,
    policy: SamplingPolicy,
    interpolation: TwoDInterpolationType,
    config: EvaluationConfig,
}

/// Resolved boundary for a primary query.
enum Located<'a, D> {
    Single(&'a D, usize),
    Interior(Bin<'a, D>),
}

impl<D: TabularUnivariate> InterpolatedBivariateDistribution<D> {
    /// Create the distribution.
    ///
    /// # Errors
    ///
    /// * `DistributionError::InvalidArgument` - invalid configuration, a
    ///   primary value not usable with the primary processing, or (for
    ///   policies interpolating the secondary limits) a secondary bound not
    ///   usable with the secondary processing
    pub fn new(
        grid: PrimaryGrid<D>,
        policy: SamplingPolicy,
        interpolation: TwoDInterpolationType,
        config: EvaluationConfig,
    ) -> Result<Self, DistributionError> {
        config.validate()?;

        let primary = interpolation.primary();
        if let Some(x) = grid.primary_values().find(|&x| !primary.is_valid(x)) {
            return Err(DistributionError::invalid_argument(format!(
                "primary value {} is not valid for {:?} primary processing",
                x, primary
            )));
        }

        if policy != SamplingPolicy::Direct {
            let secondary = interpolation.secondary();
            for entry in grid.entries() {
                let d = &entry.distribution;
                if !secondary.is_valid(d.lower_bound()) || !secondary.is_valid(d.upper_bound()) {
                    return Err(DistributionError::invalid_argument(format!(
                        "secondary bounds [{}, {}] at primary value {} are not valid for {:?} \
                         secondary processing",
                        d.lower_bound(),
                        d.upper_bound(),
                        entry.primary_value,
                        secondary
                    )));
                }
            }
        }

        Ok(Self {
            grid,
            policy,
            interpolation,
            config,
        })
    }

    /// Returns the primary grid.
    #[inline]
    pub fn grid(&self) -> &PrimaryGrid<D> {
        &self.grid
    }

    /// Returns the sampling policy.
    #[inline]
    pub fn policy(&self) -> SamplingPolicy {
        self.policy
    }

    /// Returns the interpolation policy.
    #[inline]
    pub fn interpolation(&self) -> TwoDInterpolationType {
        self.interpolation
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Reuse the boundary distributions for primary values outside the grid.
    pub fn extend_beyond_primary_limits(&mut self) {
        self.grid.extend_beyond_limits();
    }

    /// Fail queries at primary values outside the grid (the default).
    pub fn limit_to_primary_grid(&mut self) {
        self.grid.limit_to_grid();
    }

    /// Returns true when the primary limits are extended.
    #[inline]
    pub fn primary_limits_extended(&self) -> bool {
        self.grid.limits_extended()
    }

    /// Lower bound of the primary variable.
    #[inline]
    pub fn primary_lower_bound(&self) -> f64 {
        self.grid.lower_limit()
    }

    /// Upper bound of the primary variable.
    #[inline]
    pub fn primary_upper_bound(&self) -> f64 {
        self.grid.upper_limit()
    }

    fn locate(&self, primary_value: f64) -> Result<Located<'_, D>, DistributionError> {
        let BinBoundaries { lower, upper } = self.grid.locate(primary_value)?;
        let entries = self.grid.entries();

        if lower == upper {
            return Ok(Located::Single(&entries[lower].distribution, lower));
        }

        let processing = self.interpolation.primary();
        let p = processing.process(primary_value);
        let p0 = processing.process(entries[lower].primary_value);
        let p1 = processing.process(entries[upper].primary_value);

        Ok(Located::Interior(Bin {
            lower: &entries[lower],
            upper: &entries[upper],
            lower_index: lower,
            upper_index: upper,
            beta: (p - p0) / (p1 - p0),
            interpolation: self.interpolation,
            config: &self.config,
        }))
    }

    fn evaluate_quantity(
        &self,
        primary_value: f64,
        secondary_value: f64,
        quantity: Quantity,
    ) -> Result<f64, DistributionError> {
        match self.locate(primary_value)? {
            Located::Single(d, _) => Ok(quantity.of(d, secondary_value)),
            Located::Interior(bin) => self.policy.evaluate(&bin, secondary_value, quantity),
        }
    }

    /// Evaluate the tabulated (unnormalised) value at `(x, y)`.
    pub fn evaluate(&self, primary_value: f64, secondary_value: f64) -> Result<f64, DistributionError> {
        self.evaluate_quantity(primary_value, secondary_value, Quantity::Value)
    }

    /// Evaluate the secondary conditional PDF at `(x, y)`.
    pub fn evaluate_secondary_conditional_pdf(
        &self,
        primary_value: f64,
        secondary_value: f64,
    ) -> Result<f64, DistributionError> {
        self.evaluate_quantity(primary_value, secondary_value, Quantity::Pdf)
    }

    /// Evaluate the secondary conditional CDF at `(x, y)`.
    pub fn evaluate_secondary_conditional_cdf(
        &self,
        primary_value: f64,
        secondary_value: f64,
    ) -> Result<f64, DistributionError> {
        match self.locate(primary_value)? {
            Located::Single(d, _) => Ok(d.evaluate_cdf(secondary_value)),
            Located::Interior(bin) => self.policy.evaluate_cdf(&bin, secondary_value),
        }
    }

    /// Lower bound of the secondary variable conditioned on `x`.
    pub fn secondary_conditional_lower_bound(&self, primary_value: f64) -> Result<f64, DistributionError> {
        Ok(match self.locate(primary_value)? {
            Located::Single(d, _) => d.lower_bound(),
            Located::Interior(bin) => self.policy.lower_bound(&bin),
        })
    }

    /// Upper bound of the secondary variable conditioned on `x`.
    pub fn secondary_conditional_upper_bound(&self, primary_value: f64) -> Result<f64, DistributionError> {
        Ok(match self.locate(primary_value)? {
            Located::Single(d, _) => d.upper_bound(),
            Located::Interior(bin) => self.policy.upper_bound(&bin),
        })
    }

    /// Sample a secondary value conditioned on `x`, recording the raw
    /// boundary sample and the primary bin it came from.
    ///
    /// `bin_random_number` picks the bin boundary for stochastic policies
    /// and is ignored otherwise.
    pub fn sample_secondary_conditional_detailed(
        &self,
        primary_value: f64,
        bin_random_number: f64,
        random_number: f64,
    ) -> Result<SecondarySample, DistributionError> {
        check_random_number(bin_random_number)?;
        check_random_number(random_number)?;

        match self.locate(primary_value)? {
            Located::Single(d, index) => {
                let sample = d.sample_with_random_number(random_number);
                Ok(SecondarySample {
                    sample,
                    raw_sample: sample,
                    primary_bin_index: index,
                })
            }
            Located::Interior(bin) => self.policy.sample(&bin, bin_random_number, random_number),
        }
    }

    /// Sample a secondary value conditioned on `x` from explicit random
    /// numbers.
    pub fn sample_secondary_conditional_with_random_numbers(
        &self,
        primary_value: f64,
        bin_random_number: f64,
        random_number: f64,
    ) -> Result<f64, DistributionError> {
        self.sample_secondary_conditional_detailed(primary_value, bin_random_number, random_number)
            .map(|s| s.sample)
    }

    /// Sample a secondary value conditioned on `x` from a single random
    /// number.
    ///
    /// # Errors
    ///
    /// * `DistributionError::InvalidArgument` - the policy is stochastic and
    ///   needs a bin random number as well
    pub fn sample_secondary_conditional_with_random_number(
        &self,
        primary_value: f64,
        random_number: f64,
    ) -> Result<f64, DistributionError> {
        self.require_deterministic()?;
        self.sample_secondary_conditional_with_random_numbers(primary_value, 0.0, random_number)
    }

    /// Sample a secondary value conditioned on `x`.
    pub fn sample_secondary_conditional<R: Rng + ?Sized>(
        &self,
        primary_value: f64,
        rng: &mut R,
    ) -> Result<f64, DistributionError> {
        let bin_random_number = self.draw_bin_random_number(rng);
        let random_number = rng.gen::<f64>();
        self.sample_secondary_conditional_with_random_numbers(primary_value, bin_random_number, random_number)
    }

    /// Sample a secondary value conditioned on `x` from explicit random
    /// numbers, restricted to values not above `max_secondary_value`.
    pub fn sample_secondary_conditional_with_random_numbers_in_subrange(
        &self,
        primary_value: f64,
        bin_random_number: f64,
        random_number: f64,
        max_secondary_value: f64,
    ) -> Result<f64, DistributionError> {
        check_random_number(bin_random_number)?;
        check_random_number(random_number)?;

        match self.locate(primary_value)? {
            Located::Single(d, _) => {
                Ok(d.sample_with_random_number_in_subrange(random_number, max_secondary_value))
            }
            Located::Interior(bin) => self.policy.sample_in_subrange(
                &bin,
                bin_random_number,
                random_number,
                max_secondary_value,
            ),
        }
    }

    /// Sample a secondary value conditioned on `x` from a single random
    /// number, restricted to values not above `max_secondary_value`.
    ///
    /// # Errors
    ///
    /// * `DistributionError::InvalidArgument` - the policy is stochastic
    pub fn sample_secondary_conditional_with_random_number_in_subrange(
        &self,
        primary_value: f64,
        random_number: f64,
        max_secondary_value: f64,
    ) -> Result<f64, DistributionError> {
        self.require_deterministic()?;
        self.sample_secondary_conditional_with_random_numbers_in_subrange(
            primary_value,
            0.0,
            random_number,
            max_secondary_value,
        )
    }

    /// Sample a secondary value conditioned on `x`, restricted to values not
    /// above `max_secondary_value`.
    pub fn sample_secondary_conditional_in_subrange<R: Rng + ?Sized>(
        &self,
        primary_value: f64,
        max_secondary_value: f64,
        rng: &mut R,
    ) -> Result<f64, DistributionError> {
        let bin_random_number = self.draw_bin_random_number(rng);
        let random_number = rng.gen::<f64>();
        self.sample_secondary_conditional_with_random_numbers_in_subrange(
            primary_value,
            bin_random_number,
            random_number,
            max_secondary_value,
        )
    }

    fn draw_bin_random_number<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.policy.is_stochastic() {
            rng.gen::<f64>()
        } else {
            0.0
        }
    }

    fn require_deterministic(&self) -> Result<(), DistributionError> {
        if self.policy.is_stochastic() {
            return Err(DistributionError::invalid_argument(format!(
                "{} sampling needs a bin random number",
                self.policy
            )));
        }
        Ok(())
    }
}

fn check_random_number(random_number: f64) -> Result<(), DistributionError> {
    if !(0.0..=1.0).contains(&random_number) {
        return Err(DistributionError::invalid_argument(format!(
            "random number {} is not in [0, 1]",
            random_number
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn uniform(lower: f64, upper: f64) -> TabularDistribution {
        TabularDistribution::new(&[lower, upper], &[1.0, 1.0]).unwrap()
    }

    /// Uniform on [0, 1] at x = 1 and uniform on [2, 4] at x = 3.
    fn shifted_uniforms(policy: SamplingPolicy) -> InterpolatedBivariateDistribution {
        let grid = PrimaryGrid::new(vec![1.0, 3.0], vec![uniform(0.0, 1.0), uniform(2.0, 4.0)]).unwrap();
        InterpolatedBivariateDistribution::new(
            grid,
            policy,
            TwoDInterpolationType::LinLinLin,
            EvaluationConfig::default(),
        )
        .unwrap()
    }

    const ALL_POLICIES: [SamplingPolicy; 5] = [
        SamplingPolicy::Direct,
        SamplingPolicy::UnitBase,
        SamplingPolicy::Correlated,
        SamplingPolicy::UnitBaseCorrelated,
        SamplingPolicy::CumulativePoints,
    ];

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_new_rejects_log_primary_with_zero() {
        let grid = PrimaryGrid::new(vec![0.0, 1.0], vec![uniform(1.0, 2.0), uniform(1.0, 2.0)]).unwrap();
        let result = InterpolatedBivariateDistribution::new(
            grid,
            SamplingPolicy::Correlated,
            TwoDInterpolationType::LinLinLog,
            EvaluationConfig::default(),
        );
        assert!(result.unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_new_rejects_log_secondary_with_zero_bound() {
        let grid = PrimaryGrid::new(vec![1.0, 2.0], vec![uniform(0.0, 2.0), uniform(1.0, 2.0)]).unwrap();
        let result = InterpolatedBivariateDistribution::new(
            grid.clone(),
            SamplingPolicy::UnitBaseCorrelated,
            TwoDInterpolationType::LinLogLin,
            EvaluationConfig::default(),
        );
        assert!(result.is_err());

        // Direct interpolation never processes the secondary bounds
        let result = InterpolatedBivariateDistribution::new(
            grid,
            SamplingPolicy::Direct,
            TwoDInterpolationType::LinLogLin,
            EvaluationConfig::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let grid = PrimaryGrid::new(vec![1.0, 2.0], vec![uniform(0.0, 1.0), uniform(0.0, 1.0)]).unwrap();
        let result = InterpolatedBivariateDistribution::new(
            grid,
            SamplingPolicy::Correlated,
            TwoDInterpolationType::LinLinLin,
            EvaluationConfig::default().with_max_iterations(0),
        );
        assert!(result.is_err());
    }

    // ========================================
    // Bounds Tests
    // ========================================

    #[test]
    fn test_primary_bounds() {
        let dist = shifted_uniforms(SamplingPolicy::Correlated);
        assert_eq!(dist.primary_lower_bound(), 1.0);
        assert_eq!(dist.primary_upper_bound(), 3.0);
    }

    #[test]
    fn test_secondary_bounds_per_policy() {
        for policy in ALL_POLICIES {
            let dist = shifted_uniforms(policy);
            let lower = dist.secondary_conditional_lower_bound(2.0).unwrap();
            let upper = dist.secondary_conditional_upper_bound(2.0).unwrap();
            if policy == SamplingPolicy::Direct {
                assert_eq!((lower, upper), (0.0, 4.0));
            } else {
                assert_relative_eq!(lower, 1.0);
                assert_relative_eq!(upper, 2.5);
            }
        }
    }

    // ========================================
    // Grid Point and Range Tests
    // ========================================

    #[test]
    fn test_grid_point_bypasses_interpolation() {
        for policy in ALL_POLICIES {
            let dist = shifted_uniforms(policy);
            let reference = uniform(2.0, 4.0);
            for y in [2.0, 2.7, 3.9] {
                assert_eq!(
                    dist.evaluate_secondary_conditional_pdf(3.0, y).unwrap(),
                    reference.evaluate_pdf(y)
                );
                assert_eq!(
                    dist.evaluate_secondary_conditional_cdf(3.0, y).unwrap(),
                    reference.evaluate_cdf(y)
                );
            }
            let sample = dist
                .sample_secondary_conditional_with_random_numbers(3.0, 0.3, 0.25)
                .unwrap();
            assert_eq!(sample, reference.sample_with_random_number(0.25));
        }
    }

    #[test]
    fn test_out_of_range_primary() {
        let mut dist = shifted_uniforms(SamplingPolicy::Correlated);
        let err = dist.evaluate_secondary_conditional_pdf(5.0, 1.0).unwrap_err();
        assert!(err.is_out_of_range());

        dist.extend_beyond_primary_limits();
        assert!(dist.primary_limits_extended());
        assert_relative_eq!(dist.evaluate_secondary_conditional_pdf(5.0, 3.0).unwrap(), 0.5);
        assert_relative_eq!(dist.evaluate_secondary_conditional_pdf(0.0, 0.5).unwrap(), 1.0);

        dist.limit_to_primary_grid();
        assert!(dist.secondary_conditional_lower_bound(0.0).is_err());
    }

    // ========================================
    // Correlated Tests
    // ========================================

    #[test]
    fn test_correlated_pdf_between_shifted_uniforms() {
        let dist = shifted_uniforms(SamplingPolicy::Correlated);
        // Halfway the conditional is uniform on [1, 2.5]
        for y in [1.2, 1.75, 2.4] {
            assert_relative_eq!(
                dist.evaluate_secondary_conditional_pdf(2.0, y).unwrap(),
                1.0 / 1.5,
                max_relative = 1e-6
            );
            assert_relative_eq!(
                dist.evaluate_secondary_conditional_cdf(2.0, y).unwrap(),
                (y - 1.0) / 1.5,
                max_relative = 1e-5
            );
        }
        assert_eq!(dist.evaluate_secondary_conditional_pdf(2.0, 3.0).unwrap(), 0.0);
        assert_eq!(dist.evaluate_secondary_conditional_cdf(2.0, 0.5).unwrap(), 0.0);
        assert_eq!(dist.evaluate_secondary_conditional_cdf(2.0, 3.0).unwrap(), 1.0);
    }

    #[test]
    fn test_correlated_sample() {
        let dist = shifted_uniforms(SamplingPolicy::Correlated);
        let y = dist.sample_secondary_conditional_with_random_number(2.0, 0.5).unwrap();
        assert_relative_eq!(y, 1.75, epsilon = 1e-12);

        let s = dist.sample_secondary_conditional_detailed(2.0, 0.9, 0.0).unwrap();
        assert_relative_eq!(s.sample, 1.0);
        assert_eq!(s.primary_bin_index, 0);
    }

    #[test]
    fn test_correlated_sample_in_subrange() {
        let dist = shifted_uniforms(SamplingPolicy::Correlated);
        let y = dist
            .sample_secondary_conditional_with_random_number_in_subrange(2.0, 0.5, 1.75)
            .unwrap();
        assert_relative_eq!(y, 1.375, max_relative = 1e-6);

        let y = dist
            .sample_secondary_conditional_with_random_number_in_subrange(2.0, 1.0, 10.0)
            .unwrap();
        assert_relative_eq!(y, 2.5, epsilon = 1e-12);
    }

    // ========================================
    // Stochastic Policy Tests
    // ========================================

    #[test]
    fn test_direct_sample_picks_boundary() {
        let dist = shifted_uniforms(SamplingPolicy::Direct);
        // beta = 0.5: bin random number below picks the upper boundary
        let s = dist.sample_secondary_conditional_detailed(2.0, 0.4, 0.5).unwrap();
        assert_eq!(s.primary_bin_index, 1);
        assert_relative_eq!(s.sample, 3.0);

        let s = dist.sample_secondary_conditional_detailed(2.0, 0.6, 0.5).unwrap();
        assert_eq!(s.primary_bin_index, 0);
        assert_relative_eq!(s.sample, 0.5);
    }

    #[test]
    fn test_direct_pdf_interpolates_at_same_secondary_value() {
        let dist = shifted_uniforms(SamplingPolicy::Direct);
        assert_relative_eq!(dist.evaluate_secondary_conditional_pdf(2.0, 0.5).unwrap(), 0.5);
        assert_relative_eq!(dist.evaluate_secondary_conditional_pdf(2.0, 3.0).unwrap(), 0.25);
        assert_relative_eq!(dist.evaluate_secondary_conditional_cdf(2.0, 1.5).unwrap(), 0.5);
    }

    #[test]
    fn test_unit_base_sample_rescales_raw_sample() {
        let dist = shifted_uniforms(SamplingPolicy::UnitBase);
        let s = dist.sample_secondary_conditional_detailed(2.0, 0.4, 0.5).unwrap();
        assert_eq!(s.primary_bin_index, 1);
        assert_relative_eq!(s.raw_sample, 3.0);
        assert_relative_eq!(s.sample, 1.75, epsilon = 1e-12);
    }

    #[test]
    fn test_unit_base_pdf_and_cdf() {
        let dist = shifted_uniforms(SamplingPolicy::UnitBase);
        assert_relative_eq!(
            dist.evaluate_secondary_conditional_pdf(2.0, 1.5).unwrap(),
            1.0 / 1.5,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            dist.evaluate_secondary_conditional_cdf(2.0, 1.375).unwrap(),
            0.25,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_stochastic_policies_reject_single_random_number() {
        for policy in [SamplingPolicy::Direct, SamplingPolicy::UnitBase] {
            let dist = shifted_uniforms(policy);
            let err = dist
                .sample_secondary_conditional_with_random_number(2.0, 0.5)
                .unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_random_numbers_are_checked() {
        let dist = shifted_uniforms(SamplingPolicy::Correlated);
        assert!(dist
            .sample_secondary_conditional_with_random_numbers(2.0, 0.5, 1.5)
            .is_err());
        assert!(dist
            .sample_secondary_conditional_with_random_numbers(2.0, -0.5, 0.5)
            .is_err());
    }

    // ========================================
    // Cumulative Points Tests
    // ========================================

    #[test]
    fn test_cumulative_points_sample_inverts_cdf() {
        let dist = shifted_uniforms(SamplingPolicy::CumulativePoints);
        for p in [0.1, 0.5, 0.9] {
            let y = dist.sample_secondary_conditional_with_random_number(2.0, p).unwrap();
            assert_abs_diff_eq!(
                dist.evaluate_secondary_conditional_cdf(2.0, y).unwrap(),
                p,
                epsilon = 1e-6
            );
        }
    }

    // ========================================
    // Random Sampling Tests
    // ========================================

    #[test]
    fn test_sample_with_rng_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for policy in ALL_POLICIES {
            let dist = shifted_uniforms(policy);
            let lower = dist.secondary_conditional_lower_bound(1.7).unwrap();
            let upper = dist.secondary_conditional_upper_bound(1.7).unwrap();
            for _ in 0..50 {
                let y = dist.sample_secondary_conditional(1.7, &mut rng).unwrap();
                assert!(y >= lower - 1e-12 && y <= upper + 1e-12, "{} sample {}", policy, y);

                // Direct may pick the upper boundary, whose domain starts at 2
                let max = if policy == SamplingPolicy::Direct { 3.0 } else { 1.2 };
                let y = dist
                    .sample_secondary_conditional_in_subrange(1.7, max, &mut rng)
                    .unwrap();
                assert!(y <= max + 1e-12, "{} subrange sample {}", policy, y);
            }
        }
    }
}
