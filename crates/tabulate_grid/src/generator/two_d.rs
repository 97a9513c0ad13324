//! Bivariate adaptive grid generator.
//!
//! Every primary point `x` carries a secondary grid produced by the 1-D
//! generator on the slice `f(x, ·)`. An interval `[x0, x1]` of the primary
//! grid is accepted when the secondary grid built at its processed midpoint
//! `x_m` is reproduced by unit-base interpolation of the grids at `x0` and
//! `x1`, both at the grid points of `x_m` and at the midpoints between them.
//! Otherwise `x_m` becomes a primary point and both halves are retested.
//!
//! The estimate at `x_m` pairs points of the two boundary grids either by
//! equal unit-base coordinate ([`TwoDEstimator::UnitBase`]) or by equal
//! cumulative area ([`TwoDEstimator::Correlated`]).
//!
//! Seed intervals refine independently; with the `parallel` feature they are
//! processed on the rayon thread pool and joined in seed order.

use super::one_d::{EvaluatedGrid, GridGenerator};
use super::{report_dirty, validate_seed};
use crate::config::GridGeneratorConfig;
use crate::convergence::{ConvergencePolicy, ConvergenceStatus, DirtyConvergence};
use crate::error::GridError;
use tabulate_bivariate::{
    CdfBisector, EvaluationConfig, InterpolatedBivariateDistribution, MatchedPoints, PrimaryGrid,
    SamplingPolicy,
};
use tabulate_core::distribution::{TabularDistribution, TabularUnivariate};
use tabulate_core::math::unit_base::{grid_length, indep_var, unit_base_indep_var};
use tabulate_core::math::{relative_error, InterpolationType, TwoDInterpolationType};
use tracing::debug;

/// Snapping tolerance of the unit-base mapping.
const UNIT_BASE_TOLERANCE: f64 = 1e-10;

/// How the function at an intermediate primary value is estimated from the
/// secondary grids at the two ends of a primary interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TwoDEstimator {
    /// Pair points with the same position relative to each secondary
    /// domain.
    #[default]
    UnitBase,
    /// Pair points of equal cumulative area under each slice.
    ///
    /// Every secondary slice must be non-negative with a positive lin-lin
    /// integral.
    Correlated,
}

impl std::fmt::Display for TwoDEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TwoDEstimator::UnitBase => write!(f, "Unit-base"),
            TwoDEstimator::Correlated => write!(f, "Correlated"),
        }
    }
}

/// A generated primary grid with the secondary grid and function values at
/// every primary point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TwoDGrid {
    /// Ascending primary grid
    pub primary_grid: Vec<f64>,
    /// Secondary grid at each primary point
    pub secondary_grids: Vec<Vec<f64>>,
    /// Function values on each secondary grid
    pub evaluated_function: Vec<Vec<f64>>,
}

impl TwoDGrid {
    /// Number of primary points.
    pub fn len(&self) -> usize {
        self.primary_grid.len()
    }

    /// Returns true if the primary grid has no points.
    pub fn is_empty(&self) -> bool {
        self.primary_grid.is_empty()
    }

    /// Secondary grid and function values at primary index `i`.
    pub fn slice(&self, i: usize) -> Option<(&[f64], &[f64])> {
        Some((
            self.secondary_grids.get(i)?.as_slice(),
            self.evaluated_function.get(i)?.as_slice(),
        ))
    }

    fn push(&mut self, x: f64, slice: EvaluatedGrid) {
        self.primary_grid.push(x);
        self.secondary_grids.push(slice.grid);
        self.evaluated_function.push(slice.values);
    }
}

/// Adaptive grid generator for a bivariate function `f(x, y)`.
///
/// The secondary initializer returns the seed of the secondary grid at a
/// primary value; it must produce at least two ascending points.
///
/// # Examples
///
/// ```
/// use tabulate_core::math::TwoDInterpolationType;
/// use tabulate_grid::TwoDGridGenerator;
///
/// let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin);
///
/// // Bilinear functions are exact under unit-base interpolation
/// let grid = generator
///     .generate_and_evaluate(&[0.0, 10.0], |_| vec![0.0, 1.0], |x, y| 1.0 + x + 2.0 * y)
///     .unwrap();
/// assert_eq!(grid.primary_grid, vec![0.0, 10.0]);
/// assert_eq!(grid.secondary_grids[0], vec![0.0, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct TwoDGridGenerator {
    interpolation: TwoDInterpolationType,
    config: GridGeneratorConfig,
    policy: ConvergencePolicy,
    secondary_generator: GridGenerator,
    estimator: TwoDEstimator,
    critical_primary_values: Vec<f64>,
}

impl TwoDGridGenerator {
    /// Create a generator after validating the configuration.
    ///
    /// The secondary grids are generated with the same tolerances and
    /// dirty-convergence policy, using the dependent-secondary interpolation.
    pub fn new(
        interpolation: TwoDInterpolationType,
        config: GridGeneratorConfig,
    ) -> Result<Self, GridError> {
        Ok(Self {
            interpolation,
            policy: ConvergencePolicy::from_config(&config),
            secondary_generator: GridGenerator::new(interpolation.zy(), config)?,
            config,
            estimator: TwoDEstimator::default(),
            critical_primary_values: Vec::new(),
        })
    }

    /// Create a generator with the default configuration.
    pub fn with_defaults(interpolation: TwoDInterpolationType) -> Self {
        let config = GridGeneratorConfig::default();
        Self {
            interpolation,
            policy: ConvergencePolicy::from_config(&config),
            secondary_generator: GridGenerator::with_defaults(interpolation.zy()),
            config,
            estimator: TwoDEstimator::default(),
            critical_primary_values: Vec::new(),
        }
    }

    /// Set the estimator used by the primary convergence test.
    pub fn with_estimator(mut self, estimator: TwoDEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Add primary values that every generated grid must contain.
    ///
    /// Values strictly inside the primary seed range are merged into the
    /// seed before refinement; the rest are ignored.
    ///
    /// # Errors
    ///
    /// * `GridError::InvalidArgument` - a value is not finite or not valid
    ///   for the primary processing
    pub fn with_critical_primary_values<V>(mut self, values: V) -> Result<Self, GridError>
    where
        V: IntoIterator<Item = f64>,
    {
        let primary = self.interpolation.primary();
        for x in values {
            if !x.is_finite() || !primary.is_valid(x) {
                return Err(GridError::invalid_argument(format!(
                    "critical primary value {} is not valid for {:?} processing",
                    x, primary
                )));
            }
            self.critical_primary_values.push(x);
        }
        Ok(self)
    }

    /// Estimator used by the primary convergence test.
    pub fn estimator(&self) -> TwoDEstimator {
        self.estimator
    }

    /// Critical primary values added to every seed.
    pub fn critical_primary_values(&self) -> &[f64] {
        &self.critical_primary_values
    }

    /// Interpolation used across the primary grid.
    pub fn interpolation(&self) -> TwoDInterpolationType {
        self.interpolation
    }

    /// Get the configuration.
    pub fn config(&self) -> &GridGeneratorConfig {
        &self.config
    }

    /// Generator used for every secondary grid.
    pub fn secondary_generator(&self) -> &GridGenerator {
        &self.secondary_generator
    }

    /// Generate the primary grid from `primary_seed`.
    pub fn generate<I, F>(
        &self,
        primary_seed: &[f64],
        initializer: I,
        function: F,
    ) -> Result<Vec<f64>, GridError>
    where
        I: Fn(f64) -> Vec<f64> + Sync,
        F: Fn(f64, f64) -> f64 + Sync,
    {
        Ok(self
            .generate_and_evaluate(primary_seed, initializer, function)?
            .primary_grid)
    }

    /// Generate the primary grid and the secondary grid at every primary
    /// point, with the function values on each secondary grid.
    pub fn generate_and_evaluate<I, F>(
        &self,
        primary_seed: &[f64],
        initializer: I,
        function: F,
    ) -> Result<TwoDGrid, GridError>
    where
        I: Fn(f64) -> Vec<f64> + Sync,
        F: Fn(f64, f64) -> f64 + Sync,
    {
        let primary = self.interpolation.primary();
        validate_seed(primary_seed, |x| primary.is_valid(x))?;
        let primary_seed = self.add_critical_values(primary_seed);
        let primary_seed = primary_seed.as_slice();

        let mut seed_slices = map_indices(primary_seed.len(), |i| {
            self.generate_secondary(primary_seed[i], &initializer, &function)
        })?;

        let pieces = map_indices(primary_seed.len() - 1, |i| {
            self.refine_interval(
                (primary_seed[i], seed_slices[i].clone()),
                (primary_seed[i + 1], seed_slices[i + 1].clone()),
                &initializer,
                &function,
            )
        })?;

        let mut result = TwoDGrid::default();
        for (x, slice) in pieces.into_iter().flatten() {
            self.log_added_point(x, result.len());
            result.push(x, slice);
        }

        let last = primary_seed[primary_seed.len() - 1];
        if let Some(slice) = seed_slices.pop() {
            self.log_added_point(last, result.len());
            result.push(last, slice);
        }

        Ok(result)
    }

    /// Generate the secondary grid at `primary_value`.
    pub fn generate_secondary<I, F>(
        &self,
        primary_value: f64,
        initializer: I,
        function: F,
    ) -> Result<EvaluatedGrid, GridError>
    where
        I: Fn(f64) -> Vec<f64>,
        F: Fn(f64, f64) -> f64,
    {
        let seed = initializer(primary_value);
        self.secondary_generator
            .generate_and_evaluate(&seed, |y| function(primary_value, y))
    }

    /// Generate the grids and wrap every secondary slice in a tabulated
    /// distribution.
    ///
    /// Function values must be non-negative with a positive integral on
    /// every secondary grid.
    pub fn generate_distribution<I, F>(
        &self,
        primary_seed: &[f64],
        initializer: I,
        function: F,
        sampling_policy: SamplingPolicy,
        evaluation_config: EvaluationConfig,
    ) -> Result<InterpolatedBivariateDistribution, GridError>
    where
        I: Fn(f64) -> Vec<f64> + Sync,
        F: Fn(f64, f64) -> f64 + Sync,
    {
        let grid = self.generate_and_evaluate(primary_seed, initializer, function)?;

        let distributions = grid
            .secondary_grids
            .iter()
            .zip(&grid.evaluated_function)
            .map(|(ys, zs)| TabularDistribution::new(ys, zs))
            .collect::<Result<Vec<_>, _>>()?;

        let primary_grid = PrimaryGrid::new(grid.primary_grid, distributions)?;
        Ok(InterpolatedBivariateDistribution::new(
            primary_grid,
            sampling_policy,
            self.interpolation,
            evaluation_config,
        )?)
    }

    /// Merge the critical primary values inside the seed range into a
    /// validated seed.
    fn add_critical_values(&self, primary_seed: &[f64]) -> Vec<f64> {
        let first = primary_seed[0];
        let last = primary_seed[primary_seed.len() - 1];

        let mut seed = primary_seed.to_vec();
        seed.extend(
            self.critical_primary_values
                .iter()
                .copied()
                .filter(|&x| x > first && x < last),
        );
        seed.sort_by(f64::total_cmp);
        seed.dedup();

        if self.config.verbose && seed.len() > primary_seed.len() {
            debug!(
                added = seed.len() - primary_seed.len(),
                "added critical primary values to seed"
            );
        }
        seed
    }

    /// Refine one seed interval.
    ///
    /// Returns every accepted primary point of `[x0, x1)` with its slice.
    fn refine_interval<I, F>(
        &self,
        lower: (f64, EvaluatedGrid),
        upper: (f64, EvaluatedGrid),
        initializer: &I,
        function: &F,
    ) -> Result<Vec<(f64, EvaluatedGrid)>, GridError>
    where
        I: Fn(f64) -> Vec<f64>,
        F: Fn(f64, f64) -> f64,
    {
        let mut accepted = Vec::new();
        let (mut x0, mut slice0) = lower;
        let mut pending = vec![upper];

        while let Some((x1, slice1)) = pending.pop() {
            match self.check_interval(x0, &slice0, x1, &slice1, initializer, function)? {
                Some(midpoint) => {
                    pending.push((x1, slice1));
                    pending.push(midpoint);
                }
                None => {
                    accepted.push((x0, slice0));
                    x0 = x1;
                    slice0 = slice1;
                }
            }
        }

        Ok(accepted)
    }

    /// Test the interval `[x0, x1]`.
    ///
    /// Returns the midpoint and its slice if the interval must be split.
    fn check_interval<I, F>(
        &self,
        x0: f64,
        slice0: &EvaluatedGrid,
        x1: f64,
        slice1: &EvaluatedGrid,
        initializer: &I,
        function: &F,
    ) -> Result<Option<(f64, EvaluatedGrid)>, GridError>
    where
        I: Fn(f64) -> Vec<f64>,
        F: Fn(f64, f64) -> f64,
    {
        if let Some(dirty) = self.policy.check_primary_distance(x0, x1) {
            report_dirty(self.config.dirty_convergence, dirty, "2d")?;
            return Ok(None);
        }

        let primary = self.interpolation.primary();
        let x_mid = primary.recover(0.5 * (primary.process(x0) + primary.process(x1)));
        if !(x_mid > x0 && x_mid < x1) {
            let dirty = DirtyConvergence::DistanceTolerance {
                lower: x0,
                upper: x1,
                relative_distance: relative_error(x0, x1),
            };
            report_dirty(self.config.dirty_convergence, dirty, "2d")?;
            return Ok(None);
        }

        let mid = self.generate_secondary(x_mid, initializer, function)?;
        let estimator = match self.estimator {
            TwoDEstimator::UnitBase => SliceEstimator::UnitBase(UnitBaseEstimator::new(
                self.interpolation,
                x0,
                slice0,
                x1,
                slice1,
                x_mid,
            )),
            TwoDEstimator::Correlated => SliceEstimator::Correlated(CorrelatedEstimator::new(
                self.interpolation,
                x0,
                slice0,
                x1,
                slice1,
                x_mid,
            )?),
        };
        let secondary = self.interpolation.secondary();

        for i in 0..mid.len() {
            let y = mid.grid[i];
            if !self.check_point(x0, x1, x_mid, y, mid.values[i], &estimator)? {
                return Ok(Some((x_mid, mid)));
            }

            if let Some(&y_next) = mid.grid.get(i + 1) {
                let y_mid =
                    secondary.recover(0.5 * (secondary.process(y) + secondary.process(y_next)));
                let exact = function(x_mid, y_mid);
                if !self.check_point(x0, x1, x_mid, y_mid, exact, &estimator)? {
                    return Ok(Some((x_mid, mid)));
                }
            }
        }

        Ok(None)
    }

    /// Compare the exact value at `(x_mid, y)` with its estimate.
    fn check_point(
        &self,
        x0: f64,
        x1: f64,
        x_mid: f64,
        y: f64,
        exact: f64,
        estimator: &SliceEstimator<'_>,
    ) -> Result<bool, GridError> {
        let estimate = estimator.estimate(y)?;
        let status = self.policy.check_secondary_point(x0, x1, y, exact, estimate);

        if self.config.verbose {
            debug!(
                x = x_mid,
                y,
                exact,
                estimate,
                lower = x0,
                upper = x1,
                passed = status.is_accepted(),
                "secondary convergence check"
            );
        }

        match status {
            ConvergenceStatus::NotConverged => Ok(false),
            ConvergenceStatus::Dirty(dirty) => {
                report_dirty(self.config.dirty_convergence, dirty, "2d")?;
                Ok(true)
            }
            ConvergenceStatus::Converged => Ok(true),
        }
    }

    fn log_added_point(&self, x: f64, index: usize) {
        if self.config.verbose {
            debug!(x, index, "added primary grid point");
        }
    }
}

enum SliceEstimator<'a> {
    UnitBase(UnitBaseEstimator<'a>),
    Correlated(CorrelatedEstimator<'a>),
}

impl SliceEstimator<'_> {
    fn estimate(&self, y: f64) -> Result<f64, GridError> {
        match self {
            SliceEstimator::UnitBase(estimator) => Ok(estimator.estimate(y)),
            SliceEstimator::Correlated(estimator) => estimator.estimate(y),
        }
    }
}

/// Position of `x` in `[x0, x1]` in processed primary space.
fn primary_ratio(interpolation: TwoDInterpolationType, x0: f64, x1: f64, x: f64) -> f64 {
    let primary = interpolation.primary();
    (primary.process(x) - primary.process(x0)) / (primary.process(x1) - primary.process(x0))
}

/// Unit-base interpolation between the secondary grids at `x0` and `x1`,
/// evaluated at an intermediate primary value.
struct UnitBaseEstimator<'a> {
    interpolation: TwoDInterpolationType,
    beta: f64,
    lower: &'a EvaluatedGrid,
    upper: &'a EvaluatedGrid,
    lower_length: f64,
    upper_length: f64,
    intermediate_min: f64,
    intermediate_length: f64,
}

impl<'a> UnitBaseEstimator<'a> {
    fn new(
        interpolation: TwoDInterpolationType,
        x0: f64,
        lower: &'a EvaluatedGrid,
        x1: f64,
        upper: &'a EvaluatedGrid,
        x: f64,
    ) -> Self {
        let secondary = interpolation.secondary();
        let yx = interpolation.yx();
        let beta = primary_ratio(interpolation, x0, x1, x);

        let (lower_min, lower_max) = limits(lower);
        let (upper_min, upper_max) = limits(upper);
        let intermediate_min = yx.interpolate_with_ratio(beta, lower_min, upper_min);
        let intermediate_max = yx.interpolate_with_ratio(beta, lower_max, upper_max);

        Self {
            interpolation,
            beta,
            lower,
            upper,
            lower_length: grid_length(secondary, lower_min, lower_max),
            upper_length: grid_length(secondary, upper_min, upper_max),
            intermediate_min,
            intermediate_length: grid_length(secondary, intermediate_min, intermediate_max),
        }
    }

    fn estimate(&self, y: f64) -> f64 {
        let secondary = self.interpolation.secondary();
        let eta = unit_base_indep_var(
            secondary,
            y,
            self.intermediate_min,
            self.intermediate_length,
            UNIT_BASE_TOLERANCE,
        );

        let (lower_min, _) = limits(self.lower);
        let (upper_min, _) = limits(self.upper);
        let y0 = indep_var(secondary, eta, lower_min, self.lower_length, UNIT_BASE_TOLERANCE);
        let y1 = indep_var(secondary, eta, upper_min, self.upper_length, UNIT_BASE_TOLERANCE);

        let zy = self.interpolation.zy();
        let z0 = evaluate_on_grid(zy, self.lower, y0);
        let z1 = evaluate_on_grid(zy, self.upper, y1);

        self.interpolation
            .dependent()
            .interpolate_with_ratio_or_linear(self.beta, z0, z1)
    }
}

/// Correlated interpolation between the secondary grids at `x0` and `x1`.
///
/// A secondary value `y` is matched to the pair `(y0, y1)` of equal
/// cumulative probability whose interpolation reproduces `y`; the estimate
/// interpolates the tabulated values at `y0` and `y1`.
struct CorrelatedEstimator<'a> {
    interpolation: TwoDInterpolationType,
    beta: f64,
    lower: &'a EvaluatedGrid,
    upper: &'a EvaluatedGrid,
    lower_distribution: TabularDistribution,
    upper_distribution: TabularDistribution,
    intermediate_min: f64,
    intermediate_max: f64,
    bisector: CdfBisector,
}

impl<'a> CorrelatedEstimator<'a> {
    fn new(
        interpolation: TwoDInterpolationType,
        x0: f64,
        lower: &'a EvaluatedGrid,
        x1: f64,
        upper: &'a EvaluatedGrid,
        x: f64,
    ) -> Result<Self, GridError> {
        let beta = primary_ratio(interpolation, x0, x1, x);
        let yx = interpolation.yx();

        let (lower_min, lower_max) = limits(lower);
        let (upper_min, upper_max) = limits(upper);

        Ok(Self {
            interpolation,
            beta,
            lower,
            upper,
            lower_distribution: TabularDistribution::new(&lower.grid, &lower.values)?,
            upper_distribution: TabularDistribution::new(&upper.grid, &upper.values)?,
            intermediate_min: yx.interpolate_with_ratio(beta, lower_min, upper_min),
            intermediate_max: yx.interpolate_with_ratio(beta, lower_max, upper_max),
            bisector: CdfBisector::new(EvaluationConfig::default()),
        })
    }

    fn estimate(&self, y: f64) -> Result<f64, GridError> {
        let lower = &self.lower_distribution;
        let upper = &self.upper_distribution;

        let (y0, y1) = if y <= self.intermediate_min {
            (lower.lower_bound(), upper.lower_bound())
        } else if y >= self.intermediate_max {
            (lower.upper_bound(), upper.upper_bound())
        } else {
            let yx = self.interpolation.yx();
            let c0 = lower.evaluate_cdf(y);
            let c1 = upper.evaluate_cdf(y);
            let outcome = self.bisector.solve(y, c0.min(c1), c0.max(c1), |cdf| {
                let lower_value = lower.sample_with_random_number(cdf);
                let upper_value = upper.sample_with_random_number(cdf);
                MatchedPoints {
                    lower_value,
                    upper_value,
                    estimate: yx.interpolate_with_ratio(self.beta, lower_value, upper_value),
                }
            })?;
            (outcome.lower_value, outcome.upper_value)
        };

        let zy = self.interpolation.zy();
        let z0 = evaluate_on_grid(zy, self.lower, y0);
        let z1 = evaluate_on_grid(zy, self.upper, y1);

        Ok(self
            .interpolation
            .dependent()
            .interpolate_with_ratio_or_linear(self.beta, z0, z1))
    }
}

fn limits(slice: &EvaluatedGrid) -> (f64, f64) {
    (
        slice.grid.first().copied().unwrap_or(f64::NAN),
        slice.grid.last().copied().unwrap_or(f64::NAN),
    )
}

/// Interpolate the tabulated slice at `y`, clamping to its end values.
fn evaluate_on_grid(interpolation: InterpolationType, slice: &EvaluatedGrid, y: f64) -> f64 {
    let n = slice.len();
    let upper = slice.grid.partition_point(|&g| g <= y);

    if upper == 0 {
        return slice.values[0];
    }
    if upper == n || slice.grid[upper - 1] == y {
        return slice.values[upper - 1];
    }

    let (y0, y1) = (slice.grid[upper - 1], slice.grid[upper]);
    let (z0, z1) = (slice.values[upper - 1], slice.values[upper]);
    let z = interpolation.interpolate(y0, y1, y, z0, z1);
    if z.is_finite() {
        z
    } else {
        InterpolationType::LinLin.interpolate(y0, y1, y, z0, z1)
    }
}

/// Map `op` over `0..count`, on the rayon pool when `parallel` is enabled.
#[cfg(feature = "parallel")]
fn map_indices<T, F>(count: usize, op: F) -> Result<Vec<T>, GridError>
where
    T: Send,
    F: Fn(usize) -> Result<T, GridError> + Sync + Send,
{
    use rayon::prelude::*;

    (0..count).into_par_iter().map(op).collect()
}

/// Sequential fallback when the parallel feature is disabled.
#[cfg(not(feature = "parallel"))]
fn map_indices<T, F>(count: usize, op: F) -> Result<Vec<T>, GridError>
where
    F: Fn(usize) -> Result<T, GridError>,
{
    (0..count).map(op).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DirtyConvergencePolicy;
    use approx::assert_relative_eq;

    fn unit_seed(_: f64) -> Vec<f64> {
        vec![0.0, 1.0]
    }

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GridGeneratorConfig::default().with_distance_tolerance(2.0);
        assert!(TwoDGridGenerator::new(TwoDInterpolationType::LinLinLin, config).is_err());
    }

    #[test]
    fn test_secondary_generator_uses_zy_interpolation() {
        let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LogLogLin);
        assert_eq!(
            generator.secondary_generator().interpolation(),
            InterpolationType::LogLog
        );
        assert_eq!(generator.interpolation(), TwoDInterpolationType::LogLogLin);
        assert_eq!(generator.config().convergence_tolerance, 1e-3);
    }

    #[test]
    fn test_primary_seed_validation() {
        let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin);
        let err = generator
            .generate(&[1.0], unit_seed, |x, y| x + y)
            .unwrap_err();
        assert_eq!(err, GridError::insufficient_data(2, 1));

        let err = generator
            .generate(&[2.0, 1.0], unit_seed, |x, y| x + y)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_bad_secondary_seed_propagates() {
        let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin);
        let err = generator
            .generate(&[0.0, 1.0], |_| vec![1.0], |x, y| x + y)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    // ========================================
    // Unit-Base Estimate Tests
    // ========================================

    #[test]
    fn test_unit_base_estimate_on_shifted_grids() {
        let lower = EvaluatedGrid {
            grid: vec![0.0, 1.0],
            values: vec![0.0, 1.0],
        };
        let upper = EvaluatedGrid {
            grid: vec![2.0, 4.0],
            values: vec![2.0, 4.0],
        };
        let estimator =
            UnitBaseEstimator::new(TwoDInterpolationType::LinLinLin, 0.0, &lower, 2.0, &upper, 1.0);

        // Intermediate domain is [1, 2.5]; eta = 0.5 maps to 0.5 and 3.0
        assert_relative_eq!(estimator.estimate(1.75), 1.75, max_relative = 1e-14);
        assert_relative_eq!(estimator.estimate(1.0), 1.0, max_relative = 1e-14);
        assert_relative_eq!(estimator.estimate(2.5), 2.5, max_relative = 1e-14);
    }

    #[test]
    fn test_correlated_estimate_on_uniform_slices() {
        let lower = EvaluatedGrid {
            grid: vec![0.0, 1.0],
            values: vec![1.0, 1.0],
        };
        let upper = EvaluatedGrid {
            grid: vec![2.0, 4.0],
            values: vec![0.5, 0.5],
        };
        let estimator = CorrelatedEstimator::new(
            TwoDInterpolationType::LinLinLin,
            0.0,
            &lower,
            2.0,
            &upper,
            1.0,
        )
        .unwrap();

        // Matched pairs (c, 2 + 2c) interpolate to 1 + 1.5c with value 0.75
        for y in [1.0, 1.3, 1.75, 2.5] {
            assert_relative_eq!(estimator.estimate(y).unwrap(), 0.75, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_correlated_estimate_matches_equal_cdf_points() {
        // Triangles on [0, 1] and [0, 2]; equal-cdf points are y0 = sqrt(c), y1 = 2 sqrt(c)
        let lower = EvaluatedGrid {
            grid: vec![0.0, 1.0],
            values: vec![0.0, 2.0],
        };
        let upper = EvaluatedGrid {
            grid: vec![0.0, 2.0],
            values: vec![0.0, 1.0],
        };
        let estimator = CorrelatedEstimator::new(
            TwoDInterpolationType::LinLinLin,
            0.0,
            &lower,
            1.0,
            &upper,
            0.5,
        )
        .unwrap();

        // y = 1.5 sqrt(c) = 0.75 gives y0 = 0.5, y1 = 1.0 and values 1.0, 0.5
        assert_relative_eq!(estimator.estimate(0.75).unwrap(), 0.75, max_relative = 1e-6);
    }

    #[test]
    fn test_correlated_estimate_rejects_negative_slice() {
        let lower = EvaluatedGrid {
            grid: vec![0.0, 1.0],
            values: vec![-1.0, 1.0],
        };
        let upper = lower.clone();
        let result = CorrelatedEstimator::new(
            TwoDInterpolationType::LinLinLin,
            0.0,
            &lower,
            1.0,
            &upper,
            0.5,
        );
        assert!(matches!(result, Err(GridError::Distribution(_))));
    }

    #[test]
    fn test_evaluate_on_grid_clamps() {
        let slice = EvaluatedGrid {
            grid: vec![1.0, 2.0, 4.0],
            values: vec![10.0, 20.0, 40.0],
        };
        assert_eq!(evaluate_on_grid(InterpolationType::LinLin, &slice, 0.5), 10.0);
        assert_eq!(evaluate_on_grid(InterpolationType::LinLin, &slice, 2.0), 20.0);
        assert_eq!(evaluate_on_grid(InterpolationType::LinLin, &slice, 3.0), 30.0);
        assert_eq!(evaluate_on_grid(InterpolationType::LinLin, &slice, 5.0), 40.0);
    }

    // ========================================
    // Generation Tests
    // ========================================

    #[test]
    fn test_bilinear_function_not_refined() {
        let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin);
        let grid = generator
            .generate_and_evaluate(&[0.0, 10.0], unit_seed, |x, y| x + y)
            .unwrap();
        assert_eq!(grid.primary_grid, vec![0.0, 10.0]);
        assert_eq!(grid.len(), 2);
        let (ys, zs) = grid.slice(1).unwrap();
        assert_eq!(ys, &[0.0, 1.0]);
        assert_eq!(zs, &[10.0, 11.0]);
        assert!(grid.slice(2).is_none());
    }

    #[test]
    fn test_nonlinear_primary_dependence_refined() {
        let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin);
        let grid = generator
            .generate_and_evaluate(&[0.0, 1.0, 2.0], unit_seed, |x, y| (x * x + 1.0) * (1.0 + y))
            .unwrap();

        assert!(grid.len() > 3);
        assert!(grid.primary_grid.windows(2).all(|w| w[0] < w[1]));
        for seed in [0.0, 1.0, 2.0] {
            assert!(grid.primary_grid.contains(&seed));
        }
        assert_eq!(grid.secondary_grids.len(), grid.len());
        assert_eq!(grid.evaluated_function.len(), grid.len());
    }

    #[test]
    fn test_secondary_grids_follow_slices() {
        let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin);
        let slice = generator
            .generate_secondary(2.0, |_| vec![0.0, 10.0], |x, y| x * y * y)
            .unwrap();
        let expected = GridGenerator::with_defaults(InterpolationType::LinLin)
            .generate(&[0.0, 10.0], |y| 2.0 * y * y)
            .unwrap();
        assert_eq!(slice.grid, expected);
    }

    #[test]
    fn test_critical_values_added_to_seed() {
        let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin)
            .with_critical_primary_values([0.25, 1.0, 5.0, -1.0])
            .unwrap();
        assert_eq!(generator.critical_primary_values(), &[0.25, 1.0, 5.0, -1.0]);

        let grid = generator
            .generate(&[0.0, 1.0], unit_seed, |x, y| x + y)
            .unwrap();
        assert_eq!(grid, vec![0.0, 0.25, 1.0]);
    }

    #[test]
    fn test_critical_values_validated_against_primary_processing() {
        let err = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLog)
            .with_critical_primary_values([2.0, 0.0])
            .unwrap_err();
        assert!(err.is_invalid_argument());

        let err = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin)
            .with_critical_primary_values([f64::NAN])
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_correlated_estimator_generation() {
        let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin)
            .with_estimator(TwoDEstimator::Correlated);
        assert_eq!(generator.estimator(), TwoDEstimator::Correlated);

        // Uniform slices on [0, x] pair exactly under correlated matching
        let grid = generator
            .generate(&[1.0, 4.0], |x| vec![0.0, x], |_, _| 1.0)
            .unwrap();
        assert_eq!(grid, vec![1.0, 4.0]);

        let grid = generator
            .generate_and_evaluate(&[0.5, 2.0], |_| vec![0.0, 5.0], |x, y| x * (-x * y).exp())
            .unwrap();
        assert!(grid.len() > 2);
        assert!(grid.primary_grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_correlated_estimator_rejects_negative_slices() {
        let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin)
            .with_estimator(TwoDEstimator::Correlated);
        let err = generator
            .generate(&[0.0, 1.0], unit_seed, |x, y| x * x + y - 0.5)
            .unwrap_err();
        assert!(matches!(err, GridError::Distribution(_)));
    }

    #[test]
    fn test_primary_discontinuity_throws_under_throw_policy() {
        let config = GridGeneratorConfig::default()
            .with_dirty_convergence(DirtyConvergencePolicy::Throw);
        let generator = TwoDGridGenerator::new(TwoDInterpolationType::LinLinLin, config).unwrap();
        let err = generator
            .generate(&[0.0, 2.0], unit_seed, |x, y| if x < 1.0 { 1.0 + y } else { 2.0 + y })
            .unwrap_err();
        assert!(err.is_dirty_convergence());
    }

    #[test]
    fn test_generate_distribution() {
        let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin);
        let dist = generator
            .generate_distribution(
                &[1.0, 4.0],
                |x| vec![0.0, x],
                |x, y| 2.0 * (x - y) / (x * x),
                SamplingPolicy::UnitBaseCorrelated,
                EvaluationConfig::default(),
            )
            .unwrap();

        assert_eq!(dist.primary_lower_bound(), 1.0);
        assert_eq!(dist.primary_upper_bound(), 4.0);
        let y = dist
            .sample_secondary_conditional_with_random_number(2.5, 0.5)
            .unwrap();
        let p = dist.evaluate_secondary_conditional_cdf(2.5, y).unwrap();
        assert!((p - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_generate_distribution_rejects_negative_values() {
        let generator = TwoDGridGenerator::with_defaults(TwoDInterpolationType::LinLinLin);
        let err = generator
            .generate_distribution(
                &[1.0, 2.0],
                unit_seed,
                |_, y| y - 0.5,
                SamplingPolicy::Correlated,
                EvaluationConfig::default(),
            )
            .unwrap_err();
        assert!(matches!(err, GridError::Distribution(_)));
    }
}
