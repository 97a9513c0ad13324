//! Scalar adaptive grid generator.
//!
//! Starting from a seed grid, every interval `[x0, x1]` is tested at its
//! processed midpoint `x_m = p⁻¹((p(x0) + p(x1)) / 2)`: the exact value
//! `f(x_m)` is compared with the value interpolated from `(x0, f(x0))` and
//! `(x1, f(x1))`. Failing intervals are split at `x_m` and retested
//! left-to-right, so the output is produced in ascending order.

use super::{report_dirty, validate_seed};
use crate::config::GridGeneratorConfig;
use crate::convergence::{ConvergencePolicy, ConvergenceStatus};
use crate::error::GridError;
use crate::sequence::GridSequence;
use tabulate_core::math::{InterpolationType, Processing};

/// A generated grid together with the function values at its points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluatedGrid {
    /// Ascending grid points
    pub grid: Vec<f64>,
    /// Function value at each grid point
    pub values: Vec<f64>,
}

impl EvaluatedGrid {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Returns true if the grid has no points.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// First grid point.
    pub fn lower_limit(&self) -> Option<f64> {
        self.grid.first().copied()
    }

    /// Last grid point.
    pub fn upper_limit(&self) -> Option<f64> {
        self.grid.last().copied()
    }

    fn push(&mut self, x: f64, y: f64) {
        self.grid.push(x);
        self.values.push(y);
    }
}

/// Adaptive grid generator for a scalar function.
///
/// # Examples
///
/// ```
/// use tabulate_core::math::InterpolationType;
/// use tabulate_grid::{GridGenerator, GridGeneratorConfig};
///
/// let generator = GridGenerator::new(
///     InterpolationType::LinLin,
///     GridGeneratorConfig::default().with_absolute_difference_tolerance(1e-12),
/// )
/// .unwrap();
///
/// // A straight line needs no refinement
/// let grid = generator.generate(&[0.0, 10.0], |x| x + x).unwrap();
/// assert_eq!(grid, vec![0.0, 10.0]);
///
/// // x^2 is refined until every midpoint is within 0.1%
/// let grid = generator.generate(&[0.0, 10.0], |x| x * x).unwrap();
/// assert_eq!(grid.len(), 321);
/// ```
#[derive(Debug, Clone)]
pub struct GridGenerator {
    interpolation: InterpolationType,
    config: GridGeneratorConfig,
    policy: ConvergencePolicy,
}

impl GridGenerator {
    /// Create a generator after validating the configuration.
    pub fn new(
        interpolation: InterpolationType,
        config: GridGeneratorConfig,
    ) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self {
            interpolation,
            policy: ConvergencePolicy::from_config(&config),
            config,
        })
    }

    /// Create a generator with the default configuration.
    pub fn with_defaults(interpolation: InterpolationType) -> Self {
        let config = GridGeneratorConfig::default();
        Self {
            interpolation,
            policy: ConvergencePolicy::from_config(&config),
            config,
        }
    }

    /// Interpolation used to estimate midpoint values.
    pub fn interpolation(&self) -> InterpolationType {
        self.interpolation
    }

    /// Get the configuration.
    pub fn config(&self) -> &GridGeneratorConfig {
        &self.config
    }

    /// Tolerances applied to each interval.
    pub fn convergence_policy(&self) -> &ConvergencePolicy {
        &self.policy
    }

    /// Generate a grid from `seed`.
    ///
    /// Seed points are always kept; seed points just below and above a
    /// discontinuity avoid refining into it.
    pub fn generate<F>(&self, seed: &[f64], function: F) -> Result<Vec<f64>, GridError>
    where
        F: FnMut(f64) -> f64,
    {
        Ok(self.generate_and_evaluate(seed, function)?.grid)
    }

    /// Generate a grid from `seed` and return the function values with it.
    pub fn generate_and_evaluate<F>(
        &self,
        seed: &[f64],
        function: F,
    ) -> Result<EvaluatedGrid, GridError>
    where
        F: FnMut(f64) -> f64,
    {
        self.validate_grid(seed)?;
        self.refine_validated(seed, function, seed[0], seed[seed.len() - 1])
    }

    /// Replace the seed points held in `grid` by the generated grid.
    pub fn generate_in_place<C, F>(&self, grid: &mut C, function: F) -> Result<(), GridError>
    where
        C: GridSequence,
        F: FnMut(f64) -> f64,
    {
        let generated = self.generate_and_evaluate(&grid.to_points(), function)?;
        grid.replace_points(generated.grid);
        Ok(())
    }

    /// Replace the seed points held in `grid` by the generated grid and
    /// store the function values in `values`.
    pub fn generate_and_evaluate_in_place<C, V, F>(
        &self,
        grid: &mut C,
        values: &mut V,
        function: F,
    ) -> Result<(), GridError>
    where
        C: GridSequence,
        V: GridSequence,
        F: FnMut(f64) -> f64,
    {
        let generated = self.generate_and_evaluate(&grid.to_points(), function)?;
        grid.replace_points(generated.grid);
        values.replace_points(generated.values);
        Ok(())
    }

    /// Refine an existing grid, inserting points only inside `[min, max]`.
    ///
    /// `min` and `max` are clamped to the grid limits and added to the grid
    /// if absent. Points outside the range are kept unchanged.
    pub fn refine<F>(
        &self,
        grid: &[f64],
        function: F,
        min: f64,
        max: f64,
    ) -> Result<Vec<f64>, GridError>
    where
        F: FnMut(f64) -> f64,
    {
        Ok(self.refine_and_evaluate(grid, function, min, max)?.grid)
    }

    /// Refine an existing grid inside `[min, max]` and return the function
    /// values with it.
    pub fn refine_and_evaluate<F>(
        &self,
        grid: &[f64],
        function: F,
        min: f64,
        max: f64,
    ) -> Result<EvaluatedGrid, GridError>
    where
        F: FnMut(f64) -> f64,
    {
        self.validate_grid(grid)?;
        if min.is_nan() || max.is_nan() {
            return Err(GridError::invalid_argument("refinement range is NaN"));
        }

        let min = min.max(grid[0]);
        let max = max.min(grid[grid.len() - 1]);
        if min >= max {
            return Err(GridError::invalid_argument(format!(
                "refinement range [{}, {}] is empty on the grid",
                min, max
            )));
        }

        self.refine_validated(grid, function, min, max)
    }

    /// Refine the grid held in `grid` inside `[min, max]`.
    pub fn refine_in_place<C, F>(
        &self,
        grid: &mut C,
        function: F,
        min: f64,
        max: f64,
    ) -> Result<(), GridError>
    where
        C: GridSequence,
        F: FnMut(f64) -> f64,
    {
        let refined = self.refine_and_evaluate(&grid.to_points(), function, min, max)?;
        grid.replace_points(refined.grid);
        Ok(())
    }

    /// Refine the grid held in `grid` inside `[min, max]` and store the
    /// function values in `values`.
    pub fn refine_and_evaluate_in_place<C, V, F>(
        &self,
        grid: &mut C,
        values: &mut V,
        function: F,
        min: f64,
        max: f64,
    ) -> Result<(), GridError>
    where
        C: GridSequence,
        V: GridSequence,
        F: FnMut(f64) -> f64,
    {
        let refined = self.refine_and_evaluate(&grid.to_points(), function, min, max)?;
        grid.replace_points(refined.grid);
        values.replace_points(refined.values);
        Ok(())
    }

    fn validate_grid(&self, grid: &[f64]) -> Result<(), GridError> {
        validate_seed(grid, |x| self.interpolation.is_indep_valid(x))
    }

    /// Core refinement over a validated grid and a range inside its limits.
    fn refine_validated<F>(
        &self,
        grid: &[f64],
        mut function: F,
        min: f64,
        max: f64,
    ) -> Result<EvaluatedGrid, GridError>
    where
        F: FnMut(f64) -> f64,
    {
        let dependent = self.interpolation.dep_processing();
        let mut output = EvaluatedGrid::default();

        for &x in grid.iter().take_while(|&&x| x < min) {
            output.push(x, evaluate(&mut function, x, None)?);
        }

        // Pending right endpoints, nearest last
        let mut pending = Vec::new();
        for &x in grid.iter().filter(|&&x| x > min && x <= max) {
            pending.push(x);
        }
        if pending.last() != Some(&max) {
            pending.push(max);
        }
        let mut pending = pending
            .into_iter()
            .rev()
            .map(|x| Ok((x, evaluate(&mut function, x, Some(dependent))?)))
            .collect::<Result<Vec<_>, GridError>>()?;

        let mut x0 = min;
        let mut y0 = evaluate(&mut function, x0, Some(dependent))?;

        while let Some(&(x1, y1)) = pending.last() {
            let x_mid = self.interpolation.midpoint(x0, x1);
            let y_exact = evaluate(&mut function, x_mid, Some(dependent))?;
            let y_estimate = self.interpolation.interpolate(x0, x1, x_mid, y0, y1);

            match self
                .policy
                .check_interval(x0, x_mid, x1, y_exact, y_estimate)
            {
                ConvergenceStatus::NotConverged => pending.push((x_mid, y_exact)),
                status => {
                    if let ConvergenceStatus::Dirty(dirty) = status {
                        report_dirty(self.config.dirty_convergence, dirty, "1d")?;
                    }
                    output.push(x0, y0);
                    x0 = x1;
                    y0 = y1;
                    pending.pop();
                }
            }
        }
        output.push(x0, y0);

        for &x in grid.iter().filter(|&&x| x > max) {
            output.push(x, evaluate(&mut function, x, None)?);
        }

        Ok(output)
    }
}

/// Evaluate the function and check the value is usable.
///
/// Points that take part in interpolation must also be valid for the
/// dependent processing.
fn evaluate<F>(function: &mut F, x: f64, dependent: Option<Processing>) -> Result<f64, GridError>
where
    F: FnMut(f64) -> f64,
{
    let y = function(x);
    let valid = match dependent {
        Some(processing) => processing.is_valid(y),
        None => y.is_finite(),
    };

    if valid {
        Ok(y)
    } else {
        Err(GridError::invalid_argument(format!(
            "function value {} at {} cannot be interpolated",
            y, x
        )))
    }
}
