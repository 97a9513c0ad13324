//! Grid generator configuration.
//!
//! Tolerances and the dirty-convergence policy are fixed when a generator is
//! constructed and shared by the 1-D and 2-D generators.

use crate::error::GridError;

/// Reaction to an interval that is accepted before its error tolerance is met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DirtyConvergencePolicy {
    /// Accept the interval and emit a `tracing` warning (default).
    #[default]
    Warn,
    /// Abort generation with [`GridError::DirtyConvergence`].
    Throw,
}

impl DirtyConvergencePolicy {
    /// Returns true if dirty convergence aborts generation.
    #[inline]
    pub fn is_throw(self) -> bool {
        matches!(self, DirtyConvergencePolicy::Throw)
    }
}

/// Configuration for adaptive grid generation.
///
/// # Examples
///
/// ```
/// use tabulate_grid::{DirtyConvergencePolicy, GridGeneratorConfig};
///
/// let config = GridGeneratorConfig::default();
/// assert_eq!(config.convergence_tolerance, 1e-3);
/// assert_eq!(config.dirty_convergence, DirtyConvergencePolicy::Warn);
///
/// let config = GridGeneratorConfig::builder()
///     .convergence_tolerance(1e-5)
///     .dirty_convergence(DirtyConvergencePolicy::Throw)
///     .build()
///     .unwrap();
/// assert!(config.dirty_convergence.is_throw());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridGeneratorConfig {
    /// Relative error between the interpolated and exact midpoint value
    /// below which an interval is accepted.
    ///
    /// Default: 1e-3
    pub convergence_tolerance: f64,

    /// Absolute difference below which a midpoint that fails the relative
    /// test is accepted as dirty.
    ///
    /// Default: 1e-12
    pub absolute_difference_tolerance: f64,

    /// Relative distance between interval endpoints below which refinement
    /// stops.
    ///
    /// Default: 1e-14
    pub distance_tolerance: f64,

    /// Reaction to dirty convergence.
    ///
    /// Default: Warn
    pub dirty_convergence: DirtyConvergencePolicy,

    /// Log every added primary point and every secondary check at debug
    /// level (2-D generator only).
    ///
    /// Default: false
    pub verbose: bool,
}

impl Default for GridGeneratorConfig {
    fn default() -> Self {
        Self {
            convergence_tolerance: 1e-3,
            absolute_difference_tolerance: 1e-12,
            distance_tolerance: 1e-14,
            dirty_convergence: DirtyConvergencePolicy::Warn,
            verbose: false,
        }
    }
}

impl GridGeneratorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder for fluent construction.
    pub fn builder() -> GridGeneratorConfigBuilder {
        GridGeneratorConfigBuilder::new()
    }

    /// Create a high-precision configuration.
    ///
    /// Uses a 1e-6 convergence tolerance and a 1e-16 distance floor.
    pub fn high_precision() -> Self {
        Self {
            convergence_tolerance: 1e-6,
            absolute_difference_tolerance: 1e-15,
            distance_tolerance: 1e-16,
            ..Self::default()
        }
    }

    /// Create a coarse configuration for quick previews.
    ///
    /// Uses a 1e-2 convergence tolerance and a 1e-10 distance floor.
    pub fn fast() -> Self {
        Self {
            convergence_tolerance: 1e-2,
            absolute_difference_tolerance: 1e-10,
            distance_tolerance: 1e-10,
            ..Self::default()
        }
    }

    /// Set the convergence tolerance.
    pub fn with_convergence_tolerance(mut self, tolerance: f64) -> Self {
        self.convergence_tolerance = tolerance;
        self
    }

    /// Set the absolute difference tolerance.
    pub fn with_absolute_difference_tolerance(mut self, tolerance: f64) -> Self {
        self.absolute_difference_tolerance = tolerance;
        self
    }

    /// Set the distance tolerance.
    pub fn with_distance_tolerance(mut self, tolerance: f64) -> Self {
        self.distance_tolerance = tolerance;
        self
    }

    /// Set the dirty-convergence policy.
    pub fn with_dirty_convergence(mut self, policy: DirtyConvergencePolicy) -> Self {
        self.dirty_convergence = policy;
        self
    }

    /// Enable or disable verbose logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check that every tolerance is usable.
    ///
    /// The convergence tolerance must lie in `(0, 1)`, the relative distance
    /// tolerance in `[0, 1)` and the absolute difference tolerance in `[0, 1]`.
    pub fn validate(&self) -> Result<(), GridError> {
        if !(self.convergence_tolerance > 0.0 && self.convergence_tolerance < 1.0) {
            return Err(GridError::invalid_argument(format!(
                "convergence tolerance must be in (0, 1): got {}",
                self.convergence_tolerance
            )));
        }

        if !(0.0..1.0).contains(&self.distance_tolerance) {
            return Err(GridError::invalid_argument(format!(
                "distance tolerance must be in [0, 1): got {}",
                self.distance_tolerance
            )));
        }

        if !(0.0..=1.0).contains(&self.absolute_difference_tolerance) {
            return Err(GridError::invalid_argument(format!(
                "absolute difference tolerance must be in [0, 1]: got {}",
                self.absolute_difference_tolerance
            )));
        }

        Ok(())
    }

    /// Parse a configuration from a TOML table.
    ///
    /// Missing keys take their default values. The result is validated.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulate_grid::{DirtyConvergencePolicy, GridGeneratorConfig};
    ///
    /// let config = GridGeneratorConfig::from_toml_str(
    ///     r#"
    ///     convergence_tolerance = 1e-4
    ///     dirty_convergence = "throw"
    ///     "#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.convergence_tolerance, 1e-4);
    /// assert_eq!(config.distance_tolerance, 1e-14);
    /// assert_eq!(config.dirty_convergence, DirtyConvergencePolicy::Throw);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(source: &str) -> Result<Self, GridError> {
        let config: Self = toml::from_str(source).map_err(|e| {
            GridError::invalid_argument(format!("malformed generator config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder for `GridGeneratorConfig`.
#[derive(Debug, Clone, Default)]
pub struct GridGeneratorConfigBuilder {
    config: GridGeneratorConfig,
}

impl GridGeneratorConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the convergence tolerance.
    pub fn convergence_tolerance(mut self, tolerance: f64) -> Self {
        self.config.convergence_tolerance = tolerance;
        self
    }

    /// Set the absolute difference tolerance.
    pub fn absolute_difference_tolerance(mut self, tolerance: f64) -> Self {
        self.config.absolute_difference_tolerance = tolerance;
        self
    }

    /// Set the distance tolerance.
    pub fn distance_tolerance(mut self, tolerance: f64) -> Self {
        self.config.distance_tolerance = tolerance;
        self
    }

    /// Set the dirty-convergence policy.
    pub fn dirty_convergence(mut self, policy: DirtyConvergencePolicy) -> Self {
        self.config.dirty_convergence = policy;
        self
    }

    /// Enable or disable verbose logging.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<GridGeneratorConfig, GridError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GridGeneratorConfig::default();
        assert_eq!(config.convergence_tolerance, 1e-3);
        assert_eq!(config.absolute_difference_tolerance, 1e-12);
        assert_eq!(config.distance_tolerance, 1e-14);
        assert_eq!(config.dirty_convergence, DirtyConvergencePolicy::Warn);
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        let precise = GridGeneratorConfig::high_precision();
        let fast = GridGeneratorConfig::fast();
        assert!(precise.validate().is_ok());
        assert!(fast.validate().is_ok());
        assert!(precise.convergence_tolerance < fast.convergence_tolerance);
    }

    #[test]
    fn test_with_setters() {
        let config = GridGeneratorConfig::new()
            .with_convergence_tolerance(1e-4)
            .with_absolute_difference_tolerance(0.0)
            .with_distance_tolerance(1e-16)
            .with_dirty_convergence(DirtyConvergencePolicy::Throw)
            .with_verbose(true);
        assert_eq!(config.convergence_tolerance, 1e-4);
        assert_eq!(config.absolute_difference_tolerance, 0.0);
        assert_eq!(config.distance_tolerance, 1e-16);
        assert!(config.dirty_convergence.is_throw());
        assert!(config.verbose);
    }

    #[test]
    fn test_convergence_tolerance_bounds() {
        assert!(GridGeneratorConfig::builder()
            .convergence_tolerance(0.0)
            .build()
            .unwrap_err()
            .is_invalid_argument());
        assert!(GridGeneratorConfig::builder()
            .convergence_tolerance(1.5)
            .build()
            .is_err());
        assert!(GridGeneratorConfig::builder()
            .convergence_tolerance(1.0)
            .build()
            .unwrap_err()
            .is_invalid_argument());
        assert!(GridGeneratorConfig::builder()
            .convergence_tolerance(0.999)
            .build()
            .is_ok());
    }

    #[test]
    fn test_relative_distance_tolerance_below_one() {
        assert!(GridGeneratorConfig::builder()
            .distance_tolerance(1.0)
            .build()
            .is_err());
        assert!(GridGeneratorConfig::builder()
            .distance_tolerance(0.0)
            .build()
            .is_ok());
    }

    #[test]
    fn test_negative_tolerances_rejected() {
        assert!(GridGeneratorConfig::builder()
            .absolute_difference_tolerance(-1e-12)
            .build()
            .is_err());
        assert!(GridGeneratorConfig::builder()
            .distance_tolerance(-1.0)
            .build()
            .is_err());
        assert!(GridGeneratorConfig::builder()
            .distance_tolerance(f64::NAN)
            .build()
            .is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_toml_str_rejects_invalid_values() {
        let err = GridGeneratorConfig::from_toml_str("convergence_tolerance = 2.0").unwrap_err();
        assert!(err.is_invalid_argument());

        let err = GridGeneratorConfig::from_toml_str("verbose = \"loud\"").unwrap_err();
        assert!(err.to_string().contains("malformed generator config"));
    }
}
