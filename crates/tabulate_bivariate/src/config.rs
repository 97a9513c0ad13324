//! Evaluation and sampling configuration.
//!
//! Tolerances of the bisection CDF matcher and the fuzzy secondary bounds are
//! fixed when a bivariate distribution is constructed.

use tabulate_core::types::DistributionError;

/// Configuration for bivariate evaluation and sampling.
///
/// # Examples
///
/// ```
/// use tabulate_bivariate::EvaluationConfig;
///
/// let config = EvaluationConfig::default();
/// assert_eq!(config.max_iterations, 500);
///
/// let config = EvaluationConfig::builder()
///     .relative_error_tolerance(1e-10)
///     .max_iterations(1000)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_iterations, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvaluationConfig {
    /// Relative widening of the secondary bounds before a query is
    /// considered outside the conditional domain.
    ///
    /// Default: 1e-3
    pub fuzzy_boundary_tolerance: f64,

    /// Relative error at which the bisection CDF matcher stops.
    ///
    /// Default: 1e-7
    pub relative_error_tolerance: f64,

    /// Absolute error accepted when the iteration cap is reached, and the
    /// stopping tolerance for a target of exactly zero.
    ///
    /// Default: 1e-15
    pub error_tolerance: f64,

    /// Iteration cap of the bisection CDF matcher.
    ///
    /// Default: 500
    pub max_iterations: u32,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            fuzzy_boundary_tolerance: 1e-3,
            relative_error_tolerance: 1e-7,
            error_tolerance: 1e-15,
            max_iterations: 500,
        }
    }
}

impl EvaluationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder for fluent construction.
    pub fn builder() -> EvaluationConfigBuilder {
        EvaluationConfigBuilder::new()
    }

    /// Set the fuzzy boundary tolerance.
    pub fn with_fuzzy_boundary_tolerance(mut self, tolerance: f64) -> Self {
        self.fuzzy_boundary_tolerance = tolerance;
        self
    }

    /// Set the relative error tolerance.
    pub fn with_relative_error_tolerance(mut self, tolerance: f64) -> Self {
        self.relative_error_tolerance = tolerance;
        self
    }

    /// Set the absolute error tolerance.
    pub fn with_error_tolerance(mut self, tolerance: f64) -> Self {
        self.error_tolerance = tolerance;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check that every tolerance is usable.
    ///
    /// Tolerances must lie in `[0, 1)` and the iteration cap must be positive.
    pub fn validate(&self) -> Result<(), DistributionError> {
        let tolerances = [
            ("fuzzy boundary tolerance", self.fuzzy_boundary_tolerance),
            ("relative error tolerance", self.relative_error_tolerance),
            ("error tolerance", self.error_tolerance),
        ];

        for (name, value) in tolerances {
            if !(0.0..1.0).contains(&value) {
                return Err(DistributionError::invalid_argument(format!(
                    "{} must be in [0, 1): got {}",
                    name, value
                )));
            }
        }

        if self.max_iterations == 0 {
            return Err(DistributionError::invalid_argument(
                "max iterations must be positive",
            ));
        }

        Ok(())
    }
}

/// Builder for `EvaluationConfig`.
#[derive(Debug, Clone, Default)]
pub struct EvaluationConfigBuilder {
    config: EvaluationConfig,
}

impl EvaluationConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fuzzy boundary tolerance.
    pub fn fuzzy_boundary_tolerance(mut self, tolerance: f64) -> Self {
        self.config.fuzzy_boundary_tolerance = tolerance;
        self
    }

    /// Set the relative error tolerance.
    pub fn relative_error_tolerance(mut self, tolerance: f64) -> Self {
        self.config.relative_error_tolerance = tolerance;
        self
    }

    /// Set the absolute error tolerance.
    pub fn error_tolerance(mut self, tolerance: f64) -> Self {
        self.config.error_tolerance = tolerance;
        self
    }

    /// Set the iteration cap.
    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<EvaluationConfig, DistributionError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
