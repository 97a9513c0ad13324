//! Interpolation policies over processed axes.
//!
//! Every interpolation in the workspace is expressed as linear interpolation
//! between *processed* values: an axis is either used as-is
//! ([`Processing::Linear`]), through its natural logarithm
//! ([`Processing::Logarithmic`]), or, for scattering-angle cosines `mu`,
//! through the logarithm of the cosine distance `ln(1 - mu)`
//! ([`Processing::LogCosine`], [`Processing::NudgedLogCosine`]).
//!
//! - [`InterpolationType`] pairs a dependent and an independent axis and is
//!   named dependent-first (`LogLin` = logarithmic dependent, linear
//!   independent).
//! - [`TwoDInterpolationType`] names the dependent, secondary and primary
//!   axes of a bivariate table (`LinLogLin` = linear dependent, logarithmic
//!   secondary, linear primary).

use num_traits::Float;
use std::fmt;

/// Processing applied to one axis before linear interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Processing {
    /// Values are interpolated as-is.
    Linear,
    /// Values are interpolated through their natural logarithm.
    Logarithmic,
    /// Cosines `mu` in `[-1, 1)` are interpolated through `ln(1 - mu)`.
    LogCosine,
    /// Cosines `mu` in `[-1, 1]` are interpolated through
    /// `ln(1 - mu + COSINE_NUDGE)`, which keeps `mu = 1` finite.
    NudgedLogCosine,
}

/// Offset added to the cosine distance by [`Processing::NudgedLogCosine`].
pub const COSINE_NUDGE: f64 = 1e-10;

/// Cosine distance `1 - mu`, nudged when requested.
#[inline]
fn cosine_distance<T: Float>(mu: T, nudged: bool) -> T {
    if nudged {
        (T::one() - mu) + T::from(COSINE_NUDGE).unwrap_or_else(T::zero)
    } else {
        T::one() - mu
    }
}

/// Cosine for a cosine distance, inverse of [`cosine_distance`].
#[inline]
fn cosine_from_distance<T: Float>(distance: T, nudged: bool) -> T {
    if nudged {
        (T::from(COSINE_NUDGE).unwrap_or_else(T::zero) - distance) + T::one()
    } else {
        T::one() - distance
    }
}

impl Processing {
    /// Map a raw value into processed space.
    #[inline]
    pub fn process<T: Float>(self, value: T) -> T {
        match self {
            Processing::Linear => value,
            Processing::Logarithmic => value.ln(),
            Processing::LogCosine => cosine_distance(value, false).ln(),
            Processing::NudgedLogCosine => cosine_distance(value, true).ln(),
        }
    }

    /// Map a processed value back to raw space.
    #[inline]
    pub fn recover<T: Float>(self, processed: T) -> T {
        match self {
            Processing::Linear => processed,
            Processing::Logarithmic => processed.exp(),
            Processing::LogCosine => cosine_from_distance(processed.exp(), false),
            Processing::NudgedLogCosine => cosine_from_distance(processed.exp(), true),
        }
    }

    /// Derivative of the raw value with respect to the processed value,
    /// evaluated at the raw `value`.
    ///
    /// Negative for the cosine processings, which decrease with `mu`.
    #[inline]
    pub fn recover_derivative<T: Float>(self, value: T) -> T {
        match self {
            Processing::Linear => T::one(),
            Processing::Logarithmic => value,
            Processing::LogCosine => -cosine_distance(value, false),
            Processing::NudgedLogCosine => -cosine_distance(value, true),
        }
    }

    /// Check whether a raw value can be processed.
    #[inline]
    pub fn is_valid<T: Float>(self, value: T) -> bool {
        match self {
            Processing::Linear => value.is_finite(),
            Processing::Logarithmic => value.is_finite() && value > T::zero(),
            Processing::LogCosine => value >= -T::one() && value < T::one(),
            Processing::NudgedLogCosine => value >= -T::one() && value <= T::one(),
        }
    }

    /// Returns true for logarithmic processing.
    #[inline]
    pub fn is_logarithmic(self) -> bool {
        matches!(self, Processing::Logarithmic)
    }

    /// Returns true for the cosine processings.
    #[inline]
    pub fn is_cosine(self) -> bool {
        matches!(self, Processing::LogCosine | Processing::NudgedLogCosine)
    }

    /// Interpolate between `a` (at ratio 0) and `b` (at ratio 1).
    ///
    /// # Formula
    ///
    /// ```text
    /// Linear:      a + (b - a) * beta
    /// Logarithmic: a * (b / a)^beta
    /// Cosine:      recover(process(a) + (process(b) - process(a)) * beta)
    /// ```
    #[inline]
    pub fn interpolate_with_ratio<T: Float>(self, beta: T, a: T, b: T) -> T {
        match self {
            Processing::Linear => a + (b - a) * beta,
            Processing::Logarithmic => a * (b / a).powf(beta),
            Processing::LogCosine | Processing::NudgedLogCosine => {
                if a == b {
                    return a;
                }
                let pa = self.process(a);
                self.recover(pa + (self.process(b) - pa) * beta)
            }
        }
    }

    /// Like [`interpolate_with_ratio`](Self::interpolate_with_ratio), but
    /// falls back to linear interpolation when logarithmic processing is not
    /// defined for one of the end values.
    #[inline]
    pub fn interpolate_with_ratio_or_linear<T: Float>(self, beta: T, a: T, b: T) -> T {
        if self.is_valid(a) && self.is_valid(b) {
            self.interpolate_with_ratio(beta, a, b)
        } else {
            Processing::Linear.interpolate_with_ratio(beta, a, b)
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Processing::Linear => "Lin",
            Processing::Logarithmic => "Log",
            Processing::LogCosine => "LogCos",
            Processing::NudgedLogCosine => "NudgedLogCos",
        }
    }
}

/// One-dimensional interpolation policy (dependent axis named first).
///
/// # Example
///
/// ```
/// use tabulate_core::math::interpolation::InterpolationType;
///
/// let y: f64 = InterpolationType::LinLin.interpolate(0.0, 2.0, 0.5, 1.0, 3.0);
/// assert!((y - 1.5).abs() < 1e-15);
///
/// // Logarithmic dependent axis: geometric interpolation
/// let y: f64 = InterpolationType::LogLin.interpolate(0.0, 1.0, 0.5, 1.0, 4.0);
/// assert!((y - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationType {
    /// Linear dependent, linear independent.
    #[default]
    LinLin,
    /// Linear dependent, logarithmic independent.
    LinLog,
    /// Logarithmic dependent, linear independent.
    LogLin,
    /// Logarithmic dependent, logarithmic independent.
    LogLog,
    /// Linear dependent, log-cosine independent.
    LinLogCos,
    /// Logarithmic dependent, log-cosine independent.
    LogLogCos,
    /// Linear dependent, nudged log-cosine independent.
    LinNudgedLogCos,
    /// Logarithmic dependent, nudged log-cosine independent.
    LogNudgedLogCos,
    /// Log-cosine dependent, linear independent.
    LogCosLin,
    /// Log-cosine dependent, logarithmic independent.
    LogCosLog,
    /// Nudged log-cosine dependent, linear independent.
    NudgedLogCosLin,
    /// Nudged log-cosine dependent, logarithmic independent.
    NudgedLogCosLog,
}

impl InterpolationType {
    /// Build the policy from the dependent and independent processing.
    ///
    /// Returns `None` when both axes are cosines.
    pub const fn from_processing(dependent: Processing, independent: Processing) -> Option<Self> {
        use Processing::{
            Linear as Lin, LogCosine as Cos, Logarithmic as Log, NudgedLogCosine as NCos,
        };
        let interpolation = match (dependent, independent) {
            (Lin, Lin) => InterpolationType::LinLin,
            (Lin, Log) => InterpolationType::LinLog,
            (Log, Lin) => InterpolationType::LogLin,
            (Log, Log) => InterpolationType::LogLog,
            (Lin, Cos) => InterpolationType::LinLogCos,
            (Log, Cos) => InterpolationType::LogLogCos,
            (Lin, NCos) => InterpolationType::LinNudgedLogCos,
            (Log, NCos) => InterpolationType::LogNudgedLogCos,
            (Cos, Lin) => InterpolationType::LogCosLin,
            (Cos, Log) => InterpolationType::LogCosLog,
            (NCos, Lin) => InterpolationType::NudgedLogCosLin,
            (NCos, Log) => InterpolationType::NudgedLogCosLog,
            (Cos | NCos, Cos | NCos) => return None,
        };
        Some(interpolation)
    }

    const fn axes(self) -> (Processing, Processing) {
        use Processing::{
            Linear as Lin, LogCosine as Cos, Logarithmic as Log, NudgedLogCosine as NCos,
        };
        match self {
            InterpolationType::LinLin => (Lin, Lin),
            InterpolationType::LinLog => (Lin, Log),
            InterpolationType::LogLin => (Log, Lin),
            InterpolationType::LogLog => (Log, Log),
            InterpolationType::LinLogCos => (Lin, Cos),
            InterpolationType::LogLogCos => (Log, Cos),
            InterpolationType::LinNudgedLogCos => (Lin, NCos),
            InterpolationType::LogNudgedLogCos => (Log, NCos),
            InterpolationType::LogCosLin => (Cos, Lin),
            InterpolationType::LogCosLog => (Cos, Log),
            InterpolationType::NudgedLogCosLin => (NCos, Lin),
            InterpolationType::NudgedLogCosLog => (NCos, Log),
        }
    }

    /// Processing of the dependent axis.
    #[inline]
    pub const fn dep_processing(self) -> Processing {
        self.axes().0
    }

    /// Processing of the independent axis.
    #[inline]
    pub const fn indep_processing(self) -> Processing {
        self.axes().1
    }

    /// Policy name, e.g. `"LogLin"` or `"LogNudgedLogCos"`.
    pub fn name(self) -> &'static str {
        match self {
            InterpolationType::LinLin => "LinLin",
            InterpolationType::LinLog => "LinLog",
            InterpolationType::LogLin => "LogLin",
            InterpolationType::LogLog => "LogLog",
            InterpolationType::LinLogCos => "LinLogCos",
            InterpolationType::LogLogCos => "LogLogCos",
            InterpolationType::LinNudgedLogCos => "LinNudgedLogCos",
            InterpolationType::LogNudgedLogCos => "LogNudgedLogCos",
            InterpolationType::LogCosLin => "LogCosLin",
            InterpolationType::LogCosLog => "LogCosLog",
            InterpolationType::NudgedLogCosLin => "NudgedLogCosLin",
            InterpolationType::NudgedLogCosLog => "NudgedLogCosLog",
        }
    }

    /// Interpolate between `(x0, y0)` and `(x1, y1)` at `x`.
    ///
    /// # Formula
    ///
    /// ```text
    /// LinLin: y0 + (y1 - y0) / (x1 - x0) * (x - x0)
    /// LogLin: y0 * (y1 / y0)^((x - x0) / (x1 - x0))
    /// LinLog: y0 + (y1 - y0) * ln(x / x0) / ln(x1 / x0)
    /// LogLog: y0 * (y1 / y0)^(ln(x / x0) / ln(x1 / x0))
    /// ```
    ///
    /// The cosine policies interpolate linearly between the processed values.
    #[inline]
    pub fn interpolate<T: Float>(self, x0: T, x1: T, x: T, y0: T, y1: T) -> T {
        match self {
            InterpolationType::LinLin => y0 + (y1 - y0) / (x1 - x0) * (x - x0),
            InterpolationType::LogLin => y0 * (y1 / y0).powf((x - x0) / (x1 - x0)),
            InterpolationType::LinLog => y0 + (y1 - y0) * (x / x0).ln() / (x1 / x0).ln(),
            InterpolationType::LogLog => y0 * (y1 / y0).powf((x / x0).ln() / (x1 / x0).ln()),
            _ => self.interpolate_with_ratio(self.ratio(x0, x1, x), y0, y1),
        }
    }

    /// Interpolate using a precomputed independent ratio `beta` in `[0, 1]`.
    #[inline]
    pub fn interpolate_with_ratio<T: Float>(self, beta: T, y0: T, y1: T) -> T {
        self.dep_processing().interpolate_with_ratio(beta, y0, y1)
    }

    /// Ratio of `x` within `[x0, x1]` measured in processed independent space.
    #[inline]
    pub fn ratio<T: Float>(self, x0: T, x1: T, x: T) -> T {
        let p = self.indep_processing();
        let p0 = p.process(x0);
        (p.process(x) - p0) / (p.process(x1) - p0)
    }

    /// Midpoint of `[x0, x1]` taken in processed independent space.
    #[inline]
    pub fn midpoint<T: Float>(self, x0: T, x1: T) -> T {
        let p = self.indep_processing();
        let half = T::from(0.5).unwrap_or_else(T::zero);
        p.recover(half * (p.process(x0) + p.process(x1)))
    }

    /// Process an independent value.
    #[inline]
    pub fn process_indep<T: Float>(self, x: T) -> T {
        self.indep_processing().process(x)
    }

    /// Recover an independent value from processed space.
    #[inline]
    pub fn recover_indep<T: Float>(self, x: T) -> T {
        self.indep_processing().recover(x)
    }

    /// Process a dependent value.
    #[inline]
    pub fn process_dep<T: Float>(self, y: T) -> T {
        self.dep_processing().process(y)
    }

    /// Recover a dependent value from processed space.
    #[inline]
    pub fn recover_dep<T: Float>(self, y: T) -> T {
        self.dep_processing().recover(y)
    }

    /// Check whether an independent value is usable with this policy.
    #[inline]
    pub fn is_indep_valid<T: Float>(self, x: T) -> bool {
        self.indep_processing().is_valid(x)
    }

    /// Check whether a dependent value is usable with this policy.
    #[inline]
    pub fn is_dep_valid<T: Float>(self, y: T) -> bool {
        self.dep_processing().is_valid(y)
    }
}

impl fmt::Display for InterpolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bivariate interpolation policy named dependent-secondary-primary.
///
/// The three derived one-dimensional policies are:
/// - [`zy`](Self::zy): dependent along the secondary axis
/// - [`zx`](Self::zx): dependent along the primary axis
/// - [`yx`](Self::yx): secondary values (grid limits, correlated samples)
///   along the primary axis
///
/// Only the secondary axis may be a cosine (`LogLogCosLin` = logarithmic
/// dependent, log-cosine secondary, linear primary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TwoDInterpolationType {
    /// Linear dependent, linear secondary, linear primary.
    #[default]
    LinLinLin,
    /// Linear dependent, linear secondary, logarithmic primary.
    LinLinLog,
    /// Linear dependent, logarithmic secondary, linear primary.
    LinLogLin,
    /// Linear dependent, logarithmic secondary, logarithmic primary.
    LinLogLog,
    /// Logarithmic dependent, linear secondary, linear primary.
    LogLinLin,
    /// Logarithmic dependent, linear secondary, logarithmic primary.
    LogLinLog,
    /// Logarithmic dependent, logarithmic secondary, linear primary.
    LogLogLin,
    /// Logarithmic dependent, logarithmic secondary, logarithmic primary.
    LogLogLog,
    /// Linear dependent, log-cosine secondary, linear primary.
    LinLogCosLin,
    /// Linear dependent, log-cosine secondary, logarithmic primary.
    LinLogCosLog,
    /// Logarithmic dependent, log-cosine secondary, linear primary.
    LogLogCosLin,
    /// Logarithmic dependent, log-cosine secondary, logarithmic primary.
    LogLogCosLog,
    /// Linear dependent, nudged log-cosine secondary, linear primary.
    LinNudgedLogCosLin,
    /// Linear dependent, nudged log-cosine secondary, logarithmic primary.
    LinNudgedLogCosLog,
    /// Logarithmic dependent, nudged log-cosine secondary, linear primary.
    LogNudgedLogCosLin,
    /// Logarithmic dependent, nudged log-cosine secondary, logarithmic primary.
    LogNudgedLogCosLog,
}

impl TwoDInterpolationType {
    /// Build the policy from the processing of each axis.
    ///
    /// Returns `None` when the dependent or primary axis is a cosine.
    pub const fn from_processing(
        dependent: Processing,
        secondary: Processing,
        primary: Processing,
    ) -> Option<Self> {
        use Processing::{
            Linear as Lin, LogCosine as Cos, Logarithmic as Log, NudgedLogCosine as NCos,
        };
        let interpolation = match (dependent, secondary, primary) {
            (Lin, Lin, Lin) => TwoDInterpolationType::LinLinLin,
            (Lin, Lin, Log) => TwoDInterpolationType::LinLinLog,
            (Lin, Log, Lin) => TwoDInterpolationType::LinLogLin,
            (Lin, Log, Log) => TwoDInterpolationType::LinLogLog,
            (Log, Lin, Lin) => TwoDInterpolationType::LogLinLin,
            (Log, Lin, Log) => TwoDInterpolationType::LogLinLog,
            (Log, Log, Lin) => TwoDInterpolationType::LogLogLin,
            (Log, Log, Log) => TwoDInterpolationType::LogLogLog,
            (Lin, Cos, Lin) => TwoDInterpolationType::LinLogCosLin,
            (Lin, Cos, Log) => TwoDInterpolationType::LinLogCosLog,
            (Log, Cos, Lin) => TwoDInterpolationType::LogLogCosLin,
            (Log, Cos, Log) => TwoDInterpolationType::LogLogCosLog,
            (Lin, NCos, Lin) => TwoDInterpolationType::LinNudgedLogCosLin,
            (Lin, NCos, Log) => TwoDInterpolationType::LinNudgedLogCosLog,
            (Log, NCos, Lin) => TwoDInterpolationType::LogNudgedLogCosLin,
            (Log, NCos, Log) => TwoDInterpolationType::LogNudgedLogCosLog,
            (Cos | NCos, _, _) | (_, _, Cos | NCos) => return None,
        };
        Some(interpolation)
    }

    const fn axes(self) -> (Processing, Processing, Processing) {
        use Processing::{
            Linear as Lin, LogCosine as Cos, Logarithmic as Log, NudgedLogCosine as NCos,
        };
        match self {
            TwoDInterpolationType::LinLinLin => (Lin, Lin, Lin),
            TwoDInterpolationType::LinLinLog => (Lin, Lin, Log),
            TwoDInterpolationType::LinLogLin => (Lin, Log, Lin),
            TwoDInterpolationType::LinLogLog => (Lin, Log, Log),
            TwoDInterpolationType::LogLinLin => (Log, Lin, Lin),
            TwoDInterpolationType::LogLinLog => (Log, Lin, Log),
            TwoDInterpolationType::LogLogLin => (Log, Log, Lin),
            TwoDInterpolationType::LogLogLog => (Log, Log, Log),
            TwoDInterpolationType::LinLogCosLin => (Lin, Cos, Lin),
            TwoDInterpolationType::LinLogCosLog => (Lin, Cos, Log),
            TwoDInterpolationType::LogLogCosLin => (Log, Cos, Lin),
            TwoDInterpolationType::LogLogCosLog => (Log, Cos, Log),
            TwoDInterpolationType::LinNudgedLogCosLin => (Lin, NCos, Lin),
            TwoDInterpolationType::LinNudgedLogCosLog => (Lin, NCos, Log),
            TwoDInterpolationType::LogNudgedLogCosLin => (Log, NCos, Lin),
            TwoDInterpolationType::LogNudgedLogCosLog => (Log, NCos, Log),
        }
    }

    /// Processing of the dependent axis.
    #[inline]
    pub const fn dependent(self) -> Processing {
        self.axes().0
    }

    /// Processing of the secondary independent axis.
    #[inline]
    pub const fn secondary(self) -> Processing {
        self.axes().1
    }

    /// Processing of the primary independent axis.
    #[inline]
    pub const fn primary(self) -> Processing {
        self.axes().2
    }

    /// Dependent values along the secondary axis.
    #[inline]
    pub const fn zy(self) -> InterpolationType {
        pair(self.dependent(), self.secondary())
    }

    /// Dependent values along the primary axis.
    #[inline]
    pub const fn zx(self) -> InterpolationType {
        pair(self.dependent(), self.primary())
    }

    /// Secondary values along the primary axis.
    #[inline]
    pub const fn yx(self) -> InterpolationType {
        pair(self.secondary(), self.primary())
    }

    /// Policy name, e.g. `"LinLogLin"`.
    pub fn name(self) -> String {
        let (z, y, x) = self.axes();
        format!("{}{}{}", z.prefix(), y.prefix(), x.prefix())
    }
}

/// One-dimensional policy for two axes of a bivariate policy.
///
/// At most one of the axes of any pair is the (possibly cosine) secondary.
const fn pair(dependent: Processing, independent: Processing) -> InterpolationType {
    match InterpolationType::from_processing(dependent, independent) {
        Some(interpolation) => interpolation,
        None => unreachable!(),
    }
}

impl fmt::Display for TwoDInterpolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [InterpolationType; 4] = [
        InterpolationType::LinLin,
        InterpolationType::LinLog,
        InterpolationType::LogLin,
        InterpolationType::LogLog,
    ];

    #[test]
    fn test_processing_round_trip() {
        assert_eq!(Processing::Linear.process(3.0_f64), 3.0);
        assert_relative_eq!(
            Processing::Logarithmic.recover(Processing::Logarithmic.process(3.0_f64)),
            3.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_processing_validity() {
        assert!(Processing::Linear.is_valid(-1.0_f64));
        assert!(Processing::Logarithmic.is_valid(1e-300_f64));
        assert!(!Processing::Logarithmic.is_valid(0.0_f64));
        assert!(!Processing::Logarithmic.is_valid(-2.0_f64));
        assert!(!Processing::Linear.is_valid(f64::NAN));
    }

    #[test]
    fn test_interpolate_with_ratio_or_linear_falls_back() {
        let y = Processing::Logarithmic.interpolate_with_ratio_or_linear(0.5_f64, 0.0, 2.0);
        assert_relative_eq!(y, 1.0);

        let y = Processing::Logarithmic.interpolate_with_ratio_or_linear(0.5_f64, 1.0, 4.0);
        assert_relative_eq!(y, 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_interpolate_lin_lin() {
        let y = InterpolationType::LinLin.interpolate(1.0_f64, 3.0, 2.0, 10.0, 20.0);
        assert_relative_eq!(y, 15.0);
    }

    #[test]
    fn test_interpolate_log_lin() {
        let y = InterpolationType::LogLin.interpolate(0.0_f64, 2.0, 1.0, 1.0, 100.0);
        assert_relative_eq!(y, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_lin_log() {
        let y = InterpolationType::LinLog.interpolate(1.0_f64, 100.0, 10.0, 0.0, 2.0);
        assert_relative_eq!(y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolate_log_log() {
        // Power law y = x^2 is exact under log-log interpolation
        let y = InterpolationType::LogLog.interpolate(1.0_f64, 10.0, 3.0, 1.0, 100.0);
        assert_relative_eq!(y, 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolation_reproduces_end_points() {
        for interp in ALL {
            let y0 = interp.interpolate(1.0_f64, 4.0, 1.0, 2.0, 8.0);
            let y1 = interp.interpolate(1.0_f64, 4.0, 4.0, 2.0, 8.0);
            assert_relative_eq!(y0, 2.0, epsilon = 1e-14);
            assert_relative_eq!(y1, 8.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_ratio_matches_interpolation() {
        for interp in ALL {
            let beta = interp.ratio(1.0_f64, 4.0, 2.5);
            let direct = interp.interpolate(1.0, 4.0, 2.5, 2.0, 8.0);
            let with_ratio = interp.interpolate_with_ratio(beta, 2.0, 8.0);
            assert_relative_eq!(direct, with_ratio, max_relative = 1e-13);
        }
    }

    #[test]
    fn test_midpoint() {
        assert_relative_eq!(InterpolationType::LinLin.midpoint(0.0_f64, 10.0), 5.0);
        assert_relative_eq!(
            InterpolationType::LinLog.midpoint(1.0_f64, 100.0),
            10.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_from_processing_round_trip() {
        for interp in ALL {
            let rebuilt =
                InterpolationType::from_processing(interp.dep_processing(), interp.indep_processing());
            assert_eq!(rebuilt, Some(interp));
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(InterpolationType::LogLin.to_string(), "LogLin");
        assert_eq!(TwoDInterpolationType::LinLogLin.to_string(), "LinLogLin");
        assert_eq!(TwoDInterpolationType::LogLogLog.name(), "LogLogLog");
    }

    #[test]
    fn test_two_d_sub_policies() {
        let interp = TwoDInterpolationType::LogLinLog;
        assert_eq!(interp.zy(), InterpolationType::LogLin);
        assert_eq!(interp.zx(), InterpolationType::LogLog);
        assert_eq!(interp.yx(), InterpolationType::LinLog);

        let rebuilt = TwoDInterpolationType::from_processing(
            interp.dependent(),
            interp.secondary(),
            interp.primary(),
        );
        assert_eq!(rebuilt, Some(interp));
    }

    // ========================================
    // Cosine Processing Tests
    // ========================================

    #[test]
    fn test_cosine_processing_round_trip() {
        for mu in [-1.0_f64, -0.3, 0.0, 0.7, 0.999999] {
            let processed = Processing::LogCosine.process(mu);
            assert_relative_eq!(processed, (1.0 - mu).ln(), epsilon = 1e-15);
            assert_relative_eq!(Processing::LogCosine.recover(processed), mu, epsilon = 1e-12);
        }

        // The nudge keeps the forward peak finite
        let processed = Processing::NudgedLogCosine.process(1.0_f64);
        assert_relative_eq!(processed, (1e-10_f64).ln(), epsilon = 1e-12);
        assert_relative_eq!(Processing::NudgedLogCosine.recover(processed), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_cosine_processing_validity() {
        assert!(Processing::LogCosine.is_valid(-1.0_f64));
        assert!(!Processing::LogCosine.is_valid(1.0_f64));
        assert!(!Processing::LogCosine.is_valid(-1.5_f64));
        assert!(Processing::NudgedLogCosine.is_valid(1.0_f64));
        assert!(!Processing::NudgedLogCosine.is_valid(1.0001_f64));
        assert!(!Processing::NudgedLogCosine.is_valid(f64::NAN));
        assert!(Processing::LogCosine.is_cosine());
        assert!(!Processing::Logarithmic.is_cosine());
    }

    #[test]
    fn test_recover_derivative_matches_finite_difference() {
        let h = 1e-7_f64;
        for processing in [
            Processing::Linear,
            Processing::Logarithmic,
            Processing::LogCosine,
            Processing::NudgedLogCosine,
        ] {
            let value = 0.4;
            let p = processing.process(value);
            let numeric = (processing.recover(p + h) - processing.recover(p - h)) / (2.0 * h);
            assert_relative_eq!(processing.recover_derivative(value), numeric, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_interpolate_log_log_cos() {
        // y = (1 - mu)^2 is exact under LogLogCos
        let f = |mu: f64| (1.0 - mu).powi(2);
        let y = InterpolationType::LogLogCos.interpolate(-1.0, 0.9, 0.5, f(-1.0), f(0.9));
        assert_relative_eq!(y, f(0.5), max_relative = 1e-12);

        let mid = InterpolationType::LogLogCos.midpoint(-1.0_f64, 0.9);
        assert_relative_eq!(1.0 - mid, (2.0_f64 * 0.1).sqrt(), max_relative = 1e-12);
        assert!(mid > -1.0 && mid < 0.9);
    }

    #[test]
    fn test_interpolate_cosine_dependent() {
        // Secondary limits across the primary axis: 1 - mu is geometric
        let mu = InterpolationType::LogCosLin.interpolate(0.0_f64, 1.0, 0.5, 0.0, 0.99);
        assert_relative_eq!(1.0 - mu, (0.01_f64).sqrt(), max_relative = 1e-12);

        let mu = Processing::NudgedLogCosine.interpolate_with_ratio(0.3_f64, 1.0, 1.0);
        assert_eq!(mu, 1.0);
    }

    #[test]
    fn test_cosine_policies() {
        assert_eq!(
            InterpolationType::from_processing(Processing::LogCosine, Processing::NudgedLogCosine),
            None
        );
        assert_eq!(InterpolationType::LogNudgedLogCos.name(), "LogNudgedLogCos");

        let interp = TwoDInterpolationType::LogLogCosLin;
        assert_eq!(interp.to_string(), "LogLogCosLin");
        assert_eq!(interp.zy(), InterpolationType::LogLogCos);
        assert_eq!(interp.zx(), InterpolationType::LogLin);
        assert_eq!(interp.yx(), InterpolationType::LogCosLin);

        let interp = TwoDInterpolationType::LinNudgedLogCosLog;
        assert_eq!(interp.to_string(), "LinNudgedLogCosLog");
        assert_eq!(interp.yx(), InterpolationType::NudgedLogCosLog);
        assert_eq!(
            TwoDInterpolationType::from_processing(
                Processing::Linear,
                Processing::Linear,
                Processing::LogCosine
            ),
            None
        );
    }
}
