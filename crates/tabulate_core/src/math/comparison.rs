//! Floating-point comparison helpers used by convergence checks.

use num_traits::Float;

/// Relative error between two values.
///
/// Defined as `|a - b| / max(|a|, |b|)`, and zero when both values are zero.
///
/// # Example
///
/// ```
/// use tabulate_core::math::comparison::relative_error;
///
/// assert_eq!(relative_error(0.0_f64, 0.0), 0.0);
/// assert!((relative_error(100.0_f64, 101.0) - 1.0 / 101.0).abs() < 1e-15);
/// ```
#[inline]
pub fn relative_error<T: Float>(a: T, b: T) -> T {
    let scale = a.abs().max(b.abs());
    if scale == T::zero() {
        T::zero()
    } else {
        (a - b).abs() / scale
    }
}

/// Absolute distance `|a - b|`.
#[inline]
pub fn absolute_distance<T: Float>(a: T, b: T) -> T {
    (a - b).abs()
}
