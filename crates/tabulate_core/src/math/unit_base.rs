//! Unit-base mapping of a secondary domain onto `[0, 1]`.
//!
//! Two tabulated distributions with different secondary domains
//! `[y0_min, y0_max]` and `[y1_min, y1_max]` are compared on a common unit
//! grid. With `L = p(y_max) - p(y_min)` (where `p` is the secondary
//! processing), a secondary value maps to
//!
//! ```text
//! eta = (p(y) - p(y_min)) / L
//! ```
//!
//! and back through `y = p⁻¹(p(y_min) + L * eta)`. `L` is negative for the
//! cosine processings, so `eta` still increases with `y`.

use super::interpolation::Processing;
use num_traits::Float;

/// Processed length `p(upper) - p(lower)` of a secondary grid.
#[inline]
pub fn grid_length<T: Float>(processing: Processing, lower: T, upper: T) -> T {
    processing.process(upper) - processing.process(lower)
}

/// Map a secondary value onto the unit base.
///
/// Values that round off just outside `[0, 1]` (by less than `tol`) are
/// snapped onto the nearest end.
///
/// # Example
///
/// ```
/// use tabulate_core::math::interpolation::Processing;
/// use tabulate_core::math::unit_base::{grid_length, unit_base_indep_var};
///
/// let length: f64 = grid_length(Processing::Linear, 2.0, 6.0);
/// let eta = unit_base_indep_var(Processing::Linear, 3.0, 2.0, length, 1e-3);
/// assert!((eta - 0.25).abs() < 1e-15);
/// ```
#[inline]
pub fn unit_base_indep_var<T: Float>(
    processing: Processing,
    value: T,
    min_value: T,
    length: T,
    tol: T,
) -> T {
    let eta = (processing.process(value) - processing.process(min_value)) / length;

    if eta > T::one() && eta - T::one() < tol {
        T::one()
    } else if eta < T::zero() && eta > -tol {
        T::zero()
    } else {
        eta
    }
}

/// Map a unit-base value back onto a secondary grid.
///
/// A result that rounds off just below `min_value` (within the fuzzy lower
/// bound) is snapped back to `min_value`.
#[inline]
pub fn indep_var<T: Float>(processing: Processing, eta: T, min_value: T, length: T, tol: T) -> T {
    let value = processing.recover(processing.process(min_value) + length * eta);

    if value < min_value && value >= fuzzy_lower_bound(min_value, tol) {
        min_value
    } else {
        value
    }
}

/// Lower bound widened by a relative tolerance.
#[inline]
pub fn fuzzy_lower_bound<T: Float>(value: T, tol: T) -> T {
    if value < T::zero() {
        value * (T::one() + tol)
    } else {
        value * (T::one() - tol)
    }
}

/// Upper bound widened by a relative tolerance.
#[inline]
pub fn fuzzy_upper_bound<T: Float>(value: T, tol: T) -> T {
    if value > T::zero() {
        value * (T::one() + tol)
    } else {
        value * (T::one() - tol)
    }
}
