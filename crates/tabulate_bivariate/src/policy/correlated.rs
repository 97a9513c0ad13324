//! Correlated interpolation between bin boundaries.
//!
//! Points of equal cumulative probability on the two boundaries are paired
//! and their secondary values interpolated across the bin. Evaluation at a
//! known secondary value bisects for the matching probability.

use super::{Bin, Quantity, SecondarySample};
use crate::bisector::{BisectionOutcome, MatchedPoints};
use tabulate_core::distribution::TabularUnivariate;
use tabulate_core::types::DistributionError;

// Correlated brackets are widened in larger steps than unit-base ones
const WIDENING_FACTOR: f64 = 0.1;

fn match_cdf<D: TabularUnivariate>(bin: &Bin<'_, D>, y: f64) -> Result<BisectionOutcome, DistributionError> {
    let lower = bin.lower_distribution();
    let upper = bin.upper_distribution();

    let c0 = lower.evaluate_cdf(y);
    let c1 = upper.evaluate_cdf(y);

    bin.bisector()
        .with_widening_factor(WIDENING_FACTOR)?
        .solve(y, c0.min(c1), c0.max(c1), |cdf| {
            let lower_value = lower.sample_with_random_number(cdf);
            let upper_value = upper.sample_with_random_number(cdf);
            MatchedPoints {
                lower_value,
                upper_value,
                estimate: bin.interpolate_secondary(lower_value, upper_value),
            }
        })
}

/// Density of the interpolated secondary value given the boundary densities
/// at the matched points `y0`, `y1`.
fn correlated_density<D: TabularUnivariate>(
    bin: &Bin<'_, D>,
    y: f64,
    (y0, e0): (f64, f64),
    (y1, e1): (f64, f64),
) -> f64 {
    if e0 == e1 {
        return e0;
    }

    // Densities per unit processed secondary value
    let secondary = bin.secondary();
    let w0 = e0 * secondary.recover_derivative(y0).abs();
    let w1 = e1 * secondary.recover_derivative(y1).abs();
    let denominator = (w1 + (w0 - w1) * bin.beta) * secondary.recover_derivative(y).abs();
    if denominator == 0.0 {
        0.0
    } else {
        w0 * w1 / denominator
    }
}

pub(super) fn evaluate<D: TabularUnivariate>(
    bin: &Bin<'_, D>,
    y: f64,
    quantity: Quantity,
) -> Result<f64, DistributionError> {
    let lower = bin.lower_distribution();
    let upper = bin.upper_distribution();
    let y_min = bin.intermediate_lower_limit();
    let y_max = bin.intermediate_upper_limit();

    if bin.outside_fuzzy_bounds(y, y_min, y_max) {
        return Ok(0.0);
    }

    let (y0, y1) = if y <= y_min {
        (lower.lower_bound(), upper.lower_bound())
    } else if y >= y_max {
        (lower.upper_bound(), upper.upper_bound())
    } else {
        let outcome = match_cdf(bin, y)?;
        (outcome.lower_value, outcome.upper_value)
    };

    let e0 = quantity.of(lower, y0);
    let e1 = quantity.of(upper, y1);
    Ok(correlated_density(bin, y.clamp(y_min, y_max), (y0, e0), (y1, e1)))
}

pub(super) fn evaluate_cdf<D: TabularUnivariate>(bin: &Bin<'_, D>, y: f64) -> Result<f64, DistributionError> {
    if y <= bin.intermediate_lower_limit() {
        return Ok(0.0);
    }
    if y >= bin.intermediate_upper_limit() {
        return Ok(1.0);
    }
    Ok(match_cdf(bin, y)?.cdf)
}

pub(super) fn sample<D: TabularUnivariate>(bin: &Bin<'_, D>, random_number: f64) -> SecondarySample {
    let y0 = bin.lower_distribution().sample_with_random_number(random_number);
    let y1 = bin.upper_distribution().sample_with_random_number(random_number);

    let sample = if y0 == y1 {
        y0
    } else {
        bin.interpolate_secondary(y0, y1)
    };

    SecondarySample {
        sample,
        raw_sample: sample,
        primary_bin_index: bin.lower_index,
    }
}

pub(super) fn sample_in_subrange<D: TabularUnivariate>(
    bin: &Bin<'_, D>,
    random_number: f64,
    max_value: f64,
) -> Result<f64, DistributionError> {
    let y_min = bin.intermediate_lower_limit();
    if max_value <= y_min {
        return Ok(y_min);
    }
    if max_value >= bin.intermediate_upper_limit() {
        return Ok(sample(bin, random_number).sample);
    }

    let scaled = random_number * evaluate_cdf(bin, max_value)?;
    Ok(sample(bin, scaled).sample.min(max_value))
}
