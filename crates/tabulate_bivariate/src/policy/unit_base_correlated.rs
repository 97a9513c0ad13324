//! Correlated interpolation on the unit base.
//!
//! Like the correlated policy, but the matched boundary samples are first
//! mapped onto their unit bases; the interpolated unit-base value is then
//! mapped onto the intermediate grid.

use super::{Bin, Quantity, SecondarySample, UnitBaseFrame};
use crate::bisector::{BisectionOutcome, MatchedPoints};
use tabulate_core::distribution::TabularUnivariate;
use tabulate_core::math::interpolation::Processing;
use tabulate_core::types::DistributionError;

/// Interpolate unit-base values across the bin: geometrically for a
/// logarithmic secondary axis, linearly otherwise.
fn interpolate_eta<D: TabularUnivariate>(bin: &Bin<'_, D>, eta0: f64, eta1: f64) -> f64 {
    match bin.secondary() {
        Processing::Logarithmic => {
            Processing::Logarithmic.interpolate_with_ratio_or_linear(bin.beta, eta0, eta1)
        }
        _ => Processing::Linear.interpolate_with_ratio(bin.beta, eta0, eta1),
    }
}

fn match_cdf<D: TabularUnivariate>(
    bin: &Bin<'_, D>,
    frame: &UnitBaseFrame,
    eta: f64,
) -> Result<BisectionOutcome, DistributionError> {
    let lower = bin.lower_distribution();
    let upper = bin.upper_distribution();

    let (y0, y1) = frame.boundary_values(bin, eta);
    let c0 = lower.evaluate_cdf(y0);
    let c1 = upper.evaluate_cdf(y1);

    bin.bisector().solve(eta, c0.min(c1), c0.max(c1), |cdf| {
        let lower_value = lower.sample_with_random_number(cdf);
        let upper_value = upper.sample_with_random_number(cdf);
        let (eta0, eta1) = frame.boundary_etas(bin, lower_value, upper_value);
        MatchedPoints {
            lower_value,
            upper_value,
            estimate: interpolate_eta(bin, eta0, eta1),
        }
    })
}

pub(super) fn evaluate<D: TabularUnivariate>(
    bin: &Bin<'_, D>,
    y: f64,
    quantity: Quantity,
) -> Result<f64, DistributionError> {
    let lower = bin.lower_distribution();
    let upper = bin.upper_distribution();
    let frame = UnitBaseFrame::new(bin);

    if bin.outside_fuzzy_bounds(y, frame.y_min, frame.y_max) {
        return Ok(0.0);
    }

    let (eta, y0, y1) = if y <= frame.y_min {
        (0.0, lower.lower_bound(), upper.lower_bound())
    } else if y >= frame.y_max {
        (1.0, lower.upper_bound(), upper.upper_bound())
    } else {
        let eta = frame.eta(bin, y);
        let outcome = match_cdf(bin, &frame, eta)?;
        (eta, outcome.lower_value, outcome.upper_value)
    };

    // Densities per unit eta on each boundary grid
    let g0 = quantity.of(lower, y0) * bin.unit_base_jacobian(y0, frame.lower_length);
    let g1 = quantity.of(upper, y1) * bin.unit_base_jacobian(y1, frame.upper_length);

    let g = if g0 == g1 {
        g0
    } else {
        let beta = bin.beta;
        let (eta0, eta1) = frame.boundary_etas(bin, y0, y1);
        let geometric =
            bin.secondary() == Processing::Logarithmic && eta > 0.0 && eta0 > 0.0 && eta1 > 0.0;

        let (numerator, denominator) = if geometric {
            let w0 = eta0 * g0;
            let w1 = eta1 * g1;
            (w0 * w1, eta * (w1 + (w0 - w1) * beta))
        } else {
            (g0 * g1, g1 + (g0 - g1) * beta)
        };

        if denominator == 0.0 {
            0.0
        } else {
            numerator / denominator
        }
    };

    let y_clamped = y.clamp(frame.y_min, frame.y_max);
    Ok(g / bin.unit_base_jacobian(y_clamped, frame.length))
}

pub(super) fn evaluate_cdf<D: TabularUnivariate>(bin: &Bin<'_, D>, y: f64) -> Result<f64, DistributionError> {
    let frame = UnitBaseFrame::new(bin);
    if y <= frame.y_min {
        return Ok(0.0);
    }
    if y >= frame.y_max {
        return Ok(1.0);
    }

    let eta = frame.eta(bin, y);
    Ok(match_cdf(bin, &frame, eta)?.cdf)
}

pub(super) fn sample<D: TabularUnivariate>(bin: &Bin<'_, D>, random_number: f64) -> SecondarySample {
    let frame = UnitBaseFrame::new(bin);
    let y0 = bin.lower_distribution().sample_with_random_number(random_number);
    let y1 = bin.upper_distribution().sample_with_random_number(random_number);

    let (eta0, eta1) = frame.boundary_etas(bin, y0, y1);
    let sample = frame.intermediate_value(bin, interpolate_eta(bin, eta0, eta1));

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
