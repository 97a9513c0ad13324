//! Cumulative-points interpolation.
//!
//! The conditional CDF at a unit-base value is the mixture
//! `(1 - beta) * F0(y0(eta)) + beta * F1(y1(eta))` of the boundary CDFs,
//! which is the CDF the stochastic unit-base policy samples from. The
//! density is its exact derivative and sampling inverts the mixture by
//! bisection, so no bin random number is consumed.

use super::{Bin, Quantity, SecondarySample, UnitBaseFrame};
use crate::bisector::MatchedPoints;
use tabulate_core::distribution::TabularUnivariate;
use tabulate_core::types::DistributionError;

fn mixture_cdf<D: TabularUnivariate>(bin: &Bin<'_, D>, frame: &UnitBaseFrame, eta: f64) -> MatchedPoints {
    let (y0, y1) = frame.boundary_values(bin, eta);
    let c0 = bin.lower_distribution().evaluate_cdf(y0);
    let c1 = bin.upper_distribution().evaluate_cdf(y1);

    MatchedPoints {
        lower_value: y0,
        upper_value: y1,
        estimate: c0 + (c1 - c0) * bin.beta,
    }
}

pub(super) fn evaluate<D: TabularUnivariate>(bin: &Bin<'_, D>, y: f64, quantity: Quantity) -> f64 {
    let frame = UnitBaseFrame::new(bin);
    if bin.outside_fuzzy_bounds(y, frame.y_min, frame.y_max) {
        return 0.0;
    }

    let y = y.clamp(frame.y_min, frame.y_max);
    let eta = frame.eta(bin, y);
    let (y0, y1) = frame.boundary_values(bin, eta);

    let g0 = quantity.of(bin.lower_distribution(), y0) * bin.unit_base_jacobian(y0, frame.lower_length);
    let g1 = quantity.of(bin.upper_distribution(), y1) * bin.unit_base_jacobian(y1, frame.upper_length);

    (g0 + (g1 - g0) * bin.beta) / bin.unit_base_jacobian(y, frame.length)
}

pub(super) fn evaluate_cdf<D: TabularUnivariate>(bin: &Bin<'_, D>, y: f64) -> f64 {
    let frame = UnitBaseFrame::new(bin);
    if y <= frame.y_min {
        return 0.0;
    }
    if y >= frame.y_max {
        return 1.0;
    }

    let eta = frame.eta(bin, y);
    mixture_cdf(bin, &frame, eta).estimate
}

pub(super) fn sample<D: TabularUnivariate>(
    bin: &Bin<'_, D>,
    random_number: f64,
) -> Result<SecondarySample, DistributionError> {
    let frame = UnitBaseFrame::new(bin);

    let sample = if random_number <= 0.0 {
        frame.y_min
    } else if random_number >= 1.0 {
        frame.y_max
    } else {
        let outcome = bin
            .bisector()
            .solve(random_number, 0.0, 1.0, |eta| mixture_cdf(bin, &frame, eta))?;
        frame.intermediate_value(bin, outcome.cdf)
    };

    Ok(SecondarySample {
        sample,
        raw_sample: sample,
        primary_bin_index: bin.lower_index,
    })
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

    let scaled = random_number * evaluate_cdf(bin, max_value);
    Ok(sample(bin, scaled)?.sample.min(max_value))
}
