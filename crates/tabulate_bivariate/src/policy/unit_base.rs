//! Stochastic unit-base interpolation.
//!
//! Both boundary grids are mapped onto `[0, 1]`; a boundary is picked with
//! probability given by the primary fraction and its sample is rescaled onto
//! the intermediate grid.

use super::{Bin, Quantity, SecondarySample, UnitBaseFrame};
use tabulate_core::distribution::TabularUnivariate;

pub(super) fn evaluate<D: TabularUnivariate>(bin: &Bin<'_, D>, y: f64, quantity: Quantity) -> f64 {
    let frame = UnitBaseFrame::new(bin);
    if bin.outside_fuzzy_bounds(y, frame.y_min, frame.y_max) {
        return 0.0;
    }

    let eta = frame.eta(bin, y);
    let (y0, y1) = frame.boundary_values(bin, eta);

    // Densities per unit eta on each boundary grid
    let lower = quantity.of(bin.lower_distribution(), y0) * bin.unit_base_jacobian(y0, frame.lower_length);
    let upper = quantity.of(bin.upper_distribution(), y1) * bin.unit_base_jacobian(y1, frame.upper_length);

    let value = if lower * upper > 0.0 {
        bin.interpolate_dependent(lower, upper)
    } else {
        lower + (upper - lower) * bin.beta
    };

    value / bin.unit_base_jacobian(y, frame.length)
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
    let (y0, y1) = frame.boundary_values(bin, eta);
    let lower = bin.lower_distribution().evaluate_cdf(y0);
    let upper = bin.upper_distribution().evaluate_cdf(y1);

    lower + (upper - lower) * bin.beta
}

pub(super) fn sample<D: TabularUnivariate>(
    bin: &Bin<'_, D>,
    bin_random_number: f64,
    random_number: f64,
) -> SecondarySample {
    let frame = UnitBaseFrame::new(bin);
    let (distribution, index) = bin.choose_boundary(bin_random_number);
    let raw_sample = distribution.sample_with_random_number(random_number);

    SecondarySample {
        sample: rescale(bin, &frame, index, raw_sample),
        raw_sample,
        primary_bin_index: index,
    }
}

pub(super) fn sample_in_subrange<D: TabularUnivariate>(
    bin: &Bin<'_, D>,
    bin_random_number: f64,
    random_number: f64,
    max_value: f64,
) -> f64 {
    let frame = UnitBaseFrame::new(bin);
    if max_value <= frame.y_min {
        return frame.y_min;
    }
    let (distribution, index) = bin.choose_boundary(bin_random_number);
    if max_value >= frame.y_max {
        let raw_sample = distribution.sample_with_random_number(random_number);
        return rescale(bin, &frame, index, raw_sample);
    }

    let eta_max = frame.eta(bin, max_value);
    let (lower_max, upper_max) = frame.boundary_values(bin, eta_max);
    let boundary_max = if index == bin.upper_index {
        upper_max
    } else {
        lower_max
    };

    let raw_sample = distribution.sample_with_random_number_in_subrange(random_number, boundary_max);
    rescale(bin, &frame, index, raw_sample).min(max_value)
}

fn rescale<D: TabularUnivariate>(
    bin: &Bin<'_, D>,
    frame: &UnitBaseFrame,
    index: usize,
    raw_sample: f64,
) -> f64 {
    let eta = frame.boundary_eta(bin, index == bin.upper_index, raw_sample);
    frame.intermediate_value(bin, eta)
}
