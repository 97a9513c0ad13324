//! Direct interpolation between bin boundaries.

use super::{Bin, Quantity, SecondarySample};
use tabulate_core::distribution::TabularUnivariate;

pub(super) fn lower_bound<D: TabularUnivariate>(bin: &Bin<'_, D>) -> f64 {
    bin.lower_distribution()
        .lower_bound()
        .min(bin.upper_distribution().lower_bound())
}

pub(super) fn upper_bound<D: TabularUnivariate>(bin: &Bin<'_, D>) -> f64 {
    bin.lower_distribution()
        .upper_bound()
        .max(bin.upper_distribution().upper_bound())
}

fn interpolate<D: TabularUnivariate>(bin: &Bin<'_, D>, lower: f64, upper: f64) -> f64 {
    if lower * upper > 0.0 {
        bin.interpolate_dependent(lower, upper)
    } else {
        lower + (upper - lower) * bin.beta
    }
}

pub(super) fn evaluate<D: TabularUnivariate>(bin: &Bin<'_, D>, y: f64, quantity: Quantity) -> f64 {
    let lower = quantity.of(bin.lower_distribution(), y);
    let upper = quantity.of(bin.upper_distribution(), y);
    interpolate(bin, lower, upper)
}

pub(super) fn evaluate_cdf<D: TabularUnivariate>(bin: &Bin<'_, D>, y: f64) -> f64 {
    let lower = bin.lower_distribution().evaluate_cdf(y);
    let upper = bin.upper_distribution().evaluate_cdf(y);
    interpolate(bin, lower, upper)
}

pub(super) fn sample<D: TabularUnivariate>(
    bin: &Bin<'_, D>,
    bin_random_number: f64,
    random_number: f64,
) -> SecondarySample {
    let (distribution, index) = bin.choose_boundary(bin_random_number);
    let sample = distribution.sample_with_random_number(random_number);

    SecondarySample {
        sample,
        raw_sample: sample,
        primary_bin_index: index,
    }
}

pub(super) fn sample_in_subrange<D: TabularUnivariate>(
    bin: &Bin<'_, D>,
    bin_random_number: f64,
    random_number: f64,
    max_value: f64,
) -> f64 {
    let (distribution, _) = bin.choose_boundary(bin_random_number);
    let max_value = max_value.min(distribution.upper_bound());
    distribution.sample_with_random_number_in_subrange(random_number, max_value)
}
