use crate::consts::{IQR_TO_SIGMA, STAT_EPSILON, Z_CLAMP};
use crate::reference::{MetricStats, ReferenceModel};
use crate::scorer::metrics::MetricVector;

/// Robust z-score of `value` against a population.
///
/// Uses the median and interquartile range, rescaled so one unit matches one
/// standard deviation of a normal population. A degenerate IQR falls back to the
/// classic mean/std-dev form with the std-dev floored at 1. Result is clamped to
/// `[-Z_CLAMP, Z_CLAMP]`; non-finite input is treated as 0.
#[inline]
pub fn robust_z(value: f64, stats: &MetricStats) -> f64 {
    let value = if value.is_finite() { value } else { 0.0 };
    let iqr = stats.iqr();

    let z = if iqr.abs() <= STAT_EPSILON {
        (value - stats.mean) / stats.std_dev.max(1.0)
    } else {
        ((value - stats.median) / iqr) * IQR_TO_SIGMA
    };

    if z.is_finite() {
        z.clamp(-Z_CLAMP, Z_CLAMP)
    } else {
        0.0
    }
}

/// Normalizes every metric of a vector against the reference table.
pub fn normalize_vector(vector: &MetricVector, reference: &ReferenceModel) -> MetricVector {
    MetricVector::from_fn(|key| robust_z(vector.get(key), &reference.get(key)))
}
