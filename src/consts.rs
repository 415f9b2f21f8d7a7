/// Scales an IQR-based deviation so it is comparable to a standard-normal z.
/// For a normal distribution the IQR spans 1.349 sigma, and 1 / 1.349 = 0.7413.
pub const IQR_TO_SIGMA: f64 = 0.7413;

/// Robust z-scores are clamped to +/- this many sigma.
pub const Z_CLAMP: f64 = 5.0;

/// Account age floor (years). Keeps per-year rates finite for brand new accounts.
pub const MIN_ACCOUNT_AGE_YEARS: f64 = 0.5;

/// Floor for any denominator derived from population statistics.
pub const STAT_EPSILON: f64 = 1e-9;

/// Lowest percentile the mapper will ever report.
pub const PERCENTILE_FLOOR: f64 = 0.01;

/// Highest percentile the mapper will ever report.
pub const PERCENTILE_CEILING: f64 = 99.99;

/// Enrichment sub-scores are reported on a 0..10 scale.
pub const ENRICHMENT_MAX: f64 = 10.0;

/// Tolerance used when validating that weight sets sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.96;
