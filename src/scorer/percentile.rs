use crate::consts::{PERCENTILE_CEILING, PERCENTILE_FLOOR};
use crate::error::{DevScoreError, DsResult};
use serde::{Deserialize, Serialize};

/// Relative damping applied per z unit below the lowest knot.
const LOWER_TAIL_DAMPING: f64 = 0.05;
/// Percentile points gained per z unit above the highest knot.
const UPPER_TAIL_SLOPE: f64 = 0.005;

/// Standard normal CDF sampled at conventional z values (z, percentile).
const STANDARD_KNOTS: [(f64, f64); 29] = [
    (-3.50, 0.02),
    (-3.00, 0.13),
    (-2.58, 0.50),
    (-2.33, 1.00),
    (-2.05, 2.00),
    (-1.64, 5.00),
    (-1.28, 10.00),
    (-1.04, 15.00),
    (-0.84, 20.00),
    (-0.67, 25.00),
    (-0.52, 30.00),
    (-0.39, 35.00),
    (-0.25, 40.00),
    (-0.13, 45.00),
    (0.00, 50.00),
    (0.13, 55.00),
    (0.25, 60.00),
    (0.39, 65.00),
    (0.52, 70.00),
    (0.67, 75.00),
    (0.84, 80.00),
    (1.04, 85.00),
    (1.28, 90.00),
    (1.64, 95.00),
    (1.96, 97.50),
    (2.33, 99.00),
    (2.58, 99.50),
    (3.00, 99.87),
    (3.50, 99.98),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knot {
    pub z: f64,
    pub percentile: f64,
}

/// Monotone z -> percentile lookup with smoothstep easing between knots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileTable {
    knots: Vec<Knot>,
}

impl Default for PercentileTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[inline(always)]
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl PercentileTable {
    pub fn standard() -> Self {
        Self {
            knots: STANDARD_KNOTS
                .iter()
                .map(|&(z, percentile)| Knot { z, percentile })
                .collect(),
        }
    }

    /// Builds a custom table. Knots must be finite, strictly increasing in both
    /// z and percentile, and lie inside the reportable percentile range.
    pub fn from_knots(knots: Vec<Knot>) -> DsResult<Self> {
        let table = Self { knots };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> DsResult<()> {
        if self.knots.len() < 2 {
            return Err(DevScoreError::Validation(
                "percentile table needs at least two knots".to_string(),
            ));
        }
        for k in &self.knots {
            if !k.z.is_finite()
                || !k.percentile.is_finite()
                || k.percentile < PERCENTILE_FLOOR
                || k.percentile > PERCENTILE_CEILING
            {
                return Err(DevScoreError::Validation(format!(
                    "invalid knot ({}, {})",
                    k.z, k.percentile
                )));
            }
        }
        for pair in self.knots.windows(2) {
            if pair[1].z <= pair[0].z || pair[1].percentile <= pair[0].percentile {
                return Err(DevScoreError::Validation(format!(
                    "knots not strictly increasing at z = {}",
                    pair[1].z
                )));
            }
        }
        Ok(())
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// Unrounded percentile. Strictly increasing in `z` between the tails' caps.
    pub fn percentile_raw(&self, z: f64) -> f64 {
        let (Some(first), Some(last)) = (self.knots.first(), self.knots.last()) else {
            return 50.0;
        };
        if z.is_nan() {
            return 50.0;
        }

        if z < first.z {
            let damped = first.percentile * (1.0 + (z - first.z) * LOWER_TAIL_DAMPING);
            return damped.max(PERCENTILE_FLOOR);
        }
        if z >= last.z {
            let extended = last.percentile + (z - last.z) * UPPER_TAIL_SLOPE;
            return extended.min(PERCENTILE_CEILING);
        }

        // First knot strictly above z; segments are half-open [lo, hi).
        let hi_idx = self.knots.partition_point(|k| k.z <= z);
        let lo = self.knots[hi_idx - 1];
        let hi = self.knots[hi_idx];

        let t = (z - lo.z) / (hi.z - lo.z);
        lo.percentile + smoothstep(t) * (hi.percentile - lo.percentile)
    }

    /// Percentile rounded to two decimals.
    pub fn percentile_of(&self, z: f64) -> f64 {
        round_to(self.percentile_raw(z), 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_midpoint_eases() {
        let table = PercentileTable::standard();
        // halfway between 0.00 (50) and 0.13 (55): smoothstep(0.5) = 0.5
        let p = table.percentile_raw(0.065);
        assert!((p - 52.5).abs() < 1e-9);
    }

    #[test]
    fn test_tails_are_bounded() {
        let table = PercentileTable::standard();
        assert_eq!(table.percentile_of(-50.0), PERCENTILE_FLOOR);
        assert_eq!(table.percentile_of(50.0), PERCENTILE_CEILING);
        assert!(table.percentile_raw(4.0) > table.percentile_raw(3.5));
        assert!(table.percentile_raw(-4.0) < table.percentile_raw(-3.5));
    }

    #[test]
    fn test_rejects_non_monotone_knots() {
        let knots = vec![
            Knot { z: 0.0, percentile: 50.0 },
            Knot { z: 1.0, percentile: 40.0 },
        ];
        assert!(PercentileTable::from_knots(knots).is_err());
        assert!(PercentileTable::from_knots(vec![]).is_err());
    }
}
