use crate::config::AdjustmentParams;
use crate::scorer::metrics::{MetricKey, MetricVector};
use crate::snapshot::MetricsSnapshot;
use std::collections::BTreeMap;

/// Multiplicative and additive corrections applied on top of the weighted composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustments {
    pub quality_multiplier: f64,
    pub impact_amplifier: f64,
    /// Normalized language entropy, 0..1.
    pub diversity: f64,
}

impl Adjustments {
    pub fn neutral() -> Self {
        Self {
            quality_multiplier: 1.0,
            impact_amplifier: 1.0,
            diversity: 0.0,
        }
    }

    pub fn evaluate(s: &MetricsSnapshot, v: &MetricVector, params: &AdjustmentParams) -> Self {
        Self {
            quality_multiplier: quality_multiplier(s, v, params),
            impact_amplifier: impact_amplifier(s, params),
            diversity: language_diversity(&s.languages),
        }
    }

    /// Applies both multipliers and the diversity bonus to a weighted composite z.
    ///
    /// Multipliers scale the magnitude in the direction of the sign, so a bonus
    /// always raises the composite and a penalty always lowers it.
    pub fn apply(&self, composite: f64, params: &AdjustmentParams) -> f64 {
        let q = scale_signed(composite, self.quality_multiplier, params.quality_strength);
        let a = scale_signed(q, self.impact_amplifier, params.amplifier_strength);
        a + self.diversity * params.diversity_weight
    }
}

#[inline]
fn scale_signed(z: f64, factor: f64, strength: f64) -> f64 {
    z + z.abs() * (factor - 1.0) * strength
}

pub fn quality_multiplier(s: &MetricsSnapshot, v: &MetricVector, params: &AdjustmentParams) -> f64 {
    let spr = v.get(MetricKey::StarsPerRepo);
    let fpr = v.get(MetricKey::ForksPerRepo);
    let merge_rate = v.get(MetricKey::MergeRate);
    let review_ratio = v.get(MetricKey::ReviewRatio);
    let engagement = spr + fpr;
    let repos = s.repos;
    let size = s.average_repo_size;

    let mut m: f64 = 1.0;

    if engagement > 2.0 && repos >= 3.0 {
        m += 0.08;
    } else if engagement > 1.0 && repos >= 5.0 {
        m += 0.05;
    } else if engagement > 0.5 && repos >= 10.0 {
        m += 0.03;
    }

    if merge_rate > 0.85 {
        m += 0.06;
    } else if merge_rate > 0.75 {
        m += 0.03;
    }

    if review_ratio > 1.0 {
        m += 0.04;
    } else if review_ratio > 0.5 {
        m += 0.02;
    }

    if size > 500.0 {
        m += 0.03;
    }

    // Many repos with almost no stars, or many tiny repos
    if spr < 0.1 && repos > 10.0 {
        m -= 0.05;
    }
    if size < 20.0 && repos > 5.0 {
        m -= 0.04;
    }

    m.clamp(params.quality_min, params.quality_max)
}

pub fn impact_amplifier(s: &MetricsSnapshot, params: &AdjustmentParams) -> f64 {
    let mut a: f64 = 1.0;

    if s.followers > 1000.0 {
        a += 0.10;
    } else if s.followers > 500.0 {
        a += 0.06;
    } else if s.followers > 100.0 {
        a += 0.03;
    }

    let following_ratio = if s.followers > 0.0 {
        s.following / s.followers
    } else {
        1.0
    };
    if following_ratio < 0.5 && s.followers > 50.0 {
        a += 0.04;
    }

    if s.stars > 10_000.0 {
        a += 0.08;
    } else if s.stars > 1000.0 {
        a += 0.04;
    }

    if s.organizations >= 5.0 {
        a += 0.03;
    }

    a.clamp(params.amplifier_min, params.amplifier_max)
}

/// Shannon entropy of the language byte distribution divided by its maximum, log2(n).
/// Zero for fewer than two languages.
pub fn language_diversity(languages: &BTreeMap<String, f64>) -> f64 {
    let bytes: Vec<f64> = languages
        .values()
        .copied()
        .filter(|b| b.is_finite() && *b > 0.0)
        .collect();
    if bytes.len() < 2 {
        return 0.0;
    }
    let total: f64 = bytes.iter().sum();
    let entropy: f64 = bytes
        .iter()
        .map(|b| {
            let p = b / total;
            -p * p.log2()
        })
        .sum();
    (entropy / (bytes.len() as f64).log2()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DerivationParams;

    fn vector(s: &MetricsSnapshot) -> MetricVector {
        MetricVector::from_snapshot(s, &DerivationParams::default())
    }

    #[test]
    fn test_neutral_apply_is_identity() {
        let params = AdjustmentParams::default();
        let n = Adjustments::neutral();
        assert_eq!(n.apply(1.25, &params), 1.25);
        assert_eq!(n.apply(-0.75, &params), -0.75);
    }

    #[test]
    fn test_bonus_raises_negative_composite() {
        let params = AdjustmentParams::default();
        let adj = Adjustments {
            quality_multiplier: 1.15,
            ..Adjustments::neutral()
        };
        assert!(adj.apply(-1.0, &params) > -1.0);
        assert!(adj.apply(1.0, &params) > 1.0);
    }

    #[test]
    fn test_quality_multiplier_saturates() {
        let s = MetricsSnapshot {
            repos: 20.0,
            stars: 400.0,
            forks: 100.0,
            pull_requests: 100.0,
            merged_pull_requests: 95.0,
            reviews: 200.0,
            average_repo_size: 900.0,
            ..Default::default()
        };
        // 1 + .08 + .06 + .04 + .03 = 1.21, clamped
        let m = quality_multiplier(&s, &vector(&s), &AdjustmentParams::default());
        assert_eq!(m, 1.15);
    }

    #[test]
    fn test_quality_penalties() {
        let s = MetricsSnapshot {
            repos: 30.0,
            average_repo_size: 5.0,
            ..Default::default()
        };
        let m = quality_multiplier(&s, &vector(&s), &AdjustmentParams::default());
        assert!((m - 0.91).abs() < 1e-12);
    }

    #[test]
    fn test_impact_amplifier_steps() {
        let params = AdjustmentParams::default();
        let s = MetricsSnapshot {
            followers: 600.0,
            following: 20.0,
            stars: 2000.0,
            ..Default::default()
        };
        assert!((impact_amplifier(&s, &params) - 1.12).abs() < 1e-12);
        assert_eq!(impact_amplifier(&MetricsSnapshot::default(), &params), 1.0);
    }

    #[test]
    fn test_diversity_even_split_is_one() {
        let mut langs = BTreeMap::new();
        langs.insert("Rust".to_string(), 500.0);
        langs.insert("Go".to_string(), 500.0);
        langs.insert("C".to_string(), 500.0);
        assert!((language_diversity(&langs) - 1.0).abs() < 1e-12);

        let mut single = BTreeMap::new();
        single.insert("Rust".to_string(), 10.0);
        assert_eq!(language_diversity(&single), 0.0);
    }
}
