use crate::consts::{ENRICHMENT_MAX, MIN_ACCOUNT_AGE_YEARS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw activity metrics for one developer at one point in time.
///
/// Every field defaults to zero, so a partially populated snapshot is always scoreable.
/// Counts are carried as `f64` so that hostile input (negative, NaN, infinite) can be
/// repaired by [`MetricsSnapshot::sanitized`] instead of rejected.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricsSnapshot {
    // === REPOSITORIES ===
    pub repos: f64,
    pub stars: f64,
    pub forks: f64,
    pub watchers: f64,
    pub gists: f64,
    /// Average repository size in KB.
    pub average_repo_size: f64,

    // === ACTIVITY ===
    pub commits: f64,
    pub average_commits_per_day: f64,
    pub contributions: f64,
    pub current_streak: f64,
    pub longest_streak: f64,
    /// Share of activity that happens on weekends, 0..1.
    pub weekend_activity_ratio: f64,

    // === COMMUNITY ===
    pub followers: f64,
    pub following: f64,
    pub organizations: f64,

    // === COLLABORATION ===
    pub pull_requests: f64,
    pub merged_pull_requests: f64,
    pub reviews: f64,
    pub issues: f64,

    pub account_age_years: f64,

    /// Language name to byte count. Ordered so entropy sums are reproducible.
    pub languages: BTreeMap<String, f64>,

    pub enrichment: Enrichment,
}

/// Optional pre-computed 0..10 sub-scores supplied by deeper analysis passes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Enrichment {
    pub documentation: Option<f64>,
    pub maintenance: Option<f64>,
    pub behavior: Option<f64>,
    pub career: Option<f64>,
}

impl Enrichment {
    pub fn is_empty(&self) -> bool {
        self.documentation.is_none()
            && self.maintenance.is_none()
            && self.behavior.is_none()
            && self.career.is_none()
    }

    fn sanitized(&self) -> Self {
        let fix = |v: Option<f64>| v.filter(|x| x.is_finite()).map(|x| x.clamp(0.0, ENRICHMENT_MAX));
        Self {
            documentation: fix(self.documentation),
            maintenance: fix(self.maintenance),
            behavior: fix(self.behavior),
            career: fix(self.career),
        }
    }
}

#[inline]
fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

impl MetricsSnapshot {
    /// Returns a copy where every count is finite and non-negative and the
    /// cross-field relations hold (merged <= PRs, longest streak >= current streak).
    pub fn sanitized(&self) -> Self {
        let pull_requests = non_negative(self.pull_requests);
        let current_streak = non_negative(self.current_streak);

        Self {
            repos: non_negative(self.repos),
            stars: non_negative(self.stars),
            forks: non_negative(self.forks),
            watchers: non_negative(self.watchers),
            gists: non_negative(self.gists),
            average_repo_size: non_negative(self.average_repo_size),
            commits: non_negative(self.commits),
            average_commits_per_day: non_negative(self.average_commits_per_day),
            contributions: non_negative(self.contributions),
            current_streak,
            longest_streak: non_negative(self.longest_streak).max(current_streak),
            weekend_activity_ratio: non_negative(self.weekend_activity_ratio).min(1.0),
            followers: non_negative(self.followers),
            following: non_negative(self.following),
            organizations: non_negative(self.organizations),
            pull_requests,
            merged_pull_requests: non_negative(self.merged_pull_requests).min(pull_requests),
            reviews: non_negative(self.reviews),
            issues: non_negative(self.issues),
            account_age_years: non_negative(self.account_age_years),
            languages: self
                .languages
                .iter()
                .filter_map(|(name, bytes)| {
                    let b = non_negative(*bytes);
                    (b > 0.0).then(|| (name.clone(), b))
                })
                .collect(),
            enrichment: self.enrichment.sanitized(),
        }
    }

    /// Account age used as the denominator of every per-year rate.
    #[inline]
    pub fn effective_age(&self) -> f64 {
        non_negative(self.account_age_years).max(MIN_ACCOUNT_AGE_YEARS)
    }

    /// Total commits: the reported total or the daily-average estimate, whichever is larger.
    /// Non-decreasing in both inputs.
    pub fn effective_commits(&self) -> f64 {
        let estimated = self.average_commits_per_day * 365.0 * self.effective_age();
        self.commits.max(estimated)
    }
}
