use crate::config::DerivationParams;
use crate::snapshot::MetricsSnapshot;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

/// Derived metrics the reference model carries population statistics for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    EnumCountMacro,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    // Code quality
    ReposPerYear,
    AvgRepoSize,
    StarsPerRepo,
    Gists,
    // Impact
    LogStars,
    LogForks,
    LogFollowers,
    ForksPerRepo,
    Watchers,
    // Consistency
    CommitsPerYear,
    CurrentStreak,
    LongestStreak,
    ContributionsPerYear,
    StreakRatio,
    // Collaboration
    PullRequests,
    MergeRate,
    Reviews,
    ReviewRatio,
    Issues,
    Organizations,
}

impl MetricKey {
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Dense per-metric array indexed by [`MetricKey`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricVector {
    values: [f64; MetricKey::COUNT],
}

impl Default for MetricVector {
    fn default() -> Self {
        Self {
            values: [0.0; MetricKey::COUNT],
        }
    }
}

#[inline]
fn log_count(x: f64) -> f64 {
    if x > 0.0 {
        (x + 1.0).log10()
    } else {
        0.0
    }
}

impl MetricVector {
    pub fn from_fn<F: FnMut(MetricKey) -> f64>(mut f: F) -> Self {
        let mut v = Self::default();
        for key in MetricKey::iter() {
            v.values[key.index()] = f(key);
        }
        v
    }

    /// Derives rates, ratios and log transforms from a sanitized snapshot.
    pub fn from_snapshot(s: &MetricsSnapshot, params: &DerivationParams) -> Self {
        let age = s.effective_age();
        let per_repo = |x: f64| if s.repos > 0.0 { x / s.repos } else { 0.0 };

        let merge_rate = if s.pull_requests > params.merge_rate_min_prs {
            s.merged_pull_requests / s.pull_requests
        } else {
            params.default_merge_rate
        };
        let review_ratio = if s.pull_requests > 0.0 {
            s.reviews / s.pull_requests
        } else {
            0.0
        };
        let streak_ratio = if s.longest_streak > 0.0 {
            s.current_streak / s.longest_streak
        } else {
            0.0
        };

        Self::from_fn(|key| match key {
            MetricKey::ReposPerYear => s.repos / age,
            MetricKey::AvgRepoSize => s.average_repo_size,
            MetricKey::StarsPerRepo => per_repo(s.stars),
            MetricKey::Gists => s.gists,
            MetricKey::LogStars => log_count(s.stars),
            MetricKey::LogForks => log_count(s.forks),
            MetricKey::LogFollowers => log_count(s.followers),
            MetricKey::ForksPerRepo => per_repo(s.forks),
            MetricKey::Watchers => s.watchers,
            MetricKey::CommitsPerYear => s.effective_commits() / age,
            MetricKey::CurrentStreak => s.current_streak,
            MetricKey::LongestStreak => s.longest_streak,
            MetricKey::ContributionsPerYear => s.contributions / age,
            MetricKey::StreakRatio => streak_ratio,
            MetricKey::PullRequests => s.pull_requests,
            MetricKey::MergeRate => merge_rate,
            MetricKey::Reviews => s.reviews,
            MetricKey::ReviewRatio => review_ratio,
            MetricKey::Issues => s.issues,
            MetricKey::Organizations => s.organizations,
        })
    }

    #[inline(always)]
    pub fn get(&self, key: MetricKey) -> f64 {
        self.values[key.index()]
    }

    #[inline(always)]
    pub fn set(&mut self, key: MetricKey, value: f64) {
        self.values[key.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, f64)> + '_ {
        MetricKey::iter().map(move |k| (k, self.values[k.index()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_metric_key_names_round_trip() {
        for key in MetricKey::iter() {
            let name = key.to_string();
            assert_eq!(MetricKey::from_str(&name).unwrap(), key);
        }
        assert_eq!(MetricKey::LogStars.to_string(), "log_stars");
    }

    #[test]
    fn test_merge_rate_defaults_below_threshold() {
        let params = DerivationParams::default();
        let snap = MetricsSnapshot {
            pull_requests: 3.0,
            merged_pull_requests: 0.0,
            ..Default::default()
        };
        let v = MetricVector::from_snapshot(&snap, &params);
        assert_eq!(v.get(MetricKey::MergeRate), 0.70);

        let snap = MetricsSnapshot {
            pull_requests: 4.0,
            merged_pull_requests: 2.0,
            ..Default::default()
        };
        let v = MetricVector::from_snapshot(&snap, &params);
        assert_eq!(v.get(MetricKey::MergeRate), 0.5);
    }

    #[test]
    fn test_commit_fallback_from_daily_average() {
        let snap = MetricsSnapshot {
            average_commits_per_day: 2.0,
            account_age_years: 2.0,
            ..Default::default()
        };
        let v = MetricVector::from_snapshot(&snap, &DerivationParams::default());
        assert!((v.get(MetricKey::CommitsPerYear) - 730.0).abs() < 1e-9);
    }

    #[test]
    fn test_per_repo_ratios_are_zero_without_repos() {
        let snap = MetricsSnapshot {
            stars: 800.0,
            forks: 90.0,
            ..Default::default()
        };
        let v = MetricVector::from_snapshot(&snap, &DerivationParams::default());
        assert_eq!(v.get(MetricKey::StarsPerRepo), 0.0);
        assert_eq!(v.get(MetricKey::ForksPerRepo), 0.0);
        assert!(v.get(MetricKey::LogStars) > 2.9);

        let snap = MetricsSnapshot { repos: 4.0, ..snap };
        let v = MetricVector::from_snapshot(&snap, &DerivationParams::default());
        assert_eq!(v.get(MetricKey::StarsPerRepo), 200.0);
        assert_eq!(v.get(MetricKey::ForksPerRepo), 22.5);
    }

    #[test]
    fn test_zero_snapshot_is_finite() {
        let v = MetricVector::from_snapshot(&MetricsSnapshot::default(), &DerivationParams::default());
        for (key, value) in v.iter() {
            assert!(value.is_finite(), "{} not finite", key);
        }
        assert_eq!(v.get(MetricKey::LogStars), 0.0);
        assert_eq!(v.get(MetricKey::StreakRatio), 0.0);
    }
}
