#![allow(dead_code)]

use devscore::reference::ReferenceModel;
use devscore::scorer::{MetricVector, ScoringEngine};
use devscore::snapshot::MetricsSnapshot;
use std::collections::BTreeMap;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn engine() -> ScoringEngine {
    ScoringEngine::canonical()
}

/// Maintainer of a popular project: 15 repos over 3 years.
pub fn maintainer_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        stars: 5000.0,
        forks: 1200.0,
        repos: 15.0,
        account_age_years: 3.0,
        commits: 2400.0,
        current_streak: 45.0,
        pull_requests: 120.0,
        merged_pull_requests: 108.0,
        ..Default::default()
    }
}

/// Fully populated, middle-of-the-road profile.
pub fn steady_snapshot() -> MetricsSnapshot {
    let mut languages = BTreeMap::new();
    languages.insert("Rust".to_string(), 120_000.0);
    languages.insert("Python".to_string(), 40_000.0);
    languages.insert("Shell".to_string(), 5_000.0);

    MetricsSnapshot {
        repos: 22.0,
        stars: 140.0,
        forks: 31.0,
        watchers: 18.0,
        gists: 4.0,
        average_repo_size: 650.0,
        commits: 3100.0,
        contributions: 3600.0,
        current_streak: 9.0,
        longest_streak: 41.0,
        weekend_activity_ratio: 0.2,
        followers: 85.0,
        following: 30.0,
        organizations: 3.0,
        pull_requests: 64.0,
        merged_pull_requests: 51.0,
        reviews: 40.0,
        issues: 19.0,
        account_age_years: 6.0,
        languages,
        ..Default::default()
    }
}

pub fn median_vector(reference: &ReferenceModel) -> MetricVector {
    MetricVector::from_fn(|k| reference.get(k).median)
}

pub fn mean_vector(reference: &ReferenceModel) -> MetricVector {
    MetricVector::from_fn(|k| reference.get(k).mean)
}

/// Roughly p99 on every metric: two IQRs above p75, well inside the z clamp.
pub fn top_tail_vector(reference: &ReferenceModel) -> MetricVector {
    MetricVector::from_fn(|k| {
        let s = reference.get(k);
        s.p75 + 2.0 * s.iqr()
    })
}
