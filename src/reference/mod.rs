pub mod loader;

use crate::error::{DevScoreError, DsResult};
use crate::scorer::metrics::MetricKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Population statistics for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub p25: f64,
    pub p75: f64,
}

impl MetricStats {
    pub const fn new(mean: f64, median: f64, std_dev: f64, p25: f64, p75: f64) -> Self {
        Self {
            mean,
            median,
            std_dev,
            p25,
            p75,
        }
    }

    /// Baseline used for metrics the table does not know about.
    pub const CONSERVATIVE: MetricStats = MetricStats::new(0.0, 0.0, 1.0, 0.0, 1.0);

    #[inline]
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }

    pub fn validate(&self, name: &str) -> DsResult<()> {
        let all = [self.mean, self.median, self.std_dev, self.p25, self.p75];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(DevScoreError::Validation(format!(
                "{}: statistics must be finite",
                name
            )));
        }
        if self.std_dev < 0.0 {
            return Err(DevScoreError::Validation(format!(
                "{}: negative std_dev {}",
                name, self.std_dev
            )));
        }
        if self.p25 > self.p75 {
            return Err(DevScoreError::Validation(format!(
                "{}: p25 {} exceeds p75 {}",
                name, self.p25, self.p75
            )));
        }
        Ok(())
    }
}

impl Default for MetricStats {
    fn default() -> Self {
        Self::CONSERVATIVE
    }
}

/// Versioned, read-only table of population statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceModel {
    pub version: String,
    stats: BTreeMap<MetricKey, MetricStats>,
    /// Rows whose metric name did not match a known metric. Reachable through `get_by_name`.
    extra: BTreeMap<String, MetricStats>,
}

pub const BUILTIN_VERSION: &str = "population-2024.1";

impl Default for ReferenceModel {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceModel {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            stats: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Frozen population table shipped with the crate.
    pub fn builtin() -> Self {
        use MetricKey::*;
        let rows = [
            (ReposPerYear, MetricStats::new(4.8, 3.2, 8.5, 1.5, 6.8)),
            (AvgRepoSize, MetricStats::new(420.0, 180.0, 1250.0, 45.0, 580.0)),
            (StarsPerRepo, MetricStats::new(1.8, 0.5, 12.5, 0.1, 1.5)),
            (Gists, MetricStats::new(8.5, 3.0, 24.0, 1.0, 10.0)),
            (LogStars, MetricStats::new(0.85, 0.48, 0.95, 0.18, 1.15)),
            (LogForks, MetricStats::new(0.45, 0.18, 0.68, 0.08, 0.58)),
            (LogFollowers, MetricStats::new(1.05, 0.60, 0.88, 0.30, 1.45)),
            (ForksPerRepo, MetricStats::new(0.9, 0.3, 4.2, 0.1, 1.2)),
            (Watchers, MetricStats::new(15.0, 4.0, 95.0, 1.0, 12.0)),
            (CommitsPerYear, MetricStats::new(387.0, 245.0, 612.0, 85.0, 520.0)),
            (CurrentStreak, MetricStats::new(12.0, 7.0, 22.0, 2.0, 18.0)),
            (LongestStreak, MetricStats::new(28.0, 14.0, 48.0, 5.0, 35.0)),
            (ContributionsPerYear, MetricStats::new(450.0, 280.0, 720.0, 100.0, 600.0)),
            (StreakRatio, MetricStats::new(0.35, 0.25, 0.28, 0.10, 0.55)),
            (PullRequests, MetricStats::new(28.0, 12.0, 78.0, 3.0, 35.0)),
            (MergeRate, MetricStats::new(0.72, 0.75, 0.18, 0.63, 0.87)),
            (Reviews, MetricStats::new(18.0, 6.0, 52.0, 2.0, 22.0)),
            (ReviewRatio, MetricStats::new(0.65, 0.40, 1.20, 0.15, 0.85)),
            (Issues, MetricStats::new(24.0, 8.0, 68.0, 2.0, 28.0)),
            (Organizations, MetricStats::new(2.8, 2.0, 4.2, 1.0, 4.0)),
        ];

        let mut model = Self::new(BUILTIN_VERSION);
        for (key, stats) in rows {
            model.insert(key, stats);
        }
        model
    }

    pub fn insert(&mut self, key: MetricKey, stats: MetricStats) {
        self.stats.insert(key, stats);
    }

    pub fn insert_named(&mut self, name: &str, stats: MetricStats) {
        match MetricKey::from_str(name) {
            Ok(key) => self.insert(key, stats),
            Err(_) => {
                self.extra.insert(name.to_string(), stats);
            }
        }
    }

    /// Statistics for `key`, or the conservative baseline if the table lacks it.
    #[inline]
    pub fn get(&self, key: MetricKey) -> MetricStats {
        self.stats.get(&key).copied().unwrap_or_default()
    }

    pub fn get_by_name(&self, name: &str) -> MetricStats {
        match MetricKey::from_str(name) {
            Ok(key) => self.get(key),
            Err(_) => self.extra.get(name).copied().unwrap_or_default(),
        }
    }

    pub fn contains(&self, key: MetricKey) -> bool {
        self.stats.contains_key(&key)
    }

    /// Known metrics with no row in this table.
    pub fn missing(&self) -> Vec<MetricKey> {
        MetricKey::iter().filter(|k| !self.contains(*k)).collect()
    }

    pub fn extra_names(&self) -> impl Iterator<Item = &str> {
        self.extra.keys().map(|s| s.as_str())
    }

    /// Every row, known metrics first, keyed by metric name.
    pub fn rows(&self) -> impl Iterator<Item = (String, MetricStats)> + '_ {
        self.stats
            .iter()
            .map(|(k, s)| (k.to_string(), *s))
            .chain(self.extra.iter().map(|(n, s)| (n.clone(), *s)))
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn validate(&self) -> DsResult<()> {
        if self.version.trim().is_empty() {
            return Err(DevScoreError::Validation(
                "reference model version label is empty".to_string(),
            ));
        }
        for (key, stats) in &self.stats {
            stats.validate(&key.to_string())?;
        }
        for (name, stats) in &self.extra {
            stats.validate(name)?;
        }
        Ok(())
    }
}
