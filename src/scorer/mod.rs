pub mod adjustments;
pub mod builder;
pub mod components;
pub mod engine;
pub mod metrics;
pub mod normalize;
pub mod outlier;
pub mod percentile;
pub mod report;
pub mod types;

pub use self::adjustments::Adjustments;
pub use self::builder::EngineBuildParams;
pub use self::metrics::{MetricKey, MetricVector};
pub use self::percentile::PercentileTable;
pub use self::types::{
    Component, ComponentScore, ExperienceLevel, Grade, OutlierTier, ScoringMethod, ScoringResult,
};
use crate::config::ModelConfig;
use crate::reference::ReferenceModel;
use crate::snapshot::MetricsSnapshot;
use rayon::prelude::*;

/// Immutable scoring pipeline: configuration, population table and percentile map.
///
/// Cheap to share behind an `Arc`; every method takes `&self` and is side-effect free.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    pub config: ModelConfig,
    pub reference: ReferenceModel,
    pub percentiles: PercentileTable,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::canonical()
    }
}

impl ScoringEngine {
    /// Current model version with the builtin population table.
    pub fn canonical() -> Self {
        Self {
            config: ModelConfig::default(),
            reference: ReferenceModel::builtin(),
            percentiles: PercentileTable::standard(),
        }
    }

    pub fn compute_score(&self, snapshot: &MetricsSnapshot) -> ScoringResult {
        engine::compute_score(self, snapshot)
    }

    /// Scores a pre-derived metric vector with explicit adjustments.
    /// Count-based labels (experience, descriptions, sample size) see an empty snapshot.
    pub fn score_vector(&self, vector: &MetricVector, adjustments: &Adjustments) -> ScoringResult {
        engine::score_prepared(self, &MetricsSnapshot::default(), vector, adjustments)
    }

    /// Scores many snapshots in parallel. Output order matches input order.
    pub fn score_batch(&self, snapshots: &[MetricsSnapshot]) -> Vec<ScoringResult> {
        snapshots.par_iter().map(|s| self.compute_score(s)).collect()
    }

    pub fn normalized(&self, vector: &MetricVector) -> MetricVector {
        normalize::normalize_vector(vector, &self.reference)
    }
}
