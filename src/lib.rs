pub mod api;
pub mod config;
pub mod consts;
pub mod error;
pub mod reference;
pub mod scorer;
pub mod snapshot;

pub use api::ScoringState;
pub use config::{ModelConfig, ModelVersion};
pub use error::{DevScoreError, DsResult};
pub use reference::{MetricStats, ReferenceModel};
pub use scorer::{ScoringEngine, ScoringResult};
pub use snapshot::{Enrichment, MetricsSnapshot};
