use crate::config::ModelVersion;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum Component {
    CodeQuality,
    Impact,
    Consistency,
    Collaboration,
}

impl Component {
    /// Human-facing name used in strengths and improvements.
    pub fn label(self) -> &'static str {
        match self {
            Component::CodeQuality => "Code Quality",
            Component::Impact => "Community Impact",
            Component::Consistency => "Consistency",
            Component::Collaboration => "Collaboration",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
pub enum Grade {
    #[strum(serialize = "S+")]
    #[serde(rename = "S+")]
    SPlus,
    S,
    A,
    #[strum(serialize = "B+")]
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    D,
    F,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
pub enum ExperienceLevel {
    Elite,
    Principal,
    Senior,
    #[strum(serialize = "Mid-Level")]
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Junior,
    Beginner,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum OutlierTier {
    Typical,
    AboveAverage,
    Exceptional,
    Elite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    /// Derived from public counts only.
    Statistical,
    /// At least one pre-computed sub-score was blended in.
    Enriched,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScore {
    /// Component percentile, 0..100.
    pub score: f64,
    pub z_score: f64,
    pub percentile: f64,
    pub weight: f64,
    /// `z_score * weight`, the share this component adds to the composite.
    pub contribution: f64,
    pub source: ScoringMethod,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    pub code_quality: ComponentScore,
    pub impact: ComponentScore,
    pub consistency: ComponentScore,
    pub collaboration: ComponentScore,
}

impl ComponentScores {
    pub fn get(&self, component: Component) -> &ComponentScore {
        match component {
            Component::CodeQuality => &self.code_quality,
            Component::Impact => &self.impact,
            Component::Consistency => &self.consistency,
            Component::Collaboration => &self.collaboration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub model_version: ModelVersion,
    pub reference_version: String,
    pub scoring_method: ScoringMethod,

    // Aggregation
    pub composite_z: f64,
    pub outlier_distance: f64,
    pub outlier_tier: OutlierTier,

    // Adjustments
    pub diversity_score: f64,
    pub quality_multiplier: f64,
    pub impact_amplifier: f64,

    // Confidence
    pub sample_size: f64,
    pub standard_error: f64,
    pub confidence_interval: (f64, f64),

    pub breakdown: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub overall_score: f64,
    pub grade: Grade,
    pub percentile: f64,
    pub experience_level: ExperienceLevel,
    pub components: ComponentScores,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub diagnostics: Diagnostics,
}
