use crate::consts::WEIGHT_SUM_TOLERANCE;
use crate::error::{DevScoreError, DsResult};
use crate::scorer::metrics::MetricKey;
use crate::scorer::types::Component;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::info;

/// Upper bound on the additive diversity term (in z units).
pub const DIVERSITY_BONUS_MAX: f64 = 0.25;

/// Frozen model generations. Results from different versions are not comparable.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ModelVersion {
    /// Legacy: weighted blend of component percentiles, no multipliers.
    V5,
    /// Canonical: weighted composite z with adjustments, mapped once to a percentile.
    #[default]
    V6,
}

/// How the four component results are folded into the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CombinationMode {
    CompositeZ,
    PercentileBlend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub version: ModelVersion,
    pub combination: CombinationMode,
    pub weights: ComponentWeights,
    pub recipes: ComponentRecipes,
    pub adjustments: AdjustmentParams,
    pub enrichment: EnrichmentParams,
    pub derivation: DerivationParams,
    pub ranking: RankingThresholds,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::for_version(ModelVersion::V6)
    }
}

impl ModelConfig {
    pub fn for_version(version: ModelVersion) -> Self {
        match version {
            ModelVersion::V6 => Self {
                version,
                combination: CombinationMode::CompositeZ,
                weights: ComponentWeights::default(),
                recipes: ComponentRecipes::default(),
                adjustments: AdjustmentParams::default(),
                enrichment: EnrichmentParams::default(),
                derivation: DerivationParams::default(),
                ranking: RankingThresholds::default(),
            },
            ModelVersion::V5 => Self {
                version,
                combination: CombinationMode::PercentileBlend,
                weights: ComponentWeights {
                    code_quality: 0.30,
                    impact: 0.35,
                    consistency: 0.20,
                    collaboration: 0.15,
                },
                recipes: ComponentRecipes::default(),
                adjustments: AdjustmentParams::default(),
                enrichment: EnrichmentParams::default(),
                derivation: DerivationParams::default(),
                ranking: RankingThresholds::default(),
            },
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: ModelConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!(
            "Loaded model config {:?} (version {})",
            path, config.version
        );
        Ok(config)
    }

    /// Rejects weight sets and parameters that would break boundedness or monotonicity.
    pub fn validate(&self) -> DsResult<()> {
        check_weight_sum("component weights", &self.weights.as_array())?;
        for w in self.weights.as_array() {
            if !w.is_finite() || w < 0.0 {
                return Err(DevScoreError::Config(format!(
                    "component weight {} must be finite and non-negative",
                    w
                )));
            }
        }

        for (component, recipe) in self.recipes.iter() {
            if recipe.is_empty() {
                return Err(DevScoreError::Config(format!(
                    "recipe for {} is empty",
                    component
                )));
            }
            if let Some(bad) = recipe.iter().find(|m| !m.weight.is_finite() || m.weight < 0.0) {
                return Err(DevScoreError::Config(format!(
                    "sub-weight for {} in {} must be finite and non-negative",
                    bad.metric, component
                )));
            }
            let weights: Vec<f64> = recipe.iter().map(|m| m.weight).collect();
            check_weight_sum(&format!("{} sub-weights", component), &weights)?;
        }

        self.adjustments.validate()?;
        self.enrichment.validate()?;
        self.ranking.validate()?;

        if !(0.0..=1.0).contains(&self.derivation.default_merge_rate) {
            return Err(DevScoreError::Config(
                "default_merge_rate must lie in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_weight_sum(label: &str, weights: &[f64]) -> DsResult<()> {
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(DevScoreError::Config(format!(
            "{} sum to {:.6}, expected 1.0",
            label, sum
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComponentWeights {
    pub code_quality: f64,
    pub impact: f64,
    pub consistency: f64,
    pub collaboration: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            code_quality: 0.28,
            impact: 0.38,
            consistency: 0.19,
            collaboration: 0.15,
        }
    }
}

impl ComponentWeights {
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::CodeQuality => self.code_quality,
            Component::Impact => self.impact,
            Component::Consistency => self.consistency,
            Component::Collaboration => self.collaboration,
        }
    }

    /// Ordered like `Component::iter()`.
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.code_quality,
            self.impact,
            self.consistency,
            self.collaboration,
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightedMetric {
    pub metric: MetricKey,
    pub weight: f64,
}

const fn wm(metric: MetricKey, weight: f64) -> WeightedMetric {
    WeightedMetric { metric, weight }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComponentRecipes {
    pub code_quality: Vec<WeightedMetric>,
    pub impact: Vec<WeightedMetric>,
    pub consistency: Vec<WeightedMetric>,
    pub collaboration: Vec<WeightedMetric>,
}

impl Default for ComponentRecipes {
    fn default() -> Self {
        use MetricKey::*;
        Self {
            code_quality: vec![
                wm(ReposPerYear, 0.40),
                wm(AvgRepoSize, 0.25),
                wm(StarsPerRepo, 0.25),
                wm(Gists, 0.10),
            ],
            impact: vec![
                wm(LogStars, 0.40),
                wm(LogForks, 0.25),
                wm(LogFollowers, 0.15),
                wm(ForksPerRepo, 0.12),
                wm(Watchers, 0.08),
            ],
            consistency: vec![
                wm(CommitsPerYear, 0.35),
                wm(CurrentStreak, 0.30),
                wm(LongestStreak, 0.15),
                wm(ContributionsPerYear, 0.12),
                wm(StreakRatio, 0.08),
            ],
            collaboration: vec![
                wm(PullRequests, 0.28),
                wm(MergeRate, 0.22),
                wm(Reviews, 0.20),
                wm(ReviewRatio, 0.12),
                wm(Issues, 0.10),
                wm(Organizations, 0.08),
            ],
        }
    }
}

impl ComponentRecipes {
    pub fn get(&self, component: Component) -> &[WeightedMetric] {
        match component {
            Component::CodeQuality => &self.code_quality,
            Component::Impact => &self.impact,
            Component::Consistency => &self.consistency,
            Component::Collaboration => &self.collaboration,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Component, &[WeightedMetric])> {
        use strum::IntoEnumIterator;
        Component::iter().map(move |c| (c, self.get(c)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdjustmentParams {
    // === QUALITY MULTIPLIER ===
    pub quality_strength: f64,
    pub quality_min: f64,
    pub quality_max: f64,

    // === IMPACT AMPLIFIER ===
    pub amplifier_strength: f64,
    pub amplifier_min: f64,
    pub amplifier_max: f64,

    // === DIVERSITY ===
    pub diversity_weight: f64,
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self {
            quality_strength: 0.15,
            quality_min: 0.80,
            quality_max: 1.15,
            amplifier_strength: 0.10,
            amplifier_min: 0.90,
            amplifier_max: 1.12,
            diversity_weight: 0.05,
        }
    }
}

impl AdjustmentParams {
    fn validate(&self) -> DsResult<()> {
        for (name, s) in [
            ("quality_strength", self.quality_strength),
            ("amplifier_strength", self.amplifier_strength),
        ] {
            if !(0.0..=1.0).contains(&s) {
                return Err(DevScoreError::Config(format!(
                    "{} must lie in [0, 1], got {}",
                    name, s
                )));
            }
        }
        if !(self.quality_min <= 1.0 && 1.0 <= self.quality_max && self.quality_min > 0.0) {
            return Err(DevScoreError::Config(format!(
                "quality multiplier range [{}, {}] must bracket 1.0",
                self.quality_min, self.quality_max
            )));
        }
        if !(self.amplifier_min <= 1.0 && 1.0 <= self.amplifier_max && self.amplifier_min > 0.0)
        {
            return Err(DevScoreError::Config(format!(
                "impact amplifier range [{}, {}] must bracket 1.0",
                self.amplifier_min, self.amplifier_max
            )));
        }
        if !(0.0..=DIVERSITY_BONUS_MAX).contains(&self.diversity_weight) {
            return Err(DevScoreError::Config(format!(
                "diversity_weight must lie in [0, {}], got {}",
                DIVERSITY_BONUS_MAX, self.diversity_weight
            )));
        }
        Ok(())
    }
}

/// Controls how pre-computed 0..10 sub-scores are folded into component z-scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnrichmentParams {
    /// Share of the component z taken from the enrichment term when one is present.
    pub blend: f64,
    /// Documentation vs maintenance split inside the code quality enrichment.
    pub documentation_share: f64,
    /// Sub-score that maps to z = 0.
    pub midpoint: f64,
    /// Sub-score points per z unit.
    pub scale: f64,
}

impl Default for EnrichmentParams {
    fn default() -> Self {
        Self {
            blend: 0.30,
            documentation_share: 0.40,
            midpoint: 5.0,
            scale: 1.5,
        }
    }
}

impl EnrichmentParams {
    fn validate(&self) -> DsResult<()> {
        if !(0.0..=1.0).contains(&self.blend) || !(0.0..=1.0).contains(&self.documentation_share)
        {
            return Err(DevScoreError::Config(
                "enrichment blend and documentation_share must lie in [0, 1]".to_string(),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 || !self.midpoint.is_finite() {
            return Err(DevScoreError::Config(
                "enrichment scale must be positive and midpoint finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DerivationParams {
    /// Merge rate assumed when there are too few PRs to measure one.
    pub default_merge_rate: f64,
    /// Merge rate is only measured above this many PRs.
    pub merge_rate_min_prs: f64,
}

impl Default for DerivationParams {
    fn default() -> Self {
        Self {
            default_merge_rate: 0.70,
            merge_rate_min_prs: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RankingThresholds {
    pub strength_primary: f64,
    pub strength_secondary: f64,
    pub improvement_floor: f64,
    pub improvement_secondary: f64,
}

impl Default for RankingThresholds {
    fn default() -> Self {
        Self {
            strength_primary: 60.0,
            strength_secondary: 55.0,
            improvement_floor: 45.0,
            improvement_secondary: 50.0,
        }
    }
}

impl RankingThresholds {
    fn validate(&self) -> DsResult<()> {
        if self.strength_secondary > self.strength_primary
            || self.improvement_floor > self.improvement_secondary
        {
            return Err(DevScoreError::Config(
                "ranking thresholds are out of order".to_string(),
            ));
        }
        Ok(())
    }
}
