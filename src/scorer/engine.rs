use super::adjustments::Adjustments;
use super::components::{aggregate, ComponentZ};
use super::metrics::{MetricKey, MetricVector};
use super::normalize::normalize_vector;
use super::outlier::{classify, outlier_distance};
use super::percentile::round_to;
use super::report;
use super::types::{
    Component, ComponentScore, ComponentScores, Diagnostics, ScoringMethod, ScoringResult,
};
use super::ScoringEngine;
use crate::config::{CombinationMode, ComponentWeights};
use crate::consts::Z_95;
use crate::snapshot::MetricsSnapshot;
use strum::IntoEnumIterator;
use tracing::debug;

/// Standard error scale for a single observation, in score points.
const SE_SCALE: f64 = 15.0;

pub fn compute_score(engine: &ScoringEngine, snapshot: &MetricsSnapshot) -> ScoringResult {
    let snap = snapshot.sanitized();
    let vector = MetricVector::from_snapshot(&snap, &engine.config.derivation);
    let adjustments = Adjustments::evaluate(&snap, &vector, &engine.config.adjustments);
    score_prepared(engine, &snap, &vector, &adjustments)
}

/// Scores a sanitized snapshot whose derived metrics and adjustments are already known.
pub fn score_prepared(
    engine: &ScoringEngine,
    snap: &MetricsSnapshot,
    vector: &MetricVector,
    adjustments: &Adjustments,
) -> ScoringResult {
    let config = &engine.config;
    let zs = normalize_vector(vector, &engine.reference);

    let components: Vec<ComponentZ> = Component::iter()
        .map(|c| aggregate(&zs, &config.recipes, &snap.enrichment, &config.enrichment, c))
        .collect();

    let weighted: f64 = components
        .iter()
        .map(|c| c.z * config.weights.get(c.component))
        .sum();
    let composite_z = adjustments.apply(weighted, &config.adjustments);

    let component_pcts: Vec<f64> = components
        .iter()
        .map(|c| engine.percentiles.percentile_of(c.z))
        .collect();

    let raw_score = match config.combination {
        CombinationMode::CompositeZ => engine.percentiles.percentile_raw(composite_z),
        CombinationMode::PercentileBlend => blend_percentiles(&config.weights, &component_pcts),
    };
    let overall_score = round_to(raw_score.clamp(0.0, 100.0), 2);

    let component_zs: Vec<f64> = components.iter().map(|c| c.z).collect();
    let distance = outlier_distance(&component_zs);

    debug!(
        "components z = {:?}, weighted = {:.4}, q = {:.3}, a = {:.3}, diversity = {:.3}, composite = {:.4}",
        component_zs,
        weighted,
        adjustments.quality_multiplier,
        adjustments.impact_amplifier,
        adjustments.diversity,
        composite_z
    );

    let scores = build_component_scores(engine, snap, vector, &components, &component_pcts);

    let ranked = report::rank_components(
        &Component::iter()
            .map(|c| (c, scores.get(c).score))
            .collect::<Vec<_>>(),
    );

    let scoring_method = if snap.enrichment.is_empty() {
        ScoringMethod::Statistical
    } else {
        ScoringMethod::Enriched
    };

    let sample_size = sample_size(snap);
    let standard_error = SE_SCALE / sample_size.max(1.0).sqrt();
    let margin = Z_95 * standard_error;

    let diagnostics = Diagnostics {
        model_version: config.version,
        reference_version: engine.reference.version.clone(),
        scoring_method,
        composite_z: round_to(composite_z, 3),
        outlier_distance: round_to(distance, 3),
        outlier_tier: classify(distance),
        diversity_score: round_to(adjustments.diversity, 3),
        quality_multiplier: round_to(adjustments.quality_multiplier, 3),
        impact_amplifier: round_to(adjustments.impact_amplifier, 3),
        sample_size: round_to(sample_size, 2),
        standard_error: round_to(standard_error, 3),
        confidence_interval: (
            round_to((overall_score - margin).max(0.0), 2),
            round_to((overall_score + margin).min(100.0), 2),
        ),
        breakdown: breakdown(&components, composite_z),
    };

    ScoringResult {
        overall_score,
        grade: report::grade_for(overall_score),
        percentile: overall_score,
        experience_level: report::experience_level(overall_score, snap.account_age_years),
        strengths: report::strengths(&ranked, &config.ranking),
        improvements: report::improvements(&ranked, &config.ranking),
        components: scores,
        diagnostics,
    }
}

/// Weighted average of component percentiles, ordered like `Component::iter()`.
pub fn blend_percentiles(weights: &ComponentWeights, percentiles: &[f64]) -> f64 {
    weights
        .as_array()
        .iter()
        .zip(percentiles)
        .map(|(w, p)| w * p)
        .sum()
}

/// Rough count of independent observations behind a snapshot.
pub fn sample_size(snap: &MetricsSnapshot) -> f64 {
    snap.repos + snap.effective_commits() / 50.0 + snap.pull_requests * 2.0 + snap.stars / 10.0
}

fn breakdown(components: &[ComponentZ], composite_z: f64) -> String {
    let z = |c: Component| {
        components
            .iter()
            .find(|x| x.component == c)
            .map(|x| x.z)
            .unwrap_or(0.0)
    };
    format!(
        "Z-scores: Quality={:.3}, Impact={:.3}, Consistency={:.3}, Collab={:.3} -> Composite={:.3}",
        z(Component::CodeQuality),
        z(Component::Impact),
        z(Component::Consistency),
        z(Component::Collaboration),
        composite_z
    )
}

fn build_component_scores(
    engine: &ScoringEngine,
    snap: &MetricsSnapshot,
    vector: &MetricVector,
    components: &[ComponentZ],
    percentiles: &[f64],
) -> ComponentScores {
    let weights = &engine.config.weights;
    let make = |idx: usize| {
        let c = &components[idx];
        let weight = weights.get(c.component);
        ComponentScore {
            score: percentiles[idx],
            z_score: round_to(c.z, 3),
            percentile: percentiles[idx],
            weight,
            contribution: round_to(c.z * weight, 3),
            source: c.source,
            description: describe(c.component, snap, vector),
        }
    };

    ComponentScores {
        code_quality: make(0),
        impact: make(1),
        consistency: make(2),
        collaboration: make(3),
    }
}

fn describe(component: Component, s: &MetricsSnapshot, v: &MetricVector) -> String {
    match component {
        Component::CodeQuality => format!(
            "{} repositories ({:.1}/yr), avg size {:.0}KB, {:.2} stars/repo, {} gists",
            s.repos,
            v.get(MetricKey::ReposPerYear),
            s.average_repo_size,
            v.get(MetricKey::StarsPerRepo),
            s.gists
        ),
        Component::Impact => format!(
            "{} stars, {} forks, {} followers, {} watchers",
            s.stars, s.forks, s.followers, s.watchers
        ),
        Component::Consistency => format!(
            "{:.0} commits/yr, {} day streak (best {}), {:.0}% weekend activity",
            v.get(MetricKey::CommitsPerYear),
            s.current_streak,
            s.longest_streak,
            s.weekend_activity_ratio * 100.0
        ),
        Component::Collaboration => format!(
            "{} PRs ({:.0}% merged), {} reviews, {} issues, {} orgs",
            s.pull_requests,
            v.get(MetricKey::MergeRate) * 100.0,
            s.reviews,
            s.issues,
            s.organizations
        ),
    }
}
