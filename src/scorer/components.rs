use crate::config::{ComponentRecipes, EnrichmentParams};
use crate::consts::Z_CLAMP;
use crate::scorer::metrics::MetricVector;
use crate::scorer::types::{Component, ScoringMethod};
use crate::snapshot::Enrichment;

/// Composite z for one component before adjustments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentZ {
    pub component: Component,
    pub z: f64,
    pub statistical_z: f64,
    pub source: ScoringMethod,
}

/// Weighted sum of metric z-scores for one component.
pub fn statistical_z(zs: &MetricVector, recipes: &ComponentRecipes, component: Component) -> f64 {
    recipes
        .get(component)
        .iter()
        .map(|m| zs.get(m.metric) * m.weight)
        .sum()
}

/// The 0..10 enrichment score that feeds `component`, if any was supplied.
pub fn enrichment_score(
    enrichment: &Enrichment,
    params: &EnrichmentParams,
    component: Component,
) -> Option<f64> {
    match component {
        Component::CodeQuality => match (enrichment.documentation, enrichment.maintenance) {
            (Some(doc), Some(maint)) => {
                Some(doc * params.documentation_share + maint * (1.0 - params.documentation_share))
            }
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        },
        Component::Impact => None,
        Component::Consistency => enrichment.behavior,
        Component::Collaboration => enrichment.career,
    }
}

/// Maps a 0..10 sub-score onto the z scale.
#[inline]
pub fn enrichment_z(score: f64, params: &EnrichmentParams) -> f64 {
    ((score - params.midpoint) / params.scale).clamp(-Z_CLAMP, Z_CLAMP)
}

pub fn aggregate(
    zs: &MetricVector,
    recipes: &ComponentRecipes,
    enrichment: &Enrichment,
    params: &EnrichmentParams,
    component: Component,
) -> ComponentZ {
    let stat = statistical_z(zs, recipes, component);

    match enrichment_score(enrichment, params, component) {
        Some(score) => ComponentZ {
            component,
            z: stat * (1.0 - params.blend) + enrichment_z(score, params) * params.blend,
            statistical_z: stat,
            source: ScoringMethod::Enriched,
        },
        None => ComponentZ {
            component,
            z: stat,
            statistical_z: stat,
            source: ScoringMethod::Statistical,
        },
    }
}
