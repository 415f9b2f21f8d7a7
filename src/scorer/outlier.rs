use crate::scorer::types::OutlierTier;

/// Euclidean norm of the component z-scores: distance from the population center.
pub fn outlier_distance(component_zs: &[f64]) -> f64 {
    component_zs.iter().map(|z| z * z).sum::<f64>().sqrt()
}

pub fn classify(distance: f64) -> OutlierTier {
    if distance < 1.0 {
        OutlierTier::Typical
    } else if distance < 2.0 {
        OutlierTier::AboveAverage
    } else if distance < 3.0 {
        OutlierTier::Exceptional
    } else {
        OutlierTier::Elite
    }
}
