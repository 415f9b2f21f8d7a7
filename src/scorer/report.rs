use crate::config::RankingThresholds;
use crate::scorer::types::{Component, ExperienceLevel, Grade};

const GRADE_CUTOFFS: [(f64, Grade); 7] = [
    (99.5, Grade::SPlus),
    (97.0, Grade::S),
    (92.0, Grade::A),
    (85.0, Grade::BPlus),
    (75.0, Grade::B),
    (55.0, Grade::C),
    (35.0, Grade::D),
];

pub fn grade_for(score: f64) -> Grade {
    GRADE_CUTOFFS
        .iter()
        .find(|(cutoff, _)| score >= *cutoff)
        .map(|(_, g)| *g)
        .unwrap_or(Grade::F)
}

/// Either a high score or a long account history unlocks a level;
/// `Elite` requires both.
pub fn experience_level(score: f64, account_age_years: f64) -> ExperienceLevel {
    let age = account_age_years;
    if score >= 97.0 && age >= 5.0 {
        ExperienceLevel::Elite
    } else if score >= 92.0 || age >= 10.0 {
        ExperienceLevel::Principal
    } else if score >= 85.0 || age >= 7.0 {
        ExperienceLevel::Senior
    } else if score >= 75.0 || age >= 4.0 {
        ExperienceLevel::MidLevel
    } else if score >= 55.0 || age >= 2.0 {
        ExperienceLevel::Junior
    } else {
        ExperienceLevel::Beginner
    }
}

/// Components sorted by score, best first. Ties keep component order.
pub fn rank_components(scores: &[(Component, f64)]) -> Vec<(Component, f64)> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

pub fn strengths(ranked: &[(Component, f64)], t: &RankingThresholds) -> Vec<String> {
    let mut out = Vec::new();
    if let Some((c, s)) = ranked.first() {
        if *s >= t.strength_primary {
            out.push(c.label().to_string());
        }
    }
    if let Some((c, s)) = ranked.get(1) {
        if *s >= t.strength_secondary {
            out.push(c.label().to_string());
        }
    }
    out
}

pub fn improvements(ranked: &[(Component, f64)], t: &RankingThresholds) -> Vec<String> {
    let mut out = Vec::new();
    let n = ranked.len();
    if n == 0 {
        return out;
    }
    let (lowest, lowest_score) = ranked[n - 1];
    if lowest_score < t.improvement_floor {
        out.push(lowest.label().to_string());
        if n >= 3 {
            let (third, third_score) = ranked[n - 2];
            if third_score < t.improvement_secondary {
                out.push(third.label().to_string());
            }
        }
    }
    out
}
