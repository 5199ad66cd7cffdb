//! Z-score standardization, multivariate deviation, attribution and labeling.
//!
//! The combined score is the Euclidean norm of the per-feature z-scores, i.e.
//! a Mahalanobis distance under a diagonal covariance. Cross-feature
//! covariance is not modeled.

use crate::constants::EPS;
use crate::results::AnalysisWindow;
use crate::stats::AnalysisStats;
use crate::types::{AnomalyType, Archetype, Feature, FeatureContribution, FeatureVector};

/// `(value − mean) / scale` for every feature.
#[must_use]
pub fn z_scores(features: &FeatureVector, stats: &AnalysisStats) -> FeatureVector {
    features.map(|feature, value| (value - stats.mean[feature]) / stats.scale(feature))
}

/// Euclidean norm of a z-score vector.
#[must_use]
pub fn combined_score(z: &FeatureVector) -> f64 {
    z.squared_norm().sqrt()
}

/// Split the combined score into per-feature shares, largest first.
///
/// Each share is `z² / max(Σz², EPS)`. Ties keep feature order.
#[must_use]
pub fn rank_contributions(z: &FeatureVector, combined: f64) -> Vec<FeatureContribution> {
    let total = z.squared_norm().max(EPS);
    let mut contributions: Vec<FeatureContribution> = z
        .iter()
        .map(|(feature, value)| {
            let share = value * value / total;
            FeatureContribution {
                feature,
                score: share * combined,
                percentage: share * 100.0,
            }
        })
        .collect();
    contributions.sort_by(|a, b| b.score.total_cmp(&a.score));
    contributions
}

/// Threshold rules in priority order; the first rule that fires wins.
///
/// 1. `|z(dG)| > threshold`: Thermal Dip (negative) or Structural Shift
/// 2. `|z(stack)| > threshold`: Stacking Anchor
/// 3. `combined > 2·threshold`: Multivariate Deviation
#[must_use]
pub fn classify_anomaly(z: &FeatureVector, combined: f64, threshold: f64) -> AnomalyType {
    let z_dg = z[Feature::Dg];
    if z_dg.abs() > threshold {
        if z_dg < 0.0 {
            AnomalyType::ThermalDip
        } else {
            AnomalyType::StructuralShift
        }
    } else if z[Feature::Stack].abs() > threshold {
        AnomalyType::StackingAnchor
    } else if combined > 2.0 * threshold {
        AnomalyType::MultivariateDeviation
    } else {
        AnomalyType::None
    }
}

/// Heuristic archetype from raw GC and z-scores; the first matching rule wins.
#[must_use]
pub fn classify_archetype(
    features: &FeatureVector,
    z: &FeatureVector,
    is_anomalous: bool,
) -> Archetype {
    let gc = features.gc();
    let z_dg = z[Feature::Dg];
    let z_stack = z[Feature::Stack];
    let z_bend = z[Feature::Bend];

    if gc > 0.7 && z[Feature::Zx].abs() > 2.0 {
        Archetype::ZDnaCandidate
    } else if z_dg < -2.0 && z_bend > 1.5 {
        Archetype::PutativePromoter
    } else if z_stack < -2.0 && z_bend < -1.5 {
        Archetype::MechanicalAnchor
    } else if gc > 0.8 && z_stack < -2.5 {
        Archetype::GQuadruplex
    } else if z_bend > 2.5 && z_dg.abs() < 1.5 {
        Archetype::FlexibleLinker
    } else if is_anomalous {
        Archetype::UnknownAnomaly
    } else {
        Archetype::StableHelix
    }
}

/// Fill in every scoring field of a window from the run statistics.
pub fn score_window(window: &mut AnalysisWindow, stats: &AnalysisStats, threshold: f64) {
    let z = z_scores(&window.features, stats);
    let combined = combined_score(&z);
    let anomaly = classify_anomaly(&z, combined, threshold);

    window.z_scores = z;
    window.combined_score = combined;
    window.contributions = rank_contributions(&z, combined);
    window.anomaly_type = anomaly;
    window.is_anomalous = anomaly.is_anomalous();
    window.archetype = classify_archetype(&window.features, &z, window.is_anomalous);
}
