use serde::Serialize;

use crate::constants::EPS;
use crate::types::{Feature, FeatureVector};

/// Population mean and standard deviation of every feature over one run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AnalysisStats {
    pub mean: FeatureVector,
    pub std: FeatureVector,
}

impl AnalysisStats {
    /// Denominator used for z-scores: the true std, or [`EPS`] when the
    /// feature is (near) constant across the run.
    #[must_use]
    pub fn scale(&self, feature: Feature) -> f64 {
        let std = self.std[feature];
        if std > EPS { std } else { EPS }
    }
}

/// Aggregate per-feature population statistics (divide by N, not N − 1).
///
/// Two passes: means first, then squared deviations from those means.
/// An empty slice yields all-zero statistics.
#[must_use]
pub fn calculate_stats(features: &[FeatureVector]) -> AnalysisStats {
    if features.is_empty() {
        return AnalysisStats::default();
    }
    let n = features.len() as f64;

    let mut mean = FeatureVector::zeros();
    for vector in features {
        mean.accumulate(vector);
    }
    let mean = mean.map(|_, sum| sum / n);

    let mut variance = FeatureVector::zeros();
    for vector in features {
        let deviation = vector.delta_from(&mean);
        variance.accumulate(&deviation.map(|_, d| d * d));
    }
    let std = variance.map(|_, sum| (sum / n).sqrt());

    AnalysisStats { mean, std }
}
