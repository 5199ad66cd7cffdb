use rayon::prelude::*;

use crate::types::{CorrelationPoint, Feature, FeatureVector};

/// Pearson correlation coefficient of two equally long series.
///
/// Returns 0 for empty input or when either series has zero variance.
/// The result is clamped to `[-1, 1]` to absorb rounding.
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mu_x = x.iter().sum::<f64>() / n as f64;
    let mu_y = y.iter().sum::<f64>() / n as f64;

    let mut num = 0.0;
    let mut den_x = 0.0;
    let mut den_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mu_x;
        let dy = yi - mu_y;
        num += dx * dy;
        den_x += dx * dx;
        den_y += dy * dy;
    }

    let den = (den_x * den_y).sqrt();
    if den == 0.0 || !den.is_finite() {
        0.0
    } else {
        (num / den).clamp(-1.0, 1.0)
    }
}

/// Trailing-window correlation between two feature channels.
///
/// For every window index `i >= lookback`, correlates `first` against `second`
/// over windows `[i - lookback, i)`. Windows `0..lookback` get no point, and a
/// run with `lookback` or fewer windows yields an empty series.
#[must_use]
pub fn cross_correlation(
    features: &[FeatureVector],
    first: Feature,
    second: Feature,
    lookback: usize,
) -> Vec<CorrelationPoint> {
    if lookback == 0 || features.len() <= lookback {
        return Vec::new();
    }

    let xs: Vec<f64> = features.iter().map(|f| f[first]).collect();
    let ys: Vec<f64> = features.iter().map(|f| f[second]).collect();

    (lookback..features.len())
        .into_par_iter()
        .map(|i| CorrelationPoint {
            index: i,
            correlation: pearson(&xs[i - lookback..i], &ys[i - lookback..i]),
        })
        .collect()
}

/// H-bond density vs stacking energy, the series reported with every run.
#[must_use]
pub fn hbond_stacking_correlation(
    features: &[FeatureVector],
    lookback: usize,
) -> Vec<CorrelationPoint> {
    cross_correlation(features, Feature::HBond, Feature::Stack, lookback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(f64, f64)]) -> Vec<FeatureVector> {
        pairs
            .iter()
            .map(|&(hb, stack)| {
                let mut v = FeatureVector::zeros();
                v[Feature::HBond] = hb;
                v[Feature::Stack] = stack;
                v
            })
            .collect()
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);

        let y_neg: Vec<f64> = y.iter().map(|v| -v).collect();
        assert!((pearson(&x, &y_neg) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_zero_variance() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[3.0, 2.0, 1.0]), 0.0);
        assert_eq!(pearson(&[], &[]), 0.0);
    }

    #[test]
    fn test_too_few_windows_yields_empty_series() {
        let features = series(&[(2.0, -1.0); 5]);
        assert!(hbond_stacking_correlation(&features, 5).is_empty());
    }

    #[test]
    fn test_slice_excludes_current_window() {
        // Windows 0..5 are perfectly anti-correlated; window 5 is an outlier
        // that must not influence the point reported at index 5.
        let mut pairs: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, -(i as f64))).collect();
        pairs.push((100.0, 100.0));
        let points = hbond_stacking_correlation(&series(&pairs), 5);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].index, 5);
        assert!((points[0].correlation + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_points_cover_every_index_from_lookback() {
        let pairs: Vec<(f64, f64)> = (0..12)
            .map(|i| ((i % 3) as f64, ((i * 7) % 5) as f64))
            .collect();
        let points = hbond_stacking_correlation(&series(&pairs), 5);

        let indices: Vec<usize> = points.iter().map(|p| p.index).collect();
        assert_eq!(indices, (5..12).collect::<Vec<_>>());
        assert!(points.iter().all(|p| (-1.0..=1.0).contains(&p.correlation)));
    }

    #[test]
    fn test_flat_slice_reports_zero() {
        let features = series(&[(2.0, -1.0); 8]);
        let points = hbond_stacking_correlation(&features, 5);
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.correlation == 0.0));
    }
}
