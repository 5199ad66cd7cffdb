use rayon::prelude::*;
use serde::Serialize;

use crate::results::AnalysisResults;
use crate::types::FeatureVector;

/// Feature difference for one aligned window pair (B minus A).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisWindowDelta {
    pub index: usize,
    /// Start of the window in run A
    pub start: usize,
    /// End (exclusive) of the window in run A
    pub end: usize,
    pub diff: FeatureVector,
}

/// Window-aligned differences between two analysis runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub deltas: Vec<AnalysisWindowDelta>,
    /// Mean of every feature delta over the aligned windows
    pub avg_delta: FeatureVector,
}

/// Compare two completed runs window by window.
///
/// Windows are aligned by index and truncated to the shorter run; nothing is
/// gap-filled. With no aligned windows the result is empty with an all-zero
/// average.
///
/// # Examples
///
/// ```rust
/// use strandscope_core::{analyze_sequence, compare_results, config::AnalysisConfig};
///
/// let config = AnalysisConfig::default();
/// let a = analyze_sequence("ACGTACGTACGTACGTACGTACGT", &config)?;
/// let b = analyze_sequence("GGGCCCGGGCCCGGGCCCGGGCCCGGG", &config)?;
///
/// let cmp = compare_results(&a, &b);
/// assert_eq!(cmp.deltas.len(), a.windows.len().min(b.windows.len()));
/// assert!(cmp.avg_delta.gc() > 0.0);
/// # Ok::<(), strandscope_core::types::StrandscopeError>(())
/// ```
#[must_use]
pub fn compare_results(a: &AnalysisResults, b: &AnalysisResults) -> ComparisonResult {
    let aligned = a.windows.len().min(b.windows.len());

    let deltas: Vec<AnalysisWindowDelta> = a.windows[..aligned]
        .par_iter()
        .zip(b.windows[..aligned].par_iter())
        .enumerate()
        .map(|(index, (window_a, window_b))| AnalysisWindowDelta {
            index,
            start: window_a.start,
            end: window_a.end,
            diff: window_b.features.delta_from(&window_a.features),
        })
        .collect();

    let mut sum = FeatureVector::zeros();
    for delta in &deltas {
        sum.accumulate(&delta.diff);
    }
    let divisor = aligned.max(1) as f64;

    ComparisonResult {
        deltas,
        avg_delta: sum.map(|_, total| total / divisor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::engine::analyze_sequence;
    use crate::types::Feature;

    fn run(sequence: &str) -> AnalysisResults {
        analyze_sequence(sequence, &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_identical_runs_have_zero_delta() {
        let a = run("ACGTTGCAAGGCTTAACGTAGCTAGGATCC");
        let cmp = compare_results(&a, &a);
        assert_eq!(cmp.deltas.len(), a.windows.len());
        assert_eq!(cmp.avg_delta, FeatureVector::zeros());
    }

    #[test]
    fn test_alignment_truncates_to_shorter_run() {
        let a = run("ACGTTGCAAGGCTTAACGTAGCTAGGATCCATGCATGC");
        let b = run("GGGGGGGGGGGGGGGGGGGG");
        let cmp = compare_results(&a, &b);

        assert_eq!(b.windows.len(), 2);
        assert_eq!(cmp.deltas.len(), 2);
        assert_eq!(cmp.deltas[1].index, 1);
        assert_eq!(cmp.deltas[1].start, a.windows[1].start);
        assert_eq!(cmp.deltas[1].end, a.windows[1].end);

        let expected = b.windows[0].features.gc() - a.windows[0].features.gc();
        assert!((cmp.deltas[0].diff[Feature::Gc] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_average_is_mean_of_deltas() {
        let a = run("ATATATATATATATATATATATATA");
        let b = run("GCGCGCGCGCGCGCGCGCGCGCGCG");
        let cmp = compare_results(&a, &b);

        for feature in Feature::ALL {
            let mean = cmp.deltas.iter().map(|d| d.diff[feature]).sum::<f64>()
                / cmp.deltas.len() as f64;
            assert!((cmp.avg_delta[feature] - mean).abs() < 1e-12);
        }
    }

    #[test]
    fn test_antisymmetry() {
        let a = run("ACGTTGCAAGGCTTAACGTAGCTAGGATCC");
        let b = run("TTTTAAAACCCCGGGGMMMMACGTNNACGT");
        let ab = compare_results(&a, &b);
        let ba = compare_results(&b, &a);
        for feature in Feature::ALL {
            assert!((ab.avg_delta[feature] + ba.avg_delta[feature]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_no_aligned_windows() {
        let a = run("ACGTACGTACGTACGTACGT");
        let empty = AnalysisResults {
            windows: Vec::new(),
            ..a.clone()
        };
        let cmp = compare_results(&a, &empty);
        assert!(cmp.deltas.is_empty());
        assert_eq!(cmp.avg_delta, FeatureVector::zeros());
    }
}
