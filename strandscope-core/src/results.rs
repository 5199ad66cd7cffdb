use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::stats::AnalysisStats;
use crate::types::{
    AnomalyType, Archetype, BiophysicalFeatures, CorrelationPoint, FeatureContribution,
    FeatureVector,
};

/// One sliding window and everything computed for it.
///
/// Windows are created during windowing with only their coordinates and
/// substring, receive their features in the extraction phase and are scored
/// exactly once afterwards. They are read-only from then on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisWindow {
    /// Zero-based window number
    pub index: usize,
    /// Zero-based start in the sanitized sequence
    pub start: usize,
    /// Exclusive end, always `start + window_size`
    pub end: usize,
    pub sequence: String,
    pub features: BiophysicalFeatures,
    pub z_scores: FeatureVector,
    /// Euclidean norm of `z_scores`
    pub combined_score: f64,
    /// Per-feature shares of `combined_score`, largest first
    pub contributions: Vec<FeatureContribution>,
    pub is_anomalous: bool,
    pub anomaly_type: AnomalyType,
    pub archetype: Archetype,
    /// Melting temperature in °C
    pub tm: f64,
}

impl AnalysisWindow {
    /// Creates an unscored window covering `sequence` from `start`.
    #[must_use]
    pub fn new(index: usize, start: usize, sequence: String) -> Self {
        let end = start + sequence.len();
        Self {
            index,
            start,
            end,
            sequence,
            features: FeatureVector::zeros(),
            z_scores: FeatureVector::zeros(),
            combined_score: 0.0,
            contributions: Vec::new(),
            is_anomalous: false,
            anomaly_type: AnomalyType::None,
            archetype: Archetype::StableHelix,
            tm: 0.0,
        }
    }

    /// The `count` contributions that drive the combined score the most.
    pub fn top_drivers(&self, count: usize) -> impl Iterator<Item = &FeatureContribution> {
        self.contributions.iter().take(count)
    }
}

/// Number of windows assigned to each archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArchetypeCounts([usize; Archetype::COUNT]);

impl ArchetypeCounts {
    pub fn record(&mut self, archetype: Archetype) {
        self.0[archetype.index()] += 1;
    }

    #[must_use]
    pub const fn get(&self, archetype: Archetype) -> usize {
        self.0[archetype.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Archetype, usize)> + '_ {
        Archetype::ALL.into_iter().map(move |a| (a, self.0[a.index()]))
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

impl Serialize for ArchetypeCounts {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Archetype::COUNT))?;
        for (archetype, count) in self.iter() {
            map.serialize_entry(archetype.as_str(), &count)?;
        }
        map.end()
    }
}

/// Run-level tally of what the classifier found.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BiologicalSummary {
    pub archetypes: ArchetypeCounts,
    pub anomalous_windows: usize,
    /// Mean melting temperature over all windows, 0 for an empty run
    pub avg_tm: f64,
}

impl BiologicalSummary {
    /// Tally archetypes, anomalies and melting temperature of scored windows.
    #[must_use]
    pub fn from_windows(windows: &[AnalysisWindow]) -> Self {
        let mut summary = Self::default();
        let mut tm_sum = 0.0;
        for window in windows {
            summary.archetypes.record(window.archetype);
            if window.is_anomalous {
                summary.anomalous_windows += 1;
            }
            tm_sum += window.tm;
        }
        if !windows.is_empty() {
            summary.avg_tm = tm_sum / windows.len() as f64;
        }
        summary
    }

    #[must_use]
    pub const fn promoter_potential(&self) -> usize {
        self.archetypes.get(Archetype::PutativePromoter)
    }

    #[must_use]
    pub const fn structural_anchors(&self) -> usize {
        self.archetypes.get(Archetype::MechanicalAnchor)
    }

    #[must_use]
    pub const fn z_dna_sites(&self) -> usize {
        self.archetypes.get(Archetype::ZDnaCandidate)
    }
}

/// Information about an analyzed sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceInfo {
    /// Sequence identifier from the FASTA header (first word after '>').
    pub header: String,

    /// Everything after the first word of the FASTA header line.
    pub description: Option<String>,

    /// Length of the sanitized sequence in bases.
    pub length: usize,

    /// GC + 5mC content as a fraction (0.0 to 1.0).
    pub gc_content: f64,

    pub num_windows: usize,
}

/// Everything produced by one analysis run.
///
/// # Examples
///
/// ```rust
/// use strandscope_core::{SequenceAnalyzer, config::AnalysisConfig};
///
/// let analyzer = SequenceAnalyzer::new(AnalysisConfig::default());
/// let results = analyzer.analyze_sequence("ACGTACGTACGTACGTACGT", Some("demo".to_string()))?;
///
/// assert_eq!(results.sequence_info.header, "demo");
/// assert_eq!(results.windows.len(), 2);
/// assert_eq!(results.multivariate_scores.len(), results.windows.len());
/// # Ok::<(), strandscope_core::types::StrandscopeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResults {
    pub sequence_info: SequenceInfo,

    /// Scored windows in sequence order.
    pub windows: Vec<AnalysisWindow>,

    /// Per-feature population statistics over all windows.
    pub stats: AnalysisStats,

    /// Trailing H-bond/stacking correlation, one point per window from the
    /// lookback onward.
    pub correlation_map: Vec<CorrelationPoint>,

    pub threshold_used: f64,

    /// Combined score of every window, in window order.
    pub multivariate_scores: Vec<f64>,

    pub summary: BiologicalSummary,

    /// Parameters the run was computed with.
    pub config: AnalysisConfig,
}

impl AnalysisResults {
    /// Windows flagged by the anomaly rules, in sequence order.
    pub fn anomalous_windows(&self) -> impl Iterator<Item = &AnalysisWindow> {
        self.windows.iter().filter(|w| w.is_anomalous)
    }
}
