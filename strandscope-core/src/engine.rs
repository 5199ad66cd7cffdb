use std::path::Path;

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, instrument, warn};

use crate::config::AnalysisConfig;
use crate::constants::CORRELATION_LOOKBACK;
use crate::correlation::hbond_stacking_correlation;
use crate::features::{calculate_window_features, SaltConditions};
use crate::results::{AnalysisResults, AnalysisWindow, BiologicalSummary, SequenceInfo};
use crate::scoring::score_window;
use crate::sequence::{gc_fraction, read_fasta_sequences, sanitize_sequence, window_starts};
use crate::stats::{calculate_stats, AnalysisStats};
use crate::types::{CorrelationPoint, FeatureVector, StrandscopeError};

/// Header used when a sequence is analyzed without one.
const DEFAULT_HEADER: &str = "Strandscope_Seq_1";

/// Windowed biophysical analyzer.
///
/// Runs the four analysis phases over one sequence at a time:
///
/// 1. windowing and feature extraction, parallel across windows
/// 2. population statistics over all windows (barrier)
/// 3. z-scoring and classification, parallel across windows
/// 4. H-bond/stacking correlation, concurrent with phases 2 and 3
///
/// Every run is independent; an analyzer holds no per-sequence state and can
/// be shared across threads.
///
/// # Examples
///
/// ## Analyze a sequence string
///
/// ```rust
/// use strandscope_core::{SequenceAnalyzer, config::AnalysisConfig};
///
/// let analyzer = SequenceAnalyzer::new(AnalysisConfig::default());
/// let results = analyzer.analyze_sequence("ACGTACGTACGTACGTACGT", None)?;
///
/// assert_eq!(results.windows.len(), 2);
/// assert_eq!(results.windows[1].start, 5);
/// # Ok::<(), strandscope_core::types::StrandscopeError>(())
/// ```
///
/// ## Analyze a FASTA file on a dedicated pool
///
/// ```rust,no_run
/// use strandscope_core::{SequenceAnalyzer, config::AnalysisConfig};
///
/// let config = AnalysisConfig {
///     num_threads: Some(4),
///     ..Default::default()
/// };
/// let analyzer = SequenceAnalyzer::with_config(config)?;
///
/// for result in analyzer.analyze_fasta_file("contigs.fasta")? {
///     println!("{}: {} anomalous windows",
///              result.sequence_info.header,
///              result.summary.anomalous_windows);
/// }
/// # Ok::<(), strandscope_core::types::StrandscopeError>(())
/// ```
#[derive(Debug)]
pub struct SequenceAnalyzer {
    /// Parameters applied to every run
    pub config: AnalysisConfig,
    /// Dedicated worker pool, when a thread count was requested
    pool: Option<ThreadPool>,
}

impl SequenceAnalyzer {
    /// Creates an analyzer without validating `config`.
    ///
    /// A requested `config.num_threads` still gets a dedicated pool. If that
    /// pool cannot be built the analyzer logs a warning and runs on the
    /// global Rayon pool instead. Invalid parameters surface on the first
    /// analysis; use [`SequenceAnalyzer::with_config`] to reject them up front.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        let pool = match config.num_threads {
            Some(num_threads) if num_threads > 0 => match build_pool(num_threads) {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!(num_threads, error = %e, "falling back to the global thread pool");
                    None
                }
            },
            _ => None,
        };

        Self { config, pool }
    }

    /// Creates an analyzer after validating `config`.
    ///
    /// When `config.num_threads` is set, a dedicated thread pool of that size
    /// is built and every run of this analyzer executes inside it. The global
    /// Rayon pool is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StrandscopeError::InvalidParameter`] for an invalid
    /// configuration and [`StrandscopeError::ThreadPool`] if the pool cannot
    /// be built.
    pub fn with_config(config: AnalysisConfig) -> Result<Self, StrandscopeError> {
        config.validate()?;

        let pool = config.num_threads.map(build_pool).transpose()?;

        Ok(Self { config, pool })
    }

    /// Analyzes every record of a FASTA file, in file order.
    ///
    /// # Errors
    ///
    /// Returns [`StrandscopeError`] if:
    /// - The file cannot be read or is not valid FASTA
    /// - Any record is shorter than the window size
    pub fn analyze_fasta_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<AnalysisResults>, StrandscopeError> {
        let records = read_fasta_sequences(path)?;
        debug!(records = records.len(), "read FASTA input");

        records
            .into_iter()
            .map(|record| self.analyze_record(&record.sequence, record.id, record.description))
            .collect()
    }

    /// Analyzes a single sequence.
    ///
    /// The input is sanitized first: lowercase letters are uppercased and
    /// anything outside `A C G T M` becomes `N`.
    ///
    /// # Arguments
    ///
    /// * `sequence` - DNA sequence (A, C, G, T, M for 5-methylcytosine, N)
    /// * `header` - Optional sequence identifier (defaults to `"Strandscope_Seq_1"`)
    ///
    /// # Errors
    ///
    /// Returns [`StrandscopeError::SequenceTooShort`] if the sequence cannot
    /// hold a single window, or [`StrandscopeError::InvalidParameter`] if the
    /// configuration is invalid.
    pub fn analyze_sequence(
        &self,
        sequence: &str,
        header: Option<String>,
    ) -> Result<AnalysisResults, StrandscopeError> {
        let header = header.unwrap_or_else(|| DEFAULT_HEADER.to_string());
        self.analyze_record(sequence, header, None)
    }

    /// Analyzes a sequence with full FASTA metadata.
    ///
    /// # Errors
    ///
    /// Same as [`SequenceAnalyzer::analyze_sequence`].
    #[instrument(skip(self, sequence, description), fields(length = sequence.len()))]
    pub fn analyze_record(
        &self,
        sequence: &str,
        header: String,
        description: Option<String>,
    ) -> Result<AnalysisResults, StrandscopeError> {
        self.config.validate()?;

        let sanitized = sanitize_sequence(sequence);
        let window_size = self.config.window_size;
        if sanitized.len() < window_size {
            return Err(StrandscopeError::SequenceTooShort {
                length: sanitized.len(),
                window_size,
            });
        }

        let (windows, stats, correlation_map) = match &self.pool {
            Some(pool) => pool.install(|| self.run_phases(&sanitized)),
            None => self.run_phases(&sanitized),
        };

        let summary = BiologicalSummary::from_windows(&windows);
        if self.config.quiet {
            debug!(
                header = %header,
                windows = windows.len(),
                anomalous = summary.anomalous_windows,
                "analysis complete"
            );
        } else {
            info!(
                header = %header,
                windows = windows.len(),
                anomalous = summary.anomalous_windows,
                "analysis complete"
            );
        }

        Ok(AnalysisResults {
            sequence_info: SequenceInfo {
                header,
                description,
                length: sanitized.len(),
                gc_content: gc_fraction(&sanitized),
                num_windows: windows.len(),
            },
            multivariate_scores: windows.iter().map(|w| w.combined_score).collect(),
            windows,
            stats,
            correlation_map,
            threshold_used: self.config.threshold,
            summary,
            config: self.config.clone(),
        })
    }

    fn run_phases(
        &self,
        sanitized: &str,
    ) -> (Vec<AnalysisWindow>, AnalysisStats, Vec<CorrelationPoint>) {
        let salt = self.config.salt_conditions();
        let mut windows = extract_windows(
            sanitized,
            self.config.window_size,
            self.config.stride,
            &salt,
        );
        debug!(windows = windows.len(), "extracted window features");

        // Correlation reads its own copy so scoring can mutate windows alongside it
        let features: Vec<FeatureVector> = windows.iter().map(|w| w.features).collect();
        let threshold = self.config.threshold;

        let (stats, correlation_map) = rayon::join(
            || {
                let stats = calculate_stats(&features);
                windows
                    .par_iter_mut()
                    .for_each(|window| score_window(window, &stats, threshold));
                stats
            },
            || hbond_stacking_correlation(&features, CORRELATION_LOOKBACK),
        );
        debug!(
            correlation_points = correlation_map.len(),
            "scored windows and built correlation map"
        );

        (windows, stats, correlation_map)
    }
}

fn build_pool(num_threads: usize) -> Result<ThreadPool, StrandscopeError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| StrandscopeError::ThreadPool(e.to_string()))
}

/// Cut `sanitized` into windows and compute each window's features and Tm.
fn extract_windows(
    sanitized: &str,
    window_size: usize,
    stride: usize,
    salt: &SaltConditions,
) -> Vec<AnalysisWindow> {
    let starts: Vec<usize> = window_starts(sanitized.len(), window_size, stride).collect();

    starts
        .into_par_iter()
        .enumerate()
        .map(|(index, start)| {
            let substring = &sanitized[start..start + window_size];
            let mut window = AnalysisWindow::new(index, start, substring.to_string());
            window.features = calculate_window_features(substring, salt);
            window.tm = salt.melting_temperature(window.features.gc());
            window
        })
        .collect()
}

/// One-shot analysis with `config`.
///
/// Honors `config.num_threads` by building a dedicated pool for this call.
///
/// # Errors
///
/// See [`SequenceAnalyzer::with_config`] and
/// [`SequenceAnalyzer::analyze_sequence`].
pub fn analyze_sequence(
    sequence: &str,
    config: &AnalysisConfig,
) -> Result<AnalysisResults, StrandscopeError> {
    SequenceAnalyzer::with_config(config.clone())?.analyze_sequence(sequence, None)
}
