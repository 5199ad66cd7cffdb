//! # Strandscope - Windowed Biophysical DNA Analysis
//!
//! Scans a DNA sequence with a sliding window, computes a nearest-neighbor
//! biophysical profile for every window and flags windows whose profile
//! deviates from the rest of the sequence.
//!
//! ## Overview
//!
//! Each window receives eight features: GC/5mC fraction, hydrogen-bond
//! density, stacking energy, salt-corrected Gibbs free energy (SantaLucia
//! 1998 nearest-neighbor parameters), mean helical displacement along three
//! axes and bendability. Features are standardized against the whole run,
//! combined into a single deviation score, attributed back to the features
//! that drive it, and labeled with an anomaly type and a structural
//! archetype.
//!
//! ## Features
//!
//! - **5-methylcytosine aware**: `M` is a first-class base with its own
//!   stacking and flexibility parameters
//! - **Pluggable salt model**: magnesium-equivalent or monovalent-only
//! - **Interpretable scores**: every combined score is split into per-feature shares
//! - **Run comparison**: window-aligned feature deltas between two sequences
//! - **Parallel Processing**: Multi-threaded execution using Rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use strandscope_core::{SequenceAnalyzer, config::AnalysisConfig};
//!
//! let analyzer = SequenceAnalyzer::new(AnalysisConfig::default());
//! let results = analyzer.analyze_sequence(
//!     "TTGACAATTAATCATCGGCTCGTATAATGTGTGGAATTGTGAGCGG",
//!     Some("lac_promoter".to_string()),
//! )?;
//!
//! for window in results.anomalous_windows() {
//!     println!("{}-{}: {} ({})", window.start, window.end, window.anomaly_type, window.archetype);
//! }
//! # Ok::<(), strandscope_core::types::StrandscopeError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Analysis parameters and output formats
//! - [`engine`]: The analyzer that runs all phases
//! - [`features`]: Per-window feature extraction
//! - [`stats`]: Run-level feature statistics
//! - [`scoring`]: Z-scores, attribution, anomaly and archetype labels
//! - [`correlation`]: Local H-bond/stacking correlation
//! - [`comparison`]: Differences between two runs
//! - [`thermo`]: Salt models and melting temperature
//! - [`sequence`]: Sanitization, windowing and FASTA input
//! - [`output`]: TSV, JSON and report writers
//! - [`constants`]: Thermodynamic lookup tables
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, StrandscopeError>`](types::StrandscopeError),
//! covering sequences shorter than one window, invalid parameters, I/O and
//! FASTA parsing failures. Everything else degrades gracefully: unknown
//! characters become `N`, constant features score 0 and flat correlation
//! slices report 0.

pub mod comparison;
pub mod config;
pub mod constants;
pub mod correlation;
pub mod engine;
pub mod features;
pub mod output;
pub mod results;
pub mod scoring;
pub mod sequence;
pub mod stats;
pub mod thermo;
pub mod types;

pub use comparison::{compare_results, ComparisonResult};
pub use engine::{analyze_sequence, SequenceAnalyzer};
pub use results::AnalysisResults;
pub use types::StrandscopeError;
