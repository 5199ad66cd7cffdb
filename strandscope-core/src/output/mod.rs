//! Output formatting for analysis results.
//!
//! This module provides writers for converting [`AnalysisResults`] into
//! tabular, machine-readable and human-readable text.
//!
//! ## Supported Formats
//!
//! - **TSV**: One row per window, features in canonical order
//! - **JSON**: The complete result object
//! - **Report**: Diagnostic report for anomalous windows
//!
//! [`write_results_many`] writes several records as one document: a single
//! TSV header, a single JSON array, or consecutive reports.
//! [`write_comparison`] renders a [`ComparisonResult`] as TSV or JSON.
//!
//! ## Examples
//!
//! ```rust
//! use strandscope_core::{SequenceAnalyzer, config::{AnalysisConfig, OutputFormat}};
//! use strandscope_core::output::write_results;
//!
//! let analyzer = SequenceAnalyzer::new(AnalysisConfig::default());
//! let results = analyzer.analyze_sequence("ACGTACGTACGTACGTACGT", None)?;
//!
//! let mut buffer = Vec::new();
//! write_results(&mut buffer, &results, OutputFormat::Tsv)?;
//! assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 3);
//! # Ok::<(), strandscope_core::types::StrandscopeError>(())
//! ```

use std::io::Write;

use crate::comparison::ComparisonResult;
use crate::config::OutputFormat;
use crate::results::AnalysisResults;
use crate::types::StrandscopeError;

mod formats {
    pub mod json;
    pub mod report;
    pub mod tsv;
}

pub use formats::report::{biological_hypothesis, report_id};
use formats::{
    json::{write_comparison_json, write_json_array, write_json_format},
    report::write_report_format,
    tsv::{write_comparison_tsv, write_tsv_format, write_tsv_header, write_tsv_rows},
};

/// Writes analysis results in the specified format.
///
/// # Errors
///
/// Returns [`StrandscopeError`] if writing or JSON encoding fails.
///
/// # Examples
///
/// ```rust
/// use strandscope_core::{SequenceAnalyzer, config::{AnalysisConfig, OutputFormat}};
/// use strandscope_core::output::write_results;
///
/// let analyzer = SequenceAnalyzer::new(AnalysisConfig::default());
/// let results = analyzer.analyze_sequence("GGGGGGGGGGGGGGG", None)?;
///
/// let mut buffer = Vec::new();
/// write_results(&mut buffer, &results, OutputFormat::Json)?;
/// # Ok::<(), strandscope_core::types::StrandscopeError>(())
/// ```
pub fn write_results<W: Write>(
    writer: &mut W,
    results: &AnalysisResults,
    format: OutputFormat,
) -> Result<(), StrandscopeError> {
    match format {
        OutputFormat::Tsv => write_tsv_format(writer, results),
        OutputFormat::Json => write_json_format(writer, results),
        OutputFormat::Report => write_report_format(writer, results),
    }
}

/// Writes the results of several records as one document.
///
/// - **TSV**: one header row, then every record's windows in order
/// - **JSON**: a single array with one result object per record
/// - **Report**: one report per record, separated by a blank line
///
/// # Errors
///
/// Returns [`StrandscopeError`] if writing or JSON encoding fails.
///
/// # Examples
///
/// ```rust,no_run
/// use strandscope_core::{SequenceAnalyzer, config::{AnalysisConfig, OutputFormat}};
/// use strandscope_core::output::write_results_many;
/// use std::fs::File;
///
/// let analyzer = SequenceAnalyzer::new(AnalysisConfig::default());
/// let results = analyzer.analyze_fasta_file("contigs.fasta")?;
///
/// let mut output = File::create("windows.tsv")?;
/// write_results_many(&mut output, &results, OutputFormat::Tsv)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_results_many<W: Write>(
    writer: &mut W,
    results: &[AnalysisResults],
    format: OutputFormat,
) -> Result<(), StrandscopeError> {
    match format {
        OutputFormat::Tsv => {
            write_tsv_header(writer)?;
            for result in results {
                write_tsv_rows(writer, result)?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json_array(writer, results),
        OutputFormat::Report => {
            for (i, result) in results.iter().enumerate() {
                if i > 0 {
                    writeln!(writer)?;
                }
                write_report_format(writer, result)?;
            }
            Ok(())
        }
    }
}

/// Writes a window-aligned comparison.
///
/// TSV has one row per aligned window followed by an `avg` row with the
/// mean delta of every feature. JSON is the serialized [`ComparisonResult`].
///
/// # Errors
///
/// Returns [`StrandscopeError::InvalidParameter`] for [`OutputFormat::Report`],
/// which has no comparison layout, and [`StrandscopeError::IoError`] if
/// writing fails.
pub fn write_comparison<W: Write>(
    writer: &mut W,
    comparison: &ComparisonResult,
    format: OutputFormat,
) -> Result<(), StrandscopeError> {
    match format {
        OutputFormat::Tsv => write_comparison_tsv(writer, comparison),
        OutputFormat::Json => write_comparison_json(writer, comparison),
        OutputFormat::Report => Err(StrandscopeError::InvalidParameter(
            "comparison output supports tsv and json only".to_string(),
        )),
    }
}
