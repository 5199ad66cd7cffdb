use std::io::Write;

use sha2::{Digest, Sha256};

use crate::constants::REPORT_TOP_DRIVERS;
use crate::results::{AnalysisResults, AnalysisWindow};
use crate::thermo::SaltModel;
use crate::types::{AnomalyType, Feature, StrandscopeError};

const RULE: &str =
    "================================================================================";
const SECTION_RULE: &str =
    "--------------------------------------------------------------------------------";
const BAR_WIDTH: usize = 40;

/// Reproducible identifier for a window's report.
///
/// First 12 hex digits of the SHA-256 over the window coordinates, its
/// sequence and its combined score, so the same window always gets the same id.
#[must_use]
pub fn report_id(window: &AnalysisWindow) -> String {
    let mut hasher = Sha256::new();
    hasher.update(window.index.to_le_bytes());
    hasher.update(window.start.to_le_bytes());
    hasher.update(window.end.to_le_bytes());
    hasher.update(window.sequence.as_bytes());
    hasher.update(window.combined_score.to_le_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("GEN-{}-{}", window.index, &digest[..12])
}

/// Templated interpretation of a flagged window.
///
/// Driven by the anomaly label, the leading contribution and the presence of
/// 5-methylcytosine in the window.
#[must_use]
pub fn biological_hypothesis(window: &AnalysisWindow) -> String {
    let primary = window
        .contributions
        .first()
        .filter(|c| c.score > 0.0)
        .map(|c| c.feature);

    let mut text = String::from(
        "Sequential biophysical modeling indicates this region carries a distinct regulatory signature. ",
    );

    if primary == Some(Feature::Bend) {
        text.push_str(
            "High bendability suggests strong nucleosome wrapping potential and an active role in 3D chromatin organization. ",
        );
    }

    if window.sequence.contains('M') {
        text.push_str(
            "5-methylcytosine (M) stabilizes the helix and may recruit methyl-binding domain (MBD) proteins, consistent with local epigenetic silencing. ",
        );
    }

    if window.anomaly_type == AnomalyType::ThermalDip || primary == Some(Feature::Dg) {
        text.push_str(
            "A melting-gate or TATA-box-like profile is present: high thermal accessibility points to a transcription start site or enhancer.",
        );
    } else if window.anomaly_type == AnomalyType::StructuralShift
        || primary.is_some_and(Feature::is_displacement)
    {
        text.push_str(
            "Shifted helical displacement indicates bent DNA, a frequent recognition site for architectural chromatin proteins.",
        );
    } else {
        text.push_str(
            "This multivariate deviation reflects unusual structural complexity and may act as a mechanical anchor for regulatory complexes.",
        );
    }

    text.push_str(
        " This interpretation is predictive and should be validated experimentally (e.g. ChIP-seq or ATAC-seq).",
    );
    text
}

fn salt_description(results: &AnalysisResults) -> String {
    let config = &results.config;
    match config.salt_model {
        SaltModel::MagnesiumEquivalent => format!(
            "[Na+] = {} M, [Mg2+] = {} M (magnesium-equivalent)",
            config.monovalent_salt, config.divalent_salt
        ),
        SaltModel::MonovalentOnly => {
            format!("[Na+] = {} M (monovalent only)", config.monovalent_salt)
        }
    }
}

fn write_window_section<W: Write>(
    writer: &mut W,
    window: &AnalysisWindow,
) -> Result<(), StrandscopeError> {
    writeln!(writer, "{SECTION_RULE}")?;
    writeln!(writer, "Anomaly details (window {})", window.index)?;
    writeln!(writer, "{SECTION_RULE}")?;
    writeln!(writer, "  Coordinates:      {} - {} bp", window.start, window.end)?;
    writeln!(writer, "  Combined score:   {:.3}", window.combined_score)?;
    writeln!(writer, "  Prediction class: {}", window.anomaly_type)?;
    writeln!(writer, "  Archetype:        {}", window.archetype)?;
    writeln!(writer, "  Tm:               {:.2} C", window.tm)?;
    writeln!(writer, "  Sequence (M=5mC): {}", window.sequence)?;
    writeln!(writer)?;

    writeln!(writer, "  Attribution (top drivers):")?;
    for driver in window.top_drivers(REPORT_TOP_DRIVERS) {
        let filled = ((driver.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
        writeln!(
            writer,
            "    {:<8} [{:<width$}] {:5.1}%",
            driver.feature.label(),
            "#".repeat(filled.min(BAR_WIDTH)),
            driver.percentage,
            width = BAR_WIDTH
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "  Predicted 3D and epigenetic impact:")?;
    writeln!(writer, "    {}", biological_hypothesis(window))?;
    writeln!(writer)?;
    writeln!(writer, "  Report id: {}", report_id(window))?;
    writeln!(writer)?;
    Ok(())
}

/// Write a plain-text diagnostic report covering every anomalous window
pub fn write_report_format<W: Write>(
    writer: &mut W,
    results: &AnalysisResults,
) -> Result<(), StrandscopeError> {
    let info = &results.sequence_info;

    writeln!(writer, "{RULE}")?;
    writeln!(writer, "GENOMIC DIAGNOSTIC REPORT")?;
    writeln!(writer, "{RULE}")?;
    writeln!(writer, "Sequence:    {}", info.header)?;
    if let Some(description) = &info.description {
        writeln!(writer, "Description: {description}")?;
    }
    writeln!(
        writer,
        "Length:      {} bp, GC+5mC {:.2}%, {} windows (W={}, S={})",
        info.length,
        info.gc_content * 100.0,
        info.num_windows,
        results.config.window_size,
        results.config.stride
    )?;
    writeln!(writer, "Salt:        {}", salt_description(results))?;
    writeln!(writer, "Sensitivity: {:.1} sigma", results.threshold_used)?;
    writeln!(
        writer,
        "Method:      nearest-neighbor thermodynamics (SantaLucia 1998), no smoothing"
    )?;
    writeln!(
        writer,
        "Anomalies:   {} of {} windows, mean Tm {:.2} C",
        results.summary.anomalous_windows, info.num_windows, results.summary.avg_tm
    )?;
    writeln!(writer)?;

    let mut reported = 0usize;
    for window in results.anomalous_windows() {
        write_window_section(writer, window)?;
        reported += 1;
    }
    if reported == 0 {
        writeln!(
            writer,
            "No anomalous windows at threshold {:.1}.",
            results.threshold_used
        )?;
        writeln!(writer)?;
    }

    writeln!(writer, "Computational model for research use only.")?;
    Ok(())
}
