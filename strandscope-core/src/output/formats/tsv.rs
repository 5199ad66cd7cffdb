use std::io::Write;

use crate::comparison::ComparisonResult;
use crate::results::AnalysisResults;
use crate::types::{Feature, FeatureVector, StrandscopeError};

fn write_feature_header<W: Write>(writer: &mut W) -> Result<(), StrandscopeError> {
    for feature in Feature::ALL {
        write!(writer, "\t{}", feature.key())?;
    }
    Ok(())
}

fn write_feature_values<W: Write>(
    writer: &mut W,
    values: &FeatureVector,
) -> Result<(), StrandscopeError> {
    for (_, value) in values.iter() {
        write!(writer, "\t{value:.6}")?;
    }
    Ok(())
}

/// Write the column header shared by every record's rows
pub fn write_tsv_header<W: Write>(writer: &mut W) -> Result<(), StrandscopeError> {
    write!(writer, "seq_id\tindex\tstart\tend\tsequence")?;
    write_feature_header(writer)?;
    writeln!(
        writer,
        "\ttm\tcombined_score\tis_anomalous\tanomaly_type\tarchetype\ttop_driver"
    )?;
    Ok(())
}

/// Write one row per window of `results`, without a header
pub fn write_tsv_rows<W: Write>(
    writer: &mut W,
    results: &AnalysisResults,
) -> Result<(), StrandscopeError> {
    let seq_id = &results.sequence_info.header;
    for window in &results.windows {
        write!(
            writer,
            "{seq_id}\t{}\t{}\t{}\t{}",
            window.index, window.start, window.end, window.sequence
        )?;
        write_feature_values(writer, &window.features)?;
        let top_driver = window
            .contributions
            .first()
            .filter(|c| c.score > 0.0)
            .map_or("-", |c| c.feature.key());
        writeln!(
            writer,
            "\t{:.2}\t{:.4}\t{}\t{}\t{}\t{}",
            window.tm,
            window.combined_score,
            window.is_anomalous,
            window.anomaly_type,
            window.archetype,
            top_driver
        )?;
    }
    Ok(())
}

/// Write results as a tab-separated table (one row per window)
pub fn write_tsv_format<W: Write>(
    writer: &mut W,
    results: &AnalysisResults,
) -> Result<(), StrandscopeError> {
    write_tsv_header(writer)?;
    write_tsv_rows(writer, results)
}

/// Write a run comparison as TSV, closing with the mean delta row
pub fn write_comparison_tsv<W: Write>(
    writer: &mut W,
    comparison: &ComparisonResult,
) -> Result<(), StrandscopeError> {
    write!(writer, "index\tstart\tend")?;
    write_feature_header(writer)?;
    writeln!(writer)?;

    for delta in &comparison.deltas {
        write!(writer, "{}\t{}\t{}", delta.index, delta.start, delta.end)?;
        write_feature_values(writer, &delta.diff)?;
        writeln!(writer)?;
    }

    write!(writer, "avg\t-\t-")?;
    write_feature_values(writer, &comparison.avg_delta)?;
    writeln!(writer)?;
    Ok(())
}
