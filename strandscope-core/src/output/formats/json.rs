use std::io::Write;

use serde::Serialize;

use crate::{comparison::ComparisonResult, results::AnalysisResults, types::StrandscopeError};

fn write_pretty<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
) -> Result<(), StrandscopeError> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the complete result object as pretty-printed JSON
pub fn write_json_format<W: Write>(
    writer: &mut W,
    results: &AnalysisResults,
) -> Result<(), StrandscopeError> {
    write_pretty(writer, results)
}

/// Write several results as a single JSON array, in input order
pub fn write_json_array<W: Write>(
    writer: &mut W,
    results: &[AnalysisResults],
) -> Result<(), StrandscopeError> {
    write_pretty(writer, results)
}

/// Write a run comparison as pretty-printed JSON
pub fn write_comparison_json<W: Write>(
    writer: &mut W,
    comparison: &ComparisonResult,
) -> Result<(), StrandscopeError> {
    write_pretty(writer, comparison)
}
