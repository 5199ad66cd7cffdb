//! # Strandscope CLI - Windowed Biophysical DNA Analysis
//!
//! A command-line interface for the strandscope analysis engine.
//!
//! ## Usage
//!
//! ```bash
//! # Per-window table
//! strandscope -i sequence.fasta -o windows.tsv
//!
//! # Full JSON result
//! strandscope -i sequence.fasta -f json -o result.json
//!
//! # Diagnostic report of anomalous windows at a lower threshold
//! strandscope -i sequence.fasta -f report -t 2.5
//!
//! # Compare two sequences window by window
//! strandscope -i wild_type.fasta --compare methylated.fasta -o delta.tsv
//! ```
//!
//! ## Options
//!
//! - `-i, --input <FILE>`: Input FASTA file (default: stdin)
//! - `-o, --output <FILE>`: Output file (default: stdout)
//! - `-f, --format <FORMAT>`: Output format: tsv, json, report (default: tsv)
//! - `-t, --threshold <SIGMA>`: Anomaly threshold in standard deviations (default: 3.0)
//! - `-w, --window <BASES>`: Window size (default: 15)
//! - `-s, --stride <BASES>`: Window stride (default: 5)
//! - `--salt <MOLAR>`: Monovalent salt (default: 0.1)
//! - `--mg <MOLAR>`: Divalent magnesium (default: 0.0015)
//! - `--salt-model <MODEL>`: magnesium or monovalent (default: magnesium)
//! - `--compare <FILE>`: Compare the first record of the input against this FASTA
//!   (tsv or json output)
//! - `--threads <N>`: Worker threads (default: all cores)
//! - `-q, --quiet`: Only log warnings and errors
//!
//! Multi-record input produces one document: a single TSV header, a single
//! JSON array, or one report per record.
//!
//! Logging goes to stderr and honors `RUST_LOG`.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{anyhow, bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use strandscope_core::config::{AnalysisConfig, OutputFormat};
use strandscope_core::output::{write_comparison, write_results_many};
use strandscope_core::sequence::{read_fasta_from, read_fasta_sequences, FastaRecord};
use strandscope_core::thermo::SaltModel;
use strandscope_core::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn build_command() -> Command {
    Command::new("strandscope")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Windowed nearest-neighbor biophysical DNA analysis")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Input FASTA file (default: stdin)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output file (default: stdout)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format: tsv, json, report")
                .default_value("tsv"),
        )
        .arg(
            Arg::new("threshold")
                .short('t')
                .long("threshold")
                .value_name("SIGMA")
                .help("Anomaly threshold in standard deviations")
                .value_parser(value_parser!(f64))
                .default_value("3.0"),
        )
        .arg(
            Arg::new("window")
                .short('w')
                .long("window")
                .value_name("BASES")
                .help("Window size")
                .value_parser(value_parser!(usize))
                .default_value("15"),
        )
        .arg(
            Arg::new("stride")
                .short('s')
                .long("stride")
                .value_name("BASES")
                .help("Distance between window starts")
                .value_parser(value_parser!(usize))
                .default_value("5"),
        )
        .arg(
            Arg::new("salt")
                .long("salt")
                .value_name("MOLAR")
                .help("Monovalent cation concentration")
                .value_parser(value_parser!(f64))
                .default_value("0.1"),
        )
        .arg(
            Arg::new("mg")
                .long("mg")
                .value_name("MOLAR")
                .help("Divalent magnesium concentration")
                .value_parser(value_parser!(f64))
                .default_value("0.0015"),
        )
        .arg(
            Arg::new("salt-model")
                .long("salt-model")
                .value_name("MODEL")
                .help("Salt correction model: magnesium or monovalent")
                .default_value("magnesium"),
        )
        .arg(
            Arg::new("compare")
                .long("compare")
                .value_name("FILE")
                .help("Compare the first input record against the first record of this FASTA"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_name("N")
                .help("Number of worker threads")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log warnings and errors")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn parse_config(matches: &ArgMatches) -> Result<AnalysisConfig> {
    let salt_model = match matches
        .get_one::<String>("salt-model")
        .map(String::as_str)
        .unwrap_or("magnesium")
    {
        "magnesium" | "mg" => SaltModel::MagnesiumEquivalent,
        "monovalent" | "na" => SaltModel::MonovalentOnly,
        other => bail!("Invalid salt model '{other}' (expected magnesium or monovalent)"),
    };

    let config = AnalysisConfig {
        threshold: matches.get_one::<f64>("threshold").copied().unwrap_or_default(),
        window_size: matches.get_one::<usize>("window").copied().unwrap_or_default(),
        stride: matches.get_one::<usize>("stride").copied().unwrap_or_default(),
        monovalent_salt: matches.get_one::<f64>("salt").copied().unwrap_or_default(),
        divalent_salt: matches.get_one::<f64>("mg").copied().unwrap_or_default(),
        salt_model,
        num_threads: matches.get_one::<usize>("threads").copied(),
        quiet: matches.get_flag("quiet"),
    };
    config.validate()?;
    Ok(config)
}

fn read_records(path: Option<&String>) -> Result<Vec<FastaRecord>> {
    match path {
        Some(path) => read_fasta_sequences(path)
            .with_context(|| format!("Failed to read FASTA file '{path}'")),
        None => read_fasta_from(io::stdin().lock()).context("Failed to read FASTA from stdin"),
    }
}

fn first_record(records: Vec<FastaRecord>, source: &str) -> Result<FastaRecord> {
    records
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No sequences found in {source}"))
}

/// Main entry point for the strandscope CLI application.
///
/// Parses command-line arguments, configures the analyzer, analyzes input
/// sequences and writes results (or a comparison) in the requested format.
fn main() -> Result<()> {
    let matches = build_command().get_matches();
    let config = parse_config(&matches)?;
    init_logging(config.quiet);

    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("tsv")
        .parse()?;
    if matches.contains_id("compare") && format == OutputFormat::Report {
        bail!("--compare supports tsv and json output only");
    }

    let analyzer =
        SequenceAnalyzer::with_config(config).context("Failed to configure analyzer")?;
    let input = matches.get_one::<String>("input");
    let records = read_records(input)?;
    if records.is_empty() {
        warn!("input contained no FASTA records");
    }

    let mut writer: Box<dyn Write> = if let Some(output_file) = matches.get_one::<String>("output")
    {
        let file = File::create(output_file)
            .with_context(|| format!("Failed to create output file '{output_file}'"))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    if let Some(compare_path) = matches.get_one::<String>("compare") {
        let source = input.map_or("stdin", String::as_str);
        let record_a = first_record(records, source)?;
        let record_b = first_record(read_records(Some(compare_path))?, compare_path)?;

        let a = analyzer
            .analyze_record(&record_a.sequence, record_a.id, record_a.description)
            .context("Failed to analyze input sequence")?;
        let b = analyzer
            .analyze_record(&record_b.sequence, record_b.id, record_b.description)
            .context("Failed to analyze comparison sequence")?;

        let comparison = compare_results(&a, &b);
        write_comparison(&mut writer, &comparison, format)?;
        writer.flush()?;

        info!(
            "Compared {} vs {} over {} aligned windows.",
            a.sequence_info.header,
            b.sequence_info.header,
            comparison.deltas.len()
        );
        return Ok(());
    }

    let results = records
        .into_iter()
        .map(|record| {
            let id = record.id.clone();
            analyzer
                .analyze_record(&record.sequence, record.id, record.description)
                .with_context(|| format!("Failed to analyze sequence '{id}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    write_results_many(&mut writer, &results, format)?;
    writer.flush()?;

    let total_windows: usize = results.iter().map(|r| r.windows.len()).sum();
    let total_anomalies: usize = results.iter().map(|r| r.summary.anomalous_windows).sum();
    info!(
        "Analysis complete! Found {} anomalous windows out of {}.",
        total_anomalies, total_windows
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        build_command().debug_assert();
    }

    #[test]
    fn test_parse_config_defaults() {
        let matches = build_command().get_matches_from(["strandscope"]);
        let config = parse_config(&matches).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_parse_config_overrides() {
        let matches = build_command().get_matches_from([
            "strandscope",
            "-w",
            "21",
            "-s",
            "3",
            "--salt-model",
            "monovalent",
            "--threads",
            "2",
            "-q",
        ]);
        let config = parse_config(&matches).unwrap();
        assert_eq!(config.window_size, 21);
        assert_eq!(config.stride, 3);
        assert_eq!(config.salt_model, SaltModel::MonovalentOnly);
        assert_eq!(config.num_threads, Some(2));
        assert!(config.quiet);
    }

    #[test]
    fn test_parse_config_rejects_bad_values() {
        let matches = build_command().get_matches_from(["strandscope", "--salt-model", "kcl"]);
        assert!(parse_config(&matches).is_err());

        let matches = build_command().get_matches_from(["strandscope", "-s", "0"]);
        assert!(parse_config(&matches).is_err());
    }
}
