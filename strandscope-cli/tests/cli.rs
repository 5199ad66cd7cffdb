mod common;
use crate::common::{run_strandscope, strandscope, write_fasta, PROMOTER_REGION};

use tempfile::NamedTempFile;

fn stderr_contains(stderr: &[u8], needle: &str) -> bool {
    String::from_utf8_lossy(stderr).contains(needle)
}

#[test]
fn tsv_output_has_one_row_per_window() {
    let input = write_fasta(&[("promoter", PROMOTER_REGION)]);
    let stdout = run_strandscope(&input, &[]);

    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("seq_id\tindex\tstart\tend\tsequence\tgc"));
    assert_eq!(lines.len(), 1 + 18);
    assert!(lines[1].starts_with("promoter\t0\t0\t15\tTTGACAATTAATCAT"));
}

#[test]
fn json_output_is_parseable() {
    let input = write_fasta(&[("promoter", PROMOTER_REGION)]);
    let stdout = run_strandscope(&input, &["-f", "json", "-w", "20", "-s", "10"]);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    let result = &records[0];
    assert_eq!(result["sequence_info"]["header"], "promoter");
    assert_eq!(result["config"]["window_size"], 20);
    assert_eq!(result["config"]["stride"], 10);
    // (103 - 20) / 10 + 1
    assert_eq!(result["windows"].as_array().unwrap().len(), 9);
    assert_eq!(result["correlation_map"].as_array().unwrap().len(), 4);
}

#[test]
fn report_output_has_header() {
    let input = write_fasta(&[("promoter", PROMOTER_REGION)]);
    let stdout = run_strandscope(&input, &["-f", "report", "-t", "1.0"]);

    assert!(stdout.contains("GENOMIC DIAGNOSTIC REPORT"));
    assert!(stdout.contains("Sequence:    promoter"));
    assert!(stdout.contains("Sensitivity: 1.0 sigma"));
    assert!(stdout.trim_end().ends_with("Computational model for research use only."));
}

#[test]
fn multiple_records_are_analyzed_in_order() {
    let input = write_fasta(&[
        ("first", "ACGTACGTACGTACGTACGT"),
        ("second", "GGGGGGGGGGGGGGG"),
    ]);
    let stdout = run_strandscope(&input, &[]);

    let lines: Vec<&str> = stdout.lines().collect();
    let header_rows = lines.iter().filter(|line| line.starts_with("seq_id")).count();
    assert_eq!(header_rows, 1);
    assert!(lines[0].starts_with("seq_id\t"));
    assert_eq!(lines.len(), 1 + 3);
    assert!(lines[1].starts_with("first\t0"));
    assert!(lines[2].starts_with("first\t1"));
    assert!(lines[3].starts_with("second\t0"));
}

#[test]
fn multiple_records_form_one_json_document() {
    let input = write_fasta(&[
        ("first", "ACGTACGTACGTACGTACGT"),
        ("second", "GGGGGGGGGGGGGGG"),
    ]);
    let stdout = run_strandscope(&input, &["-f", "json"]);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["sequence_info"]["header"], "first");
    assert_eq!(records[0]["windows"].as_array().unwrap().len(), 2);
    assert_eq!(records[1]["sequence_info"]["header"], "second");
    assert_eq!(records[1]["windows"].as_array().unwrap().len(), 1);
}

#[test]
fn multiple_records_produce_one_report_each() {
    let input = write_fasta(&[
        ("first", "ACGTACGTACGTACGTACGT"),
        ("second", "GGGGGGGGGGGGGGG"),
    ]);
    let stdout = run_strandscope(&input, &["-f", "report"]);

    assert_eq!(stdout.matches("GENOMIC DIAGNOSTIC REPORT").count(), 2);
    assert!(stdout.contains("Sequence:    first"));
    assert!(stdout.contains("Sequence:    second"));
}

#[test]
fn output_file_is_written() {
    let input = write_fasta(&[("promoter", PROMOTER_REGION)]);
    let output = NamedTempFile::new().unwrap();

    strandscope()
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    let written = std::fs::read_to_string(output.path()).unwrap();
    assert_eq!(written.lines().count(), 1 + 18);
}

#[test]
fn reads_fasta_from_stdin() {
    let output = strandscope()
        .write_stdin(">piped\nACGTACGTACGTACGTACGT\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.contains("piped\t1\t5\t20"));
}

#[test]
fn compare_writes_deltas_and_average() {
    let a = write_fasta(&[("wild_type", "ACGTACGTACGTACGTACGTACGTACGTACGTACGT")]);
    let b = write_fasta(&[("methylated", "AMGTAMGTAMGTAMGTAMGTAMGT")]);

    let stdout = run_strandscope(&a, &["--compare", b.path().to_str().unwrap()]);

    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("index\tstart\tend\tgc"));
    // 36 bases -> 5 windows, 24 bases -> 2 windows
    assert_eq!(lines.len(), 1 + 2 + 1);
    assert!(lines[1].starts_with("0\t0\t15\t"));
    assert!(lines[3].starts_with("avg\t-\t-\t"));
}

#[test]
fn compare_writes_json_when_requested() {
    let a = write_fasta(&[("wild_type", "ACGTACGTACGTACGTACGTACGTACGTACGTACGT")]);
    let b = write_fasta(&[("methylated", "AMGTAMGTAMGTAMGTAMGTAMGT")]);

    let stdout = run_strandscope(&a, &["-f", "json", "--compare", b.path().to_str().unwrap()]);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["deltas"].as_array().unwrap().len(), 2);
    assert!(value["avg_delta"]["gc"].is_number());
}

#[test]
fn compare_rejects_report_format() {
    let a = write_fasta(&[("wild_type", "ACGTACGTACGTACGTACGTACGTACGTACGTACGT")]);
    let b = write_fasta(&[("methylated", "AMGTAMGTAMGTAMGTAMGTAMGT")]);

    let output = strandscope()
        .arg("-i")
        .arg(a.path())
        .args(["-f", "report", "--compare"])
        .arg(b.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr_contains(&output.stderr, "--compare supports tsv and json"));
}

#[test]
fn short_sequence_fails_with_message() {
    let input = write_fasta(&[("tiny", "ACGTACGTACGTAC")]);

    let output = strandscope().arg("-i").arg(input.path()).output().unwrap();

    assert!(!output.status.success());
    assert!(stderr_contains(
        &output.stderr,
        "Sequence length (14) must be at least window size (15)."
    ));
}

#[test]
fn invalid_format_is_rejected() {
    let input = write_fasta(&[("promoter", PROMOTER_REGION)]);
    strandscope()
        .arg("-i")
        .arg(input.path())
        .arg("-f")
        .arg("gbk")
        .assert()
        .failure();
}

#[test]
fn missing_input_file_is_reported() {
    let output = strandscope()
        .arg("-i")
        .arg("does/not/exist.fasta")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr_contains(&output.stderr, "Failed to read FASTA file"));
}

#[test]
fn thread_count_does_not_change_output() {
    let input = write_fasta(&[("promoter", PROMOTER_REGION)]);
    let single = run_strandscope(&input, &["--threads", "1"]);
    let multi = run_strandscope(&input, &["--threads", "4"]);
    assert_eq!(single, multi);
}
