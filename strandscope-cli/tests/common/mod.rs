#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

/// Promoter-like region with a methylated CpG island tail
pub const PROMOTER_REGION: &str = "TTGACAATTAATCATCGGCTCGTATAATGTGTGGAATTGTGAGCGGATAACAATTTCACACAGGAAACAGCTATGACCATGMGMGMGMGMGCCCGGGCGCGCG";

/// Writes `records` (id, sequence) to a temporary FASTA file
pub fn write_fasta(records: &[(&str, &str)]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp FASTA");
    for (id, sequence) in records {
        writeln!(file, ">{id}").expect("write header");
        writeln!(file, "{sequence}").expect("write sequence");
    }
    file.flush().expect("flush temp FASTA");
    file
}

/// Strandscope binary with logging silenced
pub fn strandscope() -> Command {
    let mut cmd = Command::cargo_bin("strandscope").expect("binary built");
    cmd.env("RUST_LOG", "warn");
    cmd
}

/// Runs the CLI on `input` and returns stdout
pub fn run_strandscope(input: &NamedTempFile, extra_args: &[&str]) -> String {
    let output = strandscope()
        .arg("-i")
        .arg(input.path())
        .args(extra_args)
        .output()
        .expect("run strandscope");
    assert!(
        output.status.success(),
        "strandscope failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf-8 output")
}
