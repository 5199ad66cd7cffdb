use std::fs::File;
use std::io::Read;
use std::path::Path;

use bio::io::fasta;

use crate::types::StrandscopeError;

/// One FASTA record: identifier, optional description, raw sequence text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub description: Option<String>,
    pub sequence: String,
}

/// Read every record of a FASTA file with rust-bio.
pub fn read_fasta_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<FastaRecord>, StrandscopeError> {
    let file = File::open(path)?;
    read_fasta_from(file)
}

/// Read every record from any FASTA source.
///
/// Sequence bytes are decoded lossily; undecodable bytes end up as `N` after
/// sanitization.
pub fn read_fasta_from<R: Read>(source: R) -> Result<Vec<FastaRecord>, StrandscopeError> {
    let reader = fasta::Reader::new(source);
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| StrandscopeError::ParseError(e.to_string()))?;
        records.push(FastaRecord {
            id: record.id().to_string(),
            description: record.desc().map(String::from),
            sequence: String::from_utf8_lossy(record.seq()).into_owned(),
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_fasta_sequences_basic() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, ">test_sequence\nATCG\nGCTA\n").unwrap();

        let sequences = read_fasta_sequences(file.path()).unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].id, "test_sequence");
        assert_eq!(sequences[0].sequence, "ATCGGCTA");
    }

    #[test]
    fn test_read_fasta_from_empty_source() {
        let sequences = read_fasta_from(Cursor::new("")).unwrap();
        assert!(sequences.is_empty());
    }

    #[test]
    fn test_read_fasta_multiple_with_description() {
        let content = ">seq1 methylated promoter\nACGMACGM\n>seq2\nGCTA\n>seq3\nttaa\n";
        let sequences = read_fasta_from(Cursor::new(content)).unwrap();

        assert_eq!(sequences.len(), 3);
        assert_eq!(sequences[0].id, "seq1");
        assert_eq!(
            sequences[0].description.as_deref(),
            Some("methylated promoter")
        );
        assert_eq!(sequences[1].description, None);
        assert_eq!(sequences[2].sequence, "ttaa");
    }

    #[test]
    fn test_read_fasta_sequences_file_not_found() {
        let result = read_fasta_sequences("nonexistent_file.fa");
        match result {
            Err(StrandscopeError::IoError(_)) => {}
            other => panic!("Expected IoError for missing file, got {:?}", other),
        }
    }

    #[test]
    fn test_read_fasta_rejects_missing_header() {
        let result = read_fasta_from(Cursor::new("ACGT\n"));
        assert!(matches!(result, Err(StrandscopeError::ParseError(_))));
    }
}
