use crate::core::io::traits::{RecordReader, RecordWriter};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Sequence data on line {line} appears before any '>' header")]
    MissingHeader { line: usize },
    #[error("Record header on line {line} has an empty identifier")]
    EmptyId { line: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

impl FastaRecord {
    pub fn new(id: impl Into<String>, description: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            sequence: sequence.into(),
        }
    }
}

/// FASTA reader (multi-line sequences accepted) and two-line FASTA writer.
pub struct FastaFile;

impl RecordReader for FastaFile {
    type Record = FastaRecord;
    type Error = FastaError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<FastaRecord>, FastaError> {
        let mut records: Vec<FastaRecord> = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('>') {
                let header = header.trim();
                let (id, description) = match header.split_once(char::is_whitespace) {
                    Some((id, rest)) => (id, rest.trim()),
                    None => (header, ""),
                };
                if id.is_empty() {
                    return Err(FastaError::EmptyId { line: line_num });
                }
                records.push(FastaRecord::new(id, description, String::new()));
            } else {
                let record = records
                    .last_mut()
                    .ok_or(FastaError::MissingHeader { line: line_num })?;
                record.sequence.push_str(line);
            }
        }

        Ok(records)
    }
}

impl RecordWriter for FastaFile {
    type Record = FastaRecord;
    type Error = FastaError;

    fn write_to(records: &[FastaRecord], writer: &mut impl Write) -> Result<(), FastaError> {
        for record in records {
            if record.description.is_empty() {
                writeln!(writer, ">{}", record.id)?;
            } else {
                writeln!(writer, ">{} {}", record.id, record.description)?;
            }
            writeln!(writer, "{}", record.sequence)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_multi_line_records_with_descriptions() {
        let text = ">P1 seryl-tRNA synthetase\nMKLD\nIRQA\n\n>P2\nMSTN\n";
        let records = FastaFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "P1");
        assert_eq!(records[0].description, "seryl-tRNA synthetase");
        assert_eq!(records[0].sequence, "MKLDIRQA");
        assert_eq!(records[1].id, "P2");
        assert_eq!(records[1].description, "");
        assert_eq!(records[1].sequence, "MSTN");
    }

    #[test]
    fn sequence_before_header_is_rejected() {
        let result = FastaFile::read_from(&mut Cursor::new("ACGT\n>x\nA\n"));
        assert!(matches!(result, Err(FastaError::MissingHeader { line: 1 })));
    }

    #[test]
    fn empty_identifier_is_rejected() {
        let result = FastaFile::read_from(&mut Cursor::new(">\nACGT\n"));
        assert!(matches!(result, Err(FastaError::EmptyId { line: 1 })));
    }

    #[test]
    fn writes_two_line_records() {
        let records = vec![
            FastaRecord::new("tRNA-Phe-GAA-1_original", "aa:Phe", "GCCGAA"),
            FastaRecord::new("bare", "", "ACGT"),
        ];
        let mut out = Vec::new();
        FastaFile::write_to(&records, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">tRNA-Phe-GAA-1_original aa:Phe\nGCCGAA\n>bare\nACGT\n"
        );
    }
}
