use crate::core::io::traits::RecordReader;
use crate::core::models::alignment::AlignedTrna;
use std::collections::HashMap;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StockholmError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line} is not a '<name> <sequence>' alignment row")]
    MalformedRow { line: usize },
    #[error("Sequence '{id}' spans {found} columns but the alignment has {expected}")]
    RaggedAlignment {
        id: String,
        expected: usize,
        found: usize,
    },
}

/// Reader for the first alignment block of a Stockholm file.
///
/// Annotation lines (`#=GF`, `#=GS`, `#=GC`, `#=GR`) and comments are ignored.
/// Interleaved blocks are concatenated per sequence name, keeping first-seen
/// order. Reading stops at the `//` terminator.
pub struct StockholmFile;

impl RecordReader for StockholmFile {
    type Record = AlignedTrna;
    type Error = StockholmError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<AlignedTrna>, StockholmError> {
        let mut order: Vec<String> = Vec::new();
        let mut rows: HashMap<String, String> = HashMap::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line == "//" {
                break;
            }

            let mut fields = line.split_whitespace();
            let (Some(name), Some(segment), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(StockholmError::MalformedRow { line: line_num + 1 });
            };

            rows.entry(name.to_string())
                .or_insert_with(|| {
                    order.push(name.to_string());
                    String::new()
                })
                .push_str(segment);
        }

        let mut records = Vec::with_capacity(order.len());
        let mut expected: Option<usize> = None;
        for name in order {
            let gapped = rows.remove(&name).unwrap_or_default();
            let width = gapped.chars().count();
            if let Some(columns) = expected {
                if columns != width {
                    return Err(StockholmError::RaggedAlignment {
                        id: name,
                        expected: columns,
                        found: width,
                    });
                }
            } else {
                expected = Some(width);
            }
            records.push(AlignedTrna::new(&name, &gapped));
        }

        debug!(
            sequences = records.len(),
            columns = expected.unwrap_or(0),
            "Parsed Stockholm alignment."
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
# STOCKHOLM 1.0
#=GF ID   trna_demo

tRNA-Phe-GAA-1-1   GCC.GA
tRNA-Asn-GTT-2-1   G-CAGA
#=GC SS_cons       <<..>>

tRNA-Phe-GAA-1-1   AU
tRNA-Asn-GTT-2-1   A-
//
tRNA-Extra-AAA-1-1 ZZZZZZZZ
";

    #[test]
    fn concatenates_interleaved_blocks_and_stops_at_terminator() {
        let records = StockholmFile::read_from(&mut Cursor::new(SAMPLE)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "tRNA-Phe-GAA-1-1");
        assert_eq!(records[0].gapped_sequence(), "GCC-GAAU");
        assert_eq!(records[1].gapped_sequence(), "G-CAGAA-");
        assert_eq!(records[1].isotype, "Asn");
    }

    #[test]
    fn residue_indices_follow_gaps() {
        let records = StockholmFile::read_from(&mut Cursor::new(SAMPLE)).unwrap();
        assert_eq!(records[0].column_of_residue(3), Some(4));
        assert_eq!(records[1].column_of_residue(1), Some(2));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let text = "# STOCKHOLM 1.0\na ACG\nb AC\n//\n";
        let result = StockholmFile::read_from(&mut Cursor::new(text));
        assert!(matches!(
            result,
            Err(StockholmError::RaggedAlignment { ref id, expected: 3, found: 2 }) if id == "b"
        ));
    }

    #[test]
    fn rows_without_sequence_are_rejected() {
        let text = "# STOCKHOLM 1.0\nlonely\n//\n";
        let result = StockholmFile::read_from(&mut Cursor::new(text));
        assert!(matches!(result, Err(StockholmError::MalformedRow { line: 2 })));
    }
}
