use crate::core::io::traits::RecordReader;
use crate::core::models::trna::ScanEntry;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ScanParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Reader for tRNAscan-SE secondary-structure reports (`-f` / `.ss` output).
pub struct TrnascanFile;

#[derive(Debug, Default)]
struct PartialEntry {
    id: String,
    line: usize,
    isotype: Option<String>,
    anticodon: Option<String>,
    sequence: Option<String>,
    structure: Option<String>,
}

impl PartialEntry {
    fn new(id: &str, line: usize) -> Self {
        Self {
            id: id.to_string(),
            line,
            ..Default::default()
        }
    }

    fn finish(self) -> Option<ScanEntry> {
        let (Some(isotype), Some(anticodon), Some(sequence), Some(structure)) =
            (self.isotype, self.anticodon, self.sequence, self.structure)
        else {
            warn!(
                trna_id = %self.id,
                line = self.line,
                "Incomplete tRNAscan-SE entry (missing Type/Anticodon, Seq or Str line); skipping."
            );
            return None;
        };

        if sequence.chars().count() != structure.chars().count() {
            warn!(
                trna_id = %self.id,
                sequence_len = sequence.chars().count(),
                structure_len = structure.chars().count(),
                "Structure length does not match sequence length; skipping."
            );
            return None;
        }

        Some(ScanEntry {
            id: self.id,
            isotype,
            anticodon,
            sequence,
            structure,
        })
    }
}

/// Whether a line opens a new entry, i.e. starts with `<alnum>+.trna<digits>`.
fn entry_id(line: &str) -> Option<&str> {
    let token = line.split_whitespace().next()?;
    let (prefix, rest) = token.split_once(".trna")?;
    let valid_prefix = !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphanumeric());
    let valid_suffix = rest.chars().next().is_some_and(|c| c.is_ascii_digit());
    (valid_prefix && valid_suffix).then_some(token)
}

impl RecordReader for TrnascanFile {
    type Record = ScanEntry;
    type Error = ScanParseError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<ScanEntry>, ScanParseError> {
        let mut entries = Vec::new();
        let mut current: Option<PartialEntry> = None;

        for (line_num, line_res) in reader.lines().enumerate() {
            let raw = line_res?;
            let line = raw.trim();
            let line_num = line_num + 1;

            if let Some(id) = entry_id(line) {
                if let Some(entry) = current.take().and_then(PartialEntry::finish) {
                    entries.push(entry);
                }
                current = Some(PartialEntry::new(id, line_num));
                continue;
            }

            let Some(entry) = current.as_mut() else {
                continue;
            };

            if line.contains("Type:") && line.contains("Anticodon:") {
                let parts: Vec<&str> = line.split_whitespace().collect();
                match (parts.get(1), parts.get(3)) {
                    (Some(isotype), Some(anticodon)) => {
                        entry.isotype = Some(isotype.to_string());
                        entry.anticodon = Some(anticodon.to_string());
                    }
                    _ => warn!(
                        trna_id = %entry.id,
                        line = line_num,
                        "Malformed Type/Anticodon line: '{}'",
                        line
                    ),
                }
            } else if let Some(seq) = line.strip_prefix("Seq:") {
                entry.sequence = Some(seq.trim().to_string());
            } else if let Some(structure) = line.strip_prefix("Str:") {
                entry.structure = Some(structure.trim().to_string());
            }
        }

        if let Some(entry) = current.take().and_then(PartialEntry::finish) {
            entries.push(entry);
        }

        debug!(count = entries.len(), "Parsed tRNAscan-SE entries.");
        Ok(entries)
    }
}
