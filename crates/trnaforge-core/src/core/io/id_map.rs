use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

pub const SCAN_ID_HEADER: &str = "tRNAscan-SE_id";
pub const CANONICAL_ID_HEADER: &str = "GtRNAdb_id";

#[derive(Debug, Error)]
pub enum IdMapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("TSV error: {0}")]
    Tsv(#[from] csv::Error),
}

/// Mapping between tRNAscan-SE identifiers and canonical GtRNAdb-style ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap {
    entries: Vec<(String, String)>, // (tRNAscan-SE id, canonical id), file order
}

impl IdMap {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn canonical_id(&self, scan_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(scan, _)| scan == scan_id)
            .map(|(_, canonical)| canonical.as_str())
    }

    /// Resolves a candidate id to the tRNAscan-SE id of its first gene copy.
    ///
    /// Candidates name a sequence variant (`tRNA-Asn-GTT-2`); the map names
    /// individual copies (`tRNA-Asn-GTT-2-1`, `tRNA-Asn-GTT-2-2`, ...), so the
    /// candidate matches the entry whose canonical id is `<candidate>-1`.
    pub fn resolve_candidate(&self, candidate: &str) -> Option<&str> {
        let target = format!("{}-1", candidate);
        self.entries
            .iter()
            .find(|(_, canonical)| *canonical == target)
            .map(|(scan, _)| scan.as_str())
    }

    pub fn read_from(reader: impl Read) -> Result<Self, IdMapError> {
        let mut tsv = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (row, result) in tsv.records().enumerate() {
            let record = result?;
            match (record.get(0), record.get(1)) {
                (Some(scan), Some(canonical)) => {
                    entries.push((scan.trim().to_string(), canonical.trim().to_string()));
                }
                _ => warn!(row = row + 2, "ID map row has fewer than two columns; skipping."),
            }
        }
        Ok(Self { entries })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, IdMapError> {
        let file = std::fs::File::open(path)?;
        Self::read_from(io::BufReader::new(file))
    }

    pub fn write_to(&self, writer: impl Write) -> Result<(), IdMapError> {
        let mut tsv = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        tsv.write_record([SCAN_ID_HEADER, CANONICAL_ID_HEADER])?;
        for (scan, canonical) in &self.entries {
            tsv.write_record([scan, canonical])?;
        }
        tsv.flush()?;
        Ok(())
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), IdMapError> {
        let file = std::fs::File::create(path)?;
        self.write_to(io::BufWriter::new(file))
    }
}
