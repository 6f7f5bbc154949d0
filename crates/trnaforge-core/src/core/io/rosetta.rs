//! Rosetta score files (`scores.sc`) and the CSV score tables derived from them.

use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Read, Write};
use thiserror::Error;
use tracing::warn;

pub const SCORE_ROW_MARKER: &str = "SCORE:";
pub const TOTAL_SCORE_COLUMN: &str = "total_score";
pub const SAMPLE_ID_COLUMN: &str = "sample_id";

#[derive(Debug, Error)]
pub enum ScoreFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Expected a header and at least one '{SCORE_ROW_MARKER}' row, found {found} line(s)")]
    TooFewLines { found: usize },
    #[error("Score header has no '{TOTAL_SCORE_COLUMN}' column")]
    MissingTotalScore,
    #[error("Score row {row} has {found} fields but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Score row {row} has a non-numeric total_score '{value}'")]
    InvalidTotalScore { row: usize, value: String },
}

#[derive(Debug, Error)]
pub enum ScoreTableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Score table is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// The lowest-energy row of a Rosetta score file.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub columns: Vec<String>,
    pub values: Vec<String>,
    pub total_score: f64,
}

/// Scans a Rosetta score file and returns its row with the minimum `total_score`.
///
/// Only lines starting with `SCORE:` are considered; the first of them is the
/// header. The marker column itself is dropped. Ties keep the earliest row.
pub fn read_best_score_row(reader: impl BufRead) -> Result<ScoreRow, ScoreFileError> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.starts_with(SCORE_ROW_MARKER) {
            lines.push(line);
        }
    }
    if lines.len() < 2 {
        return Err(ScoreFileError::TooFewLines { found: lines.len() });
    }

    let columns: Vec<String> = lines[0]
        .split_whitespace()
        .skip(1)
        .map(str::to_string)
        .collect();
    let total_idx = columns
        .iter()
        .position(|c| c == TOTAL_SCORE_COLUMN)
        .ok_or(ScoreFileError::MissingTotalScore)?;

    let mut best: Option<(f64, Vec<String>)> = None;
    for (row, line) in lines[1..].iter().enumerate() {
        let row = row + 1;
        let values: Vec<String> = line.split_whitespace().skip(1).map(str::to_string).collect();
        if values.len() != columns.len() {
            return Err(ScoreFileError::RaggedRow {
                row,
                expected: columns.len(),
                found: values.len(),
            });
        }
        let raw = &values[total_idx];
        let total: f64 = raw.parse().map_err(|_| ScoreFileError::InvalidTotalScore {
            row,
            value: raw.clone(),
        })?;
        if best.as_ref().is_none_or(|(current, _)| total < *current) {
            best = Some((total, values));
        }
    }

    let (total_score, values) = best.ok_or(ScoreFileError::TooFewLines { found: lines.len() })?;
    Ok(ScoreRow {
        columns,
        values,
        total_score,
    })
}

/// Writes per-sample best rows as one CSV table.
///
/// Columns are the union of all header columns in first-seen order followed by
/// `sample_id`; cells a sample does not have are left empty.
pub fn write_collected_scores(
    rows: &[(String, ScoreRow)],
    writer: impl Write,
) -> Result<(), ScoreTableError> {
    let mut header: Vec<&str> = Vec::new();
    for (_, row) in rows {
        for column in &row.columns {
            if !header.contains(&column.as_str()) {
                header.push(column);
            }
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut full_header = header.clone();
    full_header.push(SAMPLE_ID_COLUMN);
    csv_writer.write_record(&full_header)?;

    for (sample_id, row) in rows {
        let mut record: Vec<&str> = header
            .iter()
            .map(|column| {
                row.columns
                    .iter()
                    .position(|c| c == column)
                    .map(|idx| row.values[idx].as_str())
                    .unwrap_or("")
            })
            .collect();
        record.push(sample_id);
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// One docking result: `sample_id` is `<protein id>_<tRNA id>`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreRecord {
    pub sample_id: String,
    pub total_score: f64,
}

impl ScoreRecord {
    pub fn protein_id(&self) -> &str {
        self.sample_id.split('_').next().unwrap_or(&self.sample_id)
    }

    /// Everything after the first underscore, or the whole id if there is none.
    pub fn trna_id(&self) -> &str {
        self.sample_id
            .split_once('_')
            .map(|(_, rest)| rest)
            .unwrap_or(&self.sample_id)
    }
}

/// Reads a collected score table.
///
/// The `sample_id` and `total_score` columns are required. A row whose
/// `total_score` is blank, non-numeric or non-finite is logged and skipped.
pub fn read_score_records(reader: impl Read) -> Result<Vec<ScoreRecord>, ScoreTableError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = [TOTAL_SCORE_COLUMN, SAMPLE_ID_COLUMN]
        .iter()
        .filter(|required| !headers.iter().any(|h| h == **required))
        .map(|s| s.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ScoreTableError::MissingColumns(missing));
    }
    let sample_idx = headers.iter().position(|h| h == SAMPLE_ID_COLUMN);

    let mut records = Vec::new();
    for (idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        let line = idx + 2;
        let sample_id = sample_idx.and_then(|i| row.get(i)).unwrap_or("");
        match row.deserialize::<ScoreRecord>(Some(&headers)) {
            Ok(record) if record.total_score.is_finite() => records.push(record),
            Ok(record) => warn!(
                line,
                sample_id = %sample_id,
                total_score = record.total_score,
                "Non-finite total_score; row skipped."
            ),
            Err(e) => warn!(line, sample_id = %sample_id, error = %e, "Malformed score row; row skipped."),
        }
    }
    Ok(records)
}

/// Aggregated docking scores of one tRNA across proteins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrnaScoreSummary {
    pub trna_id: String,
    pub mean_score: f64,
    pub std_score: Option<f64>,
    pub count: usize,
    pub min_score: f64,
    pub max_score: f64,
}

pub fn write_score_summaries(
    summaries: &[TrnaScoreSummary],
    writer: impl Write,
) -> Result<(), ScoreTableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for summary in summaries {
        csv_writer.serialize(summary)?;
    }
    csv_writer.flush()?;
    Ok(())
}
