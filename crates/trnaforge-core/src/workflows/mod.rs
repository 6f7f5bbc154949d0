//! # Workflows Module
//!
//! End-to-end pipelines over files. Each workflow loads its inputs, hands the
//! records to the [`crate::engine`], and writes its outputs in one pass at the
//! end, so a failure never leaves a partially written result behind.
//!
//! - **Name Map** ([`name_map`]) - canonical `tRNA-<Iso>-<AC>-<n>-<m>` ids for tRNAscan-SE hits
//! - **Design** ([`design`]) - anticodon mutant library for candidate tRNAs (FASTA)
//! - **Orthogonality** ([`orthogonality`]) - identity-element scores and self-orthogonal candidates
//! - **Prepare** ([`prepare`]) - protein/tRNA pair inputs for Rosetta
//! - **Collect** ([`collect`]) - runs the scoring binary per sample and gathers best rows
//! - **Rank** ([`rank`]) - per-tRNA docking score statistics with protein block-lists

use crate::core::io::fasta::FastaError;
use crate::core::io::id_map::IdMapError;
use crate::core::io::identity::IdentityElementsError;
use crate::core::io::rosetta::ScoreTableError;
use crate::core::io::stockholm::StockholmError;
use crate::core::io::trnascan::ScanParseError;
use crate::engine::error::EngineError;
use std::path::Path;
use thiserror::Error;

pub mod collect;
pub mod design;
pub mod name_map;
pub mod orthogonality;
pub mod prepare;
pub mod rank;
mod resolve;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse tRNAscan-SE file '{path}': {source}")]
    Scan { path: String, source: ScanParseError },
    #[error("Failed to process id map '{path}': {source}")]
    IdMap { path: String, source: IdMapError },
    #[error("Failed to process FASTA file '{path}': {source}")]
    Fasta { path: String, source: FastaError },
    #[error("Failed to parse Stockholm alignment '{path}': {source}")]
    Stockholm { path: String, source: StockholmError },
    #[error("Failed to parse identity elements '{path}': {source}")]
    IdentityElements {
        path: String,
        source: IdentityElementsError,
    },
    #[error("Failed to process score table '{path}': {source}")]
    ScoreTable { path: String, source: ScoreTableError },
    #[error("Failed to write table '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Nothing to do: {0}")]
    NoInput(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl WorkflowError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        WorkflowError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

pub(crate) fn path_string(path: &Path) -> String {
    path.display().to_string()
}

/// Creates the parent directory of an output file if it does not exist yet.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), WorkflowError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| WorkflowError::io(parent, e))
        }
        _ => Ok(()),
    }
}
