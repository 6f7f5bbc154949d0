use super::resolve::load_candidate_trnas;
use super::{WorkflowError, ensure_parent_dir, path_string};
use crate::core::io::fasta::{FastaFile, FastaRecord};
use crate::core::io::traits::RecordWriter;
use crate::core::models::trna::TrnaRecord;
use crate::engine::config::DesignConfig;
use crate::engine::library::{LibraryEntry, build_library};
use crate::engine::locator::{AnticodonLocator, MutationMethod};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct DesignResult {
    pub records: Vec<TrnaRecord>,
    pub entries: Vec<LibraryEntry>,
}

impl DesignResult {
    pub fn original_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_original()).count()
    }

    pub fn mutant_count(&self) -> usize {
        self.entries.len() - self.original_count()
    }

    /// Mutants whose anticodon could not be found in the sequence.
    pub fn unplaced_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.method == Some(MutationMethod::NotFound))
            .count()
    }
}

/// Builds the anticodon mutant library for the candidate tRNAs and writes it
/// as two-line FASTA.
#[instrument(skip_all, name = "design_workflow")]
pub fn run(config: &DesignConfig, reporter: &ProgressReporter) -> Result<DesignResult, WorkflowError> {
    reporter.report(Progress::PhaseStart {
        name: "Resolving candidates",
    });
    let resolved = load_candidate_trnas(
        &config.candidates_path,
        &config.id_map_path,
        &config.structure_path,
    )?;
    let mut records: Vec<TrnaRecord> = resolved
        .iter()
        .map(|(candidate, entry)| TrnaRecord::from_scan_entry(candidate, entry))
        .collect();
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Generating mutants",
    });
    let locator = AnticodonLocator::from_config(&config.locator);
    let entries = build_library(&mut records, &locator);
    reporter.report(Progress::PhaseFinish);

    let result = DesignResult { records, entries };
    if result.unplaced_count() > 0 {
        warn!(
            unplaced = result.unplaced_count(),
            "Some mutants kept the original sequence because the anticodon was not found."
        );
    }

    let fasta: Vec<FastaRecord> = result.entries.iter().map(LibraryEntry::to_fasta_record).collect();
    ensure_parent_dir(&config.output_path)?;
    FastaFile::write_to_path(&fasta, &config.output_path).map_err(|source| WorkflowError::Fasta {
        path: path_string(&config.output_path),
        source,
    })?;

    info!(
        originals = result.original_count(),
        mutants = result.mutant_count(),
        output = %config.output_path.display(),
        "Mutant library written."
    );
    Ok(result)
}
