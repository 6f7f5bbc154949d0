use super::resolve::load_candidate_trnas;
use super::{WorkflowError, path_string};
use crate::core::io::fasta::{FastaFile, FastaRecord};
use crate::core::io::traits::{RecordReader, RecordWriter};
use crate::core::models::trna::ScanEntry;
use crate::engine::config::PrepareConfig;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

pub const RNP_IDS_FILE_NAME: &str = "rnp_ids.txt";

/// Sequence and secondary structure of one protein/tRNA complex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RnpInput {
    pub id: String,
    pub sequence: String,
    pub structure: String,
}

impl RnpInput {
    /// Joins a protein chain and a tRNA into a single Rosetta input.
    ///
    /// The protein contributes its sequence verbatim and an all-unpaired
    /// structure. The tRNA is lower-cased with `t` read as `u`, and its
    /// tRNAscan-SE brackets are rewritten to Rosetta's convention
    /// (`<` becomes `)`, `>` becomes `(`).
    pub fn pair(protein: &FastaRecord, trna_id: &str, trna: &ScanEntry) -> Self {
        let trna_sequence: String = trna
            .sequence
            .chars()
            .map(|c| match c.to_ascii_lowercase() {
                't' => 'u',
                other => other,
            })
            .collect();
        let trna_structure: String = trna
            .structure
            .chars()
            .map(|c| match c {
                '<' => ')',
                '>' => '(',
                other => other,
            })
            .collect();

        Self {
            id: format!("{}_{}", protein.id, trna_id),
            sequence: format!("{}{}", protein.sequence, trna_sequence),
            structure: format!("{}{}", ".".repeat(protein.sequence.chars().count()), trna_structure),
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), WorkflowError> {
    fs::write(path, contents).map_err(|e| WorkflowError::io(path, e))
}

fn write_rnp(dir: &Path, rnp: &RnpInput) -> Result<(), WorkflowError> {
    let fasta_path = dir.join(format!("{}.fasta", rnp.id));
    let record = FastaRecord::new(&rnp.id, "", &rnp.sequence);
    FastaFile::write_to_path(std::slice::from_ref(&record), &fasta_path).map_err(|source| {
        WorkflowError::Fasta {
            path: path_string(&fasta_path),
            source,
        }
    })?;
    write_file(
        &dir.join(format!("{}.txt", rnp.id)),
        &format!("{}\n{}\n", rnp.structure, rnp.sequence),
    )
}

/// Writes one FASTA and one structure file per protein/tRNA pair, plus the
/// list of pair ids, into the output directory. Pairs are tRNA-major.
#[instrument(skip_all, name = "prepare_workflow")]
pub fn run(config: &PrepareConfig, reporter: &ProgressReporter) -> Result<Vec<RnpInput>, WorkflowError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading inputs",
    });
    let trnas = load_candidate_trnas(
        &config.candidates_path,
        &config.id_map_path,
        &config.structure_path,
    )?;
    let proteins = FastaFile::read_from_path(&config.proteins_path).map_err(|source| {
        WorkflowError::Fasta {
            path: path_string(&config.proteins_path),
            source,
        }
    })?;
    reporter.report(Progress::PhaseFinish);
    if proteins.is_empty() {
        return Err(WorkflowError::NoInput(format!(
            "protein FASTA '{}' contains no records",
            config.proteins_path.display()
        )));
    }

    let rnps: Vec<RnpInput> = trnas
        .iter()
        .flat_map(|(trna_id, entry)| {
            proteins
                .iter()
                .map(move |protein| RnpInput::pair(protein, trna_id, entry))
        })
        .collect();
    info!(
        trnas = trnas.len(),
        proteins = proteins.len(),
        pairs = rnps.len(),
        "Paired tRNAs with proteins."
    );

    reporter.report(Progress::PhaseStart {
        name: "Writing Rosetta inputs",
    });
    fs::create_dir_all(&config.output_dir).map_err(|e| WorkflowError::io(&config.output_dir, e))?;
    reporter.report(Progress::TaskStart {
        total: rnps.len() as u64,
    });
    for rnp in &rnps {
        write_rnp(&config.output_dir, rnp)?;
        debug!(rnp_id = %rnp.id, "Wrote Rosetta input files.");
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    let ids: String = rnps.iter().map(|rnp| format!("{}\n", rnp.id)).collect();
    write_file(&config.output_dir.join(RNP_IDS_FILE_NAME), &ids)?;
    reporter.report(Progress::PhaseFinish);

    info!(output = %config.output_dir.display(), "Rosetta inputs written.");
    Ok(rnps)
}
