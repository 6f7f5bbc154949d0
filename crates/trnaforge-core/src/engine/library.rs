use super::locator::{AnticodonLocator, MutationMethod};
use super::mutation::alternative_anticodons;
use crate::core::io::fasta::FastaRecord;
use crate::core::models::anticodon::Anticodon;
use crate::core::models::trna::TrnaRecord;
use tracing::{debug, info, warn};

/// One sequence of a mutant library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub id: String,
    pub tag: String, // Amino-acid label written as `aa:<tag>`
    pub sequence: String,
    pub method: Option<MutationMethod>, // `None` for the unmodified original
}

impl LibraryEntry {
    pub fn is_original(&self) -> bool {
        self.method.is_none()
    }

    pub fn to_fasta_record(&self) -> FastaRecord {
        FastaRecord::new(&self.id, format!("aa:{}", self.tag), &self.sequence)
    }
}

/// Builds the anticodon mutant library for a set of tRNAs.
///
/// Every record yields `<id>_original` followed by `<id>_mutant1`,
/// `<id>_mutant2`, ... in generation order; input order is preserved. Each
/// record's `mutants` field is replaced with the substitutions generated for
/// it. Records whose anticodon label cannot be parsed, or that admit no
/// reassigning substitution, contribute their original entry only.
pub fn build_library(records: &mut [TrnaRecord], locator: &AnticodonLocator) -> Vec<LibraryEntry> {
    let mut entries = Vec::new();

    for record in records.iter_mut() {
        entries.push(LibraryEntry {
            id: format!("{}_original", record.id),
            tag: record.isotype.clone(),
            sequence: record.sequence.clone(),
            method: None,
        });

        let original: Anticodon = match record.anticodon.parse() {
            Ok(anticodon) => anticodon,
            Err(e) => {
                warn!(trna_id = %record.id, error = %e, "Skipping mutants: unusable anticodon label.");
                record.mutants.clear();
                continue;
            }
        };

        record.mutants = alternative_anticodons(&original, record.amino_acid);
        if record.mutants.is_empty() {
            warn!(trna_id = %record.id, anticodon = %original, "No reassigning anticodon substitution exists.");
            continue;
        }
        info!(
            trna_id = %record.id,
            amino_acid = %record.amino_acid,
            mutants = record.mutants.len(),
            "Generated anticodon mutants."
        );

        for (n, mutant) in record.mutants.iter().enumerate() {
            let mutation = locator.mutate(
                &record.id,
                &record.sequence,
                &record.structure,
                &original,
                &mutant.anticodon,
            );
            debug!(
                trna_id = %record.id,
                mutant = n + 1,
                anticodon = %mutant.anticodon,
                method = ?mutation.method,
                "Placed mutant anticodon."
            );
            entries.push(LibraryEntry {
                id: format!("{}_mutant{}", record.id, n + 1),
                tag: mutant.amino_acid.to_string(),
                sequence: mutation.sequence,
                method: Some(mutation.method),
            });
        }
    }

    entries
}
