use crate::core::models::amino_acid::AminoAcid;
use crate::core::models::anticodon::{Anticodon, Base};
use crate::core::models::trna::AnticodonMutant;
use tracing::trace;

/// Enumerates the single-base anticodon substitutions that reassign a tRNA.
///
/// Positions are visited in order and, at each position, bases in the order
/// A, U, G, C (skipping the base already present). A substitution is kept only
/// if it decodes to something other than `original_type` and is not
/// `AminoAcid::Unknown`. The result is deterministic and may be empty.
pub fn alternative_anticodons(original: &Anticodon, original_type: AminoAcid) -> Vec<AnticodonMutant> {
    let mut mutants = Vec::new();
    for (position, current) in original.bases().into_iter().enumerate() {
        for base in Base::ALL {
            if base == current {
                continue;
            }
            let anticodon = original.with_base(position, base);
            let amino_acid = anticodon.amino_acid();
            if amino_acid == original_type || amino_acid == AminoAcid::Unknown {
                continue;
            }
            trace!(
                original = %original,
                mutant = %anticodon,
                position = position + 1,
                amino_acid = %amino_acid,
                "Accepted anticodon substitution."
            );
            mutants.push(AnticodonMutant {
                anticodon,
                amino_acid,
            });
        }
    }
    mutants
}
