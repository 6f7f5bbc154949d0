use super::amino_acid::AminoAcid;
use super::anticodon::Anticodon;

/// One entry of a tRNAscan-SE secondary-structure (`.ss`) report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub id: String,        // tRNAscan-SE identifier (e.g., "chr1.trna5")
    pub isotype: String,   // Isotype label as reported (e.g., "Phe", "iMet", "SeC")
    pub anticodon: String, // Anticodon label as reported, usually DNA alphabet
    pub sequence: String,
    pub structure: String, // Bracket notation, same length as `sequence`
}

/// A single-base anticodon substitution that changes the decoded amino acid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnticodonMutant {
    pub anticodon: Anticodon,
    pub amino_acid: AminoAcid,
}

/// A candidate tRNA selected for mutant design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrnaRecord {
    pub id: String,   // Canonical id (e.g., "tRNA-Phe-GAA-1")
    pub name: String, // tRNAscan-SE id the canonical id was mapped from
    pub sequence: String,
    pub anticodon: String,
    pub isotype: String,
    pub amino_acid: AminoAcid,
    pub structure: String,
    pub mutants: Vec<AnticodonMutant>,
}

impl TrnaRecord {
    pub fn from_scan_entry(id: &str, entry: &ScanEntry) -> Self {
        Self {
            id: id.to_string(),
            name: entry.id.clone(),
            sequence: entry.sequence.clone(),
            anticodon: entry.anticodon.clone(),
            isotype: entry.isotype.clone(),
            amino_acid: AminoAcid::from_isotype(&entry.isotype),
            structure: entry.structure.clone(),
            mutants: Vec::new(),
        }
    }
}
