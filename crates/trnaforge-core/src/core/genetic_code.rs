//! The standard genetic code, keyed by tRNA anticodon.
//!
//! Anticodons are written 5'->3' in the RNA alphabet; each entry is the
//! reverse complement of the codon it reads, so `GAA` reads `UUC` (Phe).

use crate::core::models::amino_acid::AminoAcid;
use phf::{Map, phf_map};

#[rustfmt::skip]
pub static ANTICODON_TABLE: Map<&'static str, AminoAcid> = phf_map! {
    // Phe: UUU UUC
    "AAA" => AminoAcid::Phe, "GAA" => AminoAcid::Phe,
    // Leu: UUA UUG CUU CUC CUA CUG
    "UAA" => AminoAcid::Leu, "CAA" => AminoAcid::Leu, "AAG" => AminoAcid::Leu,
    "GAG" => AminoAcid::Leu, "UAG" => AminoAcid::Leu, "CAG" => AminoAcid::Leu,
    // Ser: UCU UCC UCA UCG AGU AGC
    "AGA" => AminoAcid::Ser, "GGA" => AminoAcid::Ser, "UGA" => AminoAcid::Ser,
    "CGA" => AminoAcid::Ser, "ACU" => AminoAcid::Ser, "GCU" => AminoAcid::Ser,
    // Tyr: UAU UAC
    "AUA" => AminoAcid::Tyr, "GUA" => AminoAcid::Tyr,
    // Stop: UAA UAG UGA
    "UUA" => AminoAcid::Stop, "CUA" => AminoAcid::Stop, "UCA" => AminoAcid::Stop,
    // Cys: UGU UGC
    "ACA" => AminoAcid::Cys, "GCA" => AminoAcid::Cys,
    // Trp: UGG
    "CCA" => AminoAcid::Trp,
    // Pro: CCU CCC CCA CCG
    "AGG" => AminoAcid::Pro, "GGG" => AminoAcid::Pro, "UGG" => AminoAcid::Pro,
    "CGG" => AminoAcid::Pro,
    // His: CAU CAC
    "AUG" => AminoAcid::His, "GUG" => AminoAcid::His,
    // Gln: CAA CAG
    "UUG" => AminoAcid::Gln, "CUG" => AminoAcid::Gln,
    // Arg: CGU CGC CGA CGG AGA AGG
    "ACG" => AminoAcid::Arg, "GCG" => AminoAcid::Arg, "UCG" => AminoAcid::Arg,
    "CCG" => AminoAcid::Arg, "UCU" => AminoAcid::Arg, "CCU" => AminoAcid::Arg,
    // Ile: AUU AUC AUA
    "AAU" => AminoAcid::Ile, "GAU" => AminoAcid::Ile, "UAU" => AminoAcid::Ile,
    // Met: AUG
    "CAU" => AminoAcid::Met,
    // Thr: ACU ACC ACA ACG
    "AGU" => AminoAcid::Thr, "GGU" => AminoAcid::Thr, "UGU" => AminoAcid::Thr,
    "CGU" => AminoAcid::Thr,
    // Asn: AAU AAC
    "AUU" => AminoAcid::Asn, "GUU" => AminoAcid::Asn,
    // Lys: AAA AAG
    "UUU" => AminoAcid::Lys, "CUU" => AminoAcid::Lys,
    // Val: GUU GUC GUA GUG
    "AAC" => AminoAcid::Val, "GAC" => AminoAcid::Val, "UAC" => AminoAcid::Val,
    "CAC" => AminoAcid::Val,
    // Ala: GCU GCC GCA GCG
    "AGC" => AminoAcid::Ala, "GGC" => AminoAcid::Ala, "UGC" => AminoAcid::Ala,
    "CGC" => AminoAcid::Ala,
    // Asp: GAU GAC
    "AUC" => AminoAcid::Asp, "GUC" => AminoAcid::Asp,
    // Glu: GAA GAG
    "UUC" => AminoAcid::Glu, "CUC" => AminoAcid::Glu,
    // Gly: GGU GGC GGA GGG
    "ACC" => AminoAcid::Gly, "GCC" => AminoAcid::Gly, "UCC" => AminoAcid::Gly,
    "CCC" => AminoAcid::Gly,
};

/// Decodes an anticodon written in either alphabet and in any case.
///
/// Anything that is not one of the 64 table entries decodes to
/// [`AminoAcid::Unknown`].
pub fn decode(anticodon: &str) -> AminoAcid {
    let normalized: String = anticodon
        .trim()
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            'T' => 'U',
            other => other,
        })
        .collect();
    ANTICODON_TABLE
        .get(normalized.as_str())
        .copied()
        .unwrap_or(AminoAcid::Unknown)
}
