use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Ala, // Alanine
    Gly, // Glycine
    Ile, // Isoleucine
    Leu, // Leucine
    Pro, // Proline
    Val, // Valine

    // --- Aromatic ---
    Phe, // Phenylalanine
    Trp, // Tryptophan
    Tyr, // Tyrosine

    // --- Polar, Uncharged ---
    Asn, // Asparagine
    Cys, // Cysteine
    Gln, // Glutamine
    Ser, // Serine
    Thr, // Threonine
    Met, // Methionine

    // --- Charged ---
    Arg, // Arginine
    Lys, // Lysine
    Asp, // Aspartic acid
    Glu, // Glutamic acid
    His, // Histidine

    // --- Non-amino-acid outcomes ---
    Stop,    // Termination signal ("*")
    Unknown, // Not decodable or not a standard isotype ("X")
}

impl AminoAcid {
    pub fn code(&self) -> &'static str {
        match self {
            AminoAcid::Ala => "Ala",
            AminoAcid::Gly => "Gly",
            AminoAcid::Ile => "Ile",
            AminoAcid::Leu => "Leu",
            AminoAcid::Pro => "Pro",
            AminoAcid::Val => "Val",
            AminoAcid::Phe => "Phe",
            AminoAcid::Trp => "Trp",
            AminoAcid::Tyr => "Tyr",
            AminoAcid::Asn => "Asn",
            AminoAcid::Cys => "Cys",
            AminoAcid::Gln => "Gln",
            AminoAcid::Ser => "Ser",
            AminoAcid::Thr => "Thr",
            AminoAcid::Met => "Met",
            AminoAcid::Arg => "Arg",
            AminoAcid::Lys => "Lys",
            AminoAcid::Asp => "Asp",
            AminoAcid::Glu => "Glu",
            AminoAcid::His => "His",
            AminoAcid::Stop => "*",
            AminoAcid::Unknown => "X",
        }
    }

    /// Interprets a tRNAscan-SE or GtRNAdb isotype label.
    ///
    /// Initiator labels (`iMet`, `fMet`) collapse onto `Met`. Labels without a
    /// standard counterpart (`SeC`, `Sup`, `Undet`, ...) become `Unknown`
    /// instead of failing, since every tRNA carries some label.
    pub fn from_isotype(label: &str) -> Self {
        label.parse().unwrap_or(AminoAcid::Unknown)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unrecognized amino acid code: '{0}'")]
pub struct ParseAminoAcidError(pub String);

impl FromStr for AminoAcid {
    type Err = ParseAminoAcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "ala" => Ok(AminoAcid::Ala),
            "gly" => Ok(AminoAcid::Gly),
            "ile" => Ok(AminoAcid::Ile),
            "leu" => Ok(AminoAcid::Leu),
            "pro" => Ok(AminoAcid::Pro),
            "val" => Ok(AminoAcid::Val),
            "phe" => Ok(AminoAcid::Phe),
            "trp" => Ok(AminoAcid::Trp),
            "tyr" => Ok(AminoAcid::Tyr),
            "asn" => Ok(AminoAcid::Asn),
            "cys" => Ok(AminoAcid::Cys),
            "gln" => Ok(AminoAcid::Gln),
            "ser" => Ok(AminoAcid::Ser),
            "thr" => Ok(AminoAcid::Thr),
            "met" | "imet" | "fmet" => Ok(AminoAcid::Met),
            "arg" => Ok(AminoAcid::Arg),
            "lys" => Ok(AminoAcid::Lys),
            "asp" => Ok(AminoAcid::Asp),
            "glu" => Ok(AminoAcid::Glu),
            "his" => Ok(AminoAcid::His),
            "*" | "stop" => Ok(AminoAcid::Stop),
            "x" => Ok(AminoAcid::Unknown),
            _ => Err(ParseAminoAcidError(trimmed.to_string())),
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_letter_codes_case_insensitively() {
        assert_eq!("Phe".parse::<AminoAcid>(), Ok(AminoAcid::Phe));
        assert_eq!("LEU".parse::<AminoAcid>(), Ok(AminoAcid::Leu));
        assert_eq!("gln".parse::<AminoAcid>(), Ok(AminoAcid::Gln));
    }

    #[test]
    fn display_round_trips_for_all_standard_amino_acids() {
        let codes = [
            "Ala", "Gly", "Ile", "Leu", "Pro", "Val", "Phe", "Trp", "Tyr", "Asn", "Cys", "Gln",
            "Ser", "Thr", "Met", "Arg", "Lys", "Asp", "Glu", "His",
        ];
        for code in codes {
            let aa: AminoAcid = code.parse().unwrap();
            assert_ne!(aa, AminoAcid::Unknown);
            assert_eq!(aa.to_string(), code);
        }
    }

    #[test]
    fn stop_and_unknown_use_sentinel_symbols() {
        assert_eq!(AminoAcid::Stop.to_string(), "*");
        assert_eq!(AminoAcid::Unknown.to_string(), "X");
    }

    #[test]
    fn initiator_methionine_labels_collapse_to_met() {
        assert_eq!(AminoAcid::from_isotype("iMet"), AminoAcid::Met);
        assert_eq!(AminoAcid::from_isotype("fMet"), AminoAcid::Met);
    }

    #[test]
    fn non_standard_isotype_labels_become_unknown() {
        assert_eq!(AminoAcid::from_isotype("SeC"), AminoAcid::Unknown);
        assert_eq!(AminoAcid::from_isotype("Undet"), AminoAcid::Unknown);
        assert_eq!(AminoAcid::from_isotype("Sup"), AminoAcid::Unknown);
    }

    #[test]
    fn invalid_code_reports_the_offending_text() {
        let err = "Zzz".parse::<AminoAcid>().unwrap_err();
        assert_eq!(err, ParseAminoAcidError("Zzz".to_string()));
    }
}
