use crate::core::genetic_code;
use crate::core::models::amino_acid::AminoAcid;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base {
    A,
    U,
    G,
    C,
}

impl Base {
    /// Substitution order used when enumerating point mutants.
    pub const ALL: [Base; 4] = [Base::A, Base::U, Base::G, Base::C];

    pub fn rna(&self) -> char {
        match self {
            Base::A => 'A',
            Base::U => 'U',
            Base::G => 'G',
            Base::C => 'C',
        }
    }

    pub fn dna(&self) -> char {
        match self {
            Base::U => 'T',
            other => other.rna(),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Base::A),
            'U' | 'T' => Some(Base::U),
            'G' => Some(Base::G),
            'C' => Some(Base::C),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAnticodonError {
    #[error("Anticodon '{0}' must be exactly 3 bases long")]
    InvalidLength(String),
    #[error("Anticodon '{text}' contains a non-nucleotide character '{character}'")]
    InvalidBase { text: String, character: char },
}

/// A three-base anticodon, stored in the RNA alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anticodon([Base; 3]);

impl Anticodon {
    pub fn new(bases: [Base; 3]) -> Self {
        Self(bases)
    }

    pub fn bases(&self) -> [Base; 3] {
        self.0
    }

    pub fn with_base(&self, position: usize, base: Base) -> Self {
        let mut bases = self.0;
        bases[position] = base;
        Self(bases)
    }

    pub fn amino_acid(&self) -> AminoAcid {
        genetic_code::decode(&self.to_rna_string())
    }

    pub fn to_rna_string(&self) -> String {
        self.0.iter().map(Base::rna).collect()
    }

    pub fn to_dna_string(&self) -> String {
        self.0.iter().map(Base::dna).collect()
    }

    /// Number of positions at which the two anticodons differ.
    pub fn distance(&self, other: &Anticodon) -> usize {
        self.0.iter().zip(other.0.iter()).filter(|(a, b)| a != b).count()
    }
}

impl FromStr for Anticodon {
    type Err = ParseAnticodonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 3 {
            return Err(ParseAnticodonError::InvalidLength(text.to_string()));
        }
        let mut bases = [Base::A; 3];
        for (slot, &c) in bases.iter_mut().zip(chars.iter()) {
            *slot = Base::from_char(c).ok_or_else(|| ParseAnticodonError::InvalidBase {
                text: text.to_string(),
                character: c,
            })?;
        }
        Ok(Self(bases))
    }
}

impl fmt::Display for Anticodon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rna_string())
    }
}
