use std::collections::HashMap;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityElementsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line} must be '<Synthetase>\\t<p1>, <p2>, ...'")]
    MalformedLine { line: usize },
    #[error("Invalid position '{value}' on line {line}; positions are 1-based integers")]
    InvalidPosition { line: usize, value: String },
}

/// Identity-element positions per isotype.
///
/// The table file names synthetases (`PheRS`); entries are stored under the
/// isotype they charge (`Phe`). Positions are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityElements {
    positions: HashMap<String, Vec<usize>>,
}

impl IdentityElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, isotype: impl Into<String>, positions: Vec<usize>) {
        self.positions.insert(isotype.into(), positions);
    }

    pub fn get(&self, isotype: &str) -> Option<&[usize]> {
        self.positions.get(isotype).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn read_from(reader: impl BufRead) -> Result<Self, IdentityElementsError> {
        let mut table = Self::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (synthetase, list) = line
                .split_once('\t')
                .ok_or(IdentityElementsError::MalformedLine { line: line_num })?;
            let synthetase = synthetase.trim();
            if synthetase.is_empty() {
                return Err(IdentityElementsError::MalformedLine { line: line_num });
            }
            let isotype = synthetase.strip_suffix("RS").unwrap_or(synthetase);

            let positions = list
                .split(',')
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| match value.parse::<usize>() {
                    Ok(p) if p >= 1 => Ok(p),
                    _ => Err(IdentityElementsError::InvalidPosition {
                        line: line_num,
                        value: value.to_string(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            table.insert(isotype, positions);
        }
        Ok(table)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, IdentityElementsError> {
        let file = std::fs::File::open(path)?;
        Self::read_from(io::BufReader::new(file))
    }
}
