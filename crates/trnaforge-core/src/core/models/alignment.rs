pub const GAP: char = '-';

/// One row of a column-aligned tRNA alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedTrna {
    pub id: String,
    pub anticodon: String,
    pub isotype: String,
    gapped: Vec<char>,
    indices: Vec<Option<usize>>, // Alignment column -> ungapped residue index
}

impl AlignedTrna {
    /// Builds a record from a GtRNAdb-style id (`tRNA-<Isotype>-<Anticodon>-...`)
    /// and its gapped sequence. `.` and `-` are both treated as gaps.
    pub fn new(id: &str, gapped_sequence: &str) -> Self {
        let mut residue = 0usize;
        let mut gapped = Vec::with_capacity(gapped_sequence.len());
        let mut indices = Vec::with_capacity(gapped_sequence.len());
        for c in gapped_sequence.chars() {
            if is_gap(c) {
                gapped.push(GAP);
                indices.push(None);
            } else {
                gapped.push(c);
                indices.push(Some(residue));
                residue += 1;
            }
        }

        let (isotype, anticodon) = labels_from_id(id);
        Self {
            id: id.to_string(),
            anticodon,
            isotype,
            gapped,
            indices,
        }
    }

    pub fn len(&self) -> usize {
        self.gapped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gapped.is_empty()
    }

    pub fn gapped_sequence(&self) -> String {
        self.gapped.iter().collect()
    }

    pub fn indices(&self) -> &[Option<usize>] {
        &self.indices
    }

    pub fn char_at(&self, column: usize) -> Option<char> {
        self.gapped.get(column).copied()
    }

    /// Alignment column holding the residue with the given 0-based index.
    pub fn column_of_residue(&self, residue: usize) -> Option<usize> {
        self.indices.iter().position(|&idx| idx == Some(residue))
    }
}

pub fn is_gap(c: char) -> bool {
    c == '-' || c == '.'
}

fn labels_from_id(id: &str) -> (String, String) {
    let parts: Vec<&str> = id.split('-').collect();
    let isotype = if id.contains("iMet") {
        "Met".to_string()
    } else {
        parts.get(1).map(|s| s.to_string()).unwrap_or_default()
    };
    let anticodon = parts.get(2).map(|s| s.to_string()).unwrap_or_default();
    (isotype, anticodon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_labels_from_gtrnadb_id() {
        let rec = AlignedTrna::new("tRNA-Phe-GAA-1-1", "GC-CA");
        assert_eq!(rec.isotype, "Phe");
        assert_eq!(rec.anticodon, "GAA");
    }

    #[test]
    fn initiator_methionine_ids_map_to_met() {
        let rec = AlignedTrna::new("tRNA-iMet-CAT-1-1", "AGC");
        assert_eq!(rec.isotype, "Met");
        assert_eq!(rec.anticodon, "CAT");
    }

    #[test]
    fn indices_skip_gap_columns() {
        let rec = AlignedTrna::new("tRNA-Ala-AGC-1-1", "G-.CA");
        assert_eq!(rec.indices(), &[Some(0), None, None, Some(1), Some(2)]);
        assert_eq!(rec.gapped_sequence(), "G--CA");
        assert_eq!(rec.len(), 5);
    }

    #[test]
    fn column_of_residue_finds_the_aligned_column() {
        let rec = AlignedTrna::new("tRNA-Ala-AGC-1-1", "G--CA");
        assert_eq!(rec.column_of_residue(0), Some(0));
        assert_eq!(rec.column_of_residue(1), Some(3));
        assert_eq!(rec.column_of_residue(2), Some(4));
        assert_eq!(rec.column_of_residue(3), None);
    }

    #[test]
    fn malformed_id_yields_empty_labels() {
        let rec = AlignedTrna::new("seq1", "ACGU");
        assert!(rec.isotype.is_empty());
        assert!(rec.anticodon.is_empty());
    }
}
