use std::collections::HashSet;
use std::io::{self, BufRead};
use std::path::Path;

/// Reads candidate tRNA ids.
///
/// Only lines starting with `tRNA` count; anything after the first comma is
/// ignored, so a `candidate_tRNAs.csv` score table can be used directly.
pub fn read_candidate_ids(reader: impl BufRead) -> io::Result<Vec<String>> {
    let mut ids = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.starts_with("tRNA") {
            continue;
        }
        if let Some(id) = line.split(',').next() {
            ids.push(id.trim().to_string());
        }
    }
    Ok(ids)
}

pub fn read_candidate_ids_from_path<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    read_candidate_ids(io::BufReader::new(file))
}

/// Reads a block-list: one protein id per non-blank line.
pub fn read_block_list(reader: impl BufRead) -> io::Result<HashSet<String>> {
    let mut blocked = HashSet::new();
    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if !id.is_empty() {
            blocked.insert(id.to_string());
        }
    }
    Ok(blocked)
}

pub fn read_block_list_from_path<P: AsRef<Path>>(path: P) -> io::Result<HashSet<String>> {
    let file = std::fs::File::open(path)?;
    read_block_list(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn candidate_ids_keep_only_trna_lines_and_first_field() {
        let text = "query_id,Ala,Phe\ntRNA-Phe-GAA-1-1,0.2,-0.5\n\n  tRNA-Asn-GTT-2  \nother\n";
        let ids = read_candidate_ids(Cursor::new(text)).unwrap();
        assert_eq!(ids, vec!["tRNA-Phe-GAA-1-1", "tRNA-Asn-GTT-2"]);
    }

    #[test]
    fn block_list_ignores_blank_lines() {
        let text = "P1\n\n  P2 \n";
        let blocked = read_block_list(Cursor::new(text)).unwrap();
        assert_eq!(blocked.len(), 2);
        assert!(blocked.contains("P1"));
        assert!(blocked.contains("P2"));
    }
}
