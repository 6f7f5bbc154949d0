use super::{WorkflowError, path_string};
use crate::core::io::candidates::read_candidate_ids_from_path;
use crate::core::io::id_map::IdMap;
use crate::core::io::traits::RecordReader;
use crate::core::io::trnascan::TrnascanFile;
use crate::core::models::trna::ScanEntry;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

/// Maps candidate ids onto tRNAscan-SE entries.
///
/// A candidate resolves through the id map to the gene copy whose canonical
/// id is `<candidate>-1`. Duplicate candidates are resolved once. Candidate
/// order is preserved; unmapped candidates and mapped ids without an entry are
/// warned about and dropped.
pub(crate) fn resolve_candidates(
    candidates: &[String],
    id_map: &IdMap,
    entries: &[ScanEntry],
) -> Vec<(String, ScanEntry)> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for candidate in candidates {
        if !seen.insert(candidate.as_str()) {
            continue;
        }
        let Some(scan_id) = id_map.resolve_candidate(candidate) else {
            warn!(candidate = %candidate, "Candidate has no '<id>-1' entry in the id map.");
            continue;
        };
        let Some(entry) = entries.iter().find(|e| e.id == scan_id) else {
            warn!(candidate = %candidate, scan_id, "Mapped tRNAscan-SE id has no structure entry.");
            continue;
        };
        debug!(candidate = %candidate, scan_id, anticodon = %entry.anticodon, "Resolved candidate.");
        resolved.push((candidate.clone(), entry.clone()));
    }
    resolved
}

pub(crate) fn load_candidate_trnas(
    candidates_path: &Path,
    id_map_path: &Path,
    structure_path: &Path,
) -> Result<Vec<(String, ScanEntry)>, WorkflowError> {
    let candidates = read_candidate_ids_from_path(candidates_path)
        .map_err(|e| WorkflowError::io(candidates_path, e))?;
    let id_map = IdMap::read_from_path(id_map_path).map_err(|source| WorkflowError::IdMap {
        path: path_string(id_map_path),
        source,
    })?;
    let entries =
        TrnascanFile::read_from_path(structure_path).map_err(|source| WorkflowError::Scan {
            path: path_string(structure_path),
            source,
        })?;

    let resolved = resolve_candidates(&candidates, &id_map, &entries);
    info!(
        candidates = candidates.len(),
        mapped_ids = id_map.len(),
        structures = entries.len(),
        resolved = resolved.len(),
        "Candidate tRNAs resolved."
    );
    if resolved.is_empty() {
        return Err(WorkflowError::NoInput(format!(
            "none of the {} candidate(s) in '{}' resolved to a tRNAscan-SE entry",
            candidates.len(),
            candidates_path.display()
        )));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> ScanEntry {
        ScanEntry {
            id: id.to_string(),
            isotype: "Asn".to_string(),
            anticodon: "GTT".to_string(),
            sequence: "ACGT".to_string(),
            structure: "....".to_string(),
        }
    }

    #[test]
    fn resolves_first_copy_and_keeps_candidate_order() {
        let id_map = IdMap::new(vec![
            ("chr1.trna1".into(), "tRNA-Asn-GTT-2-2".into()),
            ("chr1.trna2".into(), "tRNA-Asn-GTT-2-1".into()),
            ("chr2.trna7".into(), "tRNA-Phe-GAA-1-1".into()),
        ]);
        let entries = vec![entry("chr1.trna1"), entry("chr1.trna2"), entry("chr2.trna7")];
        let candidates = vec![
            "tRNA-Phe-GAA-1".to_string(),
            "tRNA-Asn-GTT-2".to_string(),
            "tRNA-Phe-GAA-1".to_string(),
        ];
        let resolved = resolve_candidates(&candidates, &id_map, &entries);
        let pairs: Vec<(&str, &str)> = resolved
            .iter()
            .map(|(c, e)| (c.as_str(), e.id.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("tRNA-Phe-GAA-1", "chr2.trna7"),
                ("tRNA-Asn-GTT-2", "chr1.trna2")
            ]
        );
    }

    #[test]
    fn unmapped_and_missing_structures_are_dropped() {
        let id_map = IdMap::new(vec![("chr9.trna1".into(), "tRNA-Gly-GCC-1-1".into())]);
        let candidates = vec!["tRNA-Gly-GCC-1".to_string(), "tRNA-Ala-AGC-3".to_string()];
        let resolved = resolve_candidates(&candidates, &id_map, &[entry("chr1.trna1")]);
        assert!(resolved.is_empty());
    }
}
