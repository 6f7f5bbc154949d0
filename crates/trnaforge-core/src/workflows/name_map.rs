use super::{WorkflowError, ensure_parent_dir, path_string};
use crate::core::io::id_map::IdMap;
use crate::core::io::traits::RecordReader;
use crate::core::io::trnascan::TrnascanFile;
use crate::core::models::trna::ScanEntry;
use crate::engine::config::NameMapConfig;
use std::cmp::Ordering;
use tracing::{info, instrument};

/// Assigns canonical `tRNA-<Isotype>-<Anticodon>-<n>-<m>` ids.
///
/// Entries are grouped by (isotype, anticodon) label. Within a group each
/// distinct sequence gets the next `n` in order of first appearance, and
/// identical sequences are numbered `m = 1, 2, ...` in file order. The
/// returned map is ordered by [`compare_scan_ids`].
pub fn build_name_map(entries: &[ScanEntry]) -> IdMap {
    // (isotype, anticodon) -> distinct sequences with their copy counters
    let mut groups: Vec<((&str, &str), Vec<(&str, usize)>)> = Vec::new();
    let mut pairs: Vec<(String, String)> = Vec::with_capacity(entries.len());

    for entry in entries {
        let key = (entry.isotype.as_str(), entry.anticodon.as_str());
        let group_idx = match groups.iter().position(|(k, _)| *k == key) {
            Some(idx) => idx,
            None => {
                groups.push((key, Vec::new()));
                groups.len() - 1
            }
        };
        let variants = &mut groups[group_idx].1;
        let seq_idx = match variants.iter().position(|(seq, _)| *seq == entry.sequence) {
            Some(idx) => idx,
            None => {
                variants.push((entry.sequence.as_str(), 0));
                variants.len() - 1
            }
        };
        variants[seq_idx].1 += 1;

        let canonical = format!(
            "tRNA-{}-{}-{}-{}",
            entry.isotype,
            entry.anticodon,
            seq_idx + 1,
            variants[seq_idx].1
        );
        pairs.push((entry.id.clone(), canonical));
    }

    pairs.sort_by(|a, b| compare_scan_ids(&a.0, &b.0));
    IdMap::new(pairs)
}

/// Orders tRNAscan-SE ids by contig prefix, contig number, then tRNA number.
///
/// `chr2.trna10` sorts after `chr2.trna9` and before `chr10.trna1`. The contig
/// part is the first run of letters directly followed by digits; the tRNA
/// number follows the first `trna` that is followed by digits.
pub fn compare_scan_ids(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

fn sort_key(id: &str) -> (String, u64, u64) {
    let (prefix, contig) = contig_key(id).unwrap_or_default();
    let trna = trna_number(id).unwrap_or(0);
    (prefix, contig, trna)
}

fn contig_key(id: &str) -> Option<(String, u64)> {
    let chars: Vec<char> = id.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_alphabetic() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_alphabetic() {
            i += 1;
        }
        let digits: String = chars[i..].iter().take_while(|c| c.is_ascii_digit()).collect();
        if !digits.is_empty() {
            let prefix: String = chars[start..i].iter().collect();
            return Some((prefix, digits.parse().unwrap_or(u64::MAX)));
        }
    }
    None
}

fn trna_number(id: &str) -> Option<u64> {
    id.match_indices("trna").find_map(|(idx, marker)| {
        let digits: String = id[idx + marker.len()..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        (!digits.is_empty()).then(|| digits.parse().unwrap_or(u64::MAX))
    })
}

#[instrument(skip_all, name = "name_map_workflow")]
pub fn run(config: &NameMapConfig) -> Result<IdMap, WorkflowError> {
    let entries =
        TrnascanFile::read_from_path(&config.structure_path).map_err(|source| WorkflowError::Scan {
            path: path_string(&config.structure_path),
            source,
        })?;
    if entries.is_empty() {
        return Err(WorkflowError::NoInput(format!(
            "no complete tRNA entries in '{}'",
            config.structure_path.display()
        )));
    }

    let id_map = build_name_map(&entries);

    ensure_parent_dir(&config.output_path)?;
    id_map
        .write_to_path(&config.output_path)
        .map_err(|source| WorkflowError::IdMap {
            path: path_string(&config.output_path),
            source,
        })?;

    info!(
        entries = entries.len(),
        output = %config.output_path.display(),
        "Name map written."
    );
    Ok(id_map)
}
