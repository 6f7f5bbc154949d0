use super::{WorkflowError, ensure_parent_dir, path_string};
use crate::core::io::candidates::read_block_list_from_path;
use crate::core::io::rosetta::{ScoreRecord, TrnaScoreSummary, read_score_records, write_score_summaries};
use crate::engine::config::RankConfig;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use tracing::{debug, info, instrument, warn};

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn summarize(trna_id: &str, scores: &[f64]) -> TrnaScoreSummary {
    let count = scores.len();
    let mean = scores.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        round3(variance.sqrt())
    });
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    TrnaScoreSummary {
        trna_id: trna_id.to_string(),
        mean_score: round3(mean),
        std_score: std,
        count,
        min_score: round3(min),
        max_score: round3(max),
    }
}

/// Aggregates docking scores per tRNA, ignoring rows whose protein is blocked.
///
/// Summaries are ordered by mean score, lowest (best) first; equal means keep
/// tRNA id order.
pub fn rank_scores(records: &[ScoreRecord], blocked: &HashSet<String>) -> Vec<TrnaScoreSummary> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        if blocked.contains(record.protein_id()) {
            debug!(sample_id = %record.sample_id, "Blocked protein; row dropped.");
            continue;
        }
        groups.entry(record.trna_id()).or_default().push(record.total_score);
    }

    let mut summaries: Vec<TrnaScoreSummary> = groups
        .iter()
        .map(|(trna_id, scores)| summarize(trna_id, scores))
        .collect();
    summaries.sort_by(|a, b| a.mean_score.total_cmp(&b.mean_score));
    summaries
}

#[instrument(skip_all, name = "rank_workflow")]
pub fn run(config: &RankConfig) -> Result<Vec<TrnaScoreSummary>, WorkflowError> {
    let file = File::open(&config.scores_path).map_err(|e| WorkflowError::io(&config.scores_path, e))?;
    let records = read_score_records(BufReader::new(file)).map_err(|source| WorkflowError::ScoreTable {
        path: path_string(&config.scores_path),
        source,
    })?;

    let blocked = match &config.block_list_path {
        Some(path) if path.exists() => {
            read_block_list_from_path(path).map_err(|e| WorkflowError::io(path, e))?
        }
        Some(path) => {
            warn!(path = %path.display(), "Block-list not found; no proteins blocked.");
            HashSet::new()
        }
        None => HashSet::new(),
    };

    let summaries = rank_scores(&records, &blocked);
    if summaries.is_empty() {
        warn!("No score rows left after filtering.");
    }

    ensure_parent_dir(&config.output_path)?;
    let out = File::create(&config.output_path).map_err(|e| WorkflowError::io(&config.output_path, e))?;
    write_score_summaries(&summaries, BufWriter::new(out)).map_err(|source| WorkflowError::ScoreTable {
        path: path_string(&config.output_path),
        source,
    })?;

    info!(
        rows = records.len(),
        blocked_proteins = blocked.len(),
        trnas = summaries.len(),
        output = %config.output_path.display(),
        "Score ranking written."
    );
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn record(sample_id: &str, total_score: f64) -> ScoreRecord {
        ScoreRecord {
            sample_id: sample_id.to_string(),
            total_score,
        }
    }

    #[test]
    fn same_trna_rows_are_averaged() {
        let records = vec![record("P1_tRNA-Asn-GTT-2", -10.0), record("P1_tRNA-Asn-GTT-2", -8.0)];
        let summaries = rank_scores(&records, &HashSet::new());
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.trna_id, "tRNA-Asn-GTT-2");
        assert_eq!(summary.mean_score, -9.0);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.std_score, Some(1.414));
        assert_eq!(summary.min_score, -10.0);
        assert_eq!(summary.max_score, -8.0);
    }

    #[test]
    fn blocked_proteins_are_removed_before_grouping() {
        let records = vec![
            record("P1_tRNA-Asn-GTT-2", -30.0),
            record("P2_tRNA-Asn-GTT-2", -4.0),
            record("P1_tRNA-Phe-GAA-1", -50.0),
            record("P3_tRNA-Phe-GAA-1", -6.0),
        ];
        let blocked: HashSet<String> = ["P1".to_string()].into_iter().collect();
        let summaries = rank_scores(&records, &blocked);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].trna_id, "tRNA-Phe-GAA-1");
        assert_eq!(summaries[0].mean_score, -6.0);
        assert_eq!(summaries[0].std_score, None);
        assert_eq!(summaries[1].trna_id, "tRNA-Asn-GTT-2");
        assert_eq!(summaries[1].count, 1);
    }

    #[test]
    fn means_are_rounded_to_three_decimals() {
        let records = vec![
            record("P1_tRNA-Gly-GCC-1", -1.0),
            record("P2_tRNA-Gly-GCC-1", -1.0),
            record("P3_tRNA-Gly-GCC-1", -2.0),
        ];
        let summaries = rank_scores(&records, &HashSet::new());
        assert_eq!(summaries[0].mean_score, -1.333);
    }

    #[test]
    fn run_writes_ranked_csv_and_tolerates_missing_block_list() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("scores.csv"),
            "total_score,fa_rep,sample_id\n-10,1.0,P1_tRNA-Asn-GTT-2\n-8,1.0,P1_tRNA-Asn-GTT-2\n-20,0.5,P2_tRNA-Phe-GAA-1\n",
        )
        .unwrap();
        let output = dir.path().join("ranked").join("summary.csv");
        let config = RankConfig {
            scores_path: dir.path().join("scores.csv"),
            block_list_path: Some(dir.path().join("absent.txt")),
            output_path: output.clone(),
        };

        let summaries = run(&config).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "trna_id,mean_score,std_score,count,min_score,max_score\n\
             tRNA-Phe-GAA-1,-20.0,,1,-20.0,-20.0\n\
             tRNA-Asn-GTT-2,-9.0,1.414,2,-10.0,-8.0\n"
        );
    }

    #[test]
    fn run_applies_block_list_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("scores.csv"),
            "sample_id,total_score\nP1_tRNA-Asn-GTT-2,-10\nP2_tRNA-Asn-GTT-2,-2\n",
        )
        .unwrap();
        fs::write(dir.path().join("block.txt"), "P1\n").unwrap();
        let config = RankConfig {
            scores_path: dir.path().join("scores.csv"),
            block_list_path: Some(dir.path().join("block.txt")),
            output_path: dir.path().join("summary.csv"),
        };

        let summaries = run(&config).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].mean_score, -2.0);
        assert_eq!(summaries[0].count, 1);
    }

    #[test]
    fn blank_total_score_rows_do_not_stop_ranking() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("scores.csv"),
            "sample_id,total_score\nP1_tRNA-Asn-GTT-2,-10\nP2_tRNA-Asn-GTT-2,\nP3_tRNA-Asn-GTT-2,-8\n",
        )
        .unwrap();
        let config = RankConfig {
            scores_path: dir.path().join("scores.csv"),
            block_list_path: None,
            output_path: dir.path().join("summary.csv"),
        };

        let summaries = run(&config).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].mean_score, -9.0);
        assert_eq!(summaries[0].count, 2);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_block_list_is_an_io_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("scores.csv"), "sample_id,total_score\nP1_tRNA-Asn-GTT-2,-10\n").unwrap();
        let block_dir = dir.path().join("blocked");
        fs::create_dir(&block_dir).unwrap();
        let config = RankConfig {
            scores_path: dir.path().join("scores.csv"),
            block_list_path: Some(block_dir),
            output_path: dir.path().join("summary.csv"),
        };

        assert!(matches!(run(&config), Err(WorkflowError::Io { .. })));
        assert!(!dir.path().join("summary.csv").exists());
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("scores.csv"), "total_score\n-1\n").unwrap();
        let config = RankConfig {
            scores_path: dir.path().join("scores.csv"),
            block_list_path: None,
            output_path: dir.path().join("summary.csv"),
        };
        assert!(matches!(run(&config), Err(WorkflowError::ScoreTable { .. })));
    }
}
