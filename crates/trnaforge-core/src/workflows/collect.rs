use super::{WorkflowError, ensure_parent_dir, path_string};
use crate::core::io::rosetta::{ScoreRow, read_best_score_row, write_collected_scores};
use crate::engine::config::CollectConfig;
use crate::engine::pool::{PoolTally, UnitOutcome, WorkerPool};
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, instrument, warn};

/// One sample directory produced by a structure-prediction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub id: String, // Directory name up to the first '.'
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CollectResult {
    pub tally: PoolTally,
    pub rows: Vec<(String, ScoreRow)>,
}

/// Lists the sample sub-directories of `root`, sorted by sample id.
pub fn discover_samples(root: &Path) -> Result<Vec<Sample>, WorkflowError> {
    let mut samples = Vec::new();
    for dir_entry in fs::read_dir(root).map_err(|e| WorkflowError::io(root, e))? {
        let dir_entry = dir_entry.map_err(|e| WorkflowError::io(root, e))?;
        let path = dir_entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = dir_entry.file_name().to_string_lossy().into_owned();
        let id = name.split('.').next().unwrap_or(&name).to_string();
        samples.push(Sample { id, dir: path });
    }
    samples.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.dir.cmp(&b.dir)));
    Ok(samples)
}

fn score_sample(sample: &Sample, config: &CollectConfig) -> UnitOutcome {
    if sample.dir.join(&config.score_file).exists() {
        debug!(sample_id = %sample.id, "Score file already present; skipping.");
        return UnitOutcome::Skipped;
    }

    let output = Command::new(&config.program)
        .args(&config.args)
        .current_dir(&sample.dir)
        .output();
    match output {
        Ok(output) if output.status.success() => {
            debug!(sample_id = %sample.id, "Scoring finished.");
            UnitOutcome::Completed
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = format!("{} exited with {}: {}", config.program, output.status, stderr.trim());
            warn!(sample_id = %sample.id, reason = %reason, "Scoring failed.");
            UnitOutcome::Failed(reason)
        }
        Err(e) => {
            let reason = format!("failed to run {}: {}", config.program, e);
            warn!(sample_id = %sample.id, reason = %reason, "Scoring failed.");
            UnitOutcome::Failed(reason)
        }
    }
}

fn best_row(sample: &Sample, score_file: &str) -> Option<ScoreRow> {
    let path = sample.dir.join(score_file);
    if !path.exists() {
        warn!(sample_id = %sample.id, "No score file; sample left out.");
        return None;
    }
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            warn!(sample_id = %sample.id, error = %e, "Cannot open score file; sample left out.");
            return None;
        }
    };
    match read_best_score_row(BufReader::new(file)) {
        Ok(row) => Some(row),
        Err(e) => {
            warn!(sample_id = %sample.id, error = %e, "Unusable score file; sample left out.");
            None
        }
    }
}

/// Scores every sample with the external binary, then gathers the
/// lowest-`total_score` row of each sample into one CSV.
#[instrument(skip_all, name = "collect_workflow")]
pub fn run(config: &CollectConfig, reporter: &ProgressReporter) -> Result<CollectResult, WorkflowError> {
    let samples = discover_samples(&config.samples_dir)?;
    info!(
        samples = samples.len(),
        workers = config.workers,
        "Discovered sample directories."
    );

    reporter.report(Progress::PhaseStart { name: "Scoring" });
    let pool = WorkerPool::new(config.workers)?;
    let outcomes = pool.run(&samples, |sample| score_sample(sample, config), reporter);
    reporter.report(Progress::PhaseFinish);

    let tally = PoolTally::from_outcomes(&outcomes);
    info!(
        completed = tally.completed,
        skipped = tally.skipped,
        failed = tally.failed,
        total = tally.total(),
        "Scoring finished."
    );

    reporter.report(Progress::PhaseStart { name: "Collecting" });
    let rows: Vec<(String, ScoreRow)> = samples
        .iter()
        .filter_map(|sample| best_row(sample, &config.score_file).map(|row| (sample.id.clone(), row)))
        .collect();
    reporter.report(Progress::PhaseFinish);

    ensure_parent_dir(&config.output_path)?;
    let file = File::create(&config.output_path).map_err(|e| WorkflowError::io(&config.output_path, e))?;
    write_collected_scores(&rows, BufWriter::new(file)).map_err(|source| WorkflowError::ScoreTable {
        path: path_string(&config.output_path),
        source,
    })?;

    info!(
        collected = rows.len(),
        output = %config.output_path.display(),
        "Best scores written."
    );
    Ok(CollectResult { tally, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{CollectConfigBuilder, DEFAULT_SCORE_COMMAND, DEFAULT_SCORE_FILE};
    use tempfile::tempdir;

    const SCORES: &str = "\
SEQUENCE:
SCORE: total_score fa_rep description
SCORE:     -8.0     1.0   S_1
SCORE:    -11.5     2.0   S_2
";

    #[test]
    fn sample_ids_strip_extensions_and_sort() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("P2_tRNA-Phe-GAA-1.out")).unwrap();
        fs::create_dir(dir.path().join("P1_tRNA-Phe-GAA-1")).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a sample").unwrap();

        let samples = discover_samples(dir.path()).unwrap();
        let ids: Vec<&str> = samples.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["P1_tRNA-Phe-GAA-1", "P2_tRNA-Phe-GAA-1"]);
        assert!(samples[1].dir.ends_with("P2_tRNA-Phe-GAA-1.out"));
    }

    #[test]
    fn existing_score_files_are_skipped_and_collected() {
        let dir = tempdir().unwrap();
        let samples_dir = dir.path().join("runs");
        for (name, scores) in [("P1_tRNA-Asn-GTT-2", SCORES), ("P2_tRNA-Asn-GTT-2", "SCORE: total_score\n")] {
            fs::create_dir_all(samples_dir.join(name)).unwrap();
            fs::write(samples_dir.join(name).join("scores.sc"), scores).unwrap();
        }
        let output = dir.path().join("scores.csv");

        let config = CollectConfigBuilder::new()
            .samples_dir(samples_dir)
            .output_path(output.clone())
            .workers(2)
            .command(DEFAULT_SCORE_COMMAND)
            .score_file(DEFAULT_SCORE_FILE)
            .build()
            .unwrap();
        let result = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.tally.skipped, 2);
        assert_eq!(result.tally.total(), 2);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "total_score,fa_rep,description,sample_id\n-11.5,2.0,S_2,P1_tRNA-Asn-GTT-2\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn command_runs_inside_each_sample_and_failures_are_tallied() {
        let dir = tempdir().unwrap();
        let samples_dir = dir.path().join("runs");
        fs::create_dir_all(samples_dir.join("P1_tRNA-Asn-GTT-2")).unwrap();
        fs::create_dir_all(samples_dir.join("P2_tRNA-Asn-GTT-2")).unwrap();

        let touch = CollectConfigBuilder::new()
            .samples_dir(samples_dir.clone())
            .output_path(dir.path().join("touch.csv"))
            .workers(2)
            .command("touch scores.sc")
            .score_file("scores.sc")
            .build()
            .unwrap();
        let result = run(&touch, &ProgressReporter::new()).unwrap();
        assert_eq!(result.tally.completed, 2);
        assert!(samples_dir.join("P1_tRNA-Asn-GTT-2").join("scores.sc").exists());
        assert!(result.rows.is_empty());

        let missing = CollectConfigBuilder::new()
            .samples_dir(samples_dir)
            .output_path(dir.path().join("missing.csv"))
            .workers(1)
            .command("trnaforge-test-no-such-binary")
            .score_file("other.sc")
            .build()
            .unwrap();
        let result = run(&missing, &ProgressReporter::new()).unwrap();
        assert_eq!(result.tally.failed, 2);
    }

    #[test]
    fn missing_samples_dir_is_an_io_error() {
        let dir = tempdir().unwrap();
        let config = CollectConfigBuilder::new()
            .samples_dir(dir.path().join("absent"))
            .output_path(dir.path().join("scores.csv"))
            .workers(1)
            .command(DEFAULT_SCORE_COMMAND)
            .score_file(DEFAULT_SCORE_FILE)
            .build()
            .unwrap();
        assert!(matches!(
            run(&config, &ProgressReporter::new()),
            Err(WorkflowError::Io { .. })
        ));
    }
}
