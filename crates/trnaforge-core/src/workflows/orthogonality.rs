use super::{WorkflowError, path_string};
use crate::core::io::identity::IdentityElements;
use crate::core::io::stockholm::StockholmFile;
use crate::core::io::traits::RecordReader;
use crate::core::models::alignment::AlignedTrna;
use crate::engine::config::OrthogonalityConfig;
use crate::engine::orthogonality::{OrthogonalityScorer, OrthogonalityTable};
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{info, instrument};

pub const SCORES_FILE_NAME: &str = "orthogonal_scores.csv";
pub const CANDIDATES_FILE_NAME: &str = "candidate_tRNAs.csv";

#[derive(Debug, Clone)]
pub struct OrthogonalityResult {
    pub scores: OrthogonalityTable,
    pub candidates: OrthogonalityTable,
}

fn read_alignment(path: &Path) -> Result<Vec<AlignedTrna>, WorkflowError> {
    StockholmFile::read_from_path(path).map_err(|source| WorkflowError::Stockholm {
        path: path_string(path),
        source,
    })
}

fn write_table(table: &OrthogonalityTable, path: &Path) -> Result<(), WorkflowError> {
    let file = File::create(path).map_err(|e| WorkflowError::io(path, e))?;
    table
        .write_wide_csv(BufWriter::new(file))
        .map_err(|source| WorkflowError::Csv {
            path: path_string(path),
            source,
        })
}

/// Scores every query tRNA against the target isotypes and writes the full
/// score table plus the self-orthogonal candidates into the output directory.
#[instrument(skip_all, name = "orthogonality_workflow")]
pub fn run(
    config: &OrthogonalityConfig,
    reporter: &ProgressReporter,
) -> Result<OrthogonalityResult, WorkflowError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading alignments",
    });
    let identity = IdentityElements::read_from_path(&config.identity_elements_path).map_err(
        |source| WorkflowError::IdentityElements {
            path: path_string(&config.identity_elements_path),
            source,
        },
    )?;
    let queries = read_alignment(&config.query_path)?;
    let targets = read_alignment(&config.target_path)?;
    reporter.report(Progress::PhaseFinish);
    info!(
        queries = queries.len(),
        targets = targets.len(),
        isotypes_with_elements = identity.len(),
        "Alignments loaded."
    );
    if queries.is_empty() {
        return Err(WorkflowError::NoInput(format!(
            "query alignment '{}' contains no sequences",
            config.query_path.display()
        )));
    }

    reporter.report(Progress::PhaseStart {
        name: "Scoring orthogonality",
    });
    let scores = OrthogonalityScorer::new(&identity).score(&queries, &targets);
    let candidates = scores.candidates(config.threshold);
    reporter.report(Progress::PhaseFinish);

    std::fs::create_dir_all(&config.output_dir).map_err(|e| WorkflowError::io(&config.output_dir, e))?;
    write_table(&scores, &config.output_dir.join(SCORES_FILE_NAME))?;
    write_table(&candidates, &config.output_dir.join(CANDIDATES_FILE_NAME))?;

    info!(
        scored = scores.len(),
        candidates = candidates.len(),
        threshold = config.threshold,
        "Orthogonality tables written."
    );
    Ok(OrthogonalityResult { scores, candidates })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::candidates::read_candidate_ids_from_path;
    use crate::engine::config::OrthogonalityConfigBuilder;
    use std::fs;
    use tempfile::tempdir;

    const QUERY: &str = "\
# STOCKHOLM 1.0
tRNA-Phe-GAA-1-1   AGCU
tRNA-Phe-GAA-2-1   GCAU
//
";
    const TARGET: &str = "\
# STOCKHOLM 1.0
tRNA-Phe-GAA-1-1   GCAU
tRNA-Trp-CCA-1-1   GCAU
//
";

    #[test]
    fn writes_scores_and_self_orthogonal_candidates() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("q.stk"), QUERY).unwrap();
        fs::write(dir.path().join("t.stk"), TARGET).unwrap();
        fs::write(dir.path().join("ie.txt"), "PheRS\t1, 2, 3\n").unwrap();
        let out = dir.path().join("results");

        let config = OrthogonalityConfigBuilder::new()
            .query_path(dir.path().join("q.stk"))
            .target_path(dir.path().join("t.stk"))
            .identity_elements_path(dir.path().join("ie.txt"))
            .output_dir(out.clone())
            .threshold(0.0)
            .build()
            .unwrap();
        let result = run(&config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.scores.get("tRNA-Phe-GAA-1-1", "Phe"), Some(-1.0));
        assert_eq!(result.scores.get("tRNA-Phe-GAA-2-1", "Phe"), Some(1.0));
        assert_eq!(result.scores.get("tRNA-Phe-GAA-1-1", "Trp"), None);
        assert_eq!(result.candidates.len(), 1);

        assert_eq!(
            fs::read_to_string(out.join(SCORES_FILE_NAME)).unwrap(),
            "query_id,Phe\ntRNA-Phe-GAA-1-1,-1.0\ntRNA-Phe-GAA-2-1,1.0\n"
        );
        let ids = read_candidate_ids_from_path(out.join(CANDIDATES_FILE_NAME)).unwrap();
        assert_eq!(ids, vec!["tRNA-Phe-GAA-1-1"]);
    }

    #[test]
    fn missing_identity_file_is_reported() {
        let dir = tempdir().unwrap();
        let config = OrthogonalityConfigBuilder::new()
            .query_path(dir.path().join("q.stk"))
            .target_path(dir.path().join("t.stk"))
            .identity_elements_path(dir.path().join("missing.txt"))
            .output_dir(dir.path().to_path_buf())
            .threshold(0.0)
            .build()
            .unwrap();
        let result = run(&config, &ProgressReporter::new());
        assert!(matches!(result, Err(WorkflowError::IdentityElements { .. })));
    }
}
