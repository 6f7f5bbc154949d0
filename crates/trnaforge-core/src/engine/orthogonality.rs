use crate::core::io::identity::IdentityElements;
use crate::core::models::alignment::{AlignedTrna, is_gap};
use std::collections::BTreeSet;
use std::io::Write;
use tracing::{debug, warn};

pub const QUERY_ID_COLUMN: &str = "query_id";

/// Scores of one query tRNA against each target isotype group.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryScores {
    pub query_id: String,
    pub isotype: String,
    pub scores: Vec<(String, f64)>, // (target isotype, group mean), group order
}

impl QueryScores {
    pub fn score_against(&self, isotype: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(label, _)| label == isotype)
            .map(|(_, score)| *score)
    }

    /// Score against the query's own isotype.
    pub fn self_score(&self) -> Option<f64> {
        self.score_against(&self.isotype)
    }
}

/// Query id -> target isotype -> orthogonality score in `[-1, 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrthogonalityTable {
    rows: Vec<QueryScores>,
}

impl OrthogonalityTable {
    pub fn rows(&self) -> &[QueryScores] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, query_id: &str, isotype: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.query_id == query_id)
            .and_then(|row| row.score_against(isotype))
    }

    /// Queries whose self score is strictly below `threshold`.
    ///
    /// A query that was never scored against its own isotype is not a
    /// candidate.
    pub fn candidates(&self, threshold: f64) -> OrthogonalityTable {
        let rows = self
            .rows
            .iter()
            .filter(|row| row.self_score().is_some_and(|score| score < threshold))
            .cloned()
            .collect();
        OrthogonalityTable { rows }
    }

    /// Writes the table in wide form: one row per query sorted by id, one
    /// column per target isotype sorted alphabetically, blank where a query
    /// has no score for an isotype. Queries without any score are left out.
    pub fn write_wide_csv(&self, writer: impl Write) -> Result<(), csv::Error> {
        let isotypes: BTreeSet<&str> = self
            .rows
            .iter()
            .flat_map(|row| row.scores.iter().map(|(label, _)| label.as_str()))
            .collect();

        let mut rows: Vec<&QueryScores> = self.rows.iter().filter(|row| !row.scores.is_empty()).collect();
        rows.sort_by(|a, b| a.query_id.cmp(&b.query_id));

        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut header = vec![QUERY_ID_COLUMN];
        header.extend(isotypes.iter().copied());
        csv_writer.write_record(&header)?;

        for row in rows {
            let mut record = vec![row.query_id.clone()];
            record.extend(
                isotypes
                    .iter()
                    .map(|label| row.score_against(label).map(format_score).unwrap_or_default()),
            );
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        score.to_string()
    }
}

/// Compares query tRNAs with target tRNAs at the target's identity elements.
///
/// Identity-element positions are 1-based residue numbers of the target
/// isotype. For position `p`, the compared column in each record is the one
/// holding its residue `p - 1` (0-based); a record without that residue is
/// skipped at that position. Equal residues score +1, different residues -1
/// and gaps are not scored. Per-target means are averaged within each target
/// isotype group.
pub struct OrthogonalityScorer<'a> {
    identity_elements: &'a IdentityElements,
}

impl<'a> OrthogonalityScorer<'a> {
    pub fn new(identity_elements: &'a IdentityElements) -> Self {
        Self { identity_elements }
    }

    pub fn score(&self, queries: &[AlignedTrna], targets: &[AlignedTrna]) -> OrthogonalityTable {
        let groups = self.group_targets(targets);

        let rows = queries
            .iter()
            .map(|query| {
                let scores = groups
                    .iter()
                    .filter_map(|(isotype, positions, members)| {
                        let per_target: Vec<f64> = members
                            .iter()
                            .filter_map(|target| pairwise_score(query, target, positions))
                            .collect();
                        if per_target.is_empty() {
                            debug!(
                                query_id = %query.id,
                                isotype = %isotype,
                                "No comparable identity elements; isotype omitted."
                            );
                            return None;
                        }
                        let mean = per_target.iter().sum::<f64>() / per_target.len() as f64;
                        Some((isotype.to_string(), mean))
                    })
                    .collect();
                QueryScores {
                    query_id: query.id.clone(),
                    isotype: query.isotype.clone(),
                    scores,
                }
            })
            .collect();

        OrthogonalityTable { rows }
    }

    /// Groups targets by isotype in first-appearance order, dropping targets
    /// whose isotype has no identity-element entry.
    fn group_targets<'t>(&self, targets: &'t [AlignedTrna]) -> Vec<(&'t str, &'a [usize], Vec<&'t AlignedTrna>)> {
        let mut groups: Vec<(&'t str, &'a [usize], Vec<&'t AlignedTrna>)> = Vec::new();
        for target in targets {
            let Some(positions) = self.identity_elements.get(&target.isotype) else {
                warn!(
                    target_id = %target.id,
                    isotype = %target.isotype,
                    "Target isotype has no identity elements; skipping target."
                );
                continue;
            };
            match groups.iter_mut().find(|(label, _, _)| *label == target.isotype) {
                Some((_, _, members)) => members.push(target),
                None => groups.push((target.isotype.as_str(), positions, vec![target])),
            }
        }
        groups
    }
}

/// Mean of +1/-1 comparisons at the given identity elements, or `None` if no
/// position could be scored.
pub fn pairwise_score(query: &AlignedTrna, target: &AlignedTrna, positions: &[usize]) -> Option<f64> {
    let mut total = 0i64;
    let mut scored = 0usize;
    for &position in positions {
        let Some(residue) = position.checked_sub(1) else {
            continue;
        };
        let (Some(q_col), Some(t_col)) = (query.column_of_residue(residue), target.column_of_residue(residue)) else {
            continue;
        };
        let (Some(q), Some(t)) = (query.char_at(q_col), target.char_at(t_col)) else {
            continue;
        };
        if is_gap(q) || is_gap(t) {
            continue;
        }
        total += if q.eq_ignore_ascii_case(&t) { 1 } else { -1 };
        scored += 1;
    }
    (scored > 0).then(|| total as f64 / scored as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements() -> IdentityElements {
        let mut table = IdentityElements::new();
        table.insert("Phe", vec![1, 2, 3]);
        table.insert("Ala", vec![2, 4]);
        table.insert("Met", vec![1]);
        table
    }

    fn trna(id: &str, gapped: &str) -> AlignedTrna {
        AlignedTrna::new(id, gapped)
    }

    #[test]
    fn identical_pair_scores_one() {
        let q = trna("tRNA-Phe-GAA-1-1", "GCAU");
        let t = trna("tRNA-Phe-GAA-1-1", "GCAU");
        assert_eq!(pairwise_score(&q, &t, &[1, 2, 3]), Some(1.0));
    }

    #[test]
    fn fully_different_pair_scores_minus_one() {
        let q = trna("tRNA-Phe-GAA-1-1", "GCAU");
        let t = trna("tRNA-Phe-GAA-2-1", "AGCU");
        assert_eq!(pairwise_score(&q, &t, &[1, 2, 3]), Some(-1.0));
    }

    #[test]
    fn comparison_follows_residue_index_not_column() {
        // Residue 1 sits in column 2 of the query and column 1 of the target.
        let q = trna("q", "G-CA");
        let t = trna("t", "GC-A");
        assert_eq!(pairwise_score(&q, &t, &[2]), Some(1.0));
    }

    #[test]
    fn positions_beyond_either_sequence_are_skipped() {
        let q = trna("q", "GC");
        let t = trna("t", "GCAU");
        assert_eq!(pairwise_score(&q, &t, &[4]), None);
        assert_eq!(pairwise_score(&q, &t, &[1, 4]), Some(1.0));
    }

    #[test]
    fn group_score_averages_isoacceptors() {
        let queries = vec![trna("tRNA-Phe-GAA-1-1", "GCAU")];
        let targets = vec![
            trna("tRNA-Phe-GAA-1-1", "GCAU"), // +1
            trna("tRNA-Phe-GAA-2-1", "AGCU"), // -1
            trna("tRNA-Ala-AGC-1-1", "GCAA"), // +1 at 2, -1 at 4
        ];
        let table = OrthogonalityScorer::new(&elements()).score(&queries, &targets);
        assert_eq!(table.get("tRNA-Phe-GAA-1-1", "Phe"), Some(0.0));
        assert_eq!(table.get("tRNA-Phe-GAA-1-1", "Ala"), Some(0.0));
        assert_eq!(
            table.rows()[0].scores.iter().map(|(l, _)| l.as_str()).collect::<Vec<_>>(),
            vec!["Phe", "Ala"]
        );
    }

    #[test]
    fn targets_without_identity_elements_are_skipped() {
        let queries = vec![trna("tRNA-Phe-GAA-1-1", "GCAU")];
        let targets = vec![trna("tRNA-Gly-GCC-1-1", "GCAU")];
        let table = OrthogonalityScorer::new(&elements()).score(&queries, &targets);
        assert_eq!(table.len(), 1);
        assert!(table.rows()[0].scores.is_empty());
    }

    #[test]
    fn pairs_without_overlap_are_omitted_not_zeroed() {
        let queries = vec![trna("tRNA-Met-CAT-1-1", "-")];
        let targets = vec![trna("tRNA-Met-CAT-1-1", "AUG")];
        let table = OrthogonalityScorer::new(&elements()).score(&queries, &targets);
        assert_eq!(table.get("tRNA-Met-CAT-1-1", "Met"), None);
        assert!(table.candidates(0.0).is_empty());
    }

    #[test]
    fn candidates_need_self_score_below_threshold() {
        let queries = vec![
            trna("tRNA-Phe-GAA-1-1", "AGCU"),  // -1 vs Phe
            trna("tRNA-Phe-GAA-2-1", "GCAU"),  // +1 vs Phe
            trna("tRNA-iMet-CAT-1-1", "CAUG"), // -1 vs Met
        ];
        let targets = vec![
            trna("tRNA-Phe-GAA-1-1", "GCAU"),
            trna("tRNA-Met-CAT-1-1", "AUGC"),
        ];
        let table = OrthogonalityScorer::new(&elements()).score(&queries, &targets);

        let candidates = table.candidates(0.0);
        let ids: Vec<&str> = candidates
            .rows()
            .iter()
            .map(|row| row.query_id.as_str())
            .collect();
        assert_eq!(ids, vec!["tRNA-Phe-GAA-1-1", "tRNA-iMet-CAT-1-1"]);

        let relaxed = table.candidates(1.5);
        assert_eq!(relaxed.len(), 3);
    }

    #[test]
    fn wide_csv_sorts_rows_and_columns_and_blanks_missing_cells() {
        let queries = vec![
            trna("tRNA-Phe-GAA-2-1", "GCAU"),
            trna("tRNA-Ala-AGC-1-1", "-CAU"),
        ];
        let targets = vec![
            trna("tRNA-Phe-GAA-1-1", "GCAU"),
            trna("tRNA-Ala-AGC-1-1", "GCAA"),
        ];
        let mut identity = IdentityElements::new();
        identity.insert("Phe", vec![1, 2]);
        identity.insert("Ala", vec![4]);
        let table = OrthogonalityScorer::new(&identity).score(&queries, &targets);

        let mut out = Vec::new();
        table.write_wide_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "query_id,Ala,Phe\ntRNA-Ala-AGC-1-1,,-1.0\ntRNA-Phe-GAA-2-1,-1.0,1.0\n"
        );
    }

    #[test]
    fn wide_csv_leaves_out_queries_without_any_overlap() {
        let queries = vec![
            trna("tRNA-Phe-GAA-2-1", "GCAU"),
            trna("tRNA-Ala-AGC-1-1", "----"),
        ];
        let targets = vec![trna("tRNA-Phe-GAA-1-1", "GCAU")];
        let mut identity = IdentityElements::new();
        identity.insert("Phe", vec![1, 2]);
        let table = OrthogonalityScorer::new(&identity).score(&queries, &targets);

        let mut out = Vec::new();
        table.write_wide_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "query_id,Phe\ntRNA-Phe-GAA-2-1,1.0\n"
        );
    }
}
