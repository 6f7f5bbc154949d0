use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_LOOP_MARKER: &str = "<.>";
pub const DEFAULT_ANTICODON_OFFSET: usize = 3;
pub const DEFAULT_SELF_SCORE_THRESHOLD: f64 = 0.0;
pub const DEFAULT_COLLECT_WORKERS: usize = 75;
pub const DEFAULT_SCORE_FILE: &str = "scores.sc";
pub const DEFAULT_SCORE_COMMAND: &str =
    "score_jd2 -in:file:silent default.out -out:file:scorefile scores.sc";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Settings for locating the anticodon inside a dot-bracket structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    pub loop_marker: String,
    pub anticodon_offset: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            loop_marker: DEFAULT_LOOP_MARKER.to_string(),
            anticodon_offset: DEFAULT_ANTICODON_OFFSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignConfig {
    pub candidates_path: PathBuf,
    pub id_map_path: PathBuf,
    pub structure_path: PathBuf,
    pub output_path: PathBuf,
    pub locator: LocatorConfig,
}

#[derive(Default)]
pub struct DesignConfigBuilder {
    candidates_path: Option<PathBuf>,
    id_map_path: Option<PathBuf>,
    structure_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    loop_marker: Option<String>,
    anticodon_offset: Option<usize>,
}

impl DesignConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidates_path(mut self, path: PathBuf) -> Self {
        self.candidates_path = Some(path);
        self
    }
    pub fn id_map_path(mut self, path: PathBuf) -> Self {
        self.id_map_path = Some(path);
        self
    }
    pub fn structure_path(mut self, path: PathBuf) -> Self {
        self.structure_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn loop_marker(mut self, marker: impl Into<String>) -> Self {
        self.loop_marker = Some(marker.into());
        self
    }
    pub fn anticodon_offset(mut self, offset: usize) -> Self {
        self.anticodon_offset = Some(offset);
        self
    }

    pub fn build(self) -> Result<DesignConfig, ConfigError> {
        let loop_marker = self
            .loop_marker
            .ok_or(ConfigError::MissingParameter("loop_marker"))?;
        if loop_marker.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "loop_marker",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(DesignConfig {
            candidates_path: self
                .candidates_path
                .ok_or(ConfigError::MissingParameter("candidates_path"))?,
            id_map_path: self
                .id_map_path
                .ok_or(ConfigError::MissingParameter("id_map_path"))?,
            structure_path: self
                .structure_path
                .ok_or(ConfigError::MissingParameter("structure_path"))?,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            locator: LocatorConfig {
                loop_marker,
                anticodon_offset: self
                    .anticodon_offset
                    .ok_or(ConfigError::MissingParameter("anticodon_offset"))?,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrthogonalityConfig {
    pub query_path: PathBuf,
    pub target_path: PathBuf,
    pub identity_elements_path: PathBuf,
    pub output_dir: PathBuf,
    pub threshold: f64,
}

#[derive(Default)]
pub struct OrthogonalityConfigBuilder {
    query_path: Option<PathBuf>,
    target_path: Option<PathBuf>,
    identity_elements_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    threshold: Option<f64>,
}

impl OrthogonalityConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_path(mut self, path: PathBuf) -> Self {
        self.query_path = Some(path);
        self
    }
    pub fn target_path(mut self, path: PathBuf) -> Self {
        self.target_path = Some(path);
        self
    }
    pub fn identity_elements_path(mut self, path: PathBuf) -> Self {
        self.identity_elements_path = Some(path);
        self
    }
    pub fn output_dir(mut self, path: PathBuf) -> Self {
        self.output_dir = Some(path);
        self
    }
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn build(self) -> Result<OrthogonalityConfig, ConfigError> {
        let threshold = self
            .threshold
            .ok_or(ConfigError::MissingParameter("threshold"))?;
        if !threshold.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "threshold",
                reason: format!("{} is not a finite number", threshold),
            });
        }
        Ok(OrthogonalityConfig {
            query_path: self
                .query_path
                .ok_or(ConfigError::MissingParameter("query_path"))?,
            target_path: self
                .target_path
                .ok_or(ConfigError::MissingParameter("target_path"))?,
            identity_elements_path: self
                .identity_elements_path
                .ok_or(ConfigError::MissingParameter("identity_elements_path"))?,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
            threshold,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectConfig {
    pub samples_dir: PathBuf,
    pub output_path: PathBuf,
    pub workers: usize,
    pub program: String,
    pub args: Vec<String>,
    pub score_file: String,
}

#[derive(Default)]
pub struct CollectConfigBuilder {
    samples_dir: Option<PathBuf>,
    output_path: Option<PathBuf>,
    workers: Option<usize>,
    command: Option<String>,
    score_file: Option<String>,
}

impl CollectConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples_dir(mut self, path: PathBuf) -> Self {
        self.samples_dir = Some(path);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }
    /// Scoring command line, split on whitespace into program and arguments.
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
    pub fn score_file(mut self, name: impl Into<String>) -> Self {
        self.score_file = Some(name.into());
        self
    }

    pub fn build(self) -> Result<CollectConfig, ConfigError> {
        let workers = self.workers.ok_or(ConfigError::MissingParameter("workers"))?;
        if workers == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "workers",
                reason: "at least one worker is required".to_string(),
            });
        }

        let command = self.command.ok_or(ConfigError::MissingParameter("command"))?;
        let mut tokens = command.split_whitespace().map(str::to_string);
        let program = tokens.next().ok_or(ConfigError::InvalidParameter {
            name: "command",
            reason: "command line is empty".to_string(),
        })?;

        let score_file = self
            .score_file
            .ok_or(ConfigError::MissingParameter("score_file"))?;
        if score_file.trim().is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "score_file",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(CollectConfig {
            samples_dir: self
                .samples_dir
                .ok_or(ConfigError::MissingParameter("samples_dir"))?,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            workers,
            program,
            args: tokens.collect(),
            score_file,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NameMapConfig {
    pub structure_path: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrepareConfig {
    pub candidates_path: PathBuf,
    pub id_map_path: PathBuf,
    pub structure_path: PathBuf,
    pub proteins_path: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankConfig {
    pub scores_path: PathBuf,
    pub block_list_path: Option<PathBuf>,
    pub output_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_collect_builder() -> CollectConfigBuilder {
        CollectConfigBuilder::new()
            .samples_dir(PathBuf::from("samples"))
            .output_path(PathBuf::from("scores.csv"))
            .workers(DEFAULT_COLLECT_WORKERS)
            .command(DEFAULT_SCORE_COMMAND)
            .score_file(DEFAULT_SCORE_FILE)
    }

    #[test]
    fn design_builder_reports_first_missing_parameter() {
        let result = DesignConfigBuilder::new()
            .loop_marker(DEFAULT_LOOP_MARKER)
            .anticodon_offset(DEFAULT_ANTICODON_OFFSET)
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingParameter("candidates_path")
        );
    }

    #[test]
    fn design_builder_rejects_empty_loop_marker() {
        let result = DesignConfigBuilder::new()
            .candidates_path(PathBuf::from("c.txt"))
            .id_map_path(PathBuf::from("map.tsv"))
            .structure_path(PathBuf::from("s.ss"))
            .output_path(PathBuf::from("out.fa"))
            .loop_marker("")
            .anticodon_offset(3)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "loop_marker", .. })
        ));
    }

    #[test]
    fn collect_builder_splits_command_line() {
        let config = complete_collect_builder().build().unwrap();
        assert_eq!(config.program, "score_jd2");
        assert_eq!(
            config.args,
            vec![
                "-in:file:silent",
                "default.out",
                "-out:file:scorefile",
                "scores.sc"
            ]
        );
        assert_eq!(config.workers, 75);
    }

    #[test]
    fn collect_builder_rejects_zero_workers_and_blank_command() {
        let zero = complete_collect_builder().workers(0).build();
        assert!(matches!(
            zero,
            Err(ConfigError::InvalidParameter { name: "workers", .. })
        ));
        let blank = complete_collect_builder().command("   ").build();
        assert!(matches!(
            blank,
            Err(ConfigError::InvalidParameter { name: "command", .. })
        ));
    }

    #[test]
    fn orthogonality_builder_rejects_nan_threshold() {
        let result = OrthogonalityConfigBuilder::new()
            .query_path(PathBuf::from("q.stk"))
            .target_path(PathBuf::from("t.stk"))
            .identity_elements_path(PathBuf::from("ie.txt"))
            .output_dir(PathBuf::from("out"))
            .threshold(f64::NAN)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "threshold", .. })
        ));
    }
}
