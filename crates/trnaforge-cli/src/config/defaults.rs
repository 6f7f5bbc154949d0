use trnaforge::engine::config::{
    DEFAULT_ANTICODON_OFFSET, DEFAULT_COLLECT_WORKERS, DEFAULT_LOOP_MARKER, DEFAULT_SCORE_COMMAND,
    DEFAULT_SCORE_FILE, DEFAULT_SELF_SCORE_THRESHOLD,
};

pub struct DefaultsConfig {
    pub loop_marker: String,
    pub anticodon_offset: usize,
    pub threshold: f64,
    pub workers: usize,
    pub command: String,
    pub score_file: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            loop_marker: DEFAULT_LOOP_MARKER.to_string(),
            anticodon_offset: DEFAULT_ANTICODON_OFFSET,
            threshold: DEFAULT_SELF_SCORE_THRESHOLD,
            workers: DEFAULT_COLLECT_WORKERS,
            command: DEFAULT_SCORE_COMMAND.to_string(),
            score_file: DEFAULT_SCORE_FILE.to_string(),
        }
    }
}
