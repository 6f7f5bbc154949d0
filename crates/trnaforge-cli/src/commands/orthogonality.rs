use crate::cli::OrthogonalityArgs;
use crate::config::{FileConfig, build_orthogonality_config};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use tracing::info;
use trnaforge::{engine::progress::ProgressReporter, workflows};

pub fn run(
    args: OrthogonalityArgs,
    file_config: &FileConfig,
    progress: &CliProgressHandler,
) -> Result<()> {
    let config = build_orthogonality_config(&args, file_config)?;
    let reporter = ProgressReporter::with_callback(progress.get_callback());

    info!(threshold = config.threshold, "Invoking the orthogonality workflow...");
    let result = workflows::orthogonality::run(&config, &reporter)?;

    println!(
        "✓ {} query tRNA(s) scored, {} candidate(s) below {}. Tables written to: {}",
        result.scores.len(),
        result.candidates.len(),
        config.threshold,
        config.output_dir.display()
    );
    Ok(())
}
