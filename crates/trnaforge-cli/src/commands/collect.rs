use crate::cli::CollectArgs;
use crate::config::{FileConfig, build_collect_config};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use tracing::{info, warn};
use trnaforge::{engine::progress::ProgressReporter, workflows};

pub fn run(args: CollectArgs, file_config: &FileConfig, progress: &CliProgressHandler) -> Result<()> {
    let config = build_collect_config(&args, file_config)?;
    let reporter = ProgressReporter::with_callback(progress.get_callback());

    info!(
        workers = config.workers,
        program = %config.program,
        "Invoking the collect workflow..."
    );
    let result = workflows::collect::run(&config, &reporter)?;

    println!("Scoring: {}", result.tally);
    if result.tally.failed > 0 {
        warn!(failed = result.tally.failed, "Some samples could not be scored.");
    }
    println!(
        "✓ Best rows of {} sample(s) written to: {}",
        result.rows.len(),
        config.output_path.display()
    );
    Ok(())
}
