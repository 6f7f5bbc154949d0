use crate::cli::DesignArgs;
use crate::config::{FileConfig, build_design_config};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use tracing::{info, warn};
use trnaforge::{engine::progress::ProgressReporter, workflows};

pub fn run(args: DesignArgs, file_config: &FileConfig, progress: &CliProgressHandler) -> Result<()> {
    let config = build_design_config(&args, file_config)?;
    let reporter = ProgressReporter::with_callback(progress.get_callback());

    info!("Invoking the design workflow...");
    let result = workflows::design::run(&config, &reporter)?;

    println!(
        "✓ {} original(s) and {} mutant(s) written to: {}",
        result.original_count(),
        result.mutant_count(),
        config.output_path.display()
    );
    if result.unplaced_count() > 0 {
        warn!(unplaced = result.unplaced_count(), "Some mutants could not be placed.");
        println!(
            "Warning: {} mutant(s) kept the original sequence because the anticodon was not found.",
            result.unplaced_count()
        );
    }
    Ok(())
}
