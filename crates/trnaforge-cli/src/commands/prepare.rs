use crate::cli::PrepareArgs;
use crate::config::build_prepare_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use tracing::info;
use trnaforge::{engine::progress::ProgressReporter, workflows};

pub fn run(args: PrepareArgs, progress: &CliProgressHandler) -> Result<()> {
    let config = build_prepare_config(&args);
    let reporter = ProgressReporter::with_callback(progress.get_callback());

    info!("Invoking the prepare workflow...");
    let rnps = workflows::prepare::run(&config, &reporter)?;

    println!(
        "✓ {} protein/tRNA pair(s) written to: {}",
        rnps.len(),
        config.output_dir.display()
    );
    Ok(())
}
