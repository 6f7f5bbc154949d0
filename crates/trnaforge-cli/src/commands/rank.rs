use crate::cli::RankArgs;
use crate::config::build_rank_config;
use crate::error::Result;
use tracing::info;
use trnaforge::workflows;

pub fn run(args: RankArgs) -> Result<()> {
    let config = build_rank_config(&args);
    info!("Invoking the rank workflow...");
    let summaries = workflows::rank::run(&config)?;

    match summaries.first() {
        Some(best) => println!(
            "✓ {} tRNA(s) ranked; best is {} (mean {:.3} over {} score row(s)). Written to: {}",
            summaries.len(),
            best.trna_id,
            best.mean_score,
            best.count,
            config.output_path.display()
        ),
        None => println!(
            "Warning: no scores left to rank. Empty table written to: {}",
            config.output_path.display()
        ),
    }
    Ok(())
}
