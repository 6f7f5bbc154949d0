use crate::cli::NameMapArgs;
use crate::config::build_name_map_config;
use crate::error::Result;
use tracing::info;
use trnaforge::workflows;

pub fn run(args: NameMapArgs) -> Result<()> {
    let config = build_name_map_config(&args);
    info!("Invoking the name map workflow...");
    let id_map = workflows::name_map::run(&config)?;

    println!(
        "✓ {} tRNA id(s) mapped, written to: {}",
        id_map.len(),
        config.output_path.display()
    );
    Ok(())
}
