//! Layered CLI configuration: command-line flag, then the TOML file (with
//! `-S` overrides applied to it), then built-in defaults.

mod builder;
mod defaults;
mod file;

pub use builder::{
    build_collect_config, build_design_config, build_name_map_config, build_orthogonality_config,
    build_prepare_config, build_rank_config, load_file_config,
};
pub use file::FileConfig;
