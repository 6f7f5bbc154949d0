use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::{CollectArgs, DesignArgs, NameMapArgs, OrthogonalityArgs, PrepareArgs, RankArgs};
use crate::error::{CliError, Result};
use std::path::Path;
use std::str::FromStr;
use trnaforge::engine::config as core_config;

/// Reads the optional TOML file and applies the `-S key=value` overrides on top.
pub fn load_file_config(path: Option<&Path>, set_values: &[String]) -> Result<FileConfig> {
    let file_config = match path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, set_values)
}

pub fn build_name_map_config(args: &NameMapArgs) -> core_config::NameMapConfig {
    core_config::NameMapConfig {
        structure_path: args.input.clone(),
        output_path: args.output.clone(),
    }
}

pub fn build_design_config(args: &DesignArgs, file: &FileConfig) -> Result<core_config::DesignConfig> {
    let defaults = DefaultsConfig::default();
    let design_file = file.design.clone().unwrap_or_default();

    let loop_marker = args
        .loop_marker
        .clone()
        .or(design_file.loop_marker)
        .unwrap_or(defaults.loop_marker);
    let anticodon_offset = args
        .anticodon_offset
        .or(design_file.anticodon_offset)
        .unwrap_or(defaults.anticodon_offset);

    Ok(core_config::DesignConfigBuilder::new()
        .candidates_path(args.inputs.candidates.clone())
        .id_map_path(args.inputs.id_map.clone())
        .structure_path(args.inputs.structures.clone())
        .output_path(args.output.clone())
        .loop_marker(loop_marker)
        .anticodon_offset(anticodon_offset)
        .build()?)
}

pub fn build_orthogonality_config(
    args: &OrthogonalityArgs,
    file: &FileConfig,
) -> Result<core_config::OrthogonalityConfig> {
    let defaults = DefaultsConfig::default();
    let threshold = args
        .threshold
        .or(file.orthogonality.as_ref().and_then(|o| o.threshold))
        .unwrap_or(defaults.threshold);

    Ok(core_config::OrthogonalityConfigBuilder::new()
        .query_path(args.query.clone())
        .target_path(args.target.clone())
        .identity_elements_path(args.identity_elements.clone())
        .output_dir(args.output_dir.clone())
        .threshold(threshold)
        .build()?)
}

pub fn build_prepare_config(args: &PrepareArgs) -> core_config::PrepareConfig {
    core_config::PrepareConfig {
        candidates_path: args.inputs.candidates.clone(),
        id_map_path: args.inputs.id_map.clone(),
        structure_path: args.inputs.structures.clone(),
        proteins_path: args.proteins.clone(),
        output_dir: args.output_dir.clone(),
    }
}

pub fn build_collect_config(args: &CollectArgs, file: &FileConfig) -> Result<core_config::CollectConfig> {
    let defaults = DefaultsConfig::default();
    let collect_file = file.collect.clone().unwrap_or_default();

    let workers = args.workers.or(collect_file.workers).unwrap_or(defaults.workers);
    let command = args
        .command
        .clone()
        .or(collect_file.command)
        .unwrap_or(defaults.command);
    let score_file = args
        .score_file
        .clone()
        .or(collect_file.score_file)
        .unwrap_or(defaults.score_file);

    Ok(core_config::CollectConfigBuilder::new()
        .samples_dir(args.samples_dir.clone())
        .output_path(args.output.clone())
        .workers(workers)
        .command(command)
        .score_file(score_file)
        .build()?)
}

pub fn build_rank_config(args: &RankArgs) -> core_config::RankConfig {
    core_config::RankConfig {
        scores_path: args.input.clone(),
        block_list_path: args.block_list.clone(),
        output_path: args.output.clone(),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "design.loop-marker" => {
                config.design.get_or_insert_with(Default::default).loop_marker = Some(value.to_string());
            }
            "design.anticodon-offset" => {
                config.design.get_or_insert_with(Default::default).anticodon_offset =
                    Some(parse_value(key, value, "integer")?);
            }
            "orthogonality.threshold" => {
                config.orthogonality.get_or_insert_with(Default::default).threshold =
                    Some(parse_value(key, value, "float")?);
            }
            "collect.workers" => {
                config.collect.get_or_insert_with(Default::default).workers =
                    Some(parse_value(key, value, "integer")?);
            }
            "collect.command" => {
                config.collect.get_or_insert_with(Default::default).command = Some(value.to_string());
            }
            "collect.score-file" => {
                config.collect.get_or_insert_with(Default::default).score_file = Some(value.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
