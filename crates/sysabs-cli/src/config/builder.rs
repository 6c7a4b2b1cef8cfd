use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::TuningArgs;
use crate::error::{CliError, Result};
use sysabs::engine::config as core_config;
use tracing::debug;

/// Resolves the final configuration: defaults < config file < `--set` values <
/// explicit flags.
pub fn build_config(
    args: &TuningArgs,
    recursion_limit: Option<usize>,
) -> Result<core_config::AbsenceConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let table_file = file_config.table.take().unwrap_or_default();
    let detection_file = file_config.detection.take().unwrap_or_default();

    let modularities = args
        .modularities
        .clone()
        .or(table_file.modularities)
        .unwrap_or(defaults.modularities);
    let max_vector_norm = table_file
        .max_vector_norm
        .unwrap_or(defaults.max_vector_norm);
    let presence_threshold = args
        .threshold
        .or(detection_file.presence_threshold)
        .unwrap_or(defaults.presence_threshold);
    let min_cell_volume = args
        .min_cell_volume
        .or(detection_file.min_cell_volume)
        .unwrap_or(defaults.min_cell_volume);
    let recursion_limit = recursion_limit
        .or(detection_file.recursion_limit)
        .unwrap_or(defaults.recursion_limit);

    let config = core_config::AbsenceConfigBuilder::new()
        .modularities(modularities)
        .max_vector_norm(max_vector_norm)
        .presence_threshold(presence_threshold)
        .min_cell_volume(min_cell_volume)
        .recursion_limit(recursion_limit)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

fn parse_value<T: std::str::FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

fn parse_list(key: &str, value_str: &str) -> Result<Vec<u32>> {
    value_str
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|item| parse_value(key, item, "integer"))
        .collect()
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "table.modularities" => {
                config
                    .table
                    .get_or_insert_with(Default::default)
                    .modularities = Some(parse_list(key, value_str)?);
            }
            "table.max-vector-norm" => {
                config
                    .table
                    .get_or_insert_with(Default::default)
                    .max_vector_norm = Some(parse_value(key, value_str, "integer")?);
            }
            "detection.presence-threshold" => {
                config
                    .detection
                    .get_or_insert_with(Default::default)
                    .presence_threshold = Some(parse_value(key, value_str, "float")?);
            }
            "detection.min-cell-volume" => {
                config
                    .detection
                    .get_or_insert_with(Default::default)
                    .min_cell_volume = Some(parse_value(key, value_str, "float")?);
            }
            "detection.recursion-limit" => {
                config
                    .detection
                    .get_or_insert_with(Default::default)
                    .recursion_limit = Some(parse_value(key, value_str, "integer")?);
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
