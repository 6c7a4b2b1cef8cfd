use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileTableConfig {
    pub modularities: Option<Vec<u32>>,
    #[serde(rename = "max-vector-norm")]
    pub max_vector_norm: Option<i64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileDetectionConfig {
    #[serde(rename = "presence-threshold")]
    pub presence_threshold: Option<f64>,
    #[serde(rename = "min-cell-volume")]
    pub min_cell_volume: Option<f64>,
    #[serde(rename = "recursion-limit")]
    pub recursion_limit: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub table: Option<FileTableConfig>,
    pub detection: Option<FileDetectionConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
