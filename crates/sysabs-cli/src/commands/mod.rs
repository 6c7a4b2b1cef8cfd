pub mod conditions;
pub mod correct;
pub mod detect;
pub mod list;

use crate::error::{CliError, Result};
use std::borrow::Cow;
use std::path::Path;
use sysabs::core::io::{
    ReflectionFormat, delimited::CsvFile, hkl::HklFile, traits::ReflectionFile,
};
use sysabs::core::models::observations::ObservationSet;
use sysabs::engine::conditions::{ConditionTable, default_table};
use sysabs::engine::config::TableConfig;
use sysabs::engine::diagnostics::{PREDICTION_TOLERANCE, prediction_quality};
use tracing::{info, warn};

/// Reads a reflection list, reporting how many indices were not close to
/// integers before rounding them.
pub fn load_observations(path: &Path) -> Result<ObservationSet> {
    info!("Loading reflections from {:?}", path);
    let raw = match ReflectionFormat::from_path(path) {
        ReflectionFormat::Hkl => HklFile::read_from_path(path).map_err(anyhow::Error::from),
        ReflectionFormat::Csv => CsvFile::read_from_path(path).map_err(anyhow::Error::from),
    }
    .map_err(|source| CliError::FileParsing {
        path: path.to_path_buf(),
        source,
    })?;

    let quality = prediction_quality(&raw, PREDICTION_TOLERANCE);
    if quality.bad > 0 {
        warn!(
            "{} of {} reflections lie more than {} from an integer index; they are rounded.",
            quality.bad,
            quality.total(),
            PREDICTION_TOLERANCE
        );
    }
    info!(
        "Read {} reflections ({} well predicted).",
        quality.total(),
        quality.good
    );
    ObservationSet::from_fractional(&raw).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

pub fn save_observations(observations: &ObservationSet, path: &Path) -> Result<()> {
    match ReflectionFormat::from_path(path) {
        ReflectionFormat::Hkl => {
            HklFile::write_to_path(observations, path).map_err(anyhow::Error::from)
        }
        ReflectionFormat::Csv => {
            CsvFile::write_to_path(observations, path).map_err(anyhow::Error::from)
        }
    }
    .map_err(|source| CliError::FileWriting {
        path: path.to_path_buf(),
        source,
    })
}

/// Borrows the process-wide table when the default parameters are requested.
pub fn condition_table(config: &TableConfig) -> Result<Cow<'static, ConditionTable>> {
    if *config == TableConfig::default() {
        Ok(Cow::Borrowed(default_table()?))
    } else {
        Ok(Cow::Owned(ConditionTable::generate(config)?))
    }
}
