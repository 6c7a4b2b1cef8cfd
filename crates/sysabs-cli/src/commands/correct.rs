use crate::cli::CorrectArgs;
use crate::commands::{condition_table, load_observations, save_observations};
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use std::path::{Path, PathBuf};
use sysabs::core::io::orientation::OrientationFile;
use sysabs::core::models::orientation::CrystalOrientation;
use sysabs::engine::progress::ProgressReporter;
use sysabs::workflows::reindex::{self, ReindexResult};
use tracing::{info, warn};

pub fn run(args: CorrectArgs, quiet: bool) -> Result<()> {
    let config = build_config(&args.tuning, args.recursion_limit)?;
    let observations = load_observations(&args.input)?;

    info!("Loading orientation from {:?}", &args.orientation);
    let orientation =
        OrientationFile::read_from_path(&args.orientation).map_err(|e| CliError::FileParsing {
            path: args.orientation.clone(),
            source: e.into(),
        })?;
    let table = condition_table(&config.table)?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting absence correction...");
    let result = reindex::run(
        &orientation,
        &observations,
        &table,
        &config.detection,
        &reporter,
    )?;

    let orientation_out = args
        .orientation_out
        .clone()
        .unwrap_or_else(|| default_orientation_path(&args.output));
    write_outputs(&result, &args.output, &orientation_out)?;

    if !result.was_corrected() {
        warn!("No systematic absence detected; outputs equal the inputs.");
    }
    println!("{}", summarize(&orientation, &result));
    println!("✓ Reindexed reflections written to: {}", args.output.display());
    println!("✓ Corrected orientation written to: {}", orientation_out.display());
    Ok(())
}

/// `out.hkl` -> `out.orientation.toml`
pub fn default_orientation_path(output: &Path) -> PathBuf {
    output.with_extension("orientation.toml")
}

fn write_outputs(
    result: &ReindexResult<CrystalOrientation>,
    observations_path: &Path,
    orientation_path: &Path,
) -> Result<()> {
    info!(
        "Writing {} reindexed reflections to {:?}",
        result.observations.len(),
        observations_path
    );
    save_observations(&result.observations, observations_path)?;

    info!("Writing corrected orientation to {:?}", orientation_path);
    OrientationFile::write_to_path(&result.orientation, orientation_path).map_err(|e| {
        CliError::FileWriting {
            path: orientation_path.to_path_buf(),
            source: e.into(),
        }
    })
}

pub fn summarize(
    original: &CrystalOrientation,
    result: &ReindexResult<CrystalOrientation>,
) -> String {
    let mut lines = Vec::with_capacity(result.steps.len() + 3);
    for (i, step) in result.steps.iter().enumerate() {
        lines.push(format!(
            "  Step {}: {} ({:.1}% of reflections), volume {:.1} -> {:.1}, {} discarded",
            i + 1,
            step.detection.condition,
            step.detection.fraction * 100.0,
            step.volume_before,
            step.volume_after,
            step.discarded
        ));
    }
    let describe = |o: &CrystalOrientation| {
        o.unit_cell()
            .map(|cell| cell.to_string())
            .unwrap_or_else(|| "(degenerate)".to_string())
    };
    lines.push(format!("  Original cell:  {}", describe(original)));
    lines.push(format!("  Corrected cell: {}", describe(&result.orientation)));
    lines.push(format!(
        "{} correction(s) applied, cell volume reduced {}-fold.",
        result.steps.len(),
        result.volume_reduction()
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TuningArgs;
    use nalgebra::{Matrix3, Vector3};
    use sysabs::core::io::hkl::HklFile;
    use sysabs::core::io::traits::ReflectionFile;
    use sysabs::core::models::observations::ObservationSet;
    use sysabs::core::models::orientation::Orientation;
    use sysabs::core::models::vector::MillerIndex;
    use tempfile::tempdir;

    fn true_cell() -> CrystalOrientation {
        CrystalOrientation::from_direct_matrix(Matrix3::from_diagonal(&Vector3::new(
            30.0, 40.0, 50.0,
        )))
        .unwrap()
    }

    /// Reflections of the true cell expressed in a cell doubled along `a`;
    /// every `h` is even.
    fn doubled_along_a() -> (CrystalOrientation, ObservationSet) {
        let doubled = CrystalOrientation::from_direct_matrix(Matrix3::from_diagonal(
            &Vector3::new(60.0, 40.0, 50.0),
        ))
        .unwrap();
        let observations = (0..200)
            .map(|i| MillerIndex::new(2 * ((i * 7) % 13 - 6), (i * 11) % 17 - 8, (i * 5) % 19 - 9))
            .collect();
        (doubled, observations)
    }

    #[test]
    fn default_orientation_path_replaces_the_extension() {
        assert_eq!(
            default_orientation_path(Path::new("run/out.hkl")),
            PathBuf::from("run/out.orientation.toml")
        );
    }

    #[test]
    fn correct_writes_reindexed_reflections_and_orientation() {
        let dir = tempdir().unwrap();
        let (doubled, observations) = doubled_along_a();
        let input = dir.path().join("obs.hkl");
        let orientation_in = dir.path().join("cell.toml");
        let output = dir.path().join("fixed.csv");
        HklFile::write_to_path(&observations, &input).unwrap();
        OrientationFile::write_to_path(&doubled, &orientation_in).unwrap();

        let args = CorrectArgs {
            input,
            orientation: orientation_in,
            output: output.clone(),
            orientation_out: None,
            recursion_limit: None,
            tuning: TuningArgs::default(),
        };
        run(args, true).unwrap();

        let corrected = OrientationFile::read_from_path(&dir.path().join("fixed.orientation.toml"))
            .unwrap();
        assert!((corrected.unit_cell_volume() - true_cell().unit_cell_volume()).abs() < 1e-6);

        let reindexed = load_observations(&output).unwrap();
        assert_eq!(reindexed.len(), observations.len());
        assert!(reindexed.iter().any(|hkl| hkl.h % 2 != 0));
    }

    #[test]
    fn summary_lists_each_step() {
        let (doubled, observations) = doubled_along_a();
        let table = sysabs::engine::conditions::default_table().unwrap();
        let result = reindex::run(
            &doubled,
            &observations,
            table,
            &Default::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        let text = summarize(&doubled, &result);
        assert!(text.contains("Step 1: 1H 0K 0L = 2n"));
        assert!(text.contains("V=120000.0"));
        assert!(text.contains("V=60000.0"));
        assert!(text.ends_with("1 correction(s) applied, cell volume reduced 2-fold."));
    }
}
