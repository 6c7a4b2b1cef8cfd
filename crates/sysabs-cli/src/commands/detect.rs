use crate::cli::DetectArgs;
use crate::commands::{condition_table, load_observations};
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use sysabs::core::models::observations::ObservationSet;
use sysabs::engine::detector::{AbsenceDetector, DetectedAbsence};
use sysabs::engine::histogram::residue_histogram;
use sysabs::engine::progress::{Progress, ProgressReporter};
use tracing::info;

pub fn run(args: DetectArgs, quiet: bool) -> Result<()> {
    let config = build_config(&args.tuning, None)?;
    let observations = load_observations(&args.input)?;
    let table = condition_table(&config.table)?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let mut detector = AbsenceDetector::new(&table, config.detection);
    reporter.report(Progress::PhaseStart {
        name: "Testing Presence Conditions",
    });
    detector.detect_with_progress(&observations, &reporter);
    reporter.report(Progress::PhaseFinish);

    info!("Detection finished on {} reflections.", observations.len());
    println!("{}", summarize(&observations, detector.flag()));
    Ok(())
}

pub fn summarize(observations: &ObservationSet, flag: Option<&DetectedAbsence>) -> String {
    match flag {
        Some(absence) => format!(
            "Systematic absence detected: {} holds for {:.1}% of {} reflections (residue histogram {:?}).\nReindex transform: {}",
            absence.condition,
            absence.fraction * 100.0,
            observations.len(),
            residue_histogram(observations, &absence.condition),
            absence.transform
        ),
        None => format!(
            "No systematic absence detected in {} reflections.",
            observations.len()
        ),
    }
}
