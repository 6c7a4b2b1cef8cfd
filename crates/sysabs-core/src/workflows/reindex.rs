use crate::core::models::observations::ObservationSet;
use crate::core::models::orientation::Orientation;
use crate::core::models::transform::ReindexTransform;
use crate::engine::conditions::ConditionTable;
use crate::engine::config::DetectionConfig;
use crate::engine::detector::{AbsenceDetector, DetectedAbsence};
use crate::engine::error::AbsenceError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct ReindexStep {
    pub detection: DetectedAbsence,
    pub volume_before: f64,
    pub volume_after: f64,
    /// Observations that map onto the corrected lattice.
    pub retained: usize,
    /// Observations dropped because their corrected indices are fractional.
    pub discarded: usize,
}

#[derive(Debug, Clone)]
pub struct ReindexResult<O> {
    pub orientation: O,
    pub observations: ObservationSet,
    pub steps: Vec<ReindexStep>,
}

impl<O> ReindexResult<O> {
    pub fn was_corrected(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Overall factor by which the unit cell volume was reduced.
    pub fn volume_reduction(&self) -> u64 {
        self.steps
            .iter()
            .map(|s| s.detection.condition.modulus as u64)
            .product()
    }
}

/// Expresses the observations in the corrected setting, returning the
/// reindexed set and the number of observations that had no integral image.
pub fn reindex_observations(
    observations: &ObservationSet,
    transform: &ReindexTransform,
) -> (ObservationSet, usize) {
    let reindexed: ObservationSet = observations
        .iter()
        .filter_map(|hkl| transform.reindex(hkl))
        .collect();
    let discarded = observations.len() - reindexed.len();
    (reindexed, discarded)
}

/// Repeats detect → correct → reindex until the observations show no
/// systematic absence.
///
/// # Errors
///
/// Fails with [`AbsenceError::RecursionLimitExceeded`] when an absence is still
/// detected after `config.recursion_limit` corrections, and propagates the
/// volume-check failures of [`AbsenceDetector::correct`].
#[instrument(skip_all, name = "reindex_workflow")]
pub fn run<O: Orientation + Clone>(
    orientation: &O,
    observations: &ObservationSet,
    table: &ConditionTable,
    config: &DetectionConfig,
    reporter: &ProgressReporter,
) -> Result<ReindexResult<O>, AbsenceError> {
    config.validate()?;
    info!(
        "Starting absence correction on {} observations with {} conditions.",
        observations.len(),
        table.len()
    );

    let mut detector = AbsenceDetector::new(table, config.clone());
    let mut current_orientation = orientation.clone();
    let mut current_observations = observations.clone();
    let mut steps: Vec<ReindexStep> = Vec::new();

    loop {
        reporter.report(Progress::PhaseStart {
            name: "Testing Presence Conditions",
        });
        let detected = detector.detect_with_progress(&current_observations, reporter);
        reporter.report(Progress::PhaseFinish);

        if !detected {
            break;
        }
        if steps.len() >= config.recursion_limit {
            warn!(
                "Systematic absence persists after {} corrections.",
                steps.len()
            );
            return Err(AbsenceError::RecursionLimitExceeded {
                limit: config.recursion_limit,
            });
        }
        let detection = detector
            .flag()
            .cloned()
            .ok_or(AbsenceError::NoAbsenceDetected)?;

        reporter.report(Progress::PhaseStart {
            name: "Correcting Orientation",
        });
        let volume_before = current_orientation.unit_cell_volume();
        let corrected = detector.correct(&current_orientation)?;
        let volume_after = corrected.unit_cell_volume();

        let (reindexed, discarded) =
            reindex_observations(&current_observations, &detection.transform);
        reporter.report(Progress::Message(format!(
            "{}: cell volume {:.1} -> {:.1}, {} observations reindexed, {} discarded",
            detection.condition,
            volume_before,
            volume_after,
            reindexed.len(),
            discarded
        )));
        reporter.report(Progress::PhaseFinish);

        info!(
            "Correction {} applied for {} ({} observations discarded).",
            steps.len() + 1,
            detection.condition,
            discarded
        );
        steps.push(ReindexStep {
            detection,
            volume_before,
            volume_after,
            retained: reindexed.len(),
            discarded,
        });
        current_orientation = corrected;
        current_observations = reindexed;
    }

    info!(
        "Absence correction finished after {} correction(s).",
        steps.len()
    );
    Ok(ReindexResult {
        orientation: current_orientation,
        observations: current_observations,
        steps,
    })
}
