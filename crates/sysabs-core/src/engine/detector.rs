use super::conditions::{ConditionTable, default_table};
use super::config::DetectionConfig;
use super::error::AbsenceError;
use super::histogram::residue_histogram;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::condition::PresenceCondition;
use crate::core::models::observations::ObservationSet;
use crate::core::models::orientation::Orientation;
use crate::core::models::transform::ReindexTransform;
use tracing::{debug, info, instrument, trace, warn};

/// A presence condition that the observations satisfy almost exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedAbsence {
    pub condition: PresenceCondition,
    /// Always zero: a dominant non-zero residue class has no obvious correction.
    pub remainder: u32,
    /// Fraction of observations in the residue class.
    pub fraction: f64,
    pub transform: ReindexTransform,
}

/// Rejects unit cells smaller than `cutoff` Å³ (or with no finite volume).
pub fn check_cell_volume(volume: f64, cutoff: f64) -> Result<(), AbsenceError> {
    if !volume.is_finite() {
        return Err(AbsenceError::DegenerateCell { volume });
    }
    if volume < cutoff {
        return Err(AbsenceError::CellTooSmall { volume, cutoff });
    }
    Ok(())
}

/// Tests observation sets against a [`ConditionTable`] and corrects
/// orientations for the first condition found.
#[derive(Debug, Clone)]
pub struct AbsenceDetector<'t> {
    table: &'t ConditionTable,
    config: DetectionConfig,
    flag: Option<DetectedAbsence>,
}

impl AbsenceDetector<'static> {
    /// Detector over the process-wide default table with default thresholds.
    pub fn with_defaults() -> Result<Self, AbsenceError> {
        Ok(Self::new(default_table()?, DetectionConfig::default()))
    }
}

impl<'t> AbsenceDetector<'t> {
    pub fn new(table: &'t ConditionTable, config: DetectionConfig) -> Self {
        Self {
            table,
            config,
            flag: None,
        }
    }

    pub fn table(&self) -> &'t ConditionTable {
        self.table
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// The condition flagged by the most recent call to [`detect`](Self::detect).
    pub fn flag(&self) -> Option<&DetectedAbsence> {
        self.flag.as_ref()
    }

    pub fn detect(&mut self, observations: &ObservationSet) -> bool {
        self.detect_with_progress(observations, &ProgressReporter::new())
    }

    /// Scans the table in order and flags the first condition whose
    /// zero-residue class holds more than the presence threshold of the
    /// observations. Any previous flag is cleared first.
    #[instrument(skip_all, name = "absence_detection", fields(observations = observations.len()))]
    pub fn detect_with_progress(
        &mut self,
        observations: &ObservationSet,
        reporter: &ProgressReporter,
    ) -> bool {
        self.flag = None;
        if observations.is_empty() {
            warn!("Absence test skipped: the observation set is empty.");
            return false;
        }

        let total = observations.len() as f64;
        reporter.report(Progress::ScanStart {
            total_conditions: self.table.len() as u64,
            observations: observations.len(),
        });

        for entry in self.table.iter() {
            let histogram = residue_histogram(observations, &entry.condition);
            let fraction = histogram[0] as f64 / total;
            reporter.report(Progress::ConditionTested {
                condition: entry.condition,
                fraction,
            });
            trace!("{}: zero-residue fraction {:.3}", entry.condition, fraction);
            if fraction > self.config.presence_threshold {
                info!(
                    "Detected exclusive presence of {} ({:.1}% of {} observations).",
                    entry.condition,
                    fraction * 100.0,
                    observations.len()
                );
                self.flag = Some(DetectedAbsence {
                    condition: entry.condition,
                    remainder: 0,
                    fraction,
                    transform: entry.transform,
                });
                reporter.report(Progress::ScanFinish {
                    flagged: Some(entry.condition),
                });
                return true;
            }
        }

        reporter.report(Progress::ScanFinish { flagged: None });
        debug!(
            "No systematic absence among {} conditions.",
            self.table.len()
        );
        false
    }

    /// Applies the flagged transform to `orientation` and checks the volume of
    /// the resulting cell.
    ///
    /// # Errors
    ///
    /// [`AbsenceError::NoAbsenceDetected`] without a prior positive detection;
    /// [`AbsenceError::CellTooSmall`] or [`AbsenceError::DegenerateCell`] when
    /// the corrected cell fails the volume check.
    pub fn correct<O: Orientation>(&self, orientation: &O) -> Result<O, AbsenceError> {
        let flag = self.flag.as_ref().ok_or(AbsenceError::NoAbsenceDetected)?;
        let corrected = orientation.change_basis(&flag.transform.basis_change());
        let volume = corrected.unit_cell_volume();
        check_cell_volume(volume, self.config.min_cell_volume)?;
        debug!(
            "Corrected orientation for {}: cell volume {:.1} -> {:.1}.",
            flag.condition,
            orientation.unit_cell_volume(),
            volume
        );
        Ok(corrected)
    }
}
