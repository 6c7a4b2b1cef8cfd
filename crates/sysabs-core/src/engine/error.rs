use super::config::ConfigError;
use crate::core::models::condition::PresenceCondition;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AbsenceError {
    #[error("No systematic absence has been detected; no correction is necessary")]
    NoAbsenceDetected,

    #[error("Corrected unit cell volume {volume:.2} A^3 is below the minimum of {cutoff:.2} A^3")]
    CellTooSmall { volume: f64, cutoff: f64 },

    #[error("Corrected unit cell is degenerate (volume {volume})")]
    DegenerateCell { volume: f64 },

    #[error("No lattice point satisfying {condition} completes a {role} basis vector")]
    TransformNotFound {
        condition: PresenceCondition,
        role: &'static str,
    },

    #[error("Reindex transform for {condition} has determinant {determinant}, expected {expected}")]
    DeterminantMismatch {
        condition: PresenceCondition,
        determinant: i64,
        expected: i64,
    },

    #[error("Absence correction did not converge after {limit} corrections")]
    RecursionLimitExceeded { limit: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
