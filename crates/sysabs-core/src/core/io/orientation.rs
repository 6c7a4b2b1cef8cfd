use crate::core::models::orientation::{BasisType, CrystalOrientation, OrientationError, UnitCell};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrientationFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid orientation: {0}")]
    Orientation(#[from] OrientationError),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct OrientationRecord {
    basis: BasisType,
    /// Row-major 3x3 matrix.
    matrix: [[f64; 3]; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit_cell: Option<UnitCell>,
}

/// TOML representation of a [`CrystalOrientation`]:
///
/// ```toml
/// basis = "reciprocal"
/// matrix = [[0.02, 0.0, 0.0], [0.0, 0.0166, 0.0], [0.0, 0.0, 0.0142]]
/// ```
///
/// Files written by this type always use the reciprocal basis and carry an
/// informational `[unit-cell]` table that is ignored when reading.
pub struct OrientationFile;

impl OrientationFile {
    pub fn read_from_str(content: &str) -> Result<CrystalOrientation, OrientationFileError> {
        let record: OrientationRecord = toml::from_str(content)?;
        let matrix = Matrix3::from_fn(|r, c| record.matrix[r][c]);
        Ok(CrystalOrientation::new(matrix, record.basis)?)
    }

    pub fn read_from_path(path: &Path) -> Result<CrystalOrientation, OrientationFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| OrientationFileError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::read_from_str(&content)
    }

    pub fn to_toml_string(orientation: &CrystalOrientation) -> Result<String, OrientationFileError> {
        let m = orientation.reciprocal_matrix();
        let record = OrientationRecord {
            basis: BasisType::Reciprocal,
            matrix: [
                [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
                [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
                [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
            ],
            unit_cell: orientation.unit_cell(),
        };
        Ok(toml::to_string_pretty(&record)?)
    }

    pub fn write_to_path(
        orientation: &CrystalOrientation,
        path: &Path,
    ) -> Result<(), OrientationFileError> {
        let content = Self::to_toml_string(orientation)?;
        std::fs::write(path, content).map_err(|e| OrientationFileError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}
