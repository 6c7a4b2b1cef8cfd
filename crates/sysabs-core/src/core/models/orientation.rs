use crate::core::utils::geometry::angle_between_degrees;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const SINGULARITY_EPSILON: f64 = 1e-12;

/// Collaborator seam for anything that can be re-expressed in a new basis and
/// report the volume of its direct-space unit cell.
pub trait Orientation: Sized {
    fn change_basis(&self, basis_change: &Matrix3<f64>) -> Self;

    /// Direct-space unit-cell volume in Å³; not finite for a degenerate basis.
    fn unit_cell_volume(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasisType {
    /// Rows of the matrix are the direct axes a, b, c.
    Direct,
    /// Columns of the matrix are the reciprocal axes a*, b*, c*.
    Reciprocal,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrientationError {
    #[error("Orientation matrix is singular (determinant {determinant:e})")]
    Singular { determinant: f64 },
    #[error("Orientation matrix contains non-finite elements")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitCell {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub volume: f64,
}

impl fmt::Display for UnitCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}, {:.3}, {:.2}, {:.2}, {:.2}) V={:.1}",
            self.a, self.b, self.c, self.alpha, self.beta, self.gamma, self.volume
        )
    }
}

/// Crystal setting in the laboratory frame, stored as the reciprocal matrix
/// `A*` whose columns are `a*`, `b*`, `c*` (so that `A* · h` is the scattering
/// vector of reflection `h`).
#[derive(Debug, Clone, PartialEq)]
pub struct CrystalOrientation {
    reciprocal: Matrix3<f64>,
}

impl CrystalOrientation {
    pub fn new(matrix: Matrix3<f64>, basis: BasisType) -> Result<Self, OrientationError> {
        if matrix.iter().any(|x| !x.is_finite()) {
            return Err(OrientationError::NonFinite);
        }
        let determinant = matrix.determinant();
        if determinant.abs() < SINGULARITY_EPSILON {
            return Err(OrientationError::Singular { determinant });
        }
        let reciprocal = match basis {
            BasisType::Reciprocal => matrix,
            BasisType::Direct => matrix
                .try_inverse()
                .ok_or(OrientationError::Singular { determinant })?,
        };
        Ok(Self { reciprocal })
    }

    pub fn from_reciprocal_matrix(matrix: Matrix3<f64>) -> Result<Self, OrientationError> {
        Self::new(matrix, BasisType::Reciprocal)
    }

    pub fn from_direct_matrix(matrix: Matrix3<f64>) -> Result<Self, OrientationError> {
        Self::new(matrix, BasisType::Direct)
    }

    pub fn reciprocal_matrix(&self) -> &Matrix3<f64> {
        &self.reciprocal
    }

    /// Rows are the direct axes `a`, `b`, `c`.
    pub fn direct_matrix(&self) -> Option<Matrix3<f64>> {
        self.reciprocal.try_inverse()
    }

    pub fn unit_cell(&self) -> Option<UnitCell> {
        let direct = self.direct_matrix()?;
        let a: Vector3<f64> = direct.row(0).transpose();
        let b: Vector3<f64> = direct.row(1).transpose();
        let c: Vector3<f64> = direct.row(2).transpose();
        Some(UnitCell {
            a: a.norm(),
            b: b.norm(),
            c: c.norm(),
            alpha: angle_between_degrees(&b, &c),
            beta: angle_between_degrees(&c, &a),
            gamma: angle_between_degrees(&a, &b),
            volume: direct.determinant().abs(),
        })
    }
}

impl Orientation for CrystalOrientation {
    fn change_basis(&self, basis_change: &Matrix3<f64>) -> Self {
        Self {
            reciprocal: self.reciprocal * basis_change,
        }
    }

    fn unit_cell_volume(&self) -> f64 {
        1.0 / self.reciprocal.determinant().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orthorhombic(a: f64, b: f64, c: f64) -> CrystalOrientation {
        CrystalOrientation::from_direct_matrix(Matrix3::from_diagonal(&Vector3::new(a, b, c)))
            .unwrap()
    }

    #[test]
    fn direct_and_reciprocal_settings_agree() {
        let orientation = orthorhombic(10.0, 20.0, 40.0);
        let reciprocal = orientation.reciprocal_matrix();
        assert!((reciprocal[(0, 0)] - 0.1).abs() < 1e-12);
        assert!((reciprocal[(1, 1)] - 0.05).abs() < 1e-12);
        assert!((reciprocal[(2, 2)] - 0.025).abs() < 1e-12);
    }

    #[test]
    fn unit_cell_of_orthorhombic_lattice() {
        let cell = orthorhombic(10.0, 20.0, 40.0).unit_cell().unwrap();
        assert!((cell.a - 10.0).abs() < 1e-9);
        assert!((cell.b - 20.0).abs() < 1e-9);
        assert!((cell.c - 40.0).abs() < 1e-9);
        assert!((cell.alpha - 90.0).abs() < 1e-9);
        assert!((cell.beta - 90.0).abs() < 1e-9);
        assert!((cell.gamma - 90.0).abs() < 1e-9);
        assert!((cell.volume - 8000.0).abs() < 1e-6);
    }

    #[test]
    fn unit_cell_volume_matches_unit_cell() {
        let orientation = orthorhombic(7.0, 9.0, 11.0);
        assert!((orientation.unit_cell_volume() - 693.0).abs() < 1e-6);
    }

    #[test]
    fn change_basis_doubling_a_star_halves_the_cell() {
        let orientation = orthorhombic(10.0, 20.0, 40.0);
        let doubled = Matrix3::from_diagonal(&Vector3::new(2.0, 1.0, 1.0));
        let changed = orientation.change_basis(&doubled);
        let cell = changed.unit_cell().unwrap();
        assert!((cell.a - 5.0).abs() < 1e-9);
        assert!((changed.unit_cell_volume() - 4000.0).abs() < 1e-6);
    }

    #[test]
    fn monoclinic_angle_is_recovered() {
        let beta = 100.0f64.to_radians();
        let direct = Matrix3::new(
            10.0, 0.0, 0.0, //
            0.0, 12.0, 0.0, //
            15.0 * beta.cos(), 0.0, 15.0 * beta.sin(),
        );
        let cell = CrystalOrientation::from_direct_matrix(direct)
            .unwrap()
            .unit_cell()
            .unwrap();
        assert!((cell.beta - 100.0).abs() < 1e-9);
        assert!((cell.alpha - 90.0).abs() < 1e-9);
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let result = CrystalOrientation::from_reciprocal_matrix(Matrix3::zeros());
        assert!(matches!(result, Err(OrientationError::Singular { .. })));
    }

    #[test]
    fn non_finite_matrix_is_rejected() {
        let mut m = Matrix3::identity();
        m[(1, 2)] = f64::NAN;
        assert_eq!(
            CrystalOrientation::from_reciprocal_matrix(m),
            Err(OrientationError::NonFinite)
        );
    }

    #[test]
    fn degenerate_change_of_basis_reports_infinite_volume() {
        let orientation = orthorhombic(10.0, 10.0, 10.0);
        let collapsed = orientation.change_basis(&Matrix3::zeros());
        assert!(!collapsed.unit_cell_volume().is_finite());
        assert!(collapsed.unit_cell().is_none());
    }
}
