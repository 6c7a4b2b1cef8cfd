use super::vector::{LatticeVector, MillerIndex};
use crate::core::utils::geometry::triple_product;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer change of basis correcting a mis-indexed reciprocal cell.
///
/// Row `i` expresses the corrected reciprocal axis in terms of the current ones:
///
/// ```text
/// a* = A00 a*' + A01 b*' + A02 c*'
/// b* = A10 a*' + A11 b*' + A12 c*'
/// c* = A20 a*' + A21 b*' + A22 c*'
/// ```
///
/// Indices in the two settings are related by `h' = Aᵀ h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReindexTransform {
    rows: [LatticeVector; 3],
}

impl ReindexTransform {
    pub fn from_rows(rows: [LatticeVector; 3]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LatticeVector; 3] {
        &self.rows
    }

    pub fn determinant(&self) -> i64 {
        triple_product(&self.rows[0], &self.rows[1], &self.rows[2])
    }

    pub fn elements(&self) -> [i32; 9] {
        let [a, b, c] = self.rows;
        [a.h, a.k, a.l, b.h, b.k, b.l, c.h, c.k, c.l]
    }

    pub fn as_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_fn(|r, c| self.rows[r].as_array()[c] as f64)
    }

    /// The matrix handed to an orientation's change of basis.
    pub fn basis_change(&self) -> Matrix3<f64> {
        self.as_matrix().transpose()
    }

    /// Maps indices of the current setting onto the corrected one by solving
    /// `Aᵀ h = h'` exactly. Returns `None` when the result is not integral,
    /// i.e. when `h'` does not lie on the corrected lattice.
    pub fn reindex(&self, hkl: &MillerIndex) -> Option<MillerIndex> {
        let det = self.determinant();
        if det == 0 {
            return None;
        }
        let [r0, r1, r2] = &self.rows;
        let numerators = [
            triple_product(hkl, r1, r2),
            triple_product(r0, hkl, r2),
            triple_product(r0, r1, hkl),
        ];
        let mut out = [0i32; 3];
        for (slot, numerator) in out.iter_mut().zip(numerators) {
            if numerator % det != 0 {
                return None;
            }
            *slot = i32::try_from(numerator / det).ok()?;
        }
        Some(LatticeVector::from(out))
    }

    /// Maps corrected-setting indices back onto the current setting (`Aᵀ h`).
    /// Returns `None` when a component leaves the `i32` range.
    pub fn apply_transposed(&self, hkl: &MillerIndex) -> Option<MillerIndex> {
        let coefficients = hkl.as_array().map(i64::from);
        let mut out = [0i32; 3];
        for (column, slot) in out.iter_mut().enumerate() {
            let value: i64 = self
                .rows
                .iter()
                .zip(coefficients)
                .map(|(row, c)| c * i64::from(row.as_array()[column]))
                .sum();
            *slot = i32::try_from(value).ok()?;
        }
        Some(LatticeVector::from(out))
    }
}

impl fmt::Display for ReindexTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.elements();
        write!(
            f,
            "[{}, {}, {}; {}, {}, {}; {}, {}, {}]",
            e[0], e[1], e[2], e[3], e[4], e[5], e[6], e[7], e[8]
        )
    }
}
