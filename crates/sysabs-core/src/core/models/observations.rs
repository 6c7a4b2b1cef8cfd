use super::vector::MillerIndex;
use nalgebra::Vector3;
use thiserror::Error;

/// Largest accepted index magnitude. Residue and reindex arithmetic on indices
/// this large stays well inside the integer range.
pub const MAX_ABS_INDEX: i32 = 1 << 20;

#[derive(Debug, Error, PartialEq)]
#[error("Reflection {position} has index component {value} beyond ±{max}", max = MAX_ABS_INDEX)]
pub struct IndexOutOfRange {
    /// One-based position in the input.
    pub position: usize,
    pub value: f64,
}

/// Whether `value` rounds to an index within ±[`MAX_ABS_INDEX`].
pub fn is_index_in_range(value: f64) -> bool {
    value.round().abs() <= MAX_ABS_INDEX as f64
}

/// The measured reflection indices of one crystal dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationSet {
    indices: Vec<MillerIndex>,
}

impl ObservationSet {
    pub fn new(indices: Vec<MillerIndex>) -> Self {
        Self { indices }
    }

    /// Rounds predicted (fractional) indices to the nearest integers.
    pub fn from_fractional(predictions: &[Vector3<f64>]) -> Result<Self, IndexOutOfRange> {
        predictions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if let Some(&value) = p.iter().find(|&&x| !is_index_in_range(x)) {
                    return Err(IndexOutOfRange {
                        position: i + 1,
                        value,
                    });
                }
                Ok(MillerIndex::new(
                    p.x.round() as i32,
                    p.y.round() as i32,
                    p.z.round() as i32,
                ))
            })
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MillerIndex> {
        self.indices.iter()
    }

    pub fn as_slice(&self) -> &[MillerIndex] {
        &self.indices
    }
}

impl FromIterator<MillerIndex> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = MillerIndex>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a MillerIndex;
    type IntoIter = std::slice::Iter<'a, MillerIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}
