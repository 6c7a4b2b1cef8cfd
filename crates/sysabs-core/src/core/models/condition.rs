use super::vector::LatticeVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A modular linear constraint `h·v0 + k·v1 + l·v2 ≡ r (mod m)` on reflection
/// indices. A dataset whose indices overwhelmingly fall into the `r = 0` class
/// signals a systematic absence caused by indexing on a too-large cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresenceCondition {
    pub vector: LatticeVector,
    pub modulus: u32,
}

impl PresenceCondition {
    pub fn new(vector: LatticeVector, modulus: u32) -> Self {
        Self { vector, modulus }
    }

    /// Non-negative residue of `hkl · vector` modulo the modulus.
    #[inline]
    pub fn residue(&self, hkl: &LatticeVector) -> u32 {
        self.vector.dot(hkl).rem_euclid(self.modulus as i64) as u32
    }

    #[inline]
    pub fn is_satisfied_by(&self, hkl: &LatticeVector) -> bool {
        self.residue(hkl) == 0
    }
}

impl fmt::Display for PresenceCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}H {}K {}L = {}n",
            self.vector.h, self.vector.k, self.vector.l, self.modulus
        )
    }
}
