use crate::core::utils::geometry::gcd;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// An integer direction `(h, k, l)` in reciprocal space.
///
/// Lattice vectors are totally ordered by squared length, then by coordinate
/// sum (larger sums first, so positive directions lead within a shell), and
/// finally by descending lexicographic `(h, k, l)`. Sorting a cube of points
/// with this order yields the spiral scan used to build the condition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LatticeVector {
    pub h: i32,
    pub k: i32,
    pub l: i32,
}

/// Measured reflection indices share the lattice-vector representation.
pub type MillerIndex = LatticeVector;

impl LatticeVector {
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(h: i32, k: i32, l: i32) -> Self {
        Self { h, k, l }
    }

    pub fn as_array(&self) -> [i32; 3] {
        [self.h, self.k, self.l]
    }

    pub fn squared_length(&self) -> i64 {
        self.dot(self)
    }

    pub fn component_sum(&self) -> i64 {
        self.h as i64 + self.k as i64 + self.l as i64
    }

    pub fn is_zero(&self) -> bool {
        self.h == 0 && self.k == 0 && self.l == 0
    }

    pub fn dot(&self, other: &Self) -> i64 {
        self.h as i64 * other.h as i64
            + self.k as i64 * other.k as i64
            + self.l as i64 * other.l as i64
    }

    /// Components of `self × other`, widened so that large indices cannot
    /// overflow.
    pub fn cross(&self, other: &Self) -> [i64; 3] {
        let [a1, a2, a3] = self.as_array().map(i64::from);
        let [b1, b2, b3] = other.as_array().map(i64::from);
        [a2 * b3 - a3 * b2, a3 * b1 - a1 * b3, a1 * b2 - a2 * b1]
    }

    /// Divides out the common factor of the components.
    pub fn primitive(&self) -> Self {
        let divisor = gcd(gcd(self.h as i64, self.k as i64), self.l as i64) as i32;
        if divisor <= 1 {
            return *self;
        }
        Self::new(self.h / divisor, self.k / divisor, self.l / divisor)
    }
}

impl Ord for LatticeVector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.squared_length()
            .cmp(&other.squared_length())
            .then_with(|| other.component_sum().cmp(&self.component_sum()))
            .then_with(|| other.as_array().cmp(&self.as_array()))
    }
}

impl PartialOrd for LatticeVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<[i32; 3]> for LatticeVector {
    fn from([h, k, l]: [i32; 3]) -> Self {
        Self::new(h, k, l)
    }
}

impl From<LatticeVector> for [i32; 3] {
    fn from(v: LatticeVector) -> Self {
        v.as_array()
    }
}

impl fmt::Display for LatticeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.h, self.k, self.l)
    }
}
