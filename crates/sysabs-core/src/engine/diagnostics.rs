use crate::core::models::observations::ObservationSet;
use crate::core::models::vector::MillerIndex;
use crate::core::utils::geometry::integer_deviation;
use nalgebra::Vector3;
use std::fmt;

/// Predicted indices within this distance of an integer, in every component,
/// count as well predicted.
pub const PREDICTION_TOLERANCE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PredictionQuality {
    pub good: usize,
    pub bad: usize,
}

impl PredictionQuality {
    pub fn total(&self) -> usize {
        self.good + self.bad
    }

    pub fn good_fraction(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.good as f64 / self.total() as f64
    }
}

pub fn prediction_quality(predictions: &[Vector3<f64>], tolerance: f64) -> PredictionQuality {
    let good = predictions
        .iter()
        .filter(|p| p.iter().all(|&x| integer_deviation(x) < tolerance))
        .count();
    PredictionQuality {
        good,
        bad: predictions.len() - good,
    }
}

fn rem(value: i64, modulus: i64) -> i32 {
    value.rem_euclid(modulus) as i32
}

/// Residues of one reflection under the common low-order absence rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidueSummary {
    pub hkl: MillerIndex,
    pub mod2: [i32; 3],
    pub mod3: [i32; 3],
    /// `((k - l) mod 2, (k + l) mod 2)`
    pub kl: [i32; 2],
    /// `((l - h) mod 2, (l + h) mod 2)`
    pub lh: [i32; 2],
    /// `((h - k) mod 2, (h + k) mod 2)`
    pub hk: [i32; 2],
}

impl ResidueSummary {
    pub fn of(hkl: &MillerIndex) -> Self {
        let [h, k, l] = hkl.as_array().map(i64::from);
        Self {
            hkl: *hkl,
            mod2: [rem(h, 2), rem(k, 2), rem(l, 2)],
            mod3: [rem(h, 3), rem(k, 3), rem(l, 3)],
            kl: [rem(k - l, 2), rem(k + l, 2)],
            lh: [rem(l - h, 2), rem(l + h, 2)],
            hk: [rem(h - k, 2), rem(h + k, 2)],
        }
    }
}

impl fmt::Display for ResidueSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.mod2;
        let [d, e, g] = self.mod3;
        write!(
            f,
            "{:<16} ({a},{b},{c}) ({d},{e},{g}) ({},{}) ({},{}) ({},{})",
            self.hkl.to_string(),
            self.kl[0],
            self.kl[1],
            self.lh[0],
            self.lh[1],
            self.hk[0],
            self.hk[1],
        )
    }
}

pub fn residue_listing(observations: &ObservationSet) -> Vec<ResidueSummary> {
    observations.iter().map(ResidueSummary::of).collect()
}
