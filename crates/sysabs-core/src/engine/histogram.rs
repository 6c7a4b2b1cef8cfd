use crate::core::models::condition::PresenceCondition;
use crate::core::models::observations::ObservationSet;

/// Counts observations per residue class of `hkl · v (mod m)`. The returned
/// vector has one bucket per residue `0..m`.
pub fn residue_histogram(
    observations: &ObservationSet,
    condition: &PresenceCondition,
) -> Vec<usize> {
    let mut counts = vec![0usize; condition.modulus as usize];
    for hkl in observations {
        counts[condition.residue(hkl) as usize] += 1;
    }
    counts
}

/// Fraction of observations in the zero-residue class; zero for an empty set.
pub fn presence_fraction(observations: &ObservationSet, condition: &PresenceCondition) -> f64 {
    if observations.is_empty() {
        return 0.0;
    }
    residue_histogram(observations, condition)[0] as f64 / observations.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::vector::{LatticeVector, MillerIndex};

    fn observations(indices: &[[i32; 3]]) -> ObservationSet {
        indices.iter().copied().map(MillerIndex::from).collect()
    }

    #[test]
    fn histogram_counts_every_residue_class() {
        let condition = PresenceCondition::new(LatticeVector::new(1, 1, 0), 3);
        let obs = observations(&[[1, 2, 0], [0, 1, 5], [2, 0, 9], [-1, 0, 0], [3, 3, 3]]);
        assert_eq!(residue_histogram(&obs, &condition), vec![2, 1, 2]);
    }

    #[test]
    fn histogram_total_equals_observation_count() {
        let condition = PresenceCondition::new(LatticeVector::new(2, 1, 1), 5);
        let obs: ObservationSet = (-20..20).map(|i| MillerIndex::new(i, i * 3, -i)).collect();
        let histogram = residue_histogram(&obs, &condition);
        assert_eq!(histogram.len(), 5);
        assert_eq!(histogram.iter().sum::<usize>(), obs.len());
    }

    #[test]
    fn presence_fraction_of_empty_set_is_zero() {
        let condition = PresenceCondition::new(LatticeVector::new(1, 0, 0), 2);
        assert_eq!(presence_fraction(&ObservationSet::default(), &condition), 0.0);
    }

    #[test]
    fn presence_fraction_counts_zero_class() {
        let condition = PresenceCondition::new(LatticeVector::new(1, 0, 0), 2);
        let obs = observations(&[[2, 1, 1], [4, 0, 3], [1, 0, 0], [0, 5, 5]]);
        assert_eq!(presence_fraction(&obs, &condition), 0.75);
    }
}
