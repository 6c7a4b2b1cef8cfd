//! Generation of the presence-condition table.
//!
//! The table is built in three steps:
//!
//! 1. **Spiral order** — every integer point of the cube `[-r, r]³` (with `r`
//!    the largest modulus), origin excluded, sorted by [`LatticeVector`]'s order.
//! 2. **Condition vectors** — spiral points within the norm bound, keeping only
//!    the first member of each collinear family.
//! 3. **Reindex transforms** — for every vector and modulus, the three shortest
//!    independent lattice points satisfying the condition, arranged so that the
//!    determinant is positive and equal to the modulus.
//!
//! A transform chosen this way reduces the unit cell volume by exactly the
//! modulus. An already too-small cell can still test positive and would be
//! reduced indefinitely, so corrections are always followed by a volume check.

use super::config::TableConfig;
use super::error::AbsenceError;
use crate::core::models::condition::PresenceCondition;
use crate::core::models::transform::ReindexTransform;
use crate::core::models::vector::LatticeVector;
use crate::core::utils::geometry::{is_collinear, is_coplanar};
use once_cell::sync::Lazy;
use tracing::debug;

static DEFAULT_TABLE: Lazy<Result<ConditionTable, AbsenceError>> =
    Lazy::new(|| ConditionTable::generate(&TableConfig::default()));

/// The table for the default modularities and norm bound, computed once per
/// process.
pub fn default_table() -> Result<&'static ConditionTable, AbsenceError> {
    DEFAULT_TABLE.as_ref().map_err(Clone::clone)
}

pub fn spiral_order(radius: i32) -> Vec<LatticeVector> {
    let side = 2 * radius.max(0) as usize + 1;
    let mut points = Vec::with_capacity(side.pow(3) - 1);
    for h in -radius..=radius {
        for k in -radius..=radius {
            for l in -radius..=radius {
                let point = LatticeVector::new(h, k, l);
                if !point.is_zero() {
                    points.push(point);
                }
            }
        }
    }
    points.sort_unstable();
    points
}

pub fn condition_vectors(spiral: &[LatticeVector], max_norm: i64) -> Vec<LatticeVector> {
    let mut vectors: Vec<LatticeVector> = Vec::new();
    for point in spiral.iter().filter(|p| p.squared_length() <= max_norm) {
        if vectors.iter().any(|v| is_collinear(point, v)) {
            continue;
        }
        vectors.push(point.primitive());
    }
    vectors
}

fn build_transform(
    spiral: &[LatticeVector],
    condition: &PresenceCondition,
) -> Result<ReindexTransform, AbsenceError> {
    let mut allowed = spiral.iter().filter(|p| condition.is_satisfied_by(p));
    let not_found = |role| AbsenceError::TransformNotFound {
        condition: *condition,
        role,
    };

    let first = *allowed.clone().next().ok_or_else(|| not_found("first"))?;
    let second = *allowed
        .clone()
        .find(|p| !is_collinear(&first, p))
        .ok_or_else(|| not_found("second"))?;
    let third = *allowed
        .find(|p| !is_coplanar(&first, &second, p))
        .ok_or_else(|| not_found("third"))?;

    let mut transform = ReindexTransform::from_rows([first, second, third]);
    if transform.determinant() < 0 {
        transform = ReindexTransform::from_rows([second, first, third]);
    }

    let expected = condition.modulus as i64;
    let determinant = transform.determinant();
    if determinant != expected {
        return Err(AbsenceError::DeterminantMismatch {
            condition: *condition,
            determinant,
            expected,
        });
    }
    Ok(transform)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionEntry {
    pub condition: PresenceCondition,
    pub transform: ReindexTransform,
}

/// Presence conditions paired with their reindex transforms, in test order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionTable {
    entries: Vec<ConditionEntry>,
}

impl ConditionTable {
    pub fn generate(config: &TableConfig) -> Result<Self, AbsenceError> {
        config.validate()?;

        let spiral = spiral_order(config.spiral_radius());
        let vectors = condition_vectors(&spiral, config.max_vector_norm);

        let mut entries = Vec::with_capacity(vectors.len() * config.modularities.len());
        for vector in &vectors {
            for &modulus in &config.modularities {
                let condition = PresenceCondition::new(*vector, modulus);
                let transform = build_transform(&spiral, &condition)?;
                entries.push(ConditionEntry {
                    condition,
                    transform,
                });
            }
        }

        debug!(
            "Generated {} presence conditions from {} vectors and moduli {:?}.",
            entries.len(),
            vectors.len(),
            config.modularities
        );
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ConditionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConditionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, condition: &PresenceCondition) -> Option<&ConditionEntry> {
        self.entries.iter().find(|e| &e.condition == condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ConfigError;

    fn v(h: i32, k: i32, l: i32) -> LatticeVector {
        LatticeVector::new(h, k, l)
    }

    #[test]
    fn spiral_covers_cube_without_origin() {
        let spiral = spiral_order(2);
        assert_eq!(spiral.len(), 124);
        assert!(!spiral.contains(&LatticeVector::ZERO));
    }

    #[test]
    fn spiral_starts_with_positive_unit_axes() {
        let spiral = spiral_order(5);
        assert_eq!(
            &spiral[..6],
            &[v(1, 0, 0), v(0, 1, 0), v(0, 0, 1), v(0, 0, -1), v(0, -1, 0), v(-1, 0, 0)]
        );
    }

    #[test]
    fn spiral_is_sorted_by_distance() {
        let spiral = spiral_order(3);
        assert!(
            spiral
                .windows(2)
                .all(|w| w[0].squared_length() <= w[1].squared_length())
        );
    }

    #[test]
    fn condition_vectors_have_one_member_per_direction() {
        let vectors = condition_vectors(&spiral_order(5), 6);
        assert_eq!(vectors.len(), 37);
        assert_eq!(&vectors[..3], &[v(1, 0, 0), v(0, 1, 0), v(0, 0, 1)]);
        for (i, a) in vectors.iter().enumerate() {
            for b in &vectors[i + 1..] {
                assert!(!is_collinear(a, b), "{a} and {b} are collinear");
            }
        }
    }

    #[test]
    fn default_table_has_all_vector_modulus_pairs() {
        let table = default_table().unwrap();
        assert_eq!(table.len(), 111);
        let first: Vec<_> = table.iter().take(3).map(|e| e.condition).collect();
        assert_eq!(
            first,
            vec![
                PresenceCondition::new(v(1, 0, 0), 2),
                PresenceCondition::new(v(1, 0, 0), 3),
                PresenceCondition::new(v(1, 0, 0), 5),
            ]
        );
    }

    #[test]
    fn every_transform_determinant_equals_its_modulus() {
        let table = default_table().unwrap();
        for entry in table.iter() {
            assert_eq!(
                entry.transform.determinant(),
                entry.condition.modulus as i64,
                "{}",
                entry.condition
            );
        }
    }

    #[test]
    fn every_transform_row_satisfies_its_condition() {
        let table = default_table().unwrap();
        for entry in table.iter() {
            for row in entry.transform.rows() {
                assert!(entry.condition.is_satisfied_by(row));
            }
        }
    }

    #[test]
    fn transform_for_even_h_uses_shortest_allowed_points() {
        let table = default_table().unwrap();
        let entry = table
            .find(&PresenceCondition::new(v(1, 0, 0), 2))
            .unwrap();
        assert_eq!(entry.transform.rows(), &[v(0, 1, 0), v(0, 0, 1), v(2, 0, 0)]);
    }

    #[test]
    fn negative_determinant_swaps_first_two_rows() {
        let table = default_table().unwrap();
        let entry = table
            .find(&PresenceCondition::new(v(1, 1, 1), 3))
            .unwrap();
        assert_eq!(entry.transform.rows(), &[v(1, -1, 0), v(1, 0, -1), v(1, 1, 1)]);
    }

    #[test]
    fn generation_is_deterministic() {
        let config = TableConfig::default();
        let a = ConditionTable::generate(&config).unwrap();
        let b = ConditionTable::generate(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(&a, default_table().unwrap());
    }

    #[test]
    fn larger_moduli_extend_the_table() {
        let config = TableConfig {
            modularities: vec![2, 3, 5, 7],
            max_vector_norm: 3,
        };
        let table = ConditionTable::generate(&config).unwrap();
        assert_eq!(table.len(), 13 * 4);
        for entry in table.iter() {
            assert_eq!(entry.transform.determinant(), entry.condition.modulus as i64);
        }
    }

    #[test]
    fn spiral_of_radius_zero_is_empty() {
        assert!(spiral_order(0).is_empty());
        assert!(spiral_order(-3).is_empty());
    }

    #[test]
    fn oversized_modulus_is_rejected_before_scanning() {
        let config = TableConfig {
            modularities: vec![700],
            max_vector_norm: 1,
        };
        assert!(matches!(
            ConditionTable::generate(&config),
            Err(AbsenceError::Config(ConfigError::InvalidParameter {
                name: "modularities",
                ..
            }))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = TableConfig {
            modularities: vec![],
            max_vector_norm: 6,
        };
        assert!(matches!(
            ConditionTable::generate(&config),
            Err(AbsenceError::Config(_))
        ));
    }
}
