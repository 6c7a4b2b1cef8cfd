//! # sysabs Core Library
//!
//! Detection and correction of systematic absences in autoindexed
//! crystallographic data. A lattice chosen too large by the indexer leaves a
//! tell-tale pattern in the Miller indices: almost all of them satisfy a
//! presence condition `h·v ≡ 0 (mod m)`. This library finds such a condition,
//! shrinks the unit cell by the matching integer transform and reindexes the
//! observations.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`LatticeVector`,
//!   `PresenceCondition`, `ReindexTransform`, `CrystalOrientation`), integer
//!   geometry helpers and reflection / orientation file I/O.
//!
//! - **[`engine`]: The Logic Core.** Condition-table generation, the residue
//!   histogram test, the stateful `AbsenceDetector`, configuration and
//!   progress reporting.
//!
//! - **[`workflows`]: The Public API.** The iterative detect → correct →
//!   reindex procedure that ties `engine` and `core` together.

pub mod core;
pub mod engine;
pub mod workflows;
