//! # Core Models Module
//!
//! Fundamental data structures for systematic-absence analysis.
//!
//! ## Key Components
//!
//! - [`vector`] - Integer lattice vectors and Miller indices, with the spiral ordering
//! - [`condition`] - Modular presence conditions on reflection indices
//! - [`transform`] - Integer reindexing transforms and exact index mapping
//! - [`observations`] - Immutable sets of measured reflection indices
//! - [`orientation`] - Crystal orientation, unit cell and the change-of-basis seam

pub mod condition;
pub mod observations;
pub mod orientation;
pub mod transform;
pub mod vector;
