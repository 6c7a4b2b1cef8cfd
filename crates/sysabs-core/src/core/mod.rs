//! # Core Module
//!
//! Stateless building blocks of the library: the lattice data model, integer
//! geometry helpers and readers/writers for reflection and orientation files.
//!
//! - **Data Models** ([`models`]) - Lattice vectors, presence conditions, reindex transforms,
//!   observation sets and crystal orientations
//! - **File I/O** ([`io`]) - Plain-text HKL, CSV and orientation TOML formats
//! - **Utilities** ([`utils`]) - Integer geometry (collinearity, coplanarity, gcd)

pub mod io;
pub mod models;
pub mod utils;
