//! # Engine Module
//!
//! The systematic-absence engine: generation of the presence-condition table,
//! residue statistics over observation sets, detection of a dominant presence
//! condition, and correction of the crystal orientation it implies.
//!
//! - **Condition Table** ([`conditions`]) - Spiral lattice scan, condition vectors and
//!   reindex transforms, memoised for the default parameters
//! - **Statistics** ([`histogram`]) - Residue histograms of observation sets
//! - **Detection** ([`detector`]) - First-match absence detection and orientation correction
//! - **Diagnostics** ([`diagnostics`]) - Prediction quality and per-reflection residue listings
//! - **Configuration** ([`config`]) - Table and detection parameters with validation
//! - **Error Handling** ([`error`]) - Engine error types
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events

pub mod conditions;
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod histogram;
pub mod progress;
