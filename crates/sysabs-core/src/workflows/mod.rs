//! # Workflows Module
//!
//! High-level entry points that combine the engine's detection and correction
//! into complete procedures.
//!
//! - **Reindexing Workflow** ([`reindex`]) - Repeated absence detection and orientation
//!   correction, reindexing the observations after every correction, until no
//!   systematic absence remains.

pub mod reindex;
