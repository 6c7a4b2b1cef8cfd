//! Provides input/output functionality for reflection and orientation files.
//!
//! Reflection lists are read through the [`traits::ReflectionFile`] interface,
//! implemented for whitespace-separated HKL text ([`hkl`]) and headed CSV
//! ([`delimited`]). Crystal orientations are stored as TOML ([`orientation`]).

pub mod delimited;
pub mod hkl;
pub mod orientation;
pub mod traits;

use std::path::Path;

/// On-disk layout of a reflection list, inferred from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionFormat {
    Hkl,
    Csv,
}

impl ReflectionFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Hkl,
        }
    }
}
