use crate::core::io::traits::ReflectionFile;
use crate::core::models::observations::{MAX_ABS_INDEX, ObservationSet, is_index_in_range};
use nalgebra::Vector3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HklError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: HklParseErrorKind },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HklParseErrorKind {
    #[error("Expected 3 index columns, found {found}")]
    WrongFieldCount { found: usize },
    #[error("Invalid number '{value}'")]
    InvalidNumber { value: String },
    #[error("Index '{value}' is not finite")]
    NonFinite { value: String },
    #[error("Index '{value}' exceeds ±{max}", max = MAX_ABS_INDEX)]
    OutOfRange { value: String },
}

/// Whitespace-separated `h k l` columns, one reflection per line. Blank lines
/// and everything after a `#` are ignored.
pub struct HklFile;

fn parse_field(field: &str) -> Result<f64, HklParseErrorKind> {
    let value: f64 = field.parse().map_err(|_| HklParseErrorKind::InvalidNumber {
        value: field.to_string(),
    })?;
    if !value.is_finite() {
        return Err(HklParseErrorKind::NonFinite {
            value: field.to_string(),
        });
    }
    if !is_index_in_range(value) {
        return Err(HklParseErrorKind::OutOfRange {
            value: field.to_string(),
        });
    }
    Ok(value)
}

fn parse_line(content: &str) -> Result<Vector3<f64>, HklParseErrorKind> {
    let fields: Vec<&str> = content.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(HklParseErrorKind::WrongFieldCount {
            found: fields.len(),
        });
    }
    Ok(Vector3::new(
        parse_field(fields[0])?,
        parse_field(fields[1])?,
        parse_field(fields[2])?,
    ))
}

impl ReflectionFile for HklFile {
    type Error = HklError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Vector3<f64>>, Self::Error> {
        let mut indices = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let content = line.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }
            let hkl = parse_line(content).map_err(|kind| HklError::Parse {
                line: line_num + 1,
                kind,
            })?;
            indices.push(hkl);
        }
        Ok(indices)
    }

    fn write_to(
        observations: &ObservationSet,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        for hkl in observations {
            writeln!(writer, "{:>5} {:>5} {:>5}", hkl.h, hkl.k, hkl.l)?;
        }
        Ok(())
    }
}
