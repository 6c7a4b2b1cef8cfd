use crate::core::io::traits::ReflectionFile;
use crate::core::models::observations::{MAX_ABS_INDEX, ObservationSet, is_index_in_range};
use nalgebra::Vector3;
use serde::Deserialize;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Record {record} contains a non-finite index")]
    NonFinite { record: usize },
    #[error("Record {record} has an index beyond ±{max}", max = MAX_ABS_INDEX)]
    OutOfRange { record: usize },
}

#[derive(Debug, Deserialize)]
struct IndexRecord {
    h: f64,
    k: f64,
    l: f64,
}

/// Comma-separated reflection list with an `h,k,l` header row. Extra columns
/// are ignored on input.
pub struct CsvFile;

impl ReflectionFile for CsvFile {
    type Error = CsvFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Vector3<f64>>, Self::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut indices = Vec::new();
        for (i, result) in csv_reader.deserialize::<IndexRecord>().enumerate() {
            let record = result?;
            let hkl = Vector3::new(record.h, record.k, record.l);
            if hkl.iter().any(|x| !x.is_finite()) {
                return Err(CsvFileError::NonFinite { record: i + 1 });
            }
            if !hkl.iter().all(|&x| is_index_in_range(x)) {
                return Err(CsvFileError::OutOfRange { record: i + 1 });
            }
            indices.push(hkl);
        }
        Ok(indices)
    }

    fn write_to(
        observations: &ObservationSet,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for hkl in observations {
            csv_writer.serialize(hkl)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
