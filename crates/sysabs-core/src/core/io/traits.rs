use crate::core::models::observations::ObservationSet;
use nalgebra::Vector3;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing reflection index files.
///
/// Readers return raw, possibly fractional indices so that callers can assess
/// prediction quality before rounding them into an [`ObservationSet`].
pub trait ReflectionFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads raw `(h, k, l)` triples from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Vector3<f64>>, Self::Error>;

    /// Writes integer indices to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(observations: &ObservationSet, writer: &mut impl Write)
    -> Result<(), Self::Error>;

    /// Reads raw indices from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Vector3<f64>>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes integer indices to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        observations: &ObservationSet,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(observations, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
