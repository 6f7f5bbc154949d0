use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for parsing a record-oriented text format.
///
/// Implementors handle format-specific parsing; the provided methods take care
/// of opening and buffering files.
pub trait RecordReader {
    /// The record type produced by the format.
    type Record;

    /// The error type for parsing operations.
    type Error: Error + From<io::Error>;

    /// Reads every record from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the input is structurally invalid.
    /// Individual malformed records are skipped with a warning where the format
    /// allows it.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Self::Record>, Self::Error>;

    /// Reads every record from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Self::Record>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Defines the interface for serializing records to a text format.
pub trait RecordWriter {
    /// The record type consumed by the format.
    type Record;

    /// The error type for write operations.
    type Error: Error + From<io::Error>;

    /// Writes all records to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(records: &[Self::Record], writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes all records to a file path, replacing any existing file.
    ///
    /// The file is written in one pass and flushed before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(records: &[Self::Record], path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(records, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
