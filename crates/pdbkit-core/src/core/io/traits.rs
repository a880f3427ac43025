use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing line-oriented record files.
///
/// Implementors handle format-specific parsing and serialization; the path-based
/// helpers are provided on top of the stream methods.
pub trait RecordFile {
    /// The in-memory form of one parsed file.
    type Contents;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads the file contents from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Contents, Self::Error>;

    /// Writes the contents to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(contents: &Self::Contents, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads the file contents from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Contents, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes the contents to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(contents: &Self::Contents, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(contents, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
