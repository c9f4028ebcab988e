use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing gridded text files.
///
/// Implementors handle format-specific parsing and serialization; the path-based
/// helpers open the file, wrap it in a buffered reader or writer and delegate.
/// File handles are scoped to the call and released on every exit path.
pub trait GridFile {
    /// The owned value a successful read produces.
    type Data;

    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Reads a file's contents from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the reader reports an I/O error.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error>;

    /// Writes `data` to a writer in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a file from a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Data, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes `data` to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(data: &Self::Data, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(data, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
