use crate::application::calculator::QuoteRequest;
use crate::error::{QuoteError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Stream of loan requests laid out as `principal, rate, tenure` columns.
///
/// Cells are trimmed and short rows are tolerated at the CSV layer, so a row
/// missing a column surfaces as a deserialization error for that row only.
/// The reader never validates loan terms; callers decide what to do with rows
/// that fail to parse or that the calculator later rejects.
pub struct RequestReader<R: Read> {
    rows: csv::Reader<R>,
}

impl RequestReader<File> {
    /// Opens a request file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> RequestReader<R> {
    pub fn new(source: R) -> Self {
        let rows = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { rows }
    }

    /// Yields one item per data row, in file order; a bad row does not end
    /// the stream.
    pub fn requests(self) -> impl Iterator<Item = Result<QuoteRequest>> {
        self.rows
            .into_deserialize::<QuoteRequest>()
            .map(|row| row.map_err(QuoteError::CsvError))
    }
}
