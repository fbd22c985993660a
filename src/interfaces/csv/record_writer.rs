use crate::error::{QuoteError, Result};
use serde::Serialize;
use std::io::Write;

/// Writes serializable rows (quotes or schedule installments) as CSV.
///
/// The header row is derived from the field names of the first record.
pub struct RecordWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    pub fn write_records<T, I>(&mut self, records: I) -> Result<()>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        for record in records {
            self.write_record(&record)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and hands back the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| {
            let err = e.error();
            QuoteError::IoError(std::io::Error::new(err.kind(), err.to_string()))
        })
    }
}
