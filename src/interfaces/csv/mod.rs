//! CSV adapters for batch quoting.

pub mod record_writer;
pub mod request_reader;
