//! CSV input: open the mapping file and pull rename entries out of its rows.

use csv::{Reader, ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::policy::Policy;

/// Options for decoding the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Skip the first record instead of treating it as a rename.
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
        }
    }
}

impl CsvOptions {
    fn builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        // Rows of any width reach the executor, which decides what a short row means.
        builder
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .flexible(true);
        builder
    }
}

/// One source/target pair taken from a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    /// 1-based position among the data rows.
    pub row: u64,
    pub source_name: String,
    pub target_name: String,
}

/// Open a CSV file for reading.
pub fn open(path: &Path, options: &CsvOptions) -> Result<Reader<File>> {
    options
        .builder()
        .from_path(path)
        .map_err(|e| Error::input_open_failed(path.display().to_string(), open_error_text(e)))
}

/// Wrap any reader (used for stdin and in-memory input).
pub fn from_reader<R: Read>(reader: R, options: &CsvOptions) -> Reader<R> {
    options.builder().from_reader(reader)
}

fn open_error_text(err: csv::Error) -> String {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => io.to_string(),
        other => format!("{:?}", other),
    }
}

/// Pull the configured source and target fields out of a record.
pub fn extract(record: &StringRecord, row: u64, policy: &Policy) -> Result<RenameEntry> {
    match (record.get(policy.source_index), record.get(policy.target_index)) {
        (Some(source), Some(target)) => Ok(RenameEntry {
            row,
            source_name: source.to_string(),
            target_name: target.to_string(),
        }),
        _ => Err(Error::input_malformed_row(
            row,
            record.len(),
            policy.required_fields(),
            None,
        )),
    }
}

/// Convert a record decoding failure into a malformed-row error.
pub fn decode_error(err: csv::Error, row: u64, policy: &Policy) -> Error {
    Error::input_malformed_row(row, 0, policy.required_fields(), Some(err.to_string()))
}
