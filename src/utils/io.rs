//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Copy a file's bytes and permissions, returning the number of bytes copied.
pub fn copy_file(from: &Path, to: &Path, operation: &str) -> Result<u64> {
    fs::copy(from, to).map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}
