//! Rename policy: where files come from, where they go, and what is allowed.
//!
//! A `Policy` is built once at startup and never changes during a run.

use std::path::PathBuf;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Base directory for source names. Empty means the current directory.
    pub input_dir: PathBuf,
    /// Base directory for destination names.
    pub output_dir: PathBuf,
    pub source_index: usize,
    pub target_index: usize,
    pub include_directories: bool,
    pub overwrite_existing: bool,
    pub nest_into_target_dir: bool,
    /// Short rows abort the run instead of counting as a failure.
    pub strict_rows: bool,
    pub dry_run: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            output_dir: PathBuf::new(),
            source_index: 0,
            target_index: 1,
            include_directories: false,
            overwrite_existing: false,
            nest_into_target_dir: false,
            strict_rows: true,
            dry_run: false,
        }
    }
}

impl Policy {
    /// Policy rooted at `input_dir`, writing to `output_dir` or back into
    /// `input_dir` when no output directory is given.
    pub fn with_dirs(input_dir: Option<&str>, output_dir: Option<&str>) -> Self {
        let input_dir = input_dir.map(expand_dir).unwrap_or_default();
        let output_dir = match output_dir.filter(|d| !d.is_empty()) {
            Some(dir) => expand_dir(dir),
            None => input_dir.clone(),
        };

        Self {
            input_dir,
            output_dir,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_index == self.target_index {
            return Err(Error::config_index_collision(
                self.source_index,
                self.target_index,
            ));
        }
        Ok(())
    }

    /// Minimum number of fields a row needs for both indices to resolve.
    pub fn required_fields(&self) -> usize {
        self.source_index.max(self.target_index) + 1
    }
}

/// Expand a leading `~` in a directory argument.
pub fn expand_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Parse a delimiter argument into the single byte the CSV reader expects.
///
/// Accepts one ASCII character, or `\t` / `tab` for tab-separated files.
pub fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw {
        "\\t" | "tab" => return Ok(b'\t'),
        _ => {}
    }

    let bytes = raw.as_bytes();
    if bytes.len() == 1 && bytes[0].is_ascii() {
        return Ok(bytes[0]);
    }

    Err(Error::config_invalid_value(
        "delimiter",
        Some(raw.to_string()),
        "Delimiter must be a single ASCII character",
    ))
}
