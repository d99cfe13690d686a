//! Public output types for rename runs.
//!
//! These are the values a run hands back to the CLI and to library
//! consumers: a running tally plus one record per processed row.

use serde::Serialize;
use std::fmt;

use crate::error::Error;
use crate::local_files::MoveMethod;

// ============================================================================
// Summary
// ============================================================================

/// Counters accumulated across a run.
///
/// Every processed row lands in exactly one of `succeeded`, `failed` or
/// `skipped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub rows_processed: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub skipped: u64,
}

impl RunSummary {
    pub fn is_balanced(&self) -> bool {
        self.rows_processed == self.succeeded + self.failed + self.skipped
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows processed. {} succeeded. {} failed.",
            self.rows_processed, self.succeeded, self.failed
        )?;
        if self.skipped > 0 {
            write!(f, " {} skipped.", self.skipped)?;
        }
        Ok(())
    }
}

// ============================================================================
// Per-row outcomes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Renamed,
    Overwritten,
    /// Destination existed and overwrite was off.
    Skipped,
    Failed,
    /// Dry run: the row would have been moved.
    Planned,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    pub code: String,
    pub message: String,
}

impl From<&Error> for RowError {
    fn from(err: &Error) -> Self {
        Self {
            code: err.code.as_str().to_string(),
            message: err.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowOutcome {
    pub row: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub status: RowStatus,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cross_device: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RowError>,
}

impl RowOutcome {
    /// One-line diagnostic for a row that was not moved, e.g.
    /// `Source file "x" doesn't exist. Skipping.`
    pub fn notice(&self) -> Option<String> {
        match self.status {
            RowStatus::Failed | RowStatus::Skipped => self
                .error
                .as_ref()
                .map(|err| format!("{}. Skipping.", err.message)),
            _ => None,
        }
    }
}

// ============================================================================
// Run report
// ============================================================================

/// Full result of a rename run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub dry_run: bool,
    pub summary: RunSummary,
    pub rows: Vec<RowOutcome>,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn record_moved(
        &mut self,
        row: u64,
        source: String,
        destination: String,
        overwritten: bool,
        method: MoveMethod,
    ) {
        self.summary.rows_processed += 1;
        self.summary.succeeded += 1;
        self.rows.push(RowOutcome {
            row,
            source: Some(source),
            destination: Some(destination),
            status: if overwritten {
                RowStatus::Overwritten
            } else {
                RowStatus::Renamed
            },
            cross_device: method == MoveMethod::CopiedAcrossDevices,
            error: None,
        });
    }

    pub fn record_planned(&mut self, row: u64, source: String, destination: String) {
        self.summary.rows_processed += 1;
        self.summary.succeeded += 1;
        self.rows.push(RowOutcome {
            row,
            source: Some(source),
            destination: Some(destination),
            status: RowStatus::Planned,
            cross_device: false,
            error: None,
        });
    }

    pub fn record_skipped(
        &mut self,
        row: u64,
        source: String,
        destination: String,
        reason: &Error,
    ) {
        self.summary.rows_processed += 1;
        self.summary.skipped += 1;
        self.rows.push(RowOutcome {
            row,
            source: Some(source),
            destination: Some(destination),
            status: RowStatus::Skipped,
            cross_device: false,
            error: Some(reason.into()),
        });
    }

    pub fn record_failed(
        &mut self,
        row: u64,
        source: Option<String>,
        destination: Option<String>,
        error: &Error,
    ) {
        self.summary.rows_processed += 1;
        self.summary.failed += 1;
        self.rows.push(RowOutcome {
            row,
            source,
            destination,
            status: RowStatus::Failed,
            cross_device: false,
            error: Some(error.into()),
        });
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            write!(f, "Dry run. ")?;
        }
        write!(f, "{}", self.summary)
    }
}
