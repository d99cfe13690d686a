//! CLI response formatting and output.
//!
//! Provides the JSON envelope, the plain-text summary, and exit code mapping.

use csvrename::error::Hint;
use csvrename::{Error, ErrorCode, Result, RowOutcome, RunReport};
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            }),
        }
    }
}

fn write_stdout_line(payload: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    write_stdout_line(&response.to_json()?)
}

pub fn print_success<T: Serialize>(data: T) -> Result<()> {
    print_response(&CliResponse::success(data))
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigIndexCollision
        | ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationInvalidArgument => 2,

        ErrorCode::InputOpenFailed | ErrorCode::InputMalformedRow => 3,

        // Per-row codes only surface here if a caller promotes them.
        ErrorCode::RenameSourceMissing
        | ErrorCode::RenameSourceNotFile
        | ErrorCode::RenameDestinationExists
        | ErrorCode::RenameDirectoryCreateFailed
        | ErrorCode::RenameMoveFailed
        | ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}

pub fn print_json_result(result: Result<serde_json::Value>) -> Result<()> {
    match result {
        Ok(data) => print_success(data),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

/// Plain-text mode: the value's `Display` on stdout, errors on stderr.
///
/// Returns the process exit code.
pub fn print_text_result<T: Display>(result: Result<(T, i32)>) -> i32 {
    match result {
        Ok((data, exit_code)) => match write_stdout_line(&data.to_string()) {
            Ok(()) => exit_code,
            Err(err) => {
                print_error_text(&err);
                exit_code_for_error(err.code)
            }
        },
        Err(err) => {
            print_error_text(&err);
            exit_code_for_error(err.code)
        }
    }
}

/// Write one line per failed or skipped row.
pub fn write_row_notices<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    for notice in report.rows.iter().filter_map(RowOutcome::notice) {
        writeln!(out, "{}", notice)?;
    }
    Ok(())
}

/// Text mode: per-row problems go to stderr whether or not it is a terminal.
pub fn print_row_notices(report: &RunReport) {
    let stderr = io::stderr();
    let _ = write_row_notices(&mut stderr.lock(), report);
}

pub fn print_error_text(err: &Error) {
    eprintln!("Error: {}", err.message);
    if let Some(detail) = err.details.get("error").and_then(|v| v.as_str()) {
        eprintln!("  {}", detail);
    }
    for hint in &err.hints {
        eprintln!("  hint: {}", hint.message);
    }
}
