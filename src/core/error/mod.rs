use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigIndexCollision,
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    InputOpenFailed,
    InputMalformedRow,

    RenameSourceMissing,
    RenameSourceNotFile,
    RenameDestinationExists,
    RenameDirectoryCreateFailed,
    RenameMoveFailed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigIndexCollision => "config.index_collision",
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::InputOpenFailed => "input.open_failed",
            ErrorCode::InputMalformedRow => "input.malformed_row",

            ErrorCode::RenameSourceMissing => "rename.source_missing",
            ErrorCode::RenameSourceNotFile => "rename.source_not_file",
            ErrorCode::RenameDestinationExists => "rename.destination_exists",
            ErrorCode::RenameDirectoryCreateFailed => "rename.directory_create_failed",
            ErrorCode::RenameMoveFailed => "rename.move_failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexCollisionDetails {
    pub source_index: usize,
    pub target_index: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputOpenFailedDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MalformedRowDetails {
    pub row: u64,
    pub fields: usize,
    pub required: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveFailedDetails {
    pub source: String,
    pub destination: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn config_index_collision(source_index: usize, target_index: usize) -> Self {
        Self::new(
            ErrorCode::ConfigIndexCollision,
            "Source and target index can't be the same",
            to_details(IndexCollisionDetails {
                source_index,
                target_index,
            }),
        )
        .with_hint("Pass distinct --source-index and --target-index values")
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            to_details(ConfigInvalidJsonDetails {
                path: path.into(),
                error: err.to_string(),
            }),
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            to_details(ConfigInvalidValueDetails {
                key: key.into(),
                value,
                problem: problem.into(),
            }),
        )
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            to_details(InvalidArgumentDetails {
                field: field.into(),
                problem: problem.into(),
            }),
        )
    }

    pub fn input_open_failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::InputOpenFailed,
            format!("Opening CSV file '{}' failed", path),
            to_details(InputOpenFailedDetails {
                path,
                error: error.into(),
            }),
        )
    }

    pub fn input_malformed_row(
        row: u64,
        fields: usize,
        required: usize,
        error: Option<String>,
    ) -> Self {
        let message = match &error {
            Some(e) => format!("Error while processing CSV row {}: {}", row, e),
            None => format!(
                "Row {} has {} field(s), at least {} required",
                row, fields, required
            ),
        };
        Self::new(
            ErrorCode::InputMalformedRow,
            message,
            to_details(MalformedRowDetails {
                row,
                fields,
                required,
                error,
            }),
        )
        .with_hint("Fix the row or rerun with --lenient to skip short rows")
    }

    pub fn rename_source_missing(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::RenameSourceMissing,
            format!("Source file \"{}\" doesn't exist", path),
            to_details(PathDetails { path }),
        )
    }

    pub fn rename_source_not_file(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::RenameSourceNotFile,
            format!("Source file \"{}\" isn't a file", path),
            to_details(PathDetails { path }),
        )
        .with_hint("Pass --dirs to rename directories too")
    }

    pub fn rename_destination_exists(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::RenameDestinationExists,
            format!("Destination name \"{}\" already exists", path),
            to_details(PathDetails { path }),
        )
        .with_hint("Pass --overwrite to replace existing destinations")
    }

    pub fn rename_directory_create_failed(
        path: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::RenameDirectoryCreateFailed,
            format!("Failed while creating dir \"{}\"", path),
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context: Some(path),
            }),
        )
    }

    pub fn rename_move_failed(
        source: impl Into<String>,
        destination: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let error = error.into();
        Self::new(
            ErrorCode::RenameMoveFailed,
            format!("Rename/Move failed: {}", error),
            to_details(MoveFailedDetails {
                source: source.into(),
                destination: destination.into(),
                error,
            }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalIoError,
            "IO error",
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            to_details(InternalIoErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
