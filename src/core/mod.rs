// Public modules
pub mod defaults;
pub mod error;
pub mod executor;
pub mod local_files;
pub mod output;
pub mod policy;
pub mod rows;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use executor::{execute, plan_paths, PlannedPaths};
pub use local_files::{FileSystem, LocalFs, MoveMethod};
pub use output::{RowError, RowOutcome, RowStatus, RunReport, RunSummary};
pub use policy::Policy;
pub use rows::{CsvOptions, RenameEntry};
