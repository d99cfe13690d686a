//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling
//! - `path` - Path joining and extension stripping

pub mod io;
pub mod path;
