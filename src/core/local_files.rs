use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::{io, path::display};

/// How a successful move was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMethod {
    /// A single atomic rename.
    Renamed,
    /// Copy to the destination followed by removing the source (cross-device).
    CopiedAcrossDevices,
}

/// Trait for the file system operations a rename run needs.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    /// Create a single directory. An existing directory is not an error.
    fn create_dir(&self, dir: &Path) -> Result<()>;
    /// Move `from` to `to`, replacing `to` if it exists.
    fn move_path(&self, from: &Path, to: &Path) -> Result<MoveMethod>;
}

/// Local filesystem implementation
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir(&self, dir: &Path) -> Result<()> {
        match fs::create_dir(dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(Error::rename_directory_create_failed(
                display(dir),
                e.to_string(),
            )),
        }
    }

    fn move_path(&self, from: &Path, to: &Path) -> Result<MoveMethod> {
        match fs::rename(from, to) {
            Ok(()) => Ok(MoveMethod::Renamed),
            Err(e) if is_cross_device(&e) && from.is_file() => {
                copy_then_remove(from, to)?;
                Ok(MoveMethod::CopiedAcrossDevices)
            }
            Err(e) => Err(Error::rename_move_failed(
                display(from),
                display(to),
                e.to_string(),
            )),
        }
    }
}

fn is_cross_device(err: &std::io::Error) -> bool {
    #[cfg(unix)]
    let code = Some(libc::EXDEV);
    // ERROR_NOT_SAME_DEVICE
    #[cfg(windows)]
    let code = Some(17);
    #[cfg(not(any(unix, windows)))]
    let code: Option<i32> = None;

    code.is_some() && err.raw_os_error() == code
}

/// Fallback for moves across filesystems. A partial destination is removed
/// when the copy fails so the source stays the only copy.
fn copy_then_remove(from: &Path, to: &Path) -> Result<()> {
    let move_failed = |e: Error| {
        let detail = e.details["error"].as_str().unwrap_or(&e.message).to_string();
        Error::rename_move_failed(display(from), display(to), detail)
    };

    if let Err(e) = io::copy_file(from, to, "copy across devices") {
        match fs::remove_file(to) {
            Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => {
                log_status!(
                    "rename",
                    "Could not remove partial copy \"{}\": {}",
                    display(to),
                    cleanup
                );
            }
            _ => {}
        }
        return Err(move_failed(e));
    }

    fs::remove_file(from).map_err(|e| {
        move_failed(Error::internal_io(
            e.to_string(),
            Some("remove source after copy".to_string()),
        ))
    })
}

/// Create a local filesystem instance
pub fn local() -> LocalFs {
    LocalFs::new()
}
