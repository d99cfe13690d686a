//! Path helpers for building rename destinations.

use std::path::{Path, PathBuf};

/// Strip the final extension from a name, keeping any leading directories.
///
/// `report.pdf` becomes `report`, `archive.tar.gz` becomes `archive.tar`.
/// Names without an extension (including dotfiles like `.bashrc`) are
/// returned unchanged.
pub fn strip_extension(name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.extension().is_some() {
        path.with_extension("")
    } else {
        path.to_path_buf()
    }
}

/// Join `name` under `base`, skipping empty base or middle components.
///
/// An empty base means the current directory, so the result stays relative.
pub fn join_under(base: &Path, middle: Option<&Path>, name: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    if let Some(middle) = middle.filter(|m| !m.as_os_str().is_empty()) {
        path.push(middle);
    }
    path.push(name);
    path
}

/// Lossy display string for logs and serialized output.
pub fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
