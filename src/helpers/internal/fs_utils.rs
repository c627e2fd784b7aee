//! Common filesystem utilities

use crate::core::error::Result;
use std::path::{Path, PathBuf};

/// Directory that will contain `path`.
///
/// Bare relative names like `appengine_sdk` have an empty parent; that
/// means the current directory.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Ensure a path's parent directory exists.
pub fn ensure_parent_dir(path: &Path) -> Result<PathBuf> {
    let parent = parent_dir(path);
    if !parent.exists() {
        std::fs::create_dir_all(&parent)?;
    }
    Ok(parent)
}

/// Move every entry of `src` into `dest`, which must already exist.
///
/// Returns the names that were moved.
pub fn move_entries(src: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut moved = Vec::new();
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        std::fs::rename(entry.path(), &target)?;
        moved.push(PathBuf::from(entry.file_name()));
    }
    moved.sort();
    Ok(moved)
}
