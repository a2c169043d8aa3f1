//! Path helpers.

use std::path::{Path, PathBuf};

/// Absolute form of `path`.
///
/// Tries `canonicalize()` first; falls back to joining a relative path onto
/// the current directory.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// `path` relative to `root` for log lines, or the full path when it lies
/// elsewhere.
pub fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
