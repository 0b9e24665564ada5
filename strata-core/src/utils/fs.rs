//! Filesystem helpers.

use crate::error::CoreError;
use std::fs;
use std::path::Path;

/// Creates `path` and all missing parent directories.
///
/// Succeeds if the directory already exists.
pub fn ensure_dir_exists(path: &Path) -> Result<(), CoreError> {
    fs::create_dir_all(path).map_err(|e| CoreError::Filesystem {
        message: "failed to create directory".to_string(),
        path: path.to_path_buf(),
        source: e,
    })
}
