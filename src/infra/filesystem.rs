//! Filesystem operations
//!
//! Thin wrappers mapping IO failures to [`FilesystemError`]. Directory
//! creation must stay race-tolerant: multiple branches of the reference
//! graph may create the same parent concurrently.

use std::path::Path;
use std::time::SystemTime;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents; no error if it does not exist
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Copy a file, overwriting the destination
pub fn copy_file(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    std::fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| FilesystemError::CopyFile {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            error: e.to_string(),
        })
}

/// Modification time of a file
pub fn modified_time(path: &Path) -> Result<SystemTime, FilesystemError> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| FilesystemError::Metadata {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
}
