//! # Directory Enumeration
//!
//! Lists the immediate subdirectories of the data directory in a stable
//! order. Regular files (including `index.json` itself) are ignored, and
//! nested subdirectories are never descended into.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use crate::EventdexError;

/// List subdirectory names of `data_dir`, sorted ascending.
///
/// Names are compared as raw bytes, which for UTF-8 names is code point
/// order. Symlinks to directories are included.
///
/// # Errors
/// - `EventdexError::DataDirNotFound` if `data_dir` does not exist
/// - `EventdexError::NotADirectory` if it exists but is not a directory
/// - `EventdexError::IoError` if it cannot be listed
pub fn list_event_dirs(data_dir: &Path) -> Result<Vec<OsString>, EventdexError> {
    let metadata = fs::metadata(data_dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EventdexError::DataDirNotFound(data_dir.to_path_buf())
        } else {
            EventdexError::IoError(format!("Cannot access '{}': {}", data_dir.display(), e))
        }
    })?;

    if !metadata.is_dir() {
        return Err(EventdexError::NotADirectory(data_dir.to_path_buf()));
    }

    let entries = fs::read_dir(data_dir).map_err(|e| {
        EventdexError::IoError(format!("Cannot list '{}': {}", data_dir.display(), e))
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            EventdexError::IoError(format!("Cannot list '{}': {}", data_dir.display(), e))
        })?;

        // fs::metadata follows symlinks; a dangling link is not a directory.
        let is_dir = fs::metadata(entry.path()).is_ok_and(|m| m.is_dir());
        if is_dir {
            names.push(entry.file_name());
        }
    }

    names.sort();
    Ok(names)
}

// =============================================================================
// TESTS
// =============================================================================
