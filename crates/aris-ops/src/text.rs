//! Appending text to plain-text files.

use std::ffi::OsStr;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::OperationError;

/// Extensions (lower case, without the dot) that accept appended text.
pub const APPENDABLE_EXTENSIONS: &[&str] = &["txt", "csv", "json", "md"];

/// Check whether text may be appended to `path`, ignoring extension case.
pub fn is_appendable(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| APPENDABLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Fail with [`OperationError::UnsupportedFileType`] unless `path` is appendable.
pub fn check_appendable(path: &Path) -> Result<(), OperationError> {
    if is_appendable(path) {
        return Ok(());
    }
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    Err(OperationError::UnsupportedFileType {
        path: path.to_path_buf(),
        extension,
    })
}

/// Append `text` on its own line to the file at `path`.
///
/// The file must already exist and have an appendable extension.
pub fn append_text(path: &Path, text: &str) -> Result<(), OperationError> {
    check_appendable(path)?;
    if text.is_empty() {
        return Err(OperationError::EmptyText);
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| OperationError::io(path, e))?;
    write!(file, "\n{text}\n").map_err(|e| OperationError::io(path, e))?;

    info!(path = %path.display(), bytes = text.len(), "text appended");
    Ok(())
}
