//! Error type for file operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::conflict::Conflict;

/// Errors that can occur during a file operation.
#[derive(Debug, Error)]
pub enum OperationError {
    /// The target path does not exist.
    #[error("Not found: {path}")]
    NotFound { path: PathBuf },

    /// A directory was required.
    #[error("'{path}' is not a folder")]
    NotADirectory { path: PathBuf },

    /// Text can only be appended to known text formats.
    #[error("Cannot insert text into '{extension}' files (supported: .txt, .csv, .json, .md)")]
    UnsupportedFileType { path: PathBuf, extension: String },

    /// Nothing to append.
    #[error("No text entered")]
    EmptyText,

    /// The destination is occupied.
    #[error("{0}")]
    Conflict(Conflict),

    /// Moving to the trash failed.
    #[error("Could not move {path} to trash: {message}")]
    Trash { path: PathBuf, message: String },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OperationError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}
