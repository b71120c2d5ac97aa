//! Deleting files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::OperationError;

/// How a file is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeleteMode {
    /// Move to the platform trash.
    #[default]
    Trash,
    /// Remove immediately.
    Permanent,
}

/// Delete the file at `path`.
pub fn delete(path: &Path, mode: DeleteMode) -> Result<(), OperationError> {
    if !path.exists() {
        return Err(OperationError::NotFound {
            path: path.to_path_buf(),
        });
    }

    match mode {
        DeleteMode::Trash => trash::delete(path).map_err(|e| OperationError::Trash {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        DeleteMode::Permanent => fs::remove_file(path).map_err(|e| OperationError::io(path, e))?,
    }

    info!(path = %path.display(), ?mode, "deleted");
    Ok(())
}
