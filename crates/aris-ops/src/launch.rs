//! Opening files with the platform's default handler.

use std::path::Path;

use tracing::debug;

use crate::error::OperationError;

/// Open `path` with the system default application.
pub fn open_path(path: &Path) -> Result<(), OperationError> {
    if !path.exists() {
        return Err(OperationError::NotFound {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), "opening with default handler");
    open::that(path).map_err(|e| OperationError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = open_path(&temp.path().join("ghost.pdf")).unwrap_err();
        assert!(matches!(err, OperationError::NotFound { .. }));
    }
}
