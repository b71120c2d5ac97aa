//! Moving a file into another directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::conflict::Conflict;
use crate::error::OperationError;

/// Resolve a user-supplied folder, such as a move destination or an
/// analysis root.
///
/// An existing path is used as given. Otherwise the input is treated as a
/// folder name under `home`, capitalized the way standard user folders
/// are (`downloads` becomes `<home>/Downloads`).
pub fn resolve_folder(input: &str, home: Option<&Path>) -> Result<PathBuf, OperationError> {
    let direct = PathBuf::from(input);
    let candidate = if direct.exists() {
        direct
    } else {
        let Some(home) = home else {
            return Err(OperationError::NotFound { path: direct });
        };
        let fallback = home.join(capitalize(input));
        debug!(input, tried = %fallback.display(), "folder not found, trying home");
        if !fallback.exists() {
            return Err(OperationError::NotFound { path: fallback });
        }
        fallback
    };

    if !candidate.is_dir() {
        return Err(OperationError::NotADirectory { path: candidate });
    }
    Ok(candidate)
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Move `source` into `dest_dir`, keeping its file name.
///
/// An existing file at the destination is a [`Conflict`] unless
/// `overwrite` is set. Returns the new path.
pub fn move_into(
    source: &Path,
    dest_dir: &Path,
    overwrite: bool,
) -> Result<PathBuf, OperationError> {
    if !source.exists() {
        return Err(OperationError::NotFound {
            path: source.to_path_buf(),
        });
    }
    if !dest_dir.is_dir() {
        return Err(OperationError::NotADirectory {
            path: dest_dir.to_path_buf(),
        });
    }

    let file_name = source.file_name().ok_or_else(|| OperationError::NotFound {
        path: source.to_path_buf(),
    })?;
    let destination = dest_dir.join(file_name);

    if destination.exists() {
        let same = match (source.canonicalize(), destination.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        };
        if same {
            return Err(OperationError::Conflict(Conflict::same_file(
                source.to_path_buf(),
                destination,
            )));
        }
        if !overwrite {
            return Err(OperationError::Conflict(Conflict::file_exists(
                source.to_path_buf(),
                destination,
            )));
        }
    }

    match fs::rename(source, &destination) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            fs::copy(source, &destination).map_err(|e| OperationError::io(&destination, e))?;
            fs::remove_file(source).map_err(|e| OperationError::io(source, e))?;
        }
        Err(e) => return Err(OperationError::io(source, e)),
    }

    info!(from = %source.display(), to = %destination.display(), "file moved");
    Ok(destination)
}
