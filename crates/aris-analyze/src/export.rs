//! Comma-separated export of file records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use aris_core::{FileRecord, format_timestamp};

/// First line of every export.
pub const CSV_HEADER: &str = "Name,Path,Size (Bytes),Last Modified";

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination could not be opened for writing.
    #[error("Could not open {path} for exporting: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a row failed.
    #[error("Write to {path} failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write `records` to `writer`, header first. Returns the number of rows.
///
/// `name` and `path` are wrapped in double quotes without further
/// escaping; `size` is the raw byte count and the time is local
/// `YYYY-MM-DD HH:MM`.
pub fn write_csv<'a, W, I>(writer: &mut W, records: I) -> std::io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a FileRecord>,
{
    writeln!(writer, "{CSV_HEADER}")?;
    let mut rows = 0;
    for record in records {
        writeln!(
            writer,
            "\"{}\",\"{}\",{},{}",
            record.name,
            record.path.display(),
            record.size,
            format_timestamp(record.modified)
        )?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

/// Export `records` to a file at `destination`, replacing it.
pub fn export_csv<'a, I>(records: I, destination: impl AsRef<Path>) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a FileRecord>,
{
    let path = destination.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    let rows = write_csv(&mut writer, records).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows, "analysis exported");
    Ok(rows)
}
