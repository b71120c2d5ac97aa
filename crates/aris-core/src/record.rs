//! File record and extension bucket types.

use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One regular file discovered by a scan.
///
/// Records are immutable snapshots: stale data is only corrected by
/// scanning again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Final path component (not unique across a scan).
    pub name: CompactString,

    /// Absolute, canonical path.
    pub path: PathBuf,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time (wall clock).
    pub modified: SystemTime,
}

impl FileRecord {
    /// Create a new file record.
    pub fn new(
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        size: u64,
        modified: SystemTime,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size,
            modified,
        }
    }

    /// Extension bucket for this record, case as stored.
    pub fn extension(&self) -> Extension {
        Extension::of(&self.name)
    }
}

/// Aggregation key for a file's trailing name suffix.
///
/// Named buckets sort before the [`Extension::None`] sentinel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extension {
    /// Text strictly after the final `.` of the name (may be empty).
    Named(CompactString),
    /// The name contains no `.` at all.
    None,
}

impl Extension {
    /// Label used for names without a dot.
    pub const NONE_LABEL: &'static str = "no extension";

    /// Extract the extension bucket of a file name.
    pub fn of(name: &str) -> Self {
        match name.rfind('.') {
            Some(pos) => Self::Named(CompactString::new(&name[pos + 1..])),
            None => Self::None,
        }
    }

    /// Same bucket with its label lower-cased.
    pub fn folded(&self) -> Self {
        match self {
            Self::Named(ext) => Self::Named(ext.to_lowercase().into()),
            Self::None => Self::None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Self::Named(ext) => ext.as_str(),
            Self::None => Self::NONE_LABEL,
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(ext) => write!(f, ".{ext}"),
            Self::None => f.write_str(Self::NONE_LABEL),
        }
    }
}
