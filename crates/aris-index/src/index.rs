//! Name-keyed multi-map over collected file records.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use indexmap::IndexMap;
use tracing::{info, warn};

use aris_core::{FileRecord, ScanConfig, ScanError, ScanWarning};
use aris_scan::{JwalkCollector, ProgressReceiver};

use crate::search::fold_case;

/// Records sharing one exact file name.
#[derive(Debug, Clone)]
pub(crate) struct NameBucket {
    /// Case-folded key, computed once per rebuild.
    pub(crate) folded: String,
    pub(crate) records: Vec<FileRecord>,
}

/// A root that could not be indexed.
#[derive(Debug)]
pub struct SkippedRoot {
    /// Path as supplied by the caller.
    pub path: PathBuf,
    /// Why the root was skipped.
    pub reason: ScanError,
}

/// Outcome of [`FileIndex::rebuild`].
#[derive(Debug, Default)]
pub struct RebuildReport {
    /// Canonical paths of the roots that were scanned.
    pub indexed: Vec<PathBuf>,
    /// Roots that were missing or not directories.
    pub skipped: Vec<SkippedRoot>,
    /// Total records now in the index.
    pub records: usize,
    /// Entries skipped inside the indexed roots.
    pub warnings: Vec<ScanWarning>,
}

/// In-memory index of file records keyed by file name.
///
/// Keys keep their original case. Records for the same name are kept in
/// the order they were collected, and the same file appears once per root
/// that contains it.
pub struct FileIndex {
    pub(crate) buckets: IndexMap<CompactString, NameBucket>,
    config: ScanConfig,
    collector: JwalkCollector,
}

impl FileIndex {
    /// Create an empty index using default scan settings.
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// Create an empty index whose scans use `config` (its root is ignored).
    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            buckets: IndexMap::new(),
            config,
            collector: JwalkCollector::new(),
        }
    }

    /// Subscribe to progress of the scans run by [`rebuild`](Self::rebuild).
    pub fn subscribe(&self) -> ProgressReceiver {
        self.collector.subscribe()
    }

    /// Replace the index contents with the files found under `roots`.
    ///
    /// Roots that are missing or not directories are reported and skipped;
    /// the rest are still indexed. The previous contents are only replaced
    /// once every root has been scanned.
    pub fn rebuild<I, P>(&mut self, roots: I) -> RebuildReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut buckets: IndexMap<CompactString, NameBucket> = IndexMap::new();
        let mut report = RebuildReport::default();

        for root in roots {
            let root = root.as_ref();
            let collection = match self.collector.scan(&self.config.with_root(root)) {
                Ok(collection) => collection,
                Err(reason) => {
                    warn!(root = %root.display(), %reason, "skipping root");
                    report.skipped.push(SkippedRoot {
                        path: root.to_path_buf(),
                        reason,
                    });
                    continue;
                }
            };

            info!(
                root = %collection.root.display(),
                files = collection.len(),
                "indexed root"
            );

            for record in collection.records {
                buckets
                    .entry(record.name.clone())
                    .or_insert_with_key(|name| NameBucket {
                        folded: fold_case(name),
                        records: Vec::new(),
                    })
                    .records
                    .push(record);
            }
            report.indexed.push(collection.root);
            report.warnings.extend(collection.warnings);
        }

        self.buckets = buckets;
        report.records = self.len();
        info!(
            roots = report.indexed.len(),
            skipped = report.skipped.len(),
            records = report.records,
            "index rebuilt"
        );
        report
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.buckets.values().map(|b| b.records.len()).sum()
    }

    /// Check if the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of distinct file names.
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }

    /// Records whose name is exactly `name` (case-sensitive).
    pub fn get(&self, name: &str) -> &[FileRecord] {
        self.buckets
            .get(name)
            .map(|b| b.records.as_slice())
            .unwrap_or_default()
    }
}

impl Default for FileIndex {
    fn default() -> Self {
        Self::new()
    }
}
