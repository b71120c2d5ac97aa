//! JWalk-based recursive file collector.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

use jwalk::{Parallelism, WalkDir};
use tokio::sync::broadcast;
use tracing::debug;

use aris_core::{FileRecord, ScanConfig, ScanError, ScanWarning, WarningKind};

use crate::progress::{ProgressReceiver, ScanProgress};

/// Publish a progress snapshot every this many files.
const PROGRESS_INTERVAL: u64 = 1000;

/// Everything gathered from one directory root.
#[derive(Debug, Clone)]
pub struct Collection {
    /// Canonical form of the scanned root.
    pub root: PathBuf,
    /// Regular files in walk order.
    pub records: Vec<FileRecord>,
    /// Entries that were skipped.
    pub warnings: Vec<ScanWarning>,
    /// Wall time spent walking.
    pub duration: Duration,
}

impl Collection {
    /// Number of records collected.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no files were found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all record sizes.
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }

    /// Take the records, dropping the rest.
    pub fn into_records(self) -> Vec<FileRecord> {
        self.records
    }
}

/// Collector that flattens a directory tree using jwalk.
pub struct JwalkCollector {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl JwalkCollector {
    /// Create a new collector.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> ProgressReceiver {
        self.progress_tx.subscribe()
    }

    /// Collect every regular file under `root` with default settings.
    ///
    /// A missing or non-directory root yields an empty list.
    pub fn collect(&self, root: impl AsRef<Path>) -> Vec<FileRecord> {
        match self.scan(&ScanConfig::new(root.as_ref())) {
            Ok(collection) => collection.into_records(),
            Err(err) => {
                debug!(root = %root.as_ref().display(), error = %err, "nothing collected");
                Vec::new()
            }
        }
    }

    /// Walk the configured root.
    ///
    /// Fails only when the root itself is unusable. Once the walk has
    /// started, unreadable entries become warnings and whatever was
    /// gathered is returned.
    pub fn scan(&self, config: &ScanConfig) -> Result<Collection, ScanError> {
        let start = Instant::now();
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        let root_metadata =
            std::fs::metadata(&root_path).map_err(|e| ScanError::io(&root_path, e))?;
        if !root_metadata.is_dir() {
            return Err(ScanError::NotADirectory { path: root_path });
        }
        let root_device = get_dev(&root_metadata);
        let ignore = config.ignore_matcher()?;

        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            1 => Parallelism::Serial,
            n => Parallelism::RayonNewPool(n),
        };

        let mut walker = WalkDir::new(&root_path)
            .parallelism(parallelism)
            .skip_hidden(!config.include_hidden)
            .follow_links(config.follow_symlinks)
            .sort(true)
            .min_depth(1)
            .max_depth(config.max_depth.map(|d| d as usize).unwrap_or(usize::MAX));

        // Prune ignored entries and foreign mounts before jwalk descends into them
        let same_device_only = !config.cross_filesystems;
        if !ignore.is_empty() || same_device_only {
            walker = walker.process_read_dir(move |_depth, _path, _state, children| {
                children.retain(|child| match child {
                    Ok(entry) => !ignore.is_match(entry.file_name()),
                    Err(_) => true,
                });
                if same_device_only {
                    for entry in children.iter_mut().flatten() {
                        if entry.file_type().is_dir()
                            && entry
                                .metadata()
                                .is_ok_and(|m| get_dev(&m) != root_device)
                        {
                            entry.read_children_path = None;
                        }
                    }
                }
            });
        }

        let mut records = Vec::new();
        let mut warnings = Vec::new();
        let mut progress = ScanProgress::new(&root_path);

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    warnings.push(walk_warning(&err, WarningKind::ReadError));
                    continue;
                }
            };

            if let Some(err) = &entry.read_children_error {
                warnings.push(walk_warning(err, WarningKind::ReadError));
            }

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    warnings.push(walk_warning(&err, WarningKind::MetadataError));
                    continue;
                }
            };

            if !config.cross_filesystems && get_dev(&metadata) != root_device {
                continue;
            }

            let modified = modified_or_epoch(&path, metadata.modified(), &mut warnings);
            let record = FileRecord::new(
                entry.file_name().to_string_lossy(),
                path,
                metadata.len(),
                modified,
            );

            progress.files_scanned += 1;
            progress.bytes_scanned += record.size;
            if progress.files_scanned % PROGRESS_INTERVAL == 0 {
                progress.current_path = record.path.clone();
                progress.errors_count = warnings.len() as u64;
                progress.elapsed = start.elapsed();
                let _ = self.progress_tx.send(progress.clone());
            }

            records.push(record);
        }

        let duration = start.elapsed();
        progress.errors_count = warnings.len() as u64;
        progress.elapsed = duration;
        progress.finished = true;
        let _ = self.progress_tx.send(progress);

        debug!(
            root = %root_path.display(),
            files = records.len(),
            warnings = warnings.len(),
            elapsed_ms = duration.as_millis() as u64,
            "collection finished"
        );

        Ok(Collection {
            root: root_path,
            records,
            warnings,
            duration,
        })
    }
}

impl Default for JwalkCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a walker error into a warning.
fn walk_warning(err: &jwalk::Error, kind: WarningKind) -> ScanWarning {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    match err.io_error() {
        Some(io) => ScanWarning::from_io(path, io, kind),
        None => ScanWarning::new(path, err.to_string(), kind),
    }
}

/// Modification time, or the epoch with a warning when the platform cannot report it.
fn modified_or_epoch(
    path: &Path,
    modified: std::io::Result<SystemTime>,
    warnings: &mut Vec<ScanWarning>,
) -> SystemTime {
    modified.unwrap_or_else(|err| {
        warnings.push(ScanWarning::from_io(path, &err, WarningKind::MetadataError));
        UNIX_EPOCH
    })
}

/// Get the device ID from metadata.
#[cfg(unix)]
fn get_dev(metadata: &std::fs::Metadata) -> u64 {
    metadata.dev()
}

#[cfg(not(unix))]
fn get_dev(_metadata: &std::fs::Metadata) -> u64 {
    0 // No portable device id
}
