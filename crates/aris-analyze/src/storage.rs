//! Storage usage analysis for a single root.
//!
//! Scans a directory fresh (independent of any name index), totals its
//! size, breaks it down by extension and ranks the files.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use aris_core::{Extension, FileRecord, ScanConfig, ScanError};
use aris_scan::JwalkCollector;

/// Ranking order for analyzed files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Largest files first.
    #[default]
    BySizeDesc,
    /// Most recently modified first.
    ByTimeDesc,
}

impl SortOrder {
    /// Compare two records for this order.
    ///
    /// Equal keys fall back to ascending path so rankings are reproducible.
    pub fn compare(self, a: &FileRecord, b: &FileRecord) -> Ordering {
        let primary = match self {
            Self::BySizeDesc => b.size.cmp(&a.size),
            Self::ByTimeDesc => b.modified.cmp(&a.modified),
        };
        primary.then_with(|| a.path.cmp(&b.path))
    }
}

/// Configuration for storage analysis.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct AnalyzeConfig {
    /// Number of records in the ranked view.
    #[builder(default = "10")]
    pub limit: usize,

    /// Ranking order.
    #[builder(default)]
    pub order: SortOrder,

    /// Group extensions case-insensitively (`TXT` and `txt` share a bucket).
    #[builder(default = "false")]
    pub fold_extension_case: bool,

    /// Walker settings; the root is replaced by the analyzed path.
    #[builder(default)]
    pub scan: ScanConfig,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            limit: 10,
            order: SortOrder::default(),
            fold_extension_case: false,
            scan: ScanConfig::default(),
        }
    }
}

impl AnalyzeConfig {
    /// Create a new config builder.
    pub fn builder() -> AnalyzeConfigBuilder {
        AnalyzeConfigBuilder::default()
    }
}

/// Count and byte total for one extension bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionStats {
    /// Bucket key.
    pub extension: Extension,
    /// Number of files in the bucket.
    pub count: u64,
    /// Sum of their sizes.
    pub total_size: u64,
}

/// Results of analyzing one root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageReport {
    /// Root that was analyzed.
    pub root: PathBuf,
    /// Order used for [`records`](Self::records).
    pub order: SortOrder,
    /// Size of the ranked view.
    pub limit: usize,
    /// Number of files scanned.
    pub total_files: u64,
    /// Sum of all file sizes.
    pub total_size: u64,
    /// Per-extension breakdown, sorted by extension with the
    /// "no extension" bucket last.
    pub extensions: Vec<ExtensionStats>,
    /// Every scanned file in ranking order.
    pub records: Vec<FileRecord>,
}

impl StorageReport {
    /// The top `limit` records.
    pub fn ranked(&self) -> &[FileRecord] {
        &self.records[..self.limit.min(self.records.len())]
    }

    /// Check if the root contained no files.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stats for one extension bucket.
    pub fn extension(&self, extension: &Extension) -> Option<&ExtensionStats> {
        self.extensions.iter().find(|e| &e.extension == extension)
    }
}

/// Storage analyzer.
pub struct StorageAnalyzer {
    config: AnalyzeConfig,
    collector: JwalkCollector,
}

impl StorageAnalyzer {
    /// Create a new analyzer with default config.
    pub fn new() -> Self {
        Self::with_config(AnalyzeConfig::default())
    }

    /// Create a new analyzer with custom config.
    pub fn with_config(config: AnalyzeConfig) -> Self {
        Self {
            config,
            collector: JwalkCollector::new(),
        }
    }

    /// Scan `root` and analyze what it contains.
    ///
    /// A missing or non-directory root is returned as an error for the
    /// caller to report. A root without files yields an empty report.
    pub fn analyze(&self, root: impl AsRef<Path>) -> Result<StorageReport, ScanError> {
        let root = root.as_ref();
        let collection = self
            .collector
            .scan(&self.config.scan.with_root(root))
            .inspect_err(|err| warn!(root = %root.display(), error = %err, "invalid path"))?;

        if collection.is_empty() {
            info!(root = %collection.root.display(), "no files found");
        }

        Ok(self.summarize(collection.root, collection.records))
    }

    /// Analyze an already collected record set.
    pub fn summarize(
        &self,
        root: impl Into<PathBuf>,
        mut records: Vec<FileRecord>,
    ) -> StorageReport {
        let mut buckets: BTreeMap<Extension, (u64, u64)> = BTreeMap::new();
        let mut total_size: u64 = 0;

        for record in &records {
            let mut extension = record.extension();
            if self.config.fold_extension_case {
                extension = extension.folded();
            }
            let bucket = buckets.entry(extension).or_default();
            bucket.0 += 1;
            bucket.1 += record.size;
            total_size += record.size;
        }

        let order = self.config.order;
        records.par_sort_by(|a, b| order.compare(a, b));

        let extensions = buckets
            .into_iter()
            .map(|(extension, (count, total_size))| ExtensionStats {
                extension,
                count,
                total_size,
            })
            .collect();

        StorageReport {
            root: root.into(),
            order,
            limit: self.config.limit,
            total_files: records.len() as u64,
            total_size,
            extensions,
            records,
        }
    }
}

impl Default for StorageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
