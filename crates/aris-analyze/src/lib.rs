//! Storage analysis for aris.
//!
//! - **Storage report** - scan one root, total its size, break it down by
//!   extension and rank files by size or recency
//! - **CSV export** - write any record list to a comma-separated file
//!
//! ```rust,no_run
//! use aris_analyze::{AnalyzeConfig, SortOrder, StorageAnalyzer, export_csv};
//!
//! let config = AnalyzeConfig::builder()
//!     .limit(20usize)
//!     .order(SortOrder::ByTimeDesc)
//!     .build()
//!     .unwrap();
//!
//! let report = StorageAnalyzer::with_config(config)
//!     .analyze("/home/me/Downloads")
//!     .unwrap();
//!
//! for ext in &report.extensions {
//!     println!("{}: {} files, {} bytes", ext.extension, ext.count, ext.total_size);
//! }
//! for record in report.ranked() {
//!     println!("{}", record.path.display());
//! }
//!
//! export_csv(&report.records, "analysis.csv").unwrap();
//! ```

mod export;
mod storage;

pub use export::{CSV_HEADER, ExportError, export_csv, write_csv};
pub use storage::{
    AnalyzeConfig, AnalyzeConfigBuilder, ExtensionStats, SortOrder, StorageAnalyzer,
    StorageReport,
};

// Re-export core types
pub use aris_core::{Extension, FileRecord, ScanError};
