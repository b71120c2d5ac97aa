//! Directory collector for aris.
//!
//! Walks one directory root with jwalk and flattens every regular file
//! into a [`FileRecord`]. Entries that cannot be inspected are skipped and
//! reported as warnings; the walk itself never fails part-way.
//!
//! # Example
//!
//! ```rust,no_run
//! use aris_scan::{JwalkCollector, ScanConfig};
//!
//! let collector = JwalkCollector::new();
//! let collection = collector.scan(&ScanConfig::new("/path/to/scan")).unwrap();
//!
//! println!("{} files, {} bytes", collection.len(), collection.total_size());
//! ```
//!
//! # Progress Monitoring
//!
//! ```rust,no_run
//! use aris_scan::JwalkCollector;
//!
//! let collector = JwalkCollector::new();
//! let mut progress_rx = collector.subscribe();
//!
//! std::thread::spawn(move || {
//!     while let Ok(progress) = progress_rx.blocking_recv() {
//!         eprintln!("Scanned {} files", progress.files_scanned);
//!     }
//! });
//! ```

mod collector;
mod progress;

pub use collector::{Collection, JwalkCollector};
pub use progress::{ProgressReceiver, ScanProgress};

// Re-export core types for convenience
pub use aris_core::{FileRecord, ScanConfig, ScanError, ScanWarning, WarningKind};
