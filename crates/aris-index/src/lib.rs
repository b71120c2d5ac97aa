//! Name index and prefix search for aris.
//!
//! [`FileIndex`] groups the records collected from a set of roots by their
//! exact file name. Searching folds both the query and every key to lower
//! case and keeps keys that start with the query.
//!
//! ```rust,no_run
//! use aris_index::FileIndex;
//!
//! let mut index = FileIndex::new();
//! let report = index.rebuild(["/home/me/Documents", "/home/me/Downloads"]);
//! for skipped in &report.skipped {
//!     eprintln!("skipped {}: {}", skipped.path.display(), skipped.reason);
//! }
//!
//! for record in index.search("invoice") {
//!     println!("{}", record.path.display());
//! }
//! ```

mod index;
mod search;

pub use index::{FileIndex, RebuildReport, SkippedRoot};
pub use search::fold_case;

pub use aris_core::FileRecord;
pub use aris_scan::{ProgressReceiver, ScanProgress};
