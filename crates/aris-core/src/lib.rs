//! Core types for aris.
//!
//! This crate provides the data structures shared by the scanner, the
//! name index and the storage analyzer: file records, extension buckets,
//! scan configuration, and the error/warning types.

mod config;
mod display;
mod error;
mod record;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use display::{format_size, format_timestamp};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use record::{Extension, FileRecord};
