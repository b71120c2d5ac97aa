//! Presentation helpers shared by listings and exports.

use std::time::SystemTime;

use chrono::{DateTime, Local};

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count using 1024-based units, truncated to an integer.
///
/// The largest unit in B/KB/MB/GB keeping the value below 1024 is used;
/// anything beyond that stays in GB.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024;
        unit += 1;
    }
    format!("{value} {}", SIZE_UNITS[unit])
}

/// Format a timestamp as `YYYY-MM-DD HH:MM` in local time.
pub fn format_timestamp(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}
