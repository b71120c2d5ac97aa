//! Scan progress reporting.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::broadcast;

/// Receiving end of a collector's progress channel.
pub type ProgressReceiver = broadcast::Receiver<ScanProgress>;

/// Progress snapshot published while a root is being collected.
#[derive(Debug, Clone, Default)]
pub struct ScanProgress {
    /// Root being collected.
    pub root: PathBuf,
    /// Regular files recorded so far.
    pub files_scanned: u64,
    /// Bytes recorded so far.
    pub bytes_scanned: u64,
    /// Most recently recorded path.
    pub current_path: PathBuf,
    /// Entries skipped because they could not be inspected.
    pub errors_count: u64,
    /// Time elapsed since the walk started.
    pub elapsed: Duration,
    /// Set on the final snapshot of a walk.
    pub finished: bool,
}

impl ScanProgress {
    /// Create initial progress state for a root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Calculate scan rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_scanned as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_per_second() {
        let mut progress = ScanProgress::new("/root");
        assert_eq!(progress.files_per_second(), 0.0);

        progress.files_scanned = 500;
        progress.elapsed = Duration::from_secs(2);
        assert_eq!(progress.files_per_second(), 250.0);
    }
}
