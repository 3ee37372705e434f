//! Scan progress reporting.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Progress information during a scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Folders listed so far, including failed ones.
    pub folders_scanned: u64,
    /// Files read so far.
    pub files_scanned: u64,
    /// Total bytes of the files read so far.
    pub bytes_scanned: u64,
    /// Folders that could not be read.
    pub errors_count: u64,
    /// Folder that was just finished.
    pub current_folder: PathBuf,
    /// Time elapsed since scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            folders_scanned: 0,
            files_scanned: 0,
            bytes_scanned: 0,
            errors_count: 0,
            current_folder: PathBuf::new(),
            elapsed: Duration::ZERO,
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

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared counters updated by folder workers.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    folders_scanned: AtomicU64,
    files_scanned: AtomicU64,
    bytes_scanned: AtomicU64,
    errors_count: AtomicU64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            folders_scanned: AtomicU64::new(0),
            files_scanned: AtomicU64::new(0),
            bytes_scanned: AtomicU64::new(0),
            errors_count: AtomicU64::new(0),
        }
    }

    pub fn record_folder(&self, files: u64, bytes: u64) {
        self.folders_scanned.fetch_add(1, Ordering::Relaxed);
        self.files_scanned.fetch_add(files, Ordering::Relaxed);
        self.bytes_scanned.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.folders_scanned.fetch_add(1, Ordering::Relaxed);
        self.errors_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, current_folder: PathBuf) -> ScanProgress {
        ScanProgress {
            folders_scanned: self.folders_scanned.load(Ordering::Relaxed),
            files_scanned: self.files_scanned.load(Ordering::Relaxed),
            bytes_scanned: self.bytes_scanned.load(Ordering::Relaxed),
            errors_count: self.errors_count.load(Ordering::Relaxed),
            current_folder,
            elapsed: self.start_time.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_snapshot() {
        let tracker = ProgressTracker::new();
        tracker.record_folder(3, 300);
        tracker.record_folder(1, 50);
        tracker.record_error();

        let snapshot = tracker.snapshot(PathBuf::from("/tmp/x"));
        assert_eq!(snapshot.folders_scanned, 3);
        assert_eq!(snapshot.files_scanned, 4);
        assert_eq!(snapshot.bytes_scanned, 350);
        assert_eq!(snapshot.errors_count, 1);
        assert_eq!(snapshot.current_folder, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_files_per_second_zero_elapsed() {
        assert_eq!(ScanProgress::new().files_per_second(), 0.0);
    }
}
