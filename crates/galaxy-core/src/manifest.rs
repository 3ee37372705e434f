//! The manifest returned by a scan, and its summary statistics.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::entry::{FileEntry, FolderResult, format_size};
use crate::error::FolderError;

/// Summary over every file read during a scan, listed or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestStats {
    /// Total number of files.
    pub total_files: u64,
    /// Total size in bytes.
    pub total_size_bytes: u64,
    /// Number of folders that hold at least one file.
    pub folder_count: u64,
    /// Number of distinct file extensions.
    pub file_types: u64,
    /// File count per category.
    pub categories: BTreeMap<Category, u64>,
    /// Human-readable `total_size_bytes`.
    #[serde(default)]
    pub total_size_formatted: String,
    /// Accent color of every category present in `categories`.
    #[serde(default)]
    pub category_colors: BTreeMap<Category, CompactString>,
}

/// Accumulates [`ManifestStats`] while folders are scanned.
///
/// Collectors from independent folder scans are merged, so the distinct
/// extension count stays exact across parallel workers.
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    stats: ManifestStats,
    extensions: BTreeSet<CompactString>,
}

impl StatsCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every file of one folder. Folders with no files are not counted.
    pub fn record_folder(&mut self, files: &[FileEntry]) {
        if files.is_empty() {
            return;
        }
        self.stats.folder_count += 1;
        for file in files {
            self.stats.total_files += 1;
            self.stats.total_size_bytes += file.size_bytes;
            *self.stats.categories.entry(file.category).or_default() += 1;
            if !file.extension.is_empty() {
                self.extensions.insert(file.extension.clone());
            }
        }
    }

    /// Fold another collector into this one.
    pub fn merge(&mut self, other: StatsCollector) {
        self.stats.total_files += other.stats.total_files;
        self.stats.total_size_bytes += other.stats.total_size_bytes;
        self.stats.folder_count += other.stats.folder_count;
        for (category, count) in other.stats.categories {
            *self.stats.categories.entry(category).or_default() += count;
        }
        self.extensions.extend(other.extensions);
    }

    /// Finish collecting.
    pub fn finish(mut self) -> ManifestStats {
        self.stats.file_types = self.extensions.len() as u64;
        self.stats.total_size_formatted = format_size(self.stats.total_size_bytes);
        self.stats.category_colors = self
            .stats
            .categories
            .keys()
            .map(|category| (*category, CompactString::from(category.color())))
            .collect();
        self.stats
    }
}

/// Result of one scan. Built fresh on every call and never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// When the scan started.
    pub scanned_at: DateTime<Utc>,

    /// Absolute path that was scanned.
    pub root_path: String,

    /// Folders holding files, in walk order.
    pub folders: Vec<FolderResult>,

    /// Folders that could not be read.
    pub errors: Vec<FolderError>,

    /// Totals across all folders.
    pub stats: ManifestStats,

    /// Wall time of the scan in milliseconds.
    pub scan_duration_ms: u64,
}

impl Manifest {
    /// Create a new manifest.
    pub fn new(
        scanned_at: DateTime<Utc>,
        root_path: impl Into<String>,
        folders: Vec<FolderResult>,
        errors: Vec<FolderError>,
        stats: ManifestStats,
        scan_duration: Duration,
    ) -> Self {
        Self {
            scanned_at,
            root_path: root_path.into(),
            folders,
            errors,
            stats,
            scan_duration_ms: u64::try_from(scan_duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Look up a folder by its relative path.
    pub fn folder(&self, folder_path: &str) -> Option<&FolderResult> {
        self.folders.iter().find(|f| f.folder_path == folder_path)
    }

    /// Get the total size of all scanned files.
    pub fn total_size(&self) -> u64 {
        self.stats.total_size_bytes
    }

    /// Get the total number of scanned files.
    pub fn total_files(&self) -> u64 {
        self.stats.total_files
    }

    /// Check if any folder failed to scan.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_counts_all_files() {
        let files = vec![
            FileEntry::new("a.jpg", "p/a.jpg", 10, None),
            FileEntry::new("b.JPG", "p/b.JPG", 5, None),
            FileEntry::new("notes", "p/notes", 1, None),
        ];
        let mut collector = StatsCollector::new();
        collector.record_folder(&files);
        collector.record_folder(&[]);
        let stats = collector.finish();

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_size_bytes, 16);
        assert_eq!(stats.folder_count, 1);
        assert_eq!(stats.file_types, 1);
        assert_eq!(stats.categories[&Category::Image], 2);
        assert_eq!(stats.categories[&Category::Other], 1);
        assert_eq!(stats.total_size_formatted, "16 B");
        assert_eq!(stats.category_colors.len(), 2);
        assert_eq!(stats.category_colors[&Category::Image], Category::Image.color());
    }

    #[test]
    fn test_collector_merge_dedups_extensions() {
        let mut left = StatsCollector::new();
        left.record_folder(&[FileEntry::new("a.pdf", "a.pdf", 1, None)]);
        let mut right = StatsCollector::new();
        right.record_folder(&[
            FileEntry::new("b.pdf", "x/b.pdf", 2, None),
            FileEntry::new("c.zip", "x/c.zip", 3, None),
        ]);

        left.merge(right);
        let stats = left.finish();

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.folder_count, 2);
        assert_eq!(stats.file_types, 2);
    }
}
