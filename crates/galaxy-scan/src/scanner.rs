//! Depth-bounded tree walker producing a [`Manifest`].

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use tokio::sync::broadcast;

use galaxy_core::{FolderError, FolderResult, Manifest, ScanConfig, ScanError, StatsCollector};

use crate::filter::NameFilter;
use crate::folder::{FolderScan, scan_folder};
use crate::progress::{ProgressTracker, ScanProgress};
use crate::visited::VisitedDirs;

/// Walks a directory tree and builds a manifest of its folders.
///
/// The scanner holds no state between scans apart from the progress
/// channel, so one instance can serve any number of concurrent scans.
pub struct GalaxyScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl GalaxyScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Scan the configured root, re-reading the filesystem from scratch.
    pub fn scan(&self, config: &ScanConfig) -> Result<Manifest, ScanError> {
        let start = Instant::now();
        let scanned_at = Utc::now();

        let root = resolve_root(&config.expanded_root())?;
        let filter = NameFilter::from_config(config)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("galaxy-scan-{i}"))
            .build()
            .map_err(|e| ScanError::ThreadPool {
                message: e.to_string(),
            })?;

        let walk = Walk {
            root: &root,
            filter: &filter,
            per_folder_cap: config.per_folder_cap,
            max_depth: config.max_depth,
            visited: VisitedDirs::new(),
            progress: ProgressTracker::new(),
            progress_tx: &self.progress_tx,
        };
        let outcomes = pool.install(|| walk.folder(&root, 0));

        let mut folders = Vec::new();
        let mut errors = Vec::new();
        let mut stats = StatsCollector::new();
        for outcome in outcomes {
            match outcome {
                Outcome::Scanned { result, tally } => {
                    if !result.is_empty() {
                        stats.merge(tally);
                        folders.push(result);
                    }
                }
                Outcome::Failed(err) => errors.push(err),
            }
        }

        let manifest = Manifest::new(
            scanned_at,
            root.to_string_lossy(),
            folders,
            errors,
            stats.finish(),
            start.elapsed(),
        );

        tracing::info!(
            root = %manifest.root_path,
            folders = manifest.folders.len(),
            files = manifest.total_files(),
            bytes = manifest.total_size(),
            errors = manifest.errors.len(),
            elapsed_ms = manifest.scan_duration_ms,
            "scan complete"
        );

        Ok(manifest)
    }
}

impl Default for GalaxyScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan `root` with default settings apart from the depth bound and cap.
pub fn scan_tree(
    root: impl Into<PathBuf>,
    max_depth: u32,
    per_folder_cap: usize,
) -> Result<Manifest, ScanError> {
    let mut config = ScanConfig::new(root);
    config.max_depth = max_depth;
    config.per_folder_cap = per_folder_cap;
    GalaxyScanner::new().scan(&config)
}

/// Canonicalize the scan root and check that it is a directory.
fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
    let resolved = root.canonicalize().map_err(|e| ScanError::root(root, e))?;
    if !resolved.is_dir() {
        return Err(ScanError::NotADirectory { path: resolved });
    }
    Ok(resolved)
}

/// Per-folder result, kept in walk order until the manifest is assembled.
enum Outcome {
    Scanned {
        result: FolderResult,
        tally: StatsCollector,
    },
    Failed(FolderError),
}

/// State shared by every folder of one scan.
struct Walk<'a> {
    root: &'a Path,
    filter: &'a NameFilter,
    per_folder_cap: usize,
    max_depth: u32,
    visited: VisitedDirs,
    progress: ProgressTracker,
    progress_tx: &'a broadcast::Sender<ScanProgress>,
}

impl Walk<'_> {
    /// Scan `dir` and, below the depth bound, its subdirectories.
    ///
    /// Returns outcomes in pre-order, children in listing order, regardless
    /// of how the subdirectory scans were scheduled.
    fn folder(&self, dir: &Path, depth: u32) -> Vec<Outcome> {
        if !self.visited.visit(dir) {
            tracing::debug!(folder = %dir.display(), "directory already scanned");
            return Vec::new();
        }

        let scan = match scan_folder(dir, self.root, self.per_folder_cap, self.filter) {
            Ok(scan) => scan,
            Err(err) => {
                tracing::warn!(folder = %err.folder_path, reason = %err.reason, "folder skipped");
                self.progress.record_error();
                self.report(dir);
                return vec![Outcome::Failed(err)];
            }
        };

        let FolderScan {
            result,
            subdirs,
            tally,
        } = scan;
        self.progress
            .record_folder(result.total_file_count, result.total_size_bytes);
        self.report(dir);

        let mut outcomes = vec![Outcome::Scanned { result, tally }];
        if depth < self.max_depth {
            let children: Vec<Vec<Outcome>> = subdirs
                .par_iter()
                .map(|subdir| self.folder(subdir, depth + 1))
                .collect();
            outcomes.extend(children.into_iter().flatten());
        } else if !subdirs.is_empty() {
            tracing::debug!(
                folder = %dir.display(),
                skipped = subdirs.len(),
                "depth limit reached"
            );
        }
        outcomes
    }

    fn report(&self, dir: &Path) {
        // No receivers is fine.
        let _ = self
            .progress_tx
            .send(self.progress.snapshot(dir.to_path_buf()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("photos")).unwrap();
        fs::create_dir(root.join("music")).unwrap();
        fs::create_dir(root.join("music/albums")).unwrap();
        fs::create_dir(root.join("empty")).unwrap();

        fs::write(root.join("readme.txt"), "hello").unwrap();
        fs::write(root.join("photos/a.jpg"), vec![0u8; 10]).unwrap();
        fs::write(root.join("photos/b.png"), vec![0u8; 5]).unwrap();
        fs::write(root.join("music/song.mp3"), vec![0u8; 30]).unwrap();
        fs::write(root.join("music/albums/track.flac"), vec![0u8; 40]).unwrap();

        temp
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let manifest = GalaxyScanner::new()
            .scan(&ScanConfig::new(temp.path()))
            .unwrap();

        assert_eq!(manifest.total_files(), 5);
        assert_eq!(manifest.total_size(), 90);
        assert!(manifest.errors.is_empty());
        assert_eq!(manifest.folders[0].folder_path, ".");
        assert!(manifest.folder("empty").is_none());
        assert_eq!(manifest.folder("music/albums").unwrap().total_size_bytes, 40);
    }

    #[test]
    fn test_depth_limit() {
        let temp = create_test_tree();
        let manifest = scan_tree(temp.path(), 1, 20).unwrap();

        // music/albums sits at depth 2 and is not descended into
        assert!(manifest.folder("music").is_some());
        assert!(manifest.folder("music/albums").is_none());
        assert_eq!(manifest.total_files(), 4);
    }

    #[test]
    fn test_depth_zero_scans_root_only() {
        let temp = create_test_tree();
        let manifest = scan_tree(temp.path(), 0, 20).unwrap();

        assert_eq!(manifest.folders.len(), 1);
        assert_eq!(manifest.folders[0].folder_path, ".");
    }

    #[test]
    fn test_progress_is_broadcast() {
        let temp = create_test_tree();
        let scanner = GalaxyScanner::new();
        let mut rx = scanner.subscribe();

        scanner.scan(&ScanConfig::new(temp.path())).unwrap();

        let mut updates = Vec::new();
        while let Ok(progress) = rx.try_recv() {
            updates.push(progress);
        }
        // root, photos, music, music/albums, empty
        assert_eq!(updates.len(), 5);
        assert_eq!(updates.iter().map(|p| p.folders_scanned).max(), Some(5));
        assert_eq!(updates.iter().map(|p| p.files_scanned).max(), Some(5));
    }
}
