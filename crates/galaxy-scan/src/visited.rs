//! Visited-directory tracking.

use std::path::{Path, PathBuf};

use dashmap::DashSet;

/// Identity of a directory on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DirKey {
    /// Device and inode number.
    Inode { device: u64, inode: u64 },
    /// Canonical path, where inodes are unavailable.
    Path(PathBuf),
}

impl DirKey {
    /// Identify the directory at `path`, or `None` if it cannot be stat'ed.
    pub fn of(path: &Path) -> Option<Self> {
        dir_key(path)
    }
}

#[cfg(unix)]
fn dir_key(path: &Path) -> Option<DirKey> {
    use std::os::unix::fs::MetadataExt;
    let metadata = std::fs::metadata(path).ok()?;
    Some(DirKey::Inode {
        device: metadata.dev(),
        inode: metadata.ino(),
    })
}

#[cfg(not(unix))]
fn dir_key(path: &Path) -> Option<DirKey> {
    std::fs::canonicalize(path).ok().map(DirKey::Path)
}

/// Tracks directories already scanned in one walk.
///
/// Symlinked directories are never followed, but bind mounts and similar
/// aliases can still expose the same directory twice. Each scan owns its
/// own tracker; nothing survives between scans.
#[derive(Debug, Default)]
pub struct VisitedDirs {
    seen: DashSet<DirKey>,
}

impl VisitedDirs {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            seen: DashSet::new(),
        }
    }

    /// Mark `path` as visited. Returns `false` if it was already seen.
    ///
    /// Directories that cannot be identified are always reported as new so
    /// the folder scan gets to record why they are unreadable.
    pub fn visit(&self, path: &Path) -> bool {
        match DirKey::of(path) {
            Some(key) => self.seen.insert(key),
            None => true,
        }
    }

    /// Get the number of directories visited.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check if no directories have been visited.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
