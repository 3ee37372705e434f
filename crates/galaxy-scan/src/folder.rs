//! Single-folder scanning.

use std::fs::{self, Metadata};
use std::path::{Component, Path, PathBuf};

use galaxy_core::{FileEntry, FolderError, FolderResult, StatsCollector};

use crate::filter::NameFilter;

/// Relative path used for the scan root itself.
pub const ROOT_FOLDER_PATH: &str = ".";

/// Output of scanning one folder.
#[derive(Debug, Clone)]
pub struct FolderScan {
    /// Aggregates and the truncated listing.
    pub result: FolderResult,
    /// Subdirectories, in listing order, for the walker to descend into.
    pub subdirs: Vec<PathBuf>,
    /// Statistics over every file in the folder.
    pub tally: StatsCollector,
}

/// Scan the immediate files of `dir`.
///
/// Files whose metadata cannot be read are skipped. Only a failure to open
/// or list `dir` itself produces a [`FolderError`].
pub fn scan_folder(
    dir: &Path,
    root: &Path,
    per_folder_cap: usize,
    filter: &NameFilter,
) -> Result<FolderScan, FolderError> {
    let folder_path = relative_path(root, dir);
    let read_dir =
        fs::read_dir(dir).map_err(|e| FolderError::from_io(folder_path.as_str(), &e))?;

    let mut files = Vec::new();
    let mut subdirs = Vec::new();

    for entry in read_dir {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!(folder = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().to_string();
        if filter.should_skip(&name) {
            continue;
        }

        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(err) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %err,
                    "skipping entry without file type"
                );
                continue;
            }
        };

        let metadata = if file_type.is_dir() {
            subdirs.push(path);
            continue;
        } else if file_type.is_symlink() {
            match resolve_symlink(&path) {
                Some(m) => m,
                None => continue,
            }
        } else if file_type.is_file() {
            match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    tracing::debug!(
                        path = %path.display(),
                        error = %err,
                        "skipping file with unreadable metadata"
                    );
                    continue;
                }
            }
        } else {
            continue;
        };

        files.push(FileEntry::new(
            name,
            relative_path(root, &path),
            metadata.len(),
            metadata.modified().ok(),
        ));
    }

    let mut tally = StatsCollector::new();
    tally.record_folder(&files);

    Ok(FolderScan {
        result: FolderResult::from_files(folder_path, files, per_folder_cap),
        subdirs,
        tally,
    })
}

/// Metadata of a symlink's target if it is a regular file.
///
/// Links to directories are never followed and dangling links are dropped.
fn resolve_symlink(path: &Path) -> Option<Metadata> {
    match fs::metadata(path) {
        Ok(m) if m.is_file() => Some(m),
        Ok(_) => {
            tracing::debug!(path = %path.display(), "not following directory symlink");
            None
        }
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "skipping broken symlink");
            None
        }
    }
}

/// `path` relative to `root`, joined with `/`. The root itself is `"."`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ROOT_FOLDER_PATH.to_string()
    } else {
        parts.join("/")
    }
}
