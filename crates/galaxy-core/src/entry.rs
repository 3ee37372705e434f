//! Scanned files and per-folder aggregates.

use std::cmp::Ordering;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::category::{Category, classify, extension_of, file_icon, folder_category, folder_icon};

/// One scanned file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Base name of the file.
    pub name: CompactString,

    /// Path relative to the scan root, `/`-separated.
    pub path: String,

    /// Size in bytes at scan time.
    pub size_bytes: u64,

    /// Classified file type.
    pub category: Category,

    /// Last modification time, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,

    /// Lower-cased extension without the dot, empty if none.
    #[serde(default)]
    pub extension: CompactString,

    /// Per-extension display glyph.
    #[serde(default)]
    pub icon: CompactString,

    /// File stem, shortened for display.
    #[serde(default)]
    pub display_name: CompactString,

    /// Human-readable size.
    #[serde(default)]
    pub size: String,
}

/// Longest stem shown in `display_name` before it is cut.
pub const DISPLAY_NAME_MAX_CHARS: usize = 50;

/// Format a byte count with 1024-based `kB`/`MB`/`GB` units.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::WINDOWS)
}

/// Stem of `file_name`, cut to [`DISPLAY_NAME_MAX_CHARS`] with a `...` suffix.
pub fn display_name(file_name: &str) -> CompactString {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    if stem.chars().count() <= DISPLAY_NAME_MAX_CHARS {
        CompactString::from(stem)
    } else {
        let mut short: CompactString = stem.chars().take(DISPLAY_NAME_MAX_CHARS).collect();
        short.push_str("...");
        short
    }
}

impl FileEntry {
    /// Create an entry, classifying it from its name.
    pub fn new(
        name: impl Into<CompactString>,
        path: impl Into<String>,
        size_bytes: u64,
        modified: Option<SystemTime>,
    ) -> Self {
        let name = name.into();
        let category = classify(&name);
        let extension = extension_of(&name)
            .map(|ext| CompactString::from(ext.to_ascii_lowercase()))
            .unwrap_or_default();
        let icon = CompactString::from(file_icon(&name));
        let display_name = display_name(&name);

        Self {
            name,
            path: path.into(),
            size_bytes,
            category,
            modified_at: modified.map(DateTime::<Utc>::from),
            extension,
            icon,
            display_name,
            size: format_size(size_bytes),
        }
    }

    /// Listing order: largest first, ties broken by name ascending.
    pub fn display_order(&self, other: &Self) -> Ordering {
        other
            .size_bytes
            .cmp(&self.size_bytes)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Aggregate for one directory.
///
/// `total_file_count` and `total_size_bytes` always cover every file that
/// was read, whatever `entries` was truncated to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderResult {
    /// Folder path relative to the scan root; the root itself is `"."`.
    pub folder_path: String,

    /// Largest files, at most the per-folder cap.
    pub entries: Vec<FileEntry>,

    /// Number of files before truncation.
    pub total_file_count: u64,

    /// Sum of all file sizes before truncation.
    pub total_size_bytes: u64,

    /// Files counted but not listed in `entries`.
    #[serde(default)]
    pub hidden_file_count: u64,

    /// Folder glyph, chosen from the folder's own name.
    #[serde(default)]
    pub icon: CompactString,

    /// Category suggested by the folder's name.
    #[serde(default)]
    pub category: Category,

    /// Human-readable `total_size_bytes`.
    #[serde(default)]
    pub total_size_formatted: String,
}

impl FolderResult {
    /// Aggregate `files` and keep the top `cap` in listing order.
    pub fn from_files(
        folder_path: impl Into<String>,
        mut files: Vec<FileEntry>,
        cap: usize,
    ) -> Self {
        let folder_path = folder_path.into();
        let total_file_count = files.len() as u64;
        let total_size_bytes: u64 = files.iter().map(|f| f.size_bytes).sum();

        files.sort_by(FileEntry::display_order);
        files.truncate(cap);

        let name = folder_path.rsplit('/').next().unwrap_or(&folder_path);
        Self {
            icon: CompactString::from(folder_icon(name)),
            category: folder_category(name),
            hidden_file_count: total_file_count - files.len() as u64,
            entries: files,
            total_file_count,
            total_size_bytes,
            total_size_formatted: format_size(total_size_bytes),
            folder_path,
        }
    }

    /// Whether some files were counted but not listed.
    pub fn is_truncated(&self) -> bool {
        self.hidden_file_count > 0
    }

    /// Whether the folder holds no files at all.
    pub fn is_empty(&self) -> bool {
        self.total_file_count == 0
    }
}
