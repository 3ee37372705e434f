//! Folder scanning and tree walking for downloads-galaxy.
//!
//! The scan is read-only and re-reads the filesystem on every call; a
//! "reindex" is simply another scan.
//!
//! - [`scan_folder`] lists the files of one directory, classifies them and
//!   aggregates counts and sizes before truncating the listing.
//! - [`GalaxyScanner`] walks the tree to a bounded depth, optionally
//!   scanning sibling folders in parallel, and assembles a [`Manifest`].
//!   Unreadable folders end up in [`Manifest::errors`]; only an invalid
//!   root aborts the scan.
//!
//! # Example
//!
//! ```rust,no_run
//! use galaxy_scan::{GalaxyScanner, ScanConfig};
//!
//! let config = ScanConfig::new("/home/user/Downloads");
//! let manifest = GalaxyScanner::new().scan(&config).unwrap();
//!
//! for folder in &manifest.folders {
//!     println!("{}: {} files", folder.folder_path, folder.total_file_count);
//! }
//! ```

mod filter;
mod folder;
mod progress;
mod scanner;
mod visited;

pub use filter::NameFilter;
pub use folder::{FolderScan, ROOT_FOLDER_PATH, relative_path, scan_folder};
pub use progress::ScanProgress;
pub use scanner::{GalaxyScanner, scan_tree};
pub use visited::{DirKey, VisitedDirs};

// Re-export core types for convenience
pub use galaxy_core::{
    Category, FileEntry, FolderError, FolderErrorKind, FolderResult, Manifest, ManifestStats,
    ScanConfig, ScanError, classify,
};
