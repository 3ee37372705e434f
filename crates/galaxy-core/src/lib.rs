//! Core types for downloads-galaxy.
//!
//! This crate holds the manifest data model, the file classifier and the
//! scan configuration shared by the scanner, the HTTP server and the CLI.

mod category;
mod config;
mod entry;
mod error;
mod manifest;

pub use category::{
    Category, DEFAULT_FILE_ICON, DEFAULT_FOLDER_ICON, EXTENSION_TABLE, ROOT_FOLDER_ICON, classify,
    extension_of, file_icon, folder_category, folder_icon,
};
pub use config::{
    DEFAULT_MAX_DEPTH, DEFAULT_PER_FOLDER_CAP, ScanConfig, ScanConfigBuilder, default_root,
};
pub use entry::{DISPLAY_NAME_MAX_CHARS, FileEntry, FolderResult, display_name, format_size};
pub use error::{FolderError, FolderErrorKind, ScanError};
pub use manifest::{Manifest, ManifestStats, StatsCollector};
