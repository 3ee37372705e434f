//! Error types for scanning operations.
//!
//! Only problems with the scan root or the configuration are fatal
//! ([`ScanError`]). An unreadable folder becomes a [`FolderError`] in the
//! manifest, and an unreadable file is dropped without an error.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root does not exist.
    #[error("Scan root not found: {path}")]
    RootNotFound { path: PathBuf },

    /// The scan root exists but is not a directory.
    #[error("Scan root is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Permission denied while resolving the scan root.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Generic I/O error while resolving the scan root.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The worker pool could not be started.
    #[error("Failed to start scan workers: {message}")]
    ThreadPool { message: String },
}

impl ScanError {
    /// Create an error for a failure to resolve the scan root.
    pub fn root(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::RootNotFound { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }

    /// Whether the root is missing or is not a directory.
    pub fn is_root_not_found(&self) -> bool {
        matches!(
            self,
            Self::RootNotFound { .. } | Self::NotADirectory { .. }
        )
    }
}

/// Why a folder could not be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FolderErrorKind {
    PermissionDenied,
    NotADirectory,
    NotFound,
    Io,
}

impl From<io::ErrorKind> for FolderErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::NotADirectory => Self::NotADirectory,
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Io,
        }
    }
}

/// A folder that could not be read. Recorded in the manifest; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{folder_path}: {reason}")]
pub struct FolderError {
    /// Folder path relative to the scan root.
    pub folder_path: String,
    /// Human-readable cause.
    pub reason: String,
    /// Classified cause.
    pub kind: FolderErrorKind,
}

impl FolderError {
    /// Create a new folder error.
    pub fn new(
        folder_path: impl Into<String>,
        reason: impl Into<String>,
        kind: FolderErrorKind,
    ) -> Self {
        Self {
            folder_path: folder_path.into(),
            reason: reason.into(),
            kind,
        }
    }

    /// Create a folder error from the I/O error that stopped the listing.
    pub fn from_io(folder_path: impl Into<String>, error: &io::Error) -> Self {
        let kind = FolderErrorKind::from(error.kind());
        let reason = match kind {
            FolderErrorKind::PermissionDenied => "permission denied".to_string(),
            FolderErrorKind::NotADirectory => "not a directory".to_string(),
            FolderErrorKind::NotFound => "not found".to_string(),
            FolderErrorKind::Io => format!("I/O error: {error}"),
        };
        Self::new(folder_path, reason, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_root() {
        let err = ScanError::root(
            "/missing",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::RootNotFound { .. }));
        assert!(err.is_root_not_found());

        let err = ScanError::root(
            "/denied",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));
        assert!(!err.is_root_not_found());
    }

    #[test]
    fn test_folder_error_from_io() {
        let err = FolderError::from_io(
            "private",
            &io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind, FolderErrorKind::PermissionDenied);
        assert_eq!(err.reason, "permission denied");
        assert_eq!(err.to_string(), "private: permission denied");
    }

    #[test]
    fn test_folder_error_other_io_keeps_message() {
        let err = FolderError::from_io("disk", &io::Error::other("bad sector"));
        assert_eq!(err.kind, FolderErrorKind::Io);
        assert!(err.reason.contains("bad sector"));
    }
}
