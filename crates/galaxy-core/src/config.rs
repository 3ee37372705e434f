//! Scan configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default number of entries listed per folder.
pub const DEFAULT_PER_FOLDER_CAP: usize = 20;

/// Default recursion bound below the scan root.
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Configuration for a scan.
///
/// Passed explicitly into every scan; nothing about the root or the limits
/// lives in process-wide state.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Directory to scan.
    #[builder(default = "default_root()")]
    #[serde(default = "default_root", alias = "rootPath")]
    pub root: PathBuf,

    /// Maximum number of entries listed per folder.
    #[builder(default = "DEFAULT_PER_FOLDER_CAP")]
    #[serde(default = "default_per_folder_cap", alias = "perFolderCap")]
    pub per_folder_cap: usize,

    /// Directories deeper than this are not descended into.
    #[builder(default = "DEFAULT_MAX_DEPTH")]
    #[serde(default = "default_max_depth", alias = "maxDepth")]
    pub max_depth: u32,

    /// Number of threads for folder scans (0 = auto-detect, 1 = sequential).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,

    /// Include hidden files and folders (starting with .).
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,

    /// Names to skip, glob syntax.
    #[builder(default = "default_ignore_patterns()")]
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

/// The user's downloads directory, or `~/Downloads` when the platform does
/// not define one.
pub fn default_root() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

fn default_per_folder_cap() -> usize {
    DEFAULT_PER_FOLDER_CAP
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_ignore_patterns() -> Vec<String> {
    vec!["$RECYCLE.BIN".to_string()]
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a config with default limits for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            per_folder_cap: DEFAULT_PER_FOLDER_CAP,
            max_depth: DEFAULT_MAX_DEPTH,
            threads: 0,
            include_hidden: false,
            ignore_patterns: default_ignore_patterns(),
        }
    }

    /// Root with a leading `~` expanded to the home directory.
    pub fn expanded_root(&self) -> PathBuf {
        expand_home(&self.root)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(default_root())
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
