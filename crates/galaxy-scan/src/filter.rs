//! Name-based skipping of hidden and ignored entries.

use globset::{Glob, GlobSet, GlobSetBuilder};

use galaxy_core::{ScanConfig, ScanError};

/// Decides which directory entries are left out of a scan.
#[derive(Debug, Clone)]
pub struct NameFilter {
    include_hidden: bool,
    ignore: GlobSet,
}

impl NameFilter {
    /// Compile a filter from explicit settings.
    pub fn new<I, S>(include_hidden: bool, patterns: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidConfig {
                message: format!("bad ignore pattern {pattern:?}: {e}"),
            })?;
            builder.add(glob);
        }
        let ignore = builder.build().map_err(|e| ScanError::InvalidConfig {
            message: format!("bad ignore patterns: {e}"),
        })?;

        Ok(Self {
            include_hidden,
            ignore,
        })
    }

    /// Compile the filter described by a scan config.
    pub fn from_config(config: &ScanConfig) -> Result<Self, ScanError> {
        Self::new(config.include_hidden, &config.ignore_patterns)
    }

    /// Whether an entry with this base name should be skipped.
    pub fn should_skip(&self, name: &str) -> bool {
        (!self.include_hidden && name.starts_with('.')) || self.ignore.is_match(name)
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self {
            include_hidden: false,
            ignore: GlobSet::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_filter() {
        let filter = NameFilter::from_config(&ScanConfig::new("/tmp")).unwrap();

        assert!(filter.should_skip(".DS_Store"));
        assert!(filter.should_skip("$RECYCLE.BIN"));
        assert!(!filter.should_skip("movie.mp4"));
    }

    #[test]
    fn test_glob_patterns() {
        let filter = NameFilter::new(true, ["*.part", "node_modules"]).unwrap();

        assert!(filter.should_skip("big.iso.part"));
        assert!(filter.should_skip("node_modules"));
        assert!(!filter.should_skip(".config"));
        assert!(!filter.should_skip("big.iso"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = NameFilter::new(false, ["[unclosed"]).unwrap_err();
        assert!(matches!(err, ScanError::InvalidConfig { .. }));
    }
}
