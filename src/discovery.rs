//! Candidate enumeration.
//!
//! Expands a device glob such as `/dev/ttyUSB*` into an ordered
//! [`CandidateSet`]. Only a single `*` in the final path component is
//! supported, which covers every device-node pattern this tool deals with.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from expanding a candidate pattern.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The pattern cannot be expanded.
    #[error("Invalid device pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Listing the pattern's directory failed.
    #[error("Failed to list '{dir}': {source}")]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A parsed device glob: a directory plus a file name with at most one `*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePattern {
    dir: PathBuf,
    prefix: String,
    suffix: Option<String>,
}

impl DevicePattern {
    /// Parse `pattern`.
    pub fn parse(pattern: &str) -> Result<Self, DiscoveryError> {
        let invalid = |reason: &str| DiscoveryError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let path = Path::new(pattern);
        let file_pattern = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| invalid("no file name component"))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if dir.to_string_lossy().contains('*') {
            return Err(invalid("wildcards are only supported in the file name"));
        }

        let (prefix, suffix) = match file_pattern.split_once('*') {
            Some((_, rest)) if rest.contains('*') => {
                return Err(invalid("at most one '*' is supported"))
            }
            Some((prefix, rest)) => (prefix.to_string(), Some(rest.to_string())),
            None => (file_pattern.to_string(), None),
        };

        Ok(Self {
            dir,
            prefix,
            suffix,
        })
    }

    /// Directory the pattern lists.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a directory entry name matches the file name part.
    pub fn matches(&self, name: &str) -> bool {
        if name.starts_with('.') && !self.prefix.starts_with('.') {
            return false;
        }

        match &self.suffix {
            None => name == self.prefix,
            Some(suffix) => {
                name.len() >= self.prefix.len() + suffix.len()
                    && name.starts_with(&self.prefix)
                    && name.ends_with(suffix.as_str())
            }
        }
    }
}

/// Ordered device paths still awaiting classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    paths: Vec<PathBuf>,
}

impl CandidateSet {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    /// First candidate in scan order.
    pub fn first(&self) -> Option<&Path> {
        self.paths.first().map(PathBuf::as_path)
    }

    /// Drop `path` from the set. Returns whether it was present.
    pub fn remove(&mut self, path: &Path) -> bool {
        match self.paths.iter().position(|p| p == path) {
            Some(index) => {
                self.paths.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Expand `pattern` into a lexically sorted candidate set.
///
/// A missing directory yields an empty set, like a shell glob with no matches.
pub fn enumerate(pattern: &str) -> Result<CandidateSet, DiscoveryError> {
    let pattern = DevicePattern::parse(pattern)?;
    let read_dir_error = |source: io::Error| DiscoveryError::ReadDir {
        dir: pattern.dir().to_path_buf(),
        source,
    };

    let entries = match std::fs::read_dir(pattern.dir()) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} does not exist, no candidates", pattern.dir().display());
            return Ok(CandidateSet::default());
        }
        Err(e) => return Err(read_dir_error(e)),
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(read_dir_error)?;
        let name = entry.file_name();
        if let Some(name) = name.to_str() {
            if pattern.matches(name) {
                paths.push(entry.path());
            }
        }
    }
    paths.sort();

    debug!("Pattern matched {} candidate(s): {:?}", paths.len(), paths);
    Ok(CandidateSet::new(paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_device_glob() {
        let pattern = DevicePattern::parse("/dev/ttyUSB*").unwrap();
        assert_eq!(pattern.dir(), Path::new("/dev"));
        assert!(pattern.matches("ttyUSB0"));
        assert!(pattern.matches("ttyUSB"));
        assert!(pattern.matches("ttyUSB12"));
        assert!(!pattern.matches("ttyACM0"));
        assert!(!pattern.matches("xttyUSB0"));
    }

    #[test]
    fn test_parse_rejects_unsupported_patterns() {
        assert!(DevicePattern::parse("/dev/*/ttyUSB0").is_err());
        assert!(DevicePattern::parse("/dev/tty*USB*").is_err());
        assert!(DevicePattern::parse("/").is_err());
    }

    #[test]
    fn test_literal_and_suffix_patterns() {
        let literal = DevicePattern::parse("/dev/ttyS0").unwrap();
        assert!(literal.matches("ttyS0"));
        assert!(!literal.matches("ttyS01"));

        let suffixed = DevicePattern::parse("captures/*.nmea").unwrap();
        assert_eq!(suffixed.dir(), Path::new("captures"));
        assert!(suffixed.matches("drive.nmea"));
        assert!(!suffixed.matches("drive.log"));
        assert!(!suffixed.matches(".hidden.nmea"));
    }

    #[test]
    fn test_bare_file_pattern_lists_current_dir() {
        let pattern = DevicePattern::parse("ttyUSB*").unwrap();
        assert_eq!(pattern.dir(), Path::new("."));
    }

    #[test]
    fn test_enumerate_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["ttyUSB1", "ttyUSB0", "ttyACM0", "ttyUSB10"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let pattern = format!("{}/ttyUSB*", dir.path().display());
        let candidates = enumerate(&pattern).unwrap();
        let names: Vec<_> = candidates
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["ttyUSB0", "ttyUSB1", "ttyUSB10"]);
    }

    #[test]
    fn test_enumerate_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/absent/ttyUSB*", dir.path().display());
        assert!(enumerate(&pattern).unwrap().is_empty());
    }

    #[test]
    fn test_candidate_set_remove() {
        let mut set = CandidateSet::new(vec![
            PathBuf::from("/dev/ttyUSB0"),
            PathBuf::from("/dev/ttyUSB1"),
        ]);

        assert!(set.remove(Path::new("/dev/ttyUSB0")));
        assert!(!set.remove(Path::new("/dev/ttyUSB0")));
        assert_eq!(set.len(), 1);
        assert_eq!(set.first(), Some(Path::new("/dev/ttyUSB1")));
    }
}
