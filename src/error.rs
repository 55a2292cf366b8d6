use crate::discovery::DiscoveryError;
use crate::port::PortError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a detection run.
///
/// There is no recovery: the first failure aborts the run and is reported by
/// the binary with a non-zero exit status.
#[derive(Debug, Error)]
pub enum AppError {
    /// Candidate enumeration failed.
    #[error("Failed to enumerate candidates: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Opening or reading a candidate failed.
    #[error("Failed to probe {}: {}", .path.display(), .source)]
    Port {
        path: PathBuf,
        #[source]
        source: PortError,
    },

    /// Creating or listing a symlink failed.
    #[error("Failed to link {}: {}", .path.display(), .source)]
    Link {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a listing to the output failed.
    #[error("Failed to write listing: {0}")]
    Output(#[source] std::io::Error),
}

impl AppError {
    pub(crate) fn port(path: impl Into<PathBuf>, source: PortError) -> Self {
        Self::Port {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn link(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Link {
            path: path.into(),
            source,
        }
    }
}
