//! Error types for homesync

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error types for homesync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Home directory, host configuration or marker file could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),

    /// A directory that must be listed could not be enumerated
    #[error("Discovery error: listing '{}': {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem operation failed on a specific path
    ///
    /// Hashing failures land here too, with `action` set to `"hashing"`.
    #[error("IO error: {action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Wrap an IO error with the operation and path that failed
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Check if this error comes from configuration resolution
    pub fn is_config_error(&self) -> bool {
        matches!(self, SyncError::Config(_))
    }

    /// Check if this error is a filesystem operation failure
    pub fn is_io_error(&self) -> bool {
        matches!(self, SyncError::Io { .. })
    }

    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            SyncError::Config(_) => None,
            SyncError::Discovery { path, .. } | SyncError::Io { path, .. } => {
                Some(path.as_path())
            }
        }
    }
}
