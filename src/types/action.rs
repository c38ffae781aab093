//! CopyDecision - outcome of the change detector

use std::path::PathBuf;

/// Why a file does or does not need copying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyReason {
    /// Destination missing (first backup of this file)
    MissingDestination,

    /// Sizes differ, contents were not read
    SizeChanged,

    /// Same size, different fingerprint
    ContentChanged,

    /// Same size and fingerprint
    Unchanged,
}

impl CopyReason {
    /// Whether this reason requires a copy
    pub fn needs_copy(self) -> bool {
        !matches!(self, CopyReason::Unchanged)
    }
}

/// Copy/skip decision for one (source, destination) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyDecision {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub reason: CopyReason,
}

impl CopyDecision {
    pub fn new(source: PathBuf, destination: PathBuf, reason: CopyReason) -> Self {
        Self {
            source,
            destination,
            reason,
        }
    }

    /// True if the destination must be (re)written
    pub fn should_copy(&self) -> bool {
        self.reason.needs_copy()
    }
}
