//! Exclude pattern matching

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Compile one home-relative glob; `*` stops at `/`, `**` crosses directories
pub(crate) fn compile_glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern).literal_separator(true).build()
}

/// Compiled exclude patterns
///
/// An exclude pattern that fails to compile poisons the matcher: every
/// candidate is then reported as excluded. An ambiguous exclude must never
/// let a file through.
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    set: GlobSet,
    poisoned: bool,
}

impl ExcludeMatcher {
    /// Compile exclude globs
    pub fn new(patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut poisoned = false;

        for pattern in patterns {
            match compile_glob(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => {
                    tracing::warn!(
                        "Invalid exclude pattern '{}': {}. All candidates will be excluded.",
                        pattern,
                        e
                    );
                    poisoned = true;
                }
            }
        }

        let set = match builder.build() {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!("Failed to build exclude patterns: {}. All candidates will be excluded.", e);
                poisoned = true;
                GlobSet::empty()
            }
        };

        Self { set, poisoned }
    }

    /// Check a home-relative path against the exclude set
    pub fn is_excluded(&self, relative_path: &Path) -> bool {
        self.poisoned || self.set.is_match(relative_path)
    }

    /// True when no pattern was given and nothing can be excluded
    pub fn is_empty(&self) -> bool {
        !self.poisoned && self.set.is_empty()
    }
}
