//! PatternSet - include/exclude globs for one host

use serde::Deserialize;

/// Include and exclude glob patterns, relative to the home directory
///
/// Loaded once per run and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PatternSet {
    /// Globs selecting files to back up
    #[serde(default)]
    pub includes: Vec<String>,

    /// Globs removing files from the included set
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl PatternSet {
    /// Create a pattern set from include and exclude globs
    pub fn new<I, E, S, T>(includes: I, excludes: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            includes: includes.into_iter().map(Into::into).collect(),
            excludes: excludes.into_iter().map(Into::into).collect(),
        }
    }

    /// True when no include pattern is configured (nothing will be backed up)
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_order() {
        let set = PatternSet::new(["b/**", "a.txt"], ["b/tmp/**"]);
        assert_eq!(set.includes, vec!["b/**", "a.txt"]);
        assert_eq!(set.excludes, vec!["b/tmp/**"]);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let set: PatternSet = toml::from_str("includes = [\"x\"]").unwrap();
        assert_eq!(set.includes, vec!["x"]);
        assert!(set.excludes.is_empty());

        let empty: PatternSet = toml::from_str("").unwrap();
        assert!(empty.is_empty());
    }
}
