//! CandidateFile and FileList - discovery output

use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// A file selected by the include patterns during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Path relative to the home directory
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Regular file (after following symlinks)
    pub is_regular: bool,

    /// Unix permissions (mode bits)
    pub permissions: u32,
}

impl CandidateFile {
    /// Create a new CandidateFile with the given parameters
    pub fn new(path: PathBuf, size: u64, is_regular: bool, permissions: u32) -> Self {
        Self {
            path,
            size,
            is_regular,
            permissions,
        }
    }

    /// Build a candidate from already-fetched metadata
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        #[cfg(unix)]
        let permissions = {
            use std::os::unix::fs::PermissionsExt;
            metadata.permissions().mode()
        };

        #[cfg(not(unix))]
        let permissions = 0o644;

        Self::new(path, metadata.len(), metadata.is_file(), permissions)
    }
}

/// Sorted, duplicate-free list of paths relative to the home directory
///
/// Ordering is bytewise on the raw path, so `a.txt` sorts before `a/b`
/// exactly as a plain string sort would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    paths: Vec<PathBuf>,
}

impl FileList {
    /// Build a list from arbitrary paths, sorting and removing duplicates
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut paths: Vec<PathBuf> = paths.into_iter().collect();
        paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        paths.dedup();
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

impl IntoIterator for FileList {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a FileList {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_candidate() {
        let candidate = CandidateFile::new(PathBuf::from("docs/a.txt"), 10, true, 0o640);

        assert_eq!(candidate.path, PathBuf::from("docs/a.txt"));
        assert_eq!(candidate.size, 10);
        assert!(candidate.is_regular);
        assert_eq!(candidate.permissions, 0o640);
    }

    #[test]
    fn test_candidate_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, b"12345").unwrap();

        let file_meta = std::fs::metadata(&file).unwrap();
        let candidate = CandidateFile::from_metadata(PathBuf::from("f.txt"), &file_meta);
        assert_eq!(candidate.size, 5);
        assert!(candidate.is_regular);

        let dir_meta = std::fs::metadata(dir.path()).unwrap();
        let dir_candidate = CandidateFile::from_metadata(PathBuf::from("."), &dir_meta);
        assert!(!dir_candidate.is_regular);
    }

    #[test]
    fn test_file_list_sorts_like_strings() {
        let list = FileList::from_paths(vec![
            PathBuf::from("a/b"),
            PathBuf::from("a.txt"),
            PathBuf::from("B.txt"),
        ]);

        let ordered: Vec<&Path> = list.iter().collect();
        assert_eq!(
            ordered,
            vec![Path::new("B.txt"), Path::new("a.txt"), Path::new("a/b")]
        );
    }

    #[test]
    fn test_file_list_removes_duplicates() {
        let list = FileList::from_paths(vec![
            PathBuf::from("notes.txt"),
            PathBuf::from("docs/a.txt"),
            PathBuf::from("notes.txt"),
        ]);

        assert_eq!(list.len(), 2);
        assert!(list.contains(Path::new("notes.txt")));
        assert!(list.contains(Path::new("docs/a.txt")));
    }

    #[test]
    fn test_empty_file_list() {
        let list = FileList::default();
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
    }
}
