//! Executor module for file operations

pub mod copy;

use crate::diff::decide;
use crate::types::{FileList, SyncError};
use std::path::{Path, PathBuf};

pub use copy::{copy_file, DIR_MODE};

/// Execution statistics for a copy run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Number of files in the input list.
    pub total_files: usize,
    /// Files written to the destination.
    pub copied_files: usize,
    /// Files already up to date.
    pub skipped_files: usize,
    /// Aggregate copied bytes.
    pub bytes_copied: u64,
}

/// Events emitted while copying a file list.
#[derive(Debug)]
pub enum ExecutionEvent {
    /// A file needs copying; emitted before any byte is written.
    FileStart { path: PathBuf },
    /// A file was copied and synced.
    FileCopied { path: PathBuf, bytes_copied: u64 },
    /// A file was already up to date.
    FileSkipped { path: PathBuf },
    /// Every file was processed without error.
    Complete { stats: ExecutionStats },
}

/// Optional callback used to receive execution events.
pub type ExecutionCallback<'a> = dyn Fn(&ExecutionEvent) + 'a;

/// Copy every out-of-date file in `files` from `source_root` to `dest_root`
///
/// Each relative path is joined onto both roots. Files are processed in list
/// order and the first error stops the run; files copied before it stay in
/// place.
pub fn copy_all(
    files: &FileList,
    source_root: &Path,
    dest_root: &Path,
    on_event: Option<&ExecutionCallback<'_>>,
) -> Result<ExecutionStats, SyncError> {
    let mut stats = ExecutionStats {
        total_files: files.len(),
        ..Default::default()
    };

    for relative in files.iter() {
        let source = source_root.join(relative);
        let dest = dest_root.join(relative);

        let decision = decide(&source, &dest)?;
        if !decision.should_copy() {
            stats.skipped_files += 1;
            emit_event(
                on_event,
                ExecutionEvent::FileSkipped {
                    path: relative.to_path_buf(),
                },
            );
            continue;
        }

        emit_event(
            on_event,
            ExecutionEvent::FileStart {
                path: relative.to_path_buf(),
            },
        );

        let bytes = copy_file(&decision.source, &decision.destination)?;
        stats.copied_files += 1;
        stats.bytes_copied += bytes;

        emit_event(
            on_event,
            ExecutionEvent::FileCopied {
                path: relative.to_path_buf(),
                bytes_copied: bytes,
            },
        );
    }

    emit_event(
        on_event,
        ExecutionEvent::Complete {
            stats: stats.clone(),
        },
    );

    Ok(stats)
}

/// Copy `source` to `dest` only if the destination is missing or differs
///
/// Returns `Some(bytes)` when the file was copied and `None` when it was
/// already up to date (no write happens in that case).
pub fn copy_one(source: &Path, dest: &Path) -> Result<Option<u64>, SyncError> {
    let decision = decide(source, dest)?;
    if !decision.should_copy() {
        return Ok(None);
    }

    copy_file(source, dest).map(Some)
}

fn emit_event(on_event: Option<&ExecutionCallback<'_>>, event: ExecutionEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    fn list(paths: &[&str]) -> FileList {
        FileList::from_paths(paths.iter().map(PathBuf::from))
    }

    #[test]
    fn test_copy_all_copy_overwrite_skip() {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");

        fs::write(src.path().join("new.txt"), b"new-content").expect("write src new");
        fs::write(src.path().join("keep.txt"), b"updated").expect("write src keep");
        fs::write(dst.path().join("keep.txt"), b"old").expect("write dst keep old");
        fs::write(src.path().join("same.txt"), b"same").expect("write src same");
        fs::write(dst.path().join("same.txt"), b"same").expect("write dst same");

        let files = list(&["new.txt", "keep.txt", "same.txt"]);
        let stats = copy_all(&files, src.path(), dst.path(), None).expect("copy all");

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.copied_files, 2);
        assert_eq!(stats.skipped_files, 1);
        assert_eq!(stats.bytes_copied, 11 + 7);
        assert_eq!(
            fs::read(dst.path().join("new.txt")).expect("read dst new"),
            b"new-content"
        );
        assert_eq!(
            fs::read(dst.path().join("keep.txt")).expect("read dst keep"),
            b"updated"
        );
    }

    #[test]
    fn test_copy_all_stops_at_first_error() {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");

        fs::write(src.path().join("a.txt"), b"a").expect("write a");
        fs::write(src.path().join("c.txt"), b"c").expect("write c");
        // b.txt exists at the destination but vanished from the source
        fs::write(dst.path().join("b.txt"), b"stale").expect("write dst b");

        let files = list(&["a.txt", "b.txt", "c.txt"]);
        let err = copy_all(&files, src.path(), dst.path(), None).unwrap_err();

        assert_eq!(err.path(), Some(src.path().join("b.txt").as_path()));
        assert!(dst.path().join("a.txt").exists(), "earlier copy is kept");
        assert!(!dst.path().join("c.txt").exists(), "later files untouched");
    }

    #[test]
    fn test_copy_all_emits_events_in_order() {
        let src = TempDir::new().expect("create src tempdir");
        let dst = TempDir::new().expect("create dst tempdir");

        fs::write(src.path().join("new.txt"), b"new-content").expect("write src new");
        fs::write(src.path().join("same.txt"), b"same").expect("write src same");
        fs::write(dst.path().join("same.txt"), b"same").expect("write dst same");

        let events: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let callback = |event: &ExecutionEvent| {
            let label = match event {
                ExecutionEvent::FileStart { path } => format!("start {}", path.display()),
                ExecutionEvent::FileCopied { path, bytes_copied } => {
                    format!("copied {} {}", path.display(), bytes_copied)
                }
                ExecutionEvent::FileSkipped { path } => format!("skip {}", path.display()),
                ExecutionEvent::Complete { .. } => "complete".to_string(),
            };
            events.borrow_mut().push(label);
        };

        let files = list(&["new.txt", "same.txt"]);
        copy_all(&files, src.path(), dst.path(), Some(&callback)).expect("copy all");

        assert_eq!(
            events.into_inner(),
            vec!["start new.txt", "copied new.txt 11", "skip same.txt", "complete"]
        );
    }

    #[test]
    fn test_copy_one_skips_up_to_date_file() {
        let dir = TempDir::new().expect("create tempdir");
        let src = dir.path().join("src.txt");
        let dest = dir.path().join("out/dest.txt");
        fs::write(&src, b"payload").expect("write src");

        assert_eq!(copy_one(&src, &dest).expect("first copy"), Some(7));
        assert_eq!(copy_one(&src, &dest).expect("second copy"), None);
    }
}
