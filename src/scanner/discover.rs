//! Home directory walk with include/exclude matching

use super::exclude::compile_glob;
use super::ExcludeMatcher;
use crate::types::{CandidateFile, FileList, SyncError};
use globset::{GlobSet, GlobSetBuilder};
use std::fs;
use std::path::Path;

/// Walk `root` and collect the files selected by the include and exclude globs
///
/// Every root-relative path is matched against the includes (`*` stays within
/// one directory, `**` crosses directories, dotfiles are matched like any
/// other name). Only regular files survive. Symlinked directories are never
/// entered; a symlink leaf is kept when it points at a regular file. Survivors
/// matching any exclude pattern are removed, and the rest is returned sorted
/// and deduplicated.
///
/// # Errors
/// * `SyncError::Config` if `root` is missing or not a directory
/// * `SyncError::Discovery` if `root` itself cannot be listed
///
/// Problems with a single pattern or entry are logged and skipped:
/// * Malformed include patterns are skipped with a warning
/// * Unreadable subdirectories are skipped with a warning
/// * Entries that vanish before they can be stat'ed are dropped
pub fn discover(
    root: &Path,
    includes: &[String],
    excludes: &[String],
) -> Result<FileList, SyncError> {
    let root_meta = fs::metadata(root).map_err(|e| {
        SyncError::Config(format!(
            "Cannot enter home directory {}: {}",
            root.display(),
            e
        ))
    })?;
    if !root_meta.is_dir() {
        return Err(SyncError::Config(format!(
            "Home directory {} is not a directory",
            root.display()
        )));
    }

    let include_set = build_include_set(includes);
    let excluder = ExcludeMatcher::new(excludes);

    let mut candidates: Vec<CandidateFile> = Vec::new();
    if include_set.is_empty() {
        tracing::debug!("no usable include patterns, skipping walk");
    } else {
        walk(root, &include_set, &excluder, &mut candidates)?;
    }

    let total_bytes: u64 = candidates.iter().map(|c| c.size).sum();
    let files = FileList::from_paths(candidates.into_iter().map(|c| c.path));
    tracing::debug!(
        files = files.len(),
        total_bytes,
        "discovery finished under {}",
        root.display()
    );

    Ok(files)
}

fn build_include_set(includes: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in includes {
        match compile_glob(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => {
                tracing::warn!("Skipping invalid include pattern '{}': {}", pattern, e);
            }
        }
    }

    builder.build().unwrap_or_else(|e| {
        tracing::warn!("Failed to build include patterns: {}", e);
        GlobSet::empty()
    })
}

fn walk(
    root: &Path,
    include_set: &GlobSet,
    excluder: &ExcludeMatcher,
    candidates: &mut Vec<CandidateFile>,
) -> Result<(), SyncError> {
    // No ignore files, no hidden-file filtering, no descent through links
    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .build();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                if is_root_error(&e, root) {
                    return Err(SyncError::Discovery {
                        path: root.to_path_buf(),
                        source: into_io_error(e),
                    });
                }
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if entry.depth() == 0 {
            continue;
        }
        let file_type = match entry.file_type() {
            Some(ft) => ft,
            None => continue,
        };
        if file_type.is_dir() {
            continue;
        }

        let relative_path = match entry.path().strip_prefix(root) {
            Ok(p) => p,
            Err(_) => {
                tracing::warn!(
                    "Skipping {}: outside the home directory",
                    entry.path().display()
                );
                continue;
            }
        };
        if !include_set.is_match(relative_path) {
            continue;
        }
        if excluder.is_excluded(relative_path) {
            tracing::debug!("excluded {}", relative_path.display());
            continue;
        }

        // Stat through the link: a link to a regular file counts as one
        let metadata = match fs::metadata(entry.path()) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("Dropping {}: {}", entry.path().display(), e);
                continue;
            }
        };

        let candidate = CandidateFile::from_metadata(relative_path.to_path_buf(), &metadata);
        if candidate.is_regular {
            candidates.push(candidate);
        }
    }

    Ok(())
}

/// True when the walk failed on `root` itself rather than below it
fn is_root_error(error: &ignore::Error, root: &Path) -> bool {
    if error.depth() == Some(0) {
        return true;
    }
    error_path(error).is_some_and(|path| path == root)
}

fn error_path(error: &ignore::Error) -> Option<&Path> {
    match error {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

fn into_io_error(error: ignore::Error) -> std::io::Error {
    let message = error.to_string();
    error
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message))
}
