//! Change detection between a source file and its backup copy

use crate::hash::files_equal;
use crate::types::{CopyDecision, CopyReason, SyncError};
use std::fs;
use std::path::Path;

/// Decide whether `source` must be copied over `dest`
///
/// Checks run cheapest first:
///
/// 1. **Missing destination**: `dest` cannot be stat'ed → copy, no error
/// 2. **Missing source**: `source` cannot be stat'ed → `SyncError::Io`
/// 3. **Size mismatch**: sizes differ → copy, contents are never opened
/// 4. **Content**: same size → copy iff the Blake3 fingerprints differ
///
/// Two empty files fall through to step 4 and compare equal, since both hash
/// to the digest of the empty stream.
pub fn decide(source: &Path, dest: &Path) -> Result<CopyDecision, SyncError> {
    let reason = compare_paths(source, dest)?;
    tracing::debug!(
        source = %source.display(),
        dest = %dest.display(),
        ?reason,
        "change detection"
    );
    Ok(CopyDecision::new(
        source.to_path_buf(),
        dest.to_path_buf(),
        reason,
    ))
}

/// Boolean shorthand for [`decide`]
pub fn should_copy(source: &Path, dest: &Path) -> Result<bool, SyncError> {
    Ok(compare_paths(source, dest)?.needs_copy())
}

fn compare_paths(source: &Path, dest: &Path) -> Result<CopyReason, SyncError> {
    let dest_meta = match fs::metadata(dest) {
        Ok(meta) => meta,
        Err(_) => return Ok(CopyReason::MissingDestination),
    };

    let src_meta =
        fs::metadata(source).map_err(|e| SyncError::io("reading source metadata", source, e))?;

    if src_meta.len() != dest_meta.len() {
        return Ok(CopyReason::SizeChanged);
    }

    if files_equal(source, dest)? {
        Ok(CopyReason::Unchanged)
    } else {
        Ok(CopyReason::ContentChanged)
    }
}
