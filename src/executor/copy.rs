//! Single file copy with mode and mtime preservation

use crate::types::SyncError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Permission bits for destination directories created on demand
pub const DIR_MODE: u32 = 0o755;

/// Copy `src` over `dest`, creating missing parent directories
///
/// 1. Create every missing parent of `dest` (mode [`DIR_MODE`] on Unix)
/// 2. Stream `src` into a truncated `dest`
/// 3. Flush and sync `dest` to disk
/// 4. Copy permission bits (Unix only) and the modification time
///
/// The destination is written in place. If any step fails the partially
/// written file stays behind; its size or content will differ from the
/// source, so the next run copies it again.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError::Io)` - naming the source for read failures and the
///   destination for directory, create, write, sync or metadata failures
///
/// # Example
/// ```no_run
/// use homesync::executor::copy_file;
/// use std::path::Path;
///
/// let bytes = copy_file(Path::new("notes.txt"), Path::new("/media/me/usb/notes.txt"))?;
/// # Ok::<(), homesync::SyncError>(())
/// ```
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    if let Some(parent) = dest.parent() {
        create_parent_dirs(parent)?;
    }

    let mut src_file =
        File::open(src).map_err(|e| SyncError::io("opening source file", src, e))?;
    let src_metadata = src_file
        .metadata()
        .map_err(|e| SyncError::io("reading source metadata", src, e))?;

    let mut dest_file =
        File::create(dest).map_err(|e| SyncError::io("creating destination file", dest, e))?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file
            .read(&mut buffer)
            .map_err(|e| SyncError::io("reading source file", src, e))?;

        if bytes_read == 0 {
            break;
        }

        dest_file
            .write_all(&buffer[0..bytes_read])
            .map_err(|e| SyncError::io("writing destination file", dest, e))?;
        total_bytes += bytes_read as u64;
    }

    dest_file
        .sync_all()
        .map_err(|e| SyncError::io("syncing destination file", dest, e))?;
    drop(dest_file);

    preserve_permissions(&src_metadata, dest)?;

    let mtime = filetime::FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_mtime(dest, mtime)
        .map_err(|e| SyncError::io("setting modification time", dest, e))?;

    Ok(total_bytes)
}

fn create_parent_dirs(dir: &Path) -> Result<(), SyncError> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }

    #[cfg(unix)]
    let result = {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new().recursive(true).mode(DIR_MODE).create(dir)
    };

    #[cfg(not(unix))]
    let result = fs::create_dir_all(dir);

    result.map_err(|e| SyncError::io("creating destination directory", dir, e))
}

#[cfg(unix)]
fn preserve_permissions(src_metadata: &fs::Metadata, dest: &Path) -> Result<(), SyncError> {
    use std::os::unix::fs::PermissionsExt;

    let mode = src_metadata.permissions().mode() & 0o7777;
    fs::set_permissions(dest, fs::Permissions::from_mode(mode))
        .map_err(|e| SyncError::io("changing mode of destination file", dest, e))
}

// No compatible permission model: leave the destination's defaults.
#[cfg(not(unix))]
fn preserve_permissions(_src_metadata: &fs::Metadata, _dest: &Path) -> Result<(), SyncError> {
    Ok(())
}
