//! Content fingerprinting

use crate::types::SyncError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Length in bytes of a [`Fingerprint`]
pub const FINGERPRINT_LEN: usize = blake3::OUT_LEN;

/// Blake3 digest of a file's full contents
pub type Fingerprint = [u8; FINGERPRINT_LEN];

/// Compute the Blake3 fingerprint of a file
///
/// The file is streamed in 64KB chunks, so memory use does not grow with
/// file size.
///
/// # Errors
/// `SyncError::Io` with action `"hashing"` naming `file_path` when the file
/// cannot be opened or a read fails part way through.
///
/// # Example
/// ```no_run
/// use homesync::hash::fingerprint;
/// use std::path::Path;
///
/// let digest = fingerprint(Path::new("notes.txt"))?;
/// # Ok::<(), homesync::SyncError>(())
/// ```
pub fn fingerprint(file_path: &Path) -> Result<Fingerprint, SyncError> {
    let mut file = File::open(file_path).map_err(|e| SyncError::io("hashing", file_path, e))?;

    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; 64 * 1024];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| SyncError::io("hashing", file_path, e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[0..bytes_read]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Compare two files byte-for-byte via their fingerprints
///
/// `first` is hashed before `second`; the first failure is returned and names
/// the file that could not be read.
pub fn files_equal(first: &Path, second: &Path) -> Result<bool, SyncError> {
    let first_digest = fingerprint(first)?;
    let second_digest = fingerprint(second)?;

    Ok(first_digest == second_digest)
}
