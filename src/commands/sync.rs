//! Main backup command

use crate::executor::{copy_all, ExecutionEvent, ExecutionStats};
use crate::scanner::discover;
use crate::types::SyncError;
use crate::ui::ProgressPrinter;
use crate::Config;
use std::cell::RefCell;
use std::io::{ErrorKind, Write};

/// Run the backup, printing progress to stdout
pub fn run(config: &Config) -> Result<ExecutionStats, SyncError> {
    let stdout = std::io::stdout();
    run_with_output(config, stdout.lock())
}

/// Run the backup, printing progress to `out`
///
/// Discovers files under `config.home`, then copies the out-of-date ones to
/// `config.destination`. Errors from either stage are returned unchanged.
pub fn run_with_output<W: Write>(config: &Config, out: W) -> Result<ExecutionStats, SyncError> {
    if config.patterns.is_empty() {
        tracing::warn!("No include patterns configured, nothing will be backed up");
    }
    let files = discover(
        &config.home,
        &config.patterns.includes,
        &config.patterns.excludes,
    )?;
    tracing::info!(
        "{} file(s) selected for backup to {}",
        files.len(),
        config.destination.display()
    );

    let printer = RefCell::new(ProgressPrinter::new(out, config.quiet));
    let on_event = |event: &ExecutionEvent| match event {
        ExecutionEvent::FileStart { path } => printer.borrow_mut().announce(path),
        ExecutionEvent::FileCopied { path, bytes_copied } => {
            tracing::debug!("copied {} ({} bytes)", path.display(), bytes_copied)
        }
        ExecutionEvent::FileSkipped { path } => tracing::debug!("up to date: {}", path.display()),
        ExecutionEvent::Complete { stats } => printer.borrow_mut().finish(stats),
    };

    copy_all(&files, &config.home, &config.destination, Some(&on_event))
}

/// Plain-English hint for a failed run, if one applies
pub fn suggestion_for(error: &SyncError) -> Option<&'static str> {
    match error {
        SyncError::Config(_) => {
            Some("Check that the backup volume is mounted and lists this host in its .backup file.")
        }
        SyncError::Discovery { .. } => Some("Check permissions on the home directory."),
        SyncError::Io { source, .. } => match source.kind() {
            ErrorKind::NotFound => Some("Verify the path still exists and retry."),
            ErrorKind::PermissionDenied => {
                Some("Check file permissions or run with a user that has access.")
            }
            ErrorKind::WriteZero | ErrorKind::UnexpectedEof => {
                Some("Retry the backup and check the destination volume.")
            }
            _ if is_storage_full(source) => Some("Free space on the backup volume and retry."),
            _ => None,
        },
    }
}

fn is_storage_full(error: &std::io::Error) -> bool {
    matches!(error.kind(), ErrorKind::StorageFull) || matches!(error.raw_os_error(), Some(28 | 122))
}
