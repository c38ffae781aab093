//! Line-oriented progress output

use crate::executor::ExecutionStats;
use indicatif::HumanBytes;
use std::io::Write;
use std::path::Path;

/// Prefix written before each file about to be copied
pub const COPY_PREFIX: &str = "-";

/// Progress printer for backup runs
///
/// Writes one `- <relative path>` line per file, before its bytes are
/// transferred. Nothing at all is written in quiet mode. Write failures are
/// logged once and further output is dropped; they never abort a backup.
pub struct ProgressPrinter<W: Write> {
    out: W,
    quiet: bool,
    broken: bool,
}

impl<W: Write> ProgressPrinter<W> {
    /// Create a new progress printer
    pub fn new(out: W, quiet: bool) -> Self {
        Self {
            out,
            quiet,
            broken: false,
        }
    }

    /// Announce a file that is about to be copied.
    pub fn announce(&mut self, path: &Path) {
        let line = format!("{} {}", COPY_PREFIX, path.display());
        self.write_line(&line);
    }

    /// Print the end-of-run summary.
    pub fn finish(&mut self, stats: &ExecutionStats) {
        let line = format_summary(stats);
        self.write_line(&line);
    }

    /// Consume the printer and hand back the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if self.quiet || self.broken {
            return;
        }

        let result = writeln!(self.out, "{}", line).and_then(|_| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("Progress output failed: {}. Further progress lines are dropped.", e);
            self.broken = true;
        }
    }
}

fn format_summary(stats: &ExecutionStats) -> String {
    if stats.copied_files == 0 {
        return format!("Nothing to back up ({} unchanged).", stats.skipped_files);
    }

    format!(
        "{} copied, {} unchanged | {} transferred",
        stats.copied_files,
        stats.skipped_files,
        HumanBytes(stats.bytes_copied)
    )
}
