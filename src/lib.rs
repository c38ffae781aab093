//! # homesync - Selective home directory backup
//!
//! Copies the files a host's include/exclude globs select from the home
//! directory onto a removable volume, writing only those whose size or
//! content changed since the last run.

// Module declarations
pub mod config;
pub mod scanner;
pub mod diff;
pub mod executor;
pub mod hash;
pub mod ui;
pub mod commands;
pub mod types;

// Re-export commonly used types
pub use types::{CandidateFile, CopyDecision, CopyReason, FileList, PatternSet, SyncError};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
