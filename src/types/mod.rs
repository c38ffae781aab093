//! Core type definitions for homesync

mod action;
mod entry;
mod error;
mod pattern;

pub use action::{CopyDecision, CopyReason};
pub use entry::{CandidateFile, FileList};
pub use error::SyncError;
pub use pattern::PatternSet;
