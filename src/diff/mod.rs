//! Change detection - decides which files need copying

mod compare;

pub use compare::{decide, should_copy};
