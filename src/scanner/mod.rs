//! Home directory discovery: walk, include matching and exclusion

mod discover;
mod exclude;

pub use discover::discover;
pub use exclude::ExcludeMatcher;
