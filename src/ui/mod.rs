//! Terminal output

mod progress;

pub use progress::{ProgressPrinter, COPY_PREFIX};
