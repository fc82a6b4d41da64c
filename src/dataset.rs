//! Labeled sentiment data: loading and train/test partitioning.
//!
//! The input corpus is plain text with one `<text>\t<label>` record per line
//! and no header row; labels are `0`/`1` (or `false`/`true`).

mod example;
mod loader;
mod split;

pub use example::LabeledExample;
pub use loader::{load_examples, parse_line, read_examples};
pub use split::{TrainTestSplit, split};
