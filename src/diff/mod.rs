//! Three-pass classification of two file universes into unchanged, renamed,
//! modified and one-sided files.

mod folder_diff;
mod matcher;

pub use folder_diff::{DiffStats, FilePair, FolderDiff};
