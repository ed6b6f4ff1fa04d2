//! Lazy filesystem snapshots with content fingerprints, a decision-driven
//! traversal over them and a three-pass diff between two snapshot trees.
//!
//! ```no_run
//! use snaptree::tree::FolderNode;
//!
//! # fn main() -> Result<(), snaptree::tree::TreeError> {
//! let before = FolderNode::new("release-1")?;
//! let after = FolderNode::new("release-2")?;
//! let diff = after.compare_recursive(&before)?;
//! println!("{}", diff.stats());
//! # Ok(())
//! # }
//! ```
#![allow(clippy::enum_variant_names)]

pub mod config;
pub mod diff;
pub mod ext;
pub mod filesystem;
pub mod hashing;
pub mod traversal;
pub mod tree;

#[cfg(test)]
mod test_support;

pub use diff::{DiffStats, FilePair, FolderDiff};
pub use traversal::{RecursionDecision, SkipList, Traversal, TraversalPreset};
pub use tree::{Entry, EntryKind, FileNode, FolderNode, HashDepth, TreeError};
