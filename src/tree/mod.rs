//! Lazily loaded snapshot of a filesystem subtree.

mod entry;
mod error;
mod file_node;
mod folder_node;

pub use entry::{Entry, EntryKind};
pub use error::TreeError;
pub(crate) use error::InvalidArgumentSnafu;
pub use file_node::FileNode;
pub use folder_node::{FolderNode, HashDepth};
