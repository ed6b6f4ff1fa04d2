//! Strategy-driven recursive traversal over a [`FolderNode`](crate::tree::FolderNode).
//!
//! A decider is asked once per folder met during the walk and answers with a
//! [`RecursionDecision`]. Files are always emitted as soon as they are reached.

mod decision;
mod presets;
mod walk;

pub use decision::RecursionDecision;
pub use presets::{SkipList, TraversalPreset};
pub use walk::Traversal;
