//! Digests and name ordering shared by the node model and the diff engine.

mod content_hash;
mod sort;

pub use content_hash::{ContentHash, ContentHasher, hash_multiple};
pub use sort::{compare_names, sort_lexicographically};
