//! Boundary to the real filesystem.
//!
//! The node model only ever talks to a [`FilesystemAdapter`]: it classifies a
//! path, lists the names inside a folder and inspects a file. [`LocalFilesystem`]
//! implements the adapter over `std::fs`; tests and embedders may provide their own.

mod adapter;
mod local;

pub use adapter::{EntryClass, FileInspection, FilesystemAdapter, FilesystemError};
pub use local::LocalFilesystem;
