use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use derive_more::Display;
use snafu::Snafu;

use crate::ext::PathExt;
use crate::hashing::ContentHash;

/// What a path points at, without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntryClass {
    #[display("file")]
    File,
    #[display("folder")]
    Folder,
    #[display("other")]
    Other,
    #[display("missing")]
    Missing,
}

/// Everything the node model needs to know about a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInspection {
    pub size: u64,
    pub content_hash: ContentHash,
    pub access_time: SystemTime,
    pub modify_time: SystemTime,
    pub change_time: SystemTime,
}

pub trait FilesystemAdapter: Send + Sync {
    fn classify(&self, path: &Path) -> Result<EntryClass, FilesystemError>;

    /// Raw names of the immediate children of `folder`, in no particular order.
    fn list_children(&self, folder: &Path) -> Result<Vec<OsString>, FilesystemError>;

    fn inspect_file(&self, path: &Path) -> Result<FileInspection, FilesystemError>;
}

#[derive(Debug, Snafu)]
pub enum FilesystemError {
    #[snafu(display("Nothing was found at {}", path.best_effort_path_display()))]
    NotFoundError { path: PathBuf },
    #[snafu(display("I/O failure while reading {}", path.best_effort_path_display()))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FilesystemError {
    /// Maps `NotFound` I/O failures onto [`FilesystemError::NotFoundError`].
    pub(crate) fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            FilesystemError::NotFoundError {
                path: path.to_path_buf(),
            }
        } else {
            FilesystemError::IoError {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
