use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::SystemTime;

use snafu::prelude::*;
use tracing::trace;

use crate::ext::PathExt;
use crate::filesystem::{EntryClass, FileInspection, FilesystemAdapter, LocalFilesystem};
use crate::hashing::ContentHash;
use crate::tree::EntryKind;
use crate::tree::error::{AlreadyLoadedSnafu, LoadSnafu, NotFoundSnafu, TreeError};

/// A file (or quasi-file "other" entry) whose attributes are loaded on first use.
///
/// All attributes come from a single inspection performed at most once; after
/// that the node is a frozen snapshot and never touches the filesystem again.
pub struct FileNode {
    absolute_path: PathBuf,
    name: String,
    kind: EntryKind,
    filesystem: Arc<dyn FilesystemAdapter>,
    inspection: OnceLock<FileInspection>,
}

impl FileNode {
    /// Node for a local file. Symlinks above the final component are resolved;
    /// a symlink named by `path` itself stays an "other" entry.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        Self::with_filesystem(path.as_ref().to_canonical_parent(), Arc::new(LocalFilesystem))
    }

    pub fn with_filesystem(
        path: impl AsRef<Path>,
        filesystem: Arc<dyn FilesystemAdapter>,
    ) -> Result<Self, TreeError> {
        let absolute_path = path.as_ref().to_absolute();
        let class = filesystem.classify(&absolute_path).context(LoadSnafu {
            path: absolute_path.clone(),
        })?;

        let kind = match class {
            EntryClass::File => EntryKind::File,
            EntryClass::Other => EntryKind::Other,
            found => {
                return NotFoundSnafu {
                    path: absolute_path,
                    expected: EntryKind::File,
                    found,
                }
                .fail();
            }
        };

        Ok(Self::from_parts(absolute_path, kind, filesystem))
    }

    /// Builds a node for a path that was already classified by the caller.
    pub(crate) fn from_parts(
        absolute_path: PathBuf,
        kind: EntryKind,
        filesystem: Arc<dyn FilesystemAdapter>,
    ) -> Self {
        let name = absolute_path.file_name_string();
        Self {
            absolute_path,
            name,
            kind,
            filesystem,
            inspection: OnceLock::new(),
        }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Either [`EntryKind::File`] or [`EntryKind::Other`].
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_loaded(&self) -> bool {
        self.inspection.get().is_some()
    }

    /// Forces the attribute load. Loading a node twice is a usage error.
    pub fn load(&self) -> Result<(), TreeError> {
        ensure!(
            !self.is_loaded(),
            AlreadyLoadedSnafu {
                path: self.absolute_path.clone(),
            }
        );
        self.inspection().map(|_| ())
    }

    pub fn size(&self) -> Result<u64, TreeError> {
        Ok(self.inspection()?.size)
    }

    pub fn content_hash(&self) -> Result<ContentHash, TreeError> {
        Ok(self.inspection()?.content_hash)
    }

    pub fn access_time(&self) -> Result<SystemTime, TreeError> {
        Ok(self.inspection()?.access_time)
    }

    pub fn modify_time(&self) -> Result<SystemTime, TreeError> {
        Ok(self.inspection()?.modify_time)
    }

    pub fn change_time(&self) -> Result<SystemTime, TreeError> {
        Ok(self.inspection()?.change_time)
    }

    /// Content equality: same size and same content hash. Timestamps are ignored.
    pub fn same_contents(&self, other: &FileNode) -> Result<bool, TreeError> {
        Ok(self.size()? == other.size()? && self.content_hash()? == other.content_hash()?)
    }

    fn inspection(&self) -> Result<&FileInspection, TreeError> {
        if let Some(inspection) = self.inspection.get() {
            return Ok(inspection);
        }

        let loaded = self
            .filesystem
            .inspect_file(&self.absolute_path)
            .context(LoadSnafu {
                path: self.absolute_path.clone(),
            })?;
        trace!(
            "Loaded {} ({} bytes, hash {})",
            self.absolute_path.display(),
            loaded.size,
            loaded.content_hash
        );

        Ok(self.inspection.get_or_init(|| loaded))
    }
}

impl fmt::Debug for FileNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileNode")
            .field("absolute_path", &self.absolute_path)
            .field("kind", &self.kind)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_file;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn constructs_on_a_regular_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_file(temp_dir.path(), "notes.txt", "hello");

        let file = FileNode::new(&path).expect("Failed to construct file node");

        assert_eq!(file.name(), "notes.txt");
        assert_eq!(file.kind(), EntryKind::File);
        assert!(file.absolute_path().is_absolute());
        assert!(!file.is_loaded());
    }

    #[test]
    fn construction_on_a_directory_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let result = FileNode::new(temp_dir.path());

        match result {
            Err(TreeError::NotFoundError {
                expected, found, ..
            }) => {
                assert_eq!(expected, EntryKind::File);
                assert_eq!(found, EntryClass::Folder);
            }
            other => panic!("Expected NotFoundError, got {other:?}"),
        }
    }

    #[test]
    fn construction_on_a_missing_path_is_not_found() {
        let result = FileNode::new("/this/path/does/not/exist.txt");
        assert!(matches!(
            result,
            Err(TreeError::NotFoundError {
                found: EntryClass::Missing,
                ..
            })
        ));
    }

    #[test]
    fn attributes_are_loaded_on_first_access() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_file(temp_dir.path(), "data.bin", "12345");
        let file = FileNode::new(&path).unwrap();

        assert_eq!(file.size().unwrap(), 5);
        assert!(file.is_loaded());
        assert!(file.modify_time().unwrap() > SystemTime::UNIX_EPOCH);
        assert!(file.access_time().is_ok());
        assert!(file.change_time().is_ok());
    }

    #[test]
    fn deletion_before_first_access_surfaces_as_load_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_file(temp_dir.path(), "short-lived.txt", "bye");
        let file = FileNode::new(&path).unwrap();

        fs::remove_file(&path).unwrap();

        match file.content_hash() {
            Err(TreeError::LoadError { path: failed, .. }) => {
                assert_eq!(failed, file.absolute_path());
            }
            other => panic!("Expected LoadError, got {other:?}"),
        }
        assert!(!file.is_loaded());
    }

    #[test]
    fn loaded_attributes_survive_deletion() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_file(temp_dir.path(), "kept.txt", "snapshot");
        let file = FileNode::new(&path).unwrap();
        let hash = file.content_hash().unwrap();

        fs::remove_file(&path).unwrap();

        assert_eq!(file.content_hash().unwrap(), hash);
        assert_eq!(file.size().unwrap(), 8);
    }

    #[test]
    fn explicit_load_twice_is_already_loaded() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_file(temp_dir.path(), "once.txt", "x");
        let file = FileNode::new(&path).unwrap();

        file.load().expect("First load should succeed");

        assert!(matches!(
            file.load(),
            Err(TreeError::AlreadyLoadedError { .. })
        ));
    }

    #[test]
    fn explicit_load_after_implicit_load_is_already_loaded() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = write_file(temp_dir.path(), "once.txt", "x");
        let file = FileNode::new(&path).unwrap();

        file.size().unwrap();

        assert!(matches!(
            file.load(),
            Err(TreeError::AlreadyLoadedError { .. })
        ));
    }

    #[test]
    fn same_contents_ignores_names_and_timestamps() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let a = FileNode::new(write_file(temp_dir.path(), "a.txt", "same")).unwrap();
        let b = FileNode::new(write_file(temp_dir.path(), "nested/b.txt", "same")).unwrap();
        let c = FileNode::new(write_file(temp_dir.path(), "c.txt", "diff")).unwrap();

        assert!(a.same_contents(&b).unwrap());
        assert!(b.same_contents(&a).unwrap());
        assert!(!a.same_contents(&c).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_quasi_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink("nowhere", &link).unwrap();

        let file = FileNode::new(&link).expect("Symlinks should be accepted");

        assert_eq!(file.kind(), EntryKind::Other);
        assert!(file.content_hash().is_ok());
    }
}
