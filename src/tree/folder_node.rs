use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use snafu::prelude::*;
use tracing::debug;

use crate::ext::PathExt;
use crate::filesystem::{EntryClass, FilesystemAdapter, FilesystemError, LocalFilesystem};
use crate::hashing::{ContentHash, ContentHasher, hash_multiple, sort_lexicographically};
use crate::tree::error::{LoadSnafu, NotFoundSnafu, TreeError};
use crate::tree::{Entry, EntryKind, FileNode};

/// Whether a folder hash or size covers only direct children or the whole subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashDepth {
    Shallow,
    #[default]
    Deep,
}

/// Immediate children, each group sorted by name.
struct FolderChildren {
    files: Vec<FileNode>,
    subfolders: Vec<FolderNode>,
}

/// A folder snapshot.
///
/// The listing of immediate children is read once, on first access to the
/// children, a hash or a size. Shallow and deep hashes and sizes are memoized
/// independently; none of them is ever recomputed, so later filesystem changes
/// are invisible to an existing node. Build a new node to observe them.
pub struct FolderNode {
    absolute_path: PathBuf,
    name: String,
    filesystem: Arc<dyn FilesystemAdapter>,
    children: OnceLock<FolderChildren>,
    shallow_hash: OnceLock<ContentHash>,
    deep_hash: OnceLock<ContentHash>,
    shallow_size: OnceLock<u64>,
    deep_size: OnceLock<u64>,
}

impl FolderNode {
    /// Snapshot of a local folder. Symlinks in `path` are resolved, so the root
    /// may itself be a link to a folder.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        Self::with_filesystem(path.as_ref().to_canonical(), Arc::new(LocalFilesystem))
    }

    pub fn with_filesystem(
        path: impl AsRef<Path>,
        filesystem: Arc<dyn FilesystemAdapter>,
    ) -> Result<Self, TreeError> {
        let absolute_path = path.as_ref().to_absolute();
        let found = filesystem.classify(&absolute_path).context(LoadSnafu {
            path: absolute_path.clone(),
        })?;
        ensure!(
            found == EntryClass::Folder,
            NotFoundSnafu {
                path: absolute_path,
                expected: EntryKind::Folder,
                found,
            }
        );

        Ok(Self::from_parts(absolute_path, filesystem))
    }

    pub(crate) fn from_parts(absolute_path: PathBuf, filesystem: Arc<dyn FilesystemAdapter>) -> Self {
        let name = absolute_path.file_name_string();
        Self {
            absolute_path,
            name,
            filesystem,
            children: OnceLock::new(),
            shallow_hash: OnceLock::new(),
            deep_hash: OnceLock::new(),
            shallow_size: OnceLock::new(),
            deep_size: OnceLock::new(),
        }
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_loaded(&self) -> bool {
        self.children.get().is_some()
    }

    /// Direct files and quasi-files, sorted by name.
    pub fn files(&self) -> Result<&[FileNode], TreeError> {
        Ok(&self.shallow_load()?.files)
    }

    /// Direct subfolders, sorted by name.
    pub fn subfolders(&self) -> Result<&[FolderNode], TreeError> {
        Ok(&self.shallow_load()?.subfolders)
    }

    /// Files first, then subfolders.
    pub fn children(&self) -> Result<Vec<Entry<'_>>, TreeError> {
        let children = self.shallow_load()?;
        Ok(children
            .files
            .iter()
            .map(Entry::from)
            .chain(children.subfolders.iter().map(Entry::from))
            .collect())
    }

    /// Deep hash.
    pub fn hash(&self) -> Result<ContentHash, TreeError> {
        self.deep_hash()
    }

    pub fn hash_with(&self, depth: HashDepth) -> Result<ContentHash, TreeError> {
        match depth {
            HashDepth::Shallow => self.shallow_hash(),
            HashDepth::Deep => self.deep_hash(),
        }
    }

    /// Digest over the direct file names, the sorted direct file hashes and the
    /// subfolder names. Subfolder contents do not contribute.
    pub fn shallow_hash(&self) -> Result<ContentHash, TreeError> {
        if let Some(hash) = self.shallow_hash.get() {
            return Ok(*hash);
        }

        let children = self.shallow_load()?;
        let mut file_hashes = children
            .files
            .iter()
            .map(FileNode::content_hash)
            .collect::<Result<Vec<_>, _>>()?;
        file_hashes.sort();

        let mut hasher = ContentHasher::new();
        hasher.write_part(&(children.files.len() as u64).to_le_bytes());
        for file in &children.files {
            hasher.write_part(file.name().as_bytes());
        }
        for hash in &file_hashes {
            hasher.write_part(&hash.to_be_bytes());
        }
        hasher.write_part(&(children.subfolders.len() as u64).to_le_bytes());
        for subfolder in &children.subfolders {
            hasher.write_part(subfolder.name().as_bytes());
        }

        Ok(*self.shallow_hash.get_or_init(|| hasher.finish()))
    }

    /// Shallow hash combined with the deep hash of every subfolder.
    pub fn deep_hash(&self) -> Result<ContentHash, TreeError> {
        if let Some(hash) = self.deep_hash.get() {
            return Ok(*hash);
        }

        let mut parts = vec![self.shallow_hash()?.to_be_bytes()];
        for subfolder in self.subfolders()? {
            parts.push(subfolder.deep_hash()?.to_be_bytes());
        }

        Ok(*self.deep_hash.get_or_init(|| hash_multiple(&parts)))
    }

    /// Deep size.
    pub fn size(&self) -> Result<u64, TreeError> {
        self.deep_size()
    }

    pub fn size_with(&self, depth: HashDepth) -> Result<u64, TreeError> {
        match depth {
            HashDepth::Shallow => self.shallow_size(),
            HashDepth::Deep => self.deep_size(),
        }
    }

    /// Sum of the sizes of the direct files.
    pub fn shallow_size(&self) -> Result<u64, TreeError> {
        if let Some(size) = self.shallow_size.get() {
            return Ok(*size);
        }

        let size = self
            .files()?
            .iter()
            .map(FileNode::size)
            .sum::<Result<u64, _>>()?;

        Ok(*self.shallow_size.get_or_init(|| size))
    }

    pub fn deep_size(&self) -> Result<u64, TreeError> {
        if let Some(size) = self.deep_size.get() {
            return Ok(*size);
        }

        let nested = self
            .subfolders()?
            .iter()
            .map(FolderNode::deep_size)
            .sum::<Result<u64, _>>()?;
        let size = self.shallow_size()? + nested;

        Ok(*self.deep_size.get_or_init(|| size))
    }

    /// Same direct files and same subfolder names, ignoring subfolder contents.
    pub fn same_contents_shallow(&self, other: &FolderNode) -> Result<bool, TreeError> {
        Ok(self.shallow_hash()? == other.shallow_hash()?)
    }

    pub fn same_contents_deep(&self, other: &FolderNode) -> Result<bool, TreeError> {
        Ok(self.deep_hash()? == other.deep_hash()?)
    }

    fn shallow_load(&self) -> Result<&FolderChildren, TreeError> {
        if let Some(children) = self.children.get() {
            return Ok(children);
        }

        debug!("Shallow-loading {}", self.absolute_path.display());
        let mut names = self
            .filesystem
            .list_children(&self.absolute_path)
            .context(LoadSnafu {
                path: self.absolute_path.clone(),
            })?;
        sort_lexicographically(&mut names);

        let mut files = Vec::new();
        let mut subfolders = Vec::new();
        for name in names {
            let path = self.absolute_path.join(&name);
            let class = self
                .filesystem
                .classify(&path)
                .context(LoadSnafu { path: path.clone() })?;
            let filesystem = Arc::clone(&self.filesystem);
            match class {
                EntryClass::Folder => subfolders.push(FolderNode::from_parts(path, filesystem)),
                EntryClass::File => files.push(FileNode::from_parts(path, EntryKind::File, filesystem)),
                EntryClass::Other => {
                    files.push(FileNode::from_parts(path, EntryKind::Other, filesystem))
                }
                // Listed a moment ago and gone already.
                EntryClass::Missing => {
                    return Err(TreeError::LoadError {
                        path: path.clone(),
                        source: FilesystemError::NotFoundError { path },
                    });
                }
            }
        }
        debug!(
            "Loaded {} files and {} subfolders from {}",
            files.len(),
            subfolders.len(),
            self.absolute_path.display()
        );

        Ok(self
            .children
            .get_or_init(|| FolderChildren { files, subfolders }))
    }
}

impl fmt::Debug for FolderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FolderNode")
            .field("absolute_path", &self.absolute_path)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
