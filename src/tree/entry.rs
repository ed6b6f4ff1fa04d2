use std::path::Path;

use derive_more::Display;

use crate::tree::{FileNode, FolderNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EntryKind {
    #[display("file")]
    File,
    #[display("folder")]
    Folder,
    #[display("other")]
    Other,
}

/// A borrowed child of a [`FolderNode`], as produced by listings and traversals.
///
/// `Other` entries (symlinks, sockets, ...) are backed by a [`FileNode`] and
/// behave as quasi-files everywhere.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    File(&'a FileNode),
    Folder(&'a FolderNode),
    Other(&'a FileNode),
}

impl<'a> Entry<'a> {
    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::File(_) => EntryKind::File,
            Entry::Folder(_) => EntryKind::Folder,
            Entry::Other(_) => EntryKind::Other,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Entry::File(file) | Entry::Other(file) => file.name(),
            Entry::Folder(folder) => folder.name(),
        }
    }

    pub fn absolute_path(&self) -> &'a Path {
        match self {
            Entry::File(file) | Entry::Other(file) => file.absolute_path(),
            Entry::Folder(folder) => folder.absolute_path(),
        }
    }

    /// The backing file node for both `File` and `Other` entries.
    pub fn as_file(&self) -> Option<&'a FileNode> {
        match self {
            Entry::File(file) | Entry::Other(file) => Some(file),
            Entry::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&'a FolderNode> {
        match self {
            Entry::Folder(folder) => Some(folder),
            _ => None,
        }
    }
}

impl<'a> From<&'a FileNode> for Entry<'a> {
    fn from(file: &'a FileNode) -> Self {
        match file.kind() {
            EntryKind::Other => Entry::Other(file),
            _ => Entry::File(file),
        }
    }
}

impl<'a> From<&'a FolderNode> for Entry<'a> {
    fn from(folder: &'a FolderNode) -> Self {
        Entry::Folder(folder)
    }
}
