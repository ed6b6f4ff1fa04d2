use std::path::PathBuf;

use derive_more::Display;
use tracing::debug;

use crate::diff::matcher::{Candidate, Pool, match_by};
use crate::ext::PathExt;
use crate::traversal::{RecursionDecision, SkipList, TraversalPreset};
use crate::tree::{FileNode, FolderNode, TreeError};

/// A file on the first side related to a file on the second side.
#[derive(Debug, Clone, Copy)]
pub struct FilePair<'a> {
    pub first: &'a FileNode,
    pub second: &'a FileNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[display(
    "{unchanged} unchanged, {renamed} renamed, {modified} modified, \
     {extra_on_first} only in first, {extra_on_second} only in second"
)]
pub struct DiffStats {
    pub unchanged: usize,
    pub renamed: usize,
    pub modified: usize,
    pub extra_on_first: usize,
    pub extra_on_second: usize,
}

/// Classification of two file universes into five disjoint sets.
///
/// Files are matched in three passes, each removing its matches from both pools:
/// same relative path and same contents (`unchanged`), same contents
/// (`renamed`), then same relative path (`modified`). Whatever is left is
/// `extra_on_first` / `extra_on_second`. When several candidates qualify in a
/// pass, which one is paired is unspecified.
///
/// The result is computed once from the nodes' snapshots and borrows them.
#[derive(Debug, Clone, Default)]
pub struct FolderDiff<'a> {
    extra_on_first: Vec<&'a FileNode>,
    extra_on_second: Vec<&'a FileNode>,
    unchanged: Vec<FilePair<'a>>,
    renamed: Vec<FilePair<'a>>,
    modified: Vec<FilePair<'a>>,
}

impl<'a> FolderDiff<'a> {
    /// Diffs every file reachable through the default recursive walk.
    pub fn between_folders(first: &'a FolderNode, second: &'a FolderNode) -> Result<Self, TreeError> {
        Self::between_folders_with(
            first,
            second,
            TraversalPreset::DefaultRecursive.decider(SkipList::default()),
        )
    }

    /// Diffs the files both roots yield under the same decider. Relative paths
    /// are taken from each side's root.
    pub fn between_folders_with<F>(
        first: &'a FolderNode,
        second: &'a FolderNode,
        mut decider: F,
    ) -> Result<Self, TreeError>
    where
        F: FnMut(&FolderNode, usize, &FolderNode) -> RecursionDecision,
    {
        debug!(
            "Diffing {} against {}",
            first.absolute_path().display(),
            second.absolute_path().display()
        );
        let first_files = gather(first, &mut decider)?;
        let second_files = gather(second, &mut decider)?;
        Self::from_collections(first_files, second_files)
    }

    /// Diffs two flat collections of `(relative_path, file)` pairs.
    pub fn from_collections(
        first: Vec<(PathBuf, &'a FileNode)>,
        second: Vec<(PathBuf, &'a FileNode)>,
    ) -> Result<Self, TreeError> {
        let mut first = Pool::new(load_all(first)?);
        let mut second = Pool::new(load_all(second)?);

        let unchanged = match_by(&mut first, &mut second, |candidate| {
            (candidate.relative_path.clone(), candidate.size, candidate.hash)
        });
        let renamed = match_by(&mut first, &mut second, |candidate| (candidate.size, candidate.hash));
        let modified = match_by(&mut first, &mut second, |candidate| candidate.relative_path.clone());

        let diff = Self {
            extra_on_first: first.into_remaining(),
            extra_on_second: second.into_remaining(),
            unchanged,
            renamed,
            modified,
        };
        debug!("Diff finished: {}", diff.stats());
        Ok(diff)
    }

    pub fn extra_on_first(&self) -> &[&'a FileNode] {
        &self.extra_on_first
    }

    pub fn extra_on_second(&self) -> &[&'a FileNode] {
        &self.extra_on_second
    }

    pub fn unchanged(&self) -> &[FilePair<'a>] {
        &self.unchanged
    }

    pub fn renamed(&self) -> &[FilePair<'a>] {
        &self.renamed
    }

    pub fn modified(&self) -> &[FilePair<'a>] {
        &self.modified
    }

    /// True when only unchanged files were found, including when both sides are empty.
    pub fn no_diffs(&self) -> bool {
        self.extra_on_first.is_empty()
            && self.extra_on_second.is_empty()
            && self.renamed.is_empty()
            && self.modified.is_empty()
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats {
            unchanged: self.unchanged.len(),
            renamed: self.renamed.len(),
            modified: self.modified.len(),
            extra_on_first: self.extra_on_first.len(),
            extra_on_second: self.extra_on_second.len(),
        }
    }
}

fn gather<'a, F>(root: &'a FolderNode, decider: F) -> Result<Vec<(PathBuf, &'a FileNode)>, TreeError>
where
    F: FnMut(&FolderNode, usize, &FolderNode) -> RecursionDecision,
{
    root.traverse(decider)
        .files()
        .map(|file| file.map(|file| (file.absolute_path().relative_to(root.absolute_path()), file)))
        .collect()
}

fn load_all<'a>(files: Vec<(PathBuf, &'a FileNode)>) -> Result<Vec<Candidate<'a>>, TreeError> {
    files
        .into_iter()
        .map(|(relative_path, node)| Candidate::load(relative_path, node))
        .collect()
}

impl FolderNode {
    /// Recursive diff gathering files from both sides with the same decider.
    pub fn compare<'a, F>(&'a self, other: &'a FolderNode, decider: F) -> Result<FolderDiff<'a>, TreeError>
    where
        F: FnMut(&FolderNode, usize, &FolderNode) -> RecursionDecision,
    {
        FolderDiff::between_folders_with(self, other, decider)
    }

    /// Recursive diff over the default walk.
    pub fn compare_recursive<'a>(&'a self, other: &'a FolderNode) -> Result<FolderDiff<'a>, TreeError> {
        FolderDiff::between_folders(self, other)
    }

    /// Diffs the direct files of both folders, keyed by file name.
    pub fn compare_files_shallow<'a>(&'a self, other: &'a FolderNode) -> Result<FolderDiff<'a>, TreeError> {
        let keyed = |folder: &'a FolderNode| -> Result<Vec<(PathBuf, &'a FileNode)>, TreeError> {
            Ok(folder
                .files()?
                .iter()
                .map(|file| (PathBuf::from(file.name()), file))
                .collect())
        };
        FolderDiff::from_collections(keyed(self)?, keyed(other)?)
    }
}
