use std::str::FromStr;

use derive_more::Display;
use tracing::debug;

use crate::traversal::{RecursionDecision, Traversal};
use crate::tree::{FileNode, FolderNode, InvalidArgumentSnafu, TreeError};

/// Folder names the built-in walks never descend into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipList {
    names: Vec<String>,
}

impl SkipList {
    pub const DEFAULT_NAMES: [&'static str; 2] = [".git", "node_modules"];

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Exact, case-sensitive match.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|skipped| skipped == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for SkipList {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAMES)
    }
}

/// The built-in walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum TraversalPreset {
    /// Pre-order, every entry; skipped folders are yielded but not entered.
    #[default]
    #[display("default")]
    DefaultRecursive,
    /// Files only, depth-first.
    #[display("dfs-files")]
    FilesDepthFirst,
    /// Files only, level by level.
    #[display("bfs-files")]
    FilesBreadthFirst,
}

impl TraversalPreset {
    pub const ALL: [TraversalPreset; 3] = [
        TraversalPreset::DefaultRecursive,
        TraversalPreset::FilesDepthFirst,
        TraversalPreset::FilesBreadthFirst,
    ];

    pub fn decide(self, skip: &SkipList, name: &str) -> RecursionDecision {
        let skipped = skip.contains(name);
        match self {
            TraversalPreset::DefaultRecursive if skipped => RecursionDecision::Yield,
            TraversalPreset::DefaultRecursive => RecursionDecision::YieldThenEnterNow,
            _ if skipped => RecursionDecision::Skip,
            TraversalPreset::FilesDepthFirst => RecursionDecision::EnterNow,
            TraversalPreset::FilesBreadthFirst => RecursionDecision::EnterLater,
        }
    }

    /// A reusable decider implementing this preset.
    pub fn decider(
        self,
        skip: SkipList,
    ) -> impl FnMut(&FolderNode, usize, &FolderNode) -> RecursionDecision + Clone {
        move |folder: &FolderNode, _depth: usize, _root: &FolderNode| self.decide(&skip, folder.name())
    }
}

impl FromStr for TraversalPreset {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraversalPreset::ALL
            .into_iter()
            .find(|preset| preset.to_string() == s)
            .ok_or_else(|| {
                InvalidArgumentSnafu {
                    reason: format!("unknown traversal '{s}'"),
                }
                .build()
            })
    }
}

impl FolderNode {
    /// Walks below this folder, letting `decider` choose what happens with
    /// every subfolder reached.
    pub fn traverse<F>(&self, decider: F) -> Traversal<'_, F>
    where
        F: FnMut(&FolderNode, usize, &FolderNode) -> RecursionDecision,
    {
        debug!("Traversing {}", self.absolute_path().display());
        Traversal::new(self, decider)
    }

    pub fn default_recursive(
        &self,
    ) -> Traversal<'_, impl FnMut(&FolderNode, usize, &FolderNode) -> RecursionDecision + Clone> {
        self.default_recursive_with(SkipList::default())
    }

    pub fn default_recursive_with(
        &self,
        skip: SkipList,
    ) -> Traversal<'_, impl FnMut(&FolderNode, usize, &FolderNode) -> RecursionDecision + Clone> {
        self.traverse(TraversalPreset::DefaultRecursive.decider(skip))
    }

    pub fn dfs_files(&self) -> impl Iterator<Item = Result<&FileNode, TreeError>> {
        self.dfs_files_with(SkipList::default())
    }

    pub fn dfs_files_with(&self, skip: SkipList) -> impl Iterator<Item = Result<&FileNode, TreeError>> {
        self.traverse(TraversalPreset::FilesDepthFirst.decider(skip)).files()
    }

    pub fn bfs_files(&self) -> impl Iterator<Item = Result<&FileNode, TreeError>> {
        self.bfs_files_with(SkipList::default())
    }

    pub fn bfs_files_with(&self, skip: SkipList) -> impl Iterator<Item = Result<&FileNode, TreeError>> {
        self.traverse(TraversalPreset::FilesBreadthFirst.decider(skip)).files()
    }
}
