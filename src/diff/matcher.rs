use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::path::PathBuf;

use crate::diff::FilePair;
use crate::hashing::ContentHash;
use crate::tree::{FileNode, TreeError};

/// A file awaiting classification, with its attributes loaded up front.
pub(crate) struct Candidate<'a> {
    pub(crate) relative_path: PathBuf,
    pub(crate) node: &'a FileNode,
    pub(crate) size: u64,
    pub(crate) hash: ContentHash,
}

impl<'a> Candidate<'a> {
    pub(crate) fn load(relative_path: PathBuf, node: &'a FileNode) -> Result<Self, TreeError> {
        Ok(Self {
            relative_path,
            size: node.size()?,
            hash: node.content_hash()?,
            node,
        })
    }
}

/// Files not yet claimed by any pass, in their original order.
pub(crate) struct Pool<'a> {
    slots: Vec<Option<Candidate<'a>>>,
}

impl<'a> Pool<'a> {
    pub(crate) fn new(candidates: Vec<Candidate<'a>>) -> Self {
        Self {
            slots: candidates.into_iter().map(Some).collect(),
        }
    }

    pub(crate) fn into_remaining(self) -> Vec<&'a FileNode> {
        self.slots.into_iter().flatten().map(|candidate| candidate.node).collect()
    }
}

/// Pairs every remaining file of `first` with the earliest remaining file of
/// `second` that has the same key, removing both from their pools.
pub(crate) fn match_by<'a, K, F>(first: &mut Pool<'a>, second: &mut Pool<'a>, key: F) -> Vec<FilePair<'a>>
where
    K: Eq + Hash,
    F: Fn(&Candidate<'a>) -> K,
{
    let mut by_key: HashMap<K, VecDeque<usize>> = HashMap::new();
    for (index, slot) in second.slots.iter().enumerate() {
        if let Some(candidate) = slot {
            by_key.entry(key(candidate)).or_default().push_back(index);
        }
    }

    let mut pairs = Vec::new();
    for slot in first.slots.iter_mut() {
        let Some(candidate) = slot else {
            continue;
        };
        let Some(index) = by_key.get_mut(&key(candidate)).and_then(VecDeque::pop_front) else {
            continue;
        };
        if let (Some(left), Some(right)) = (slot.take(), second.slots[index].take()) {
            pairs.push(FilePair {
                first: left.node,
                second: right.node,
            });
        }
    }
    pairs
}
