use tracing::debug;

use crate::traversal::RecursionDecision;
use crate::tree::{Entry, FileNode, FolderNode, TreeError};

/// Walk state of one folder whose children are being emitted.
struct Frame<'a> {
    folder: &'a FolderNode,
    depth: usize,
    next_child: usize,
    deferred: Vec<&'a FolderNode>,
    next_deferred: usize,
    yield_on_exit: bool,
}

impl<'a> Frame<'a> {
    fn new(folder: &'a FolderNode, depth: usize, yield_on_exit: bool) -> Self {
        Self {
            folder,
            depth,
            next_child: 0,
            deferred: Vec::new(),
            next_deferred: 0,
            yield_on_exit,
        }
    }
}

/// Lazy, single-pass traversal of the entries below a root folder.
///
/// The decider receives `(folder, depth, traversal_root)`, where the direct
/// children of the root are at depth 0. Folders are only shallow-loaded when the
/// walk actually reaches their children. A load failure is yielded once and ends
/// the traversal.
pub struct Traversal<'a, F> {
    root: &'a FolderNode,
    decider: F,
    stack: Vec<Frame<'a>>,
}

impl<'a, F> Traversal<'a, F>
where
    F: FnMut(&FolderNode, usize, &FolderNode) -> RecursionDecision,
{
    pub fn new(root: &'a FolderNode, decider: F) -> Self {
        Self {
            root,
            decider,
            stack: vec![Frame::new(root, 0, false)],
        }
    }

    /// Keeps only files and quasi-files.
    pub fn files(self) -> impl Iterator<Item = Result<&'a FileNode, TreeError>> {
        self.filter_map(|item| match item {
            Ok(entry) => entry.as_file().map(Ok),
            Err(e) => Some(Err(e)),
        })
    }

    fn halt(&mut self) {
        self.stack.clear();
    }
}

impl<'a, F> Iterator for Traversal<'a, F>
where
    F: FnMut(&FolderNode, usize, &FolderNode) -> RecursionDecision,
{
    type Item = Result<Entry<'a>, TreeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let folder = frame.folder;

            let listing = folder
                .files()
                .and_then(|files| Ok((files, folder.subfolders()?)));
            let (files, subfolders) = match listing {
                Ok(listing) => listing,
                Err(e) => {
                    self.halt();
                    return Some(Err(e));
                }
            };

            if frame.next_child < files.len() + subfolders.len() {
                let index = frame.next_child;
                frame.next_child += 1;

                if index < files.len() {
                    return Some(Ok(Entry::from(&files[index])));
                }

                let subfolder = &subfolders[index - files.len()];
                let depth = frame.depth;
                let decision = (self.decider)(subfolder, depth, self.root);

                match decision {
                    RecursionDecision::YieldThenEnterNow => {
                        self.stack.push(Frame::new(subfolder, depth + 1, false));
                        return Some(Ok(Entry::Folder(subfolder)));
                    }
                    RecursionDecision::EnterNowThenYield => {
                        self.stack.push(Frame::new(subfolder, depth + 1, true));
                    }
                    RecursionDecision::YieldThenEnterLater => {
                        frame.deferred.push(subfolder);
                        return Some(Ok(Entry::Folder(subfolder)));
                    }
                    RecursionDecision::Yield => return Some(Ok(Entry::Folder(subfolder))),
                    RecursionDecision::EnterNow => {
                        self.stack.push(Frame::new(subfolder, depth + 1, false));
                    }
                    RecursionDecision::EnterLater => frame.deferred.push(subfolder),
                    RecursionDecision::Skip => {}
                    RecursionDecision::YieldThenHalt => {
                        debug!("Traversal halted after {}", subfolder.absolute_path().display());
                        self.halt();
                        return Some(Ok(Entry::Folder(subfolder)));
                    }
                    RecursionDecision::Halt => {
                        debug!("Traversal halted at {}", subfolder.absolute_path().display());
                        self.halt();
                        return None;
                    }
                }
            } else if frame.next_deferred < frame.deferred.len() {
                let deferred = frame.deferred[frame.next_deferred];
                let depth = frame.depth;
                frame.next_deferred += 1;
                self.stack.push(Frame::new(deferred, depth + 1, false));
            } else {
                let finished = self.stack.pop()?;
                if finished.yield_on_exit {
                    return Some(Ok(Entry::Folder(finished.folder)));
                }
            }
        }
    }
}
