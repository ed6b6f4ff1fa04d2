//! Scratch-tree helpers shared by the unit tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Writes `content` to `root/relative`, creating missing parent folders.
pub(crate) fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent folders");
    }
    fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Creates the folder `root/relative` and any missing parents.
pub(crate) fn make_folder(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(&path).expect("Failed to create test folder");
    path
}

/// Recursively copies the folder `from` into `to`.
pub(crate) fn copy_tree(from: &Path, to: &Path) {
    fs::create_dir_all(to).expect("Failed to create copy destination");
    for entry in fs::read_dir(from).expect("Failed to list copy source") {
        let entry = entry.expect("Failed to read directory entry");
        let target = to.join(entry.file_name());
        if entry.file_type().expect("Failed to read file type").is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).expect("Failed to copy file");
        }
    }
}

/// Deterministic pseudo-random tree: `file_count` files with unique names and
/// unique contents spread over nested folders. Returns the file names.
pub(crate) fn fill_tree(root: &Path, file_count: usize, seed: u64) -> Vec<String> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        state >> 33
    };

    let mut folders = vec![PathBuf::new()];
    let mut names = Vec::with_capacity(file_count);
    for index in 0..file_count {
        if next() % 4 == 0 {
            let parent = folders[(next() as usize) % folders.len()].clone();
            folders.push(parent.join(format!("dir-{index}-{}", next() % 1000)));
        }
        let folder = &folders[(next() as usize) % folders.len()];
        let name = format!("file-{index}-{}.txt", next() % 1000);
        let relative = folder.join(&name);
        write_file(
            root,
            relative.to_str().expect("Generated paths are UTF-8"),
            &format!("content {index} {}", next()),
        );
        names.push(name);
    }
    names
}
