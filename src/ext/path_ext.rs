use std::path::{Component, Path, PathBuf};

/// Lexically normalizes `.` and `..` without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !components.is_empty()
                    && !matches!(
                        components.last(),
                        Some(Component::RootDir) | Some(Component::Prefix(_))
                    )
                {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait PathExt {
    /// Absolute, normalized form of the path. Never resolves symlinks.
    fn to_absolute(&self) -> PathBuf;

    /// Absolute path with every symlink resolved, or [`PathExt::to_absolute`]
    /// when the path cannot be resolved.
    fn to_canonical(&self) -> PathBuf;

    /// Like [`PathExt::to_canonical`] for every component but the last, so a
    /// symlink named by the path stays a symlink.
    fn to_canonical_parent(&self) -> PathBuf;

    /// Display string used in error messages and logs.
    fn best_effort_path_display(&self) -> String;

    /// Final component as an owned string, or an empty string for roots.
    fn file_name_string(&self) -> String;

    /// Path of `self` relative to `root`, or `self` unchanged when it is not
    /// located under `root`.
    fn relative_to(&self, root: &Path) -> PathBuf;
}

impl PathExt for Path {
    fn to_absolute(&self) -> PathBuf {
        let absolute = std::path::absolute(self).unwrap_or_else(|_| self.to_path_buf());
        normalize_path(&absolute)
    }

    fn to_canonical(&self) -> PathBuf {
        std::fs::canonicalize(self).unwrap_or_else(|_| self.to_absolute())
    }

    fn to_canonical_parent(&self) -> PathBuf {
        let absolute = self.to_absolute();
        match (absolute.parent(), absolute.file_name()) {
            (Some(parent), Some(name)) => parent.to_canonical().join(name),
            _ => absolute,
        }
    }

    fn best_effort_path_display(&self) -> String {
        self.to_absolute().display().to_string()
    }

    fn file_name_string(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn relative_to(&self, root: &Path) -> PathBuf {
        self.strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.to_path_buf())
    }
}

impl PathExt for PathBuf {
    fn to_absolute(&self) -> PathBuf {
        self.as_path().to_absolute()
    }

    fn to_canonical(&self) -> PathBuf {
        self.as_path().to_canonical()
    }

    fn to_canonical_parent(&self) -> PathBuf {
        self.as_path().to_canonical_parent()
    }

    fn best_effort_path_display(&self) -> String {
        self.as_path().best_effort_path_display()
    }

    fn file_name_string(&self) -> String {
        self.as_path().file_name_string()
    }

    fn relative_to(&self, root: &Path) -> PathBuf {
        self.as_path().relative_to(root)
    }
}
