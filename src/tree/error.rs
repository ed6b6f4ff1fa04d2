use std::path::PathBuf;

use snafu::Snafu;

use crate::ext::PathExt;
use crate::filesystem::{EntryClass, FilesystemError};
use crate::tree::EntryKind;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TreeError {
    #[snafu(display(
        "A {} was not found at {} (found: {})",
        expected,
        path.best_effort_path_display(),
        found
    ))]
    NotFoundError {
        path: PathBuf,
        expected: EntryKind,
        found: EntryClass,
    },
    #[snafu(display("Unable to load data from {}", path.best_effort_path_display()))]
    LoadError {
        path: PathBuf,
        source: FilesystemError,
    },
    #[snafu(display(
        "Attempted to load {} which was already loaded",
        path.best_effort_path_display()
    ))]
    AlreadyLoadedError { path: PathBuf },
    #[snafu(display("Invalid argument: {}", reason))]
    InvalidArgumentError { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use snafu::ErrorCompat;

    #[test]
    fn load_error_keeps_its_cause() {
        let error = TreeError::LoadError {
            path: PathBuf::from("/data/file.txt"),
            source: FilesystemError::NotFoundError {
                path: PathBuf::from("/data/file.txt"),
            },
        };

        assert!(error.to_string().contains("Unable to load data from"));
        assert!(error.to_string().contains("/data/file.txt"));
        assert_eq!(error.iter_chain().count(), 2);
    }

    #[test]
    fn not_found_error_display() {
        let error = TreeError::NotFoundError {
            path: PathBuf::from("/data/missing"),
            expected: EntryKind::Folder,
            found: EntryClass::Missing,
        };
        let message = error.to_string();
        assert!(message.contains("A folder was not found"));
        assert!(message.contains("missing"));
    }
}
