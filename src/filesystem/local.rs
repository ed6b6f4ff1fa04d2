use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::trace;

use crate::ext::{MetadataTimesExt, PathExt};
use crate::filesystem::{EntryClass, FileInspection, FilesystemAdapter, FilesystemError};
use crate::hashing::ContentHasher;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// [`FilesystemAdapter`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    fn hash_regular_file(path: &Path) -> Result<ContentHasher, FilesystemError> {
        let file = File::open(path).map_err(|e| FilesystemError::from_io(path, e))?;
        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        let mut hasher = ContentHasher::new();

        loop {
            let read = reader
                .read(&mut buffer)
                .map_err(|e| FilesystemError::from_io(path, e))?;
            if read == 0 {
                break;
            }
            hasher.write(&buffer[..read]);
        }

        Ok(hasher)
    }
}

impl FilesystemAdapter for LocalFilesystem {
    fn classify(&self, path: &Path) -> Result<EntryClass, FilesystemError> {
        match fs::symlink_metadata(path) {
            Ok(metadata) => {
                let file_type = metadata.file_type();
                Ok(if file_type.is_dir() {
                    EntryClass::Folder
                } else if file_type.is_file() {
                    EntryClass::File
                } else {
                    EntryClass::Other
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(EntryClass::Missing),
            Err(e) => Err(FilesystemError::from_io(path, e)),
        }
    }

    fn list_children(&self, folder: &Path) -> Result<Vec<OsString>, FilesystemError> {
        fs::read_dir(folder)
            .map_err(|e| FilesystemError::from_io(folder, e))?
            .map(|entry| {
                entry
                    .map(|entry| entry.file_name())
                    .map_err(|e| FilesystemError::from_io(folder, e))
            })
            .collect()
    }

    fn inspect_file(&self, path: &Path) -> Result<FileInspection, FilesystemError> {
        trace!("Inspecting {}", path.best_effort_path_display());
        let metadata = fs::symlink_metadata(path).map_err(|e| FilesystemError::from_io(path, e))?;
        let file_type = metadata.file_type();

        // Symlinks are fingerprinted by their target path, special files by nothing at all.
        let hasher = if file_type.is_file() {
            Self::hash_regular_file(path)?
        } else if file_type.is_symlink() {
            let target = fs::read_link(path).map_err(|e| FilesystemError::from_io(path, e))?;
            let mut hasher = ContentHasher::new();
            hasher.write(target.to_string_lossy().as_bytes());
            hasher
        } else {
            ContentHasher::new()
        };

        let io_error = |e: std::io::Error| FilesystemError::from_io(path, e);
        Ok(FileInspection {
            size: metadata.len(),
            content_hash: hasher.finish(),
            access_time: metadata.access_time().map_err(io_error)?,
            modify_time: metadata.modify_time().map_err(io_error)?,
            change_time: metadata.change_time().map_err(io_error)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn classify_regular_file() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let class = LocalFilesystem.classify(temp_file.path()).unwrap();
        assert_eq!(class, EntryClass::File);
    }

    #[test]
    fn classify_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let class = LocalFilesystem.classify(temp_dir.path()).unwrap();
        assert_eq!(class, EntryClass::Folder);
    }

    #[test]
    fn classify_nonexistent_path_is_missing() {
        let class = LocalFilesystem
            .classify(Path::new("/this/path/does/not/exist.txt"))
            .unwrap();
        assert_eq!(class, EntryClass::Missing);
    }

    #[cfg(unix)]
    #[test]
    fn classify_symlink_is_other_even_when_pointing_at_a_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(temp_dir.path(), &link).expect("Failed to create symlink");

        assert_eq!(LocalFilesystem.classify(&link).unwrap(), EntryClass::Other);
    }

    #[test]
    fn list_children_returns_every_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();

        let mut names = LocalFilesystem.list_children(temp_dir.path()).unwrap();
        names.sort();
        assert_eq!(names, vec![OsString::from("a.txt"), OsString::from("sub")]);
    }

    #[cfg(unix)]
    #[test]
    fn list_children_keeps_non_utf8_names_intact() {
        use std::os::unix::ffi::OsStringExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let raw = OsString::from_vec(b"bad\xffname.txt".to_vec());
        fs::write(temp_dir.path().join(&raw), "x").unwrap();

        let names = LocalFilesystem.list_children(temp_dir.path()).unwrap();
        assert_eq!(names, vec![raw.clone()]);
        assert_eq!(
            LocalFilesystem.classify(&temp_dir.path().join(&raw)).unwrap(),
            EntryClass::File
        );
    }

    #[test]
    fn list_children_of_missing_folder_is_not_found() {
        let result = LocalFilesystem.list_children(Path::new("/this/path/does/not/exist"));
        assert!(matches!(result, Err(FilesystemError::NotFoundError { .. })));
    }

    #[test]
    fn inspect_nonexistent_file_is_not_found() {
        let nonexistent_path = PathBuf::from("/this/path/does/not/exist.txt");
        match LocalFilesystem.inspect_file(&nonexistent_path) {
            Err(FilesystemError::NotFoundError { path }) => assert_eq!(path, nonexistent_path),
            other => panic!("Expected NotFoundError, got {other:?}"),
        }
    }

    #[test]
    fn same_content_same_hash() {
        let mut temp_file1 = NamedTempFile::new().expect("Failed to create temp file 1");
        let mut temp_file2 = NamedTempFile::new().expect("Failed to create temp file 2");
        write!(temp_file1, "identical content").unwrap();
        write!(temp_file2, "identical content").unwrap();

        let first = LocalFilesystem.inspect_file(temp_file1.path()).unwrap();
        let second = LocalFilesystem.inspect_file(temp_file2.path()).unwrap();

        assert_eq!(first.size, second.size);
        assert_eq!(first.content_hash, second.content_hash);
    }

    #[test]
    fn content_change_changes_hash() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "initial content").unwrap();
        temp_file.flush().unwrap();
        let before = LocalFilesystem.inspect_file(temp_file.path()).unwrap();

        write!(temp_file, " and more").unwrap();
        temp_file.flush().unwrap();
        let after = LocalFilesystem.inspect_file(temp_file.path()).unwrap();

        assert_ne!(before.content_hash, after.content_hash);
        assert!(after.size > before.size);
    }

    #[rstest]
    #[case("hello world")]
    #[case("")]
    #[case("special chars: äöü🚀")]
    #[case("multiline\ncontent\nwith\nnewlines")]
    fn inspect_reports_byte_size(#[case] content: &str) {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "{}", content).unwrap();
        temp_file.flush().unwrap();

        let inspection = LocalFilesystem.inspect_file(temp_file.path()).unwrap();
        assert_eq!(inspection.size, content.len() as u64);
    }

    #[test]
    fn inspect_large_file_spanning_many_buffers() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let large_content = "x".repeat(3 * READ_BUFFER_SIZE + 17);
        write!(temp_file, "{}", large_content).unwrap();
        temp_file.flush().unwrap();

        let inspection = LocalFilesystem.inspect_file(temp_file.path()).unwrap();

        let mut expected = ContentHasher::new();
        expected.write(large_content.as_bytes());
        assert_eq!(inspection.size, large_content.len() as u64);
        assert_eq!(inspection.content_hash, expected.finish());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_fingerprinted_by_target() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let link_a = temp_dir.path().join("a");
        let link_b = temp_dir.path().join("b");
        let link_c = temp_dir.path().join("c");
        std::os::unix::fs::symlink("target-one", &link_a).unwrap();
        std::os::unix::fs::symlink("target-one", &link_b).unwrap();
        std::os::unix::fs::symlink("target-two", &link_c).unwrap();

        let a = LocalFilesystem.inspect_file(&link_a).unwrap();
        let b = LocalFilesystem.inspect_file(&link_b).unwrap();
        let c = LocalFilesystem.inspect_file(&link_c).unwrap();

        assert_eq!(a.content_hash, b.content_hash);
        assert_ne!(a.content_hash, c.content_hash);
    }
}
