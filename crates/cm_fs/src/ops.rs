use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::FsError;

/// Replaces the contents of `path` in one step.
///
/// The bytes go to a temporary file in the same directory, which is synced
/// and then renamed over `path`. Readers see the old or the new contents,
/// never a partial write.
///
/// ```
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("config.toml");
///
/// cm_fs::write_atomic(&path, b"a = 1\n").unwrap();
/// cm_fs::write_atomic(&path, b"a = 2\n").unwrap();
/// assert_eq!(std::fs::read_to_string(&path).unwrap(), "a = 2\n");
/// ```
pub fn write_atomic(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<(), FsError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(FsError::io(dir))?;
    temp.write_all(contents.as_ref()).map_err(FsError::io(temp.path()))?;
    temp.as_file().sync_all().map_err(FsError::io(temp.path()))?;
    temp.persist(path).map_err(|err| FsError::Io {
        path: path.to_path_buf(),
        source: err.error,
    })?;

    debug!("wrote `{}` atomically", path.display());
    Ok(())
}

/// Reads `path` to a string, `None` when it does not exist.
pub fn read_to_string_opt(path: impl AsRef<Path>) -> Result<Option<String>, FsError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(FsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Removes a file, a symlink or a whole directory tree.
///
/// Returns `false` when nothing was there.
pub fn remove_quietly(path: impl AsRef<Path>) -> Result<bool, FsError> {
    let path = path.as_ref();
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(false),
        Err(source) => {
            return Err(FsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match removed {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(FsError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{read_to_string_opt, remove_quietly, write_atomic};

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_to_string_opt(dir.path().join("absent")).unwrap(), None);

        write_atomic(dir.path().join("present"), "x").unwrap();
        assert_eq!(read_to_string_opt(dir.path().join("present")).unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn reading_a_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_to_string_opt(dir.path()).unwrap_err();
        assert_eq!(err.path(), dir.path());
    }

    #[test]
    fn remove_trees_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("a/b");
        std::fs::create_dir_all(&tree).unwrap();
        std::fs::write(tree.join("f"), "1").unwrap();

        assert!(remove_quietly(dir.path().join("a")).unwrap());
        assert!(!dir.path().join("a").exists());
        assert!(!remove_quietly(dir.path().join("a")).unwrap());
    }

    #[test]
    fn atomic_write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_atomic(&path, "{}").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
