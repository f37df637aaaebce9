use std::fs::{self, File, OpenOptions, TryLockError};
use std::path::{Path, PathBuf};

use log::{trace, warn};

use crate::FsError;

// -----------------------------------------------------------------------------
// FileLock

/// An advisory lock on a file, released on drop.
///
/// The lock file is created, with its parent directories, if missing. Its
/// contents are left untouched.
///
/// # Examples
///
/// ```
/// use cm_fs::{FileLock, FsError};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("app.lock");
///
/// let held = FileLock::exclusive(&path).unwrap();
/// assert!(matches!(FileLock::try_exclusive(&path), Err(FsError::WouldBlock { .. })));
///
/// drop(held);
/// assert!(FileLock::try_exclusive(&path).is_ok());
/// ```
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
    shared: bool,
}

impl FileLock {
    /// Blocks until an exclusive lock is held.
    pub fn exclusive(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let (file, path) = open(path.as_ref())?;
        file.lock().map_err(FsError::io(&path))?;
        trace!("exclusive lock on `{}`", path.display());
        Ok(Self { file, path, shared: false })
    }

    /// Blocks until a shared lock is held.
    pub fn shared(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let (file, path) = open(path.as_ref())?;
        file.lock_shared().map_err(FsError::io(&path))?;
        trace!("shared lock on `{}`", path.display());
        Ok(Self { file, path, shared: true })
    }

    /// Takes an exclusive lock, or fails with [`FsError::WouldBlock`].
    pub fn try_exclusive(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let (file, path) = open(path.as_ref())?;
        match file.try_lock() {
            Ok(()) => Ok(Self { file, path, shared: false }),
            Err(TryLockError::WouldBlock) => Err(FsError::WouldBlock { path }),
            Err(TryLockError::Error(source)) => Err(FsError::Io { path, source }),
        }
    }

    /// Takes a shared lock, or fails with [`FsError::WouldBlock`].
    pub fn try_shared(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let (file, path) = open(path.as_ref())?;
        match file.try_lock_shared() {
            Ok(()) => Ok(Self { file, path, shared: true }),
            Err(TryLockError::WouldBlock) => Err(FsError::WouldBlock { path }),
            Err(TryLockError::Error(source)) => Err(FsError::Io { path, source }),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// The locked file, opened for reading and writing.
    #[inline]
    pub fn file(&self) -> &File {
        &self.file
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        match self.file.unlock() {
            Ok(()) => trace!("released lock on `{}`", self.path.display()),
            Err(err) => warn!("failed to release lock on `{}`: {err}", self.path.display()),
        }
    }
}

fn open(path: &Path) -> Result<(File, PathBuf), FsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(FsError::io(parent))?;
    }
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(FsError::io(path))?;
    Ok((file, path.to_path_buf()))
}

/// Runs `f` while holding an exclusive lock on `path`.
///
/// ```
/// let dir = tempfile::tempdir().unwrap();
/// let lock = dir.path().join("counter.lock");
/// let value = cm_fs::with_file_lock(&lock, || 1 + 1).unwrap();
/// assert_eq!(value, 2);
/// ```
pub fn with_file_lock<R>(path: impl AsRef<Path>, f: impl FnOnce() -> R) -> Result<R, FsError> {
    let _lock = FileLock::exclusive(path)?;
    Ok(f())
}

#[cfg(test)]
mod tests {
    use super::FileLock;
    use crate::FsError;

    #[test]
    fn shared_locks_coexist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state.lock");

        let a = FileLock::shared(&path).unwrap();
        let b = FileLock::try_shared(&path).unwrap();
        assert!(a.is_shared() && b.is_shared());
        assert!(matches!(FileLock::try_exclusive(&path), Err(FsError::WouldBlock { .. })));

        drop((a, b));
        let c = FileLock::try_exclusive(&path).unwrap();
        assert_eq!(c.path(), path);
        assert!(matches!(FileLock::try_shared(&path), Err(FsError::WouldBlock { .. })));
    }

    #[test]
    fn contents_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data");
        std::fs::write(&path, "payload").unwrap();

        drop(FileLock::exclusive(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "payload");
    }
}
