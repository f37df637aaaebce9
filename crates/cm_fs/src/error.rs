use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors of the file helpers, with the path involved.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("`{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("`{}` is locked by another holder", path.display())]
    WouldBlock { path: PathBuf },
}

impl FsError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// The path the failed operation was about.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::WouldBlock { path } => path,
        }
    }
}
