//! Filesystem-shaped errors and their OS error codes.

use std::io;

use jsonfs_tree_store::{Error as StoreError, Path};

/// Failure of a filesystem operation, as reported to the host.
#[derive(thiserror::Error, Debug)]
pub enum FsError {
    #[error("no such file or directory: {path}")]
    NotFound { path: Path },

    #[error("not a directory: {path}")]
    NotADirectory { path: Path },

    #[error("is a directory: {path}")]
    IsADirectory { path: Path },

    #[error("file exists: {path}")]
    AlreadyExists { path: Path },

    #[error("invalid data for {path}: {message}")]
    InvalidData { path: Path, message: String },

    #[error("operation not permitted: {path}")]
    PermissionDenied { path: Path },

    #[error("I/O error: {0}")]
    Io(#[source] StoreError),
}

impl FsError {
    /// The `errno` value a kernel filesystem driver reports for this error.
    pub fn errno(&self) -> i32 {
        match self {
            FsError::NotFound { .. } => libc::ENOENT,
            FsError::NotADirectory { .. } => libc::ENOTDIR,
            FsError::IsADirectory { .. } => libc::EISDIR,
            FsError::AlreadyExists { .. } => libc::EEXIST,
            FsError::InvalidData { .. } => libc::EINVAL,
            FsError::PermissionDenied { .. } => libc::EPERM,
            FsError::Io(_) => libc::EIO,
        }
    }
}

impl From<StoreError> for FsError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { path } => FsError::NotFound { path },
            StoreError::NotADirectory { path } => FsError::NotADirectory { path },
            StoreError::IsADirectory { path } => FsError::IsADirectory { path },
            StoreError::AlreadyExists { path } => FsError::AlreadyExists { path },
            other => FsError::Io(other),
        }
    }
}

impl From<FsError> for io::Error {
    fn from(error: FsError) -> Self {
        let kind = match &error {
            FsError::NotFound { .. } => io::ErrorKind::NotFound,
            FsError::NotADirectory { .. } => io::ErrorKind::NotADirectory,
            FsError::IsADirectory { .. } => io::ErrorKind::IsADirectory,
            FsError::AlreadyExists { .. } => io::ErrorKind::AlreadyExists,
            FsError::InvalidData { .. } => io::ErrorKind::InvalidData,
            FsError::PermissionDenied { .. } => io::ErrorKind::PermissionDenied,
            FsError::Io(_) => io::ErrorKind::Other,
        };
        io::Error::new(kind, error)
    }
}
