//! Backends that hold the persisted document.

use std::io::Write;
use std::{fs, io, path};

use crate::Error;

/// Where the serialized document lives between runs.
pub trait Storage: Send {
    /// Read the persisted document.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing has been persisted yet.
    /// * `Ok(Some(bytes))` - The persisted document.
    /// * `Err(Error)` - The backend could not be read.
    fn load(&mut self) -> Result<Option<Vec<u8>>, Error>;

    /// Replace the persisted document with `bytes`.
    fn store(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

/// A JSON document file on local disk.
///
/// Every store writes the full document to a temporary file next to the
/// target and renames it into place, so readers see either the previous or
/// the new document, never a partial one. The replacement keeps the
/// permissions of the file it replaces, and a symlinked document is written
/// through to the file the link points at.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: path::PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn storage_error(&self, source: io::Error) -> Error {
        Error::Storage {
            path: self.path.clone(),
            source,
        }
    }

    /// The file that actually gets replaced: the symlink target when the
    /// document is a link, otherwise the document path itself.
    fn target(&self) -> path::PathBuf {
        fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
    }
}

fn staging_directory(target: &path::Path) -> &path::Path {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => path::Path::new("."),
    }
}

impl Storage for JsonFileStorage {
    fn load(&mut self) -> Result<Option<Vec<u8>>, Error> {
        log::debug!("Reading {}...", self.path.display());
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                log::info!(
                    "{} does not exist yet, starting from an empty document",
                    self.path.display()
                );
                Ok(None)
            }
            Err(error) => Err(self.storage_error(error)),
        }
    }

    fn store(&mut self, bytes: &[u8]) -> Result<(), Error> {
        log::debug!("Writing {} ({} bytes)...", self.path.display(), bytes.len());

        let target = self.target();
        let mut staged = tempfile::NamedTempFile::new_in(staging_directory(&target))
            .map_err(|error| self.storage_error(error))?;
        if let Ok(metadata) = fs::metadata(&target) {
            staged
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|error| self.storage_error(error))?;
        }
        staged
            .write_all(bytes)
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|error| self.storage_error(error))?;
        staged
            .persist(&target)
            .map_err(|error| self.storage_error(error.error))?;

        Ok(())
    }
}

/// Keeps the persisted document in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    bytes: Option<Vec<u8>>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already persisted document.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
            writes: 0,
        }
    }

    /// The last persisted document, if any.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Number of times the document has been stored.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn load(&mut self) -> Result<Option<Vec<u8>>, Error> {
        Ok(self.bytes.clone())
    }

    fn store(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.bytes = Some(bytes.to_vec());
        self.writes += 1;
        Ok(())
    }
}
