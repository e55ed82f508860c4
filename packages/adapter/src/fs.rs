//! Filesystem operations over a tree store.
//!
//! Each operation parses its path, resolves it against the tree, validates,
//! mutates if needed and persists before returning. Nothing is carried
//! between calls except the handle counter: reads and writes re-resolve by
//! path every time.
//!
//! Write-path operations (`create`, `write`, `mkdir`) create missing parent
//! directories. Every other operation requires the path to exist.

use jsonfs_tree_store::{Node, Path, Storage, Tree, TreeStore};

use crate::{AttrPolicy, FileAttr, FsError};

/// Opaque handle returned by `open` and `create`.
pub type Handle = u64;

/// A JSON document exposed as a filesystem.
///
/// # Example
///
/// ```rust
/// use jsonfs_adapter::JsonFs;
/// use jsonfs_tree_store::MemoryStorage;
///
/// let mut fs = JsonFs::load(MemoryStorage::with_bytes(r#"{"a": 1, "b": {}}"#)).unwrap();
/// assert_eq!(fs.list("/").unwrap(), vec![".", "..", "a", "b"]);
///
/// fs.write("/b/c", b"hello", 0).unwrap();
/// assert_eq!(fs.read("/b/c", 4096, 0).unwrap(), b"hello");
/// ```
pub struct JsonFs<S: Storage> {
    store: TreeStore<S>,
    policy: AttrPolicy,
    next_handle: Handle,
}

impl<S: Storage> JsonFs<S> {
    /// Load the document from `storage` with the default attribute policy.
    pub fn load(storage: S) -> Result<Self, FsError> {
        Ok(Self::new(TreeStore::open(storage)?, AttrPolicy::default()))
    }

    pub fn new(store: TreeStore<S>, policy: AttrPolicy) -> Self {
        JsonFs {
            store,
            policy,
            next_handle: 0,
        }
    }

    pub fn tree(&self) -> &Tree {
        self.store.tree()
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    /// The document as it is persisted, with the store's indentation.
    pub fn document(&self) -> Result<Vec<u8>, FsError> {
        let tree = self.store.tree();
        Ok(tree.serialize_with_indent(self.store.indent())?)
    }

    /// Flush the document and hand back the storage backend.
    pub fn close(self) -> Result<S, FsError> {
        Ok(self.store.close()?)
    }

    /// Attributes of the entry at `path`.
    pub fn stat(&self, path: &str) -> Result<FileAttr, FsError> {
        let path = Path::parse(path);
        let node = self.store.tree().resolve(&path).inspect_err(|error| {
            log::debug!("stat {} failed: {}", path, error);
        })?;
        Ok(self.policy.attr_for(node))
    }

    /// Entry names of the directory at `path`, led by `.` and `..`.
    pub fn list(&self, path: &str) -> Result<Vec<String>, FsError> {
        let path = Path::parse(path);
        let entries = self
            .store
            .tree()
            .resolve(&path)?
            .as_dir()
            .ok_or_else(|| FsError::NotADirectory { path: path.clone() })?;

        let mut names = Vec::with_capacity(entries.len() + 2);
        names.push(".".to_string());
        names.push("..".to_string());
        names.extend(entries.keys().cloned());
        Ok(names)
    }

    /// Up to `size` bytes of the file at `path`, starting at `offset`.
    ///
    /// Reads past the end return fewer bytes, or none at all.
    pub fn read(&self, path: &str, size: usize, offset: u64) -> Result<Vec<u8>, FsError> {
        let path = Path::parse(path);
        let leaf = self
            .store
            .tree()
            .resolve(&path)?
            .as_leaf()
            .ok_or_else(|| FsError::IsADirectory { path: path.clone() })?;

        let content = leaf.render();
        let bytes = content.as_bytes();
        let start = usize::try_from(offset).map_or(bytes.len(), |offset| offset.min(bytes.len()));
        let end = start.saturating_add(size).min(bytes.len());
        Ok(bytes[start..end].to_vec())
    }

    /// Hand out a handle for an existing entry.
    pub fn open(&mut self, path: &str) -> Result<Handle, FsError> {
        self.store.tree().resolve(&Path::parse(path))?;
        Ok(self.allocate_handle())
    }

    /// Create an empty file. Missing parent directories are created.
    pub fn create(&mut self, path: &str) -> Result<Handle, FsError> {
        let path = Path::parse(path);
        let (parent, name) = path
            .split_parent()
            .ok_or_else(|| FsError::AlreadyExists { path: Path::root() })?;

        self.store.mutate(|tree| {
            tree.insert(&parent, name, Node::empty_file())?;
            Ok::<_, FsError>(())
        })?;
        log::debug!("Created file {}", path);
        Ok(self.allocate_handle())
    }

    /// Write `data` to the file at `path`, creating it and any missing
    /// parents if needed.
    ///
    /// At offset 0 the file content is replaced by `data`. At any other
    /// offset `data` is appended to the current content; gaps are never
    /// zero-filled. Returns the number of bytes written.
    pub fn write(&mut self, path: &str, data: &[u8], offset: u64) -> Result<usize, FsError> {
        let path = Path::parse(path);
        let text = std::str::from_utf8(data).map_err(|error| FsError::InvalidData {
            path: path.clone(),
            message: error.to_string(),
        })?;

        self.store.mutate(|tree| {
            let leaf = tree.leaf_or_insert(&path)?;
            if offset == 0 {
                leaf.replace(text);
            } else {
                leaf.append(text);
            }
            Ok::<_, FsError>(())
        })?;
        log::debug!("Wrote {} bytes to {} at offset {}", data.len(), path, offset);
        Ok(data.len())
    }

    /// Cut the file at `path` down to `length` bytes.
    pub fn truncate(&mut self, path: &str, length: u64) -> Result<(), FsError> {
        let path = Path::parse(path);
        let length = usize::try_from(length).unwrap_or(usize::MAX);

        self.store.mutate(|tree| {
            let leaf = tree
                .resolve_mut(&path)?
                .as_leaf_mut()
                .ok_or_else(|| FsError::IsADirectory { path: path.clone() })?;
            leaf.truncate(length);
            Ok::<_, FsError>(())
        })
    }

    /// Remove the entry at `path`, file or directory.
    pub fn unlink(&mut self, path: &str) -> Result<(), FsError> {
        let path = Path::parse(path);
        let (parent, name) = path
            .split_parent()
            .ok_or_else(|| FsError::PermissionDenied { path: Path::root() })?;

        self.store.mutate(|tree| {
            tree.remove(&parent, name)?;
            Ok::<_, FsError>(())
        })?;
        log::debug!("Removed {}", path);
        Ok(())
    }

    /// Remove the entry at `path`. Same as [`JsonFs::unlink`]: directories
    /// are removed together with their contents.
    pub fn rmdir(&mut self, path: &str) -> Result<(), FsError> {
        self.unlink(path)
    }

    /// Create an empty directory. Missing parent directories are created.
    pub fn mkdir(&mut self, path: &str) -> Result<(), FsError> {
        let path = Path::parse(path);
        let (parent, name) = path
            .split_parent()
            .ok_or_else(|| FsError::AlreadyExists { path: Path::root() })?;

        self.store.mutate(|tree| {
            tree.insert(&parent, name, Node::directory())?;
            Ok::<_, FsError>(())
        })?;
        log::debug!("Created directory {}", path);
        Ok(())
    }

    fn allocate_handle(&mut self) -> Handle {
        self.next_handle += 1;
        self.next_handle
    }
}
