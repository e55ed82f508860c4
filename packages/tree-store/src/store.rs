//! The tree store: a document tree bound to its storage backend.

use crate::{Error, Storage, Tree, DEFAULT_INDENT};

/// Owns a [`Tree`] and keeps its storage backend in step with it.
///
/// Every call to [`TreeStore::mutate`] that succeeds re-serializes the whole
/// tree and stores it before returning, so the persisted document never lags
/// the in-memory one.
///
/// # Example
///
/// ```rust
/// use jsonfs_tree_store::{path, MemoryStorage, Node, TreeStore};
///
/// let mut store = TreeStore::open(MemoryStorage::with_bytes(r#"{"a": 1}"#)).unwrap();
/// store
///     .mutate(|tree| tree.insert(&path!("/"), "b", Node::directory()).map(|_| ()))
///     .unwrap();
///
/// let storage = store.close().unwrap();
/// assert_eq!(
///     storage.bytes().unwrap(),
///     b"{\n    \"a\": 1,\n    \"b\": {}\n}"
/// );
/// ```
#[derive(Debug)]
pub struct TreeStore<S: Storage> {
    tree: Tree,
    storage: S,
    indent: usize,
}

impl<S: Storage> TreeStore<S> {
    /// Load the document from `storage`, or start empty if nothing has been
    /// persisted yet.
    pub fn open(storage: S) -> Result<Self, Error> {
        Self::open_with_indent(storage, DEFAULT_INDENT)
    }

    /// Like [`TreeStore::open`], persisting with `indent` spaces per level.
    pub fn open_with_indent(mut storage: S, indent: usize) -> Result<Self, Error> {
        let tree = match storage.load()? {
            Some(bytes) => Tree::load(&bytes)?,
            None => Tree::new(),
        };
        log::info!(
            "Opened document with {} top-level entries",
            tree.root().as_dir().map_or(0, |entries| entries.len())
        );

        Ok(TreeStore {
            tree,
            storage,
            indent,
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Spaces per indentation level in the persisted document.
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Apply a mutation and persist the result.
    ///
    /// Nothing is stored when `op` fails. Callers must make `op` fail before
    /// it changes the tree.
    pub fn mutate<T, E>(&mut self, op: impl FnOnce(&mut Tree) -> Result<T, E>) -> Result<T, E>
    where
        E: From<Error>,
    {
        let result = op(&mut self.tree)?;
        self.flush()?;
        Ok(result)
    }

    /// Serialize the tree and store it.
    pub fn flush(&mut self) -> Result<(), Error> {
        let bytes = self.tree.serialize_with_indent(self.indent)?;
        self.storage.store(&bytes)
    }

    /// Flush one last time and hand back the backend.
    pub fn close(mut self) -> Result<S, Error> {
        self.flush()?;
        log::info!("Closed document");
        Ok(self.storage)
    }
}
