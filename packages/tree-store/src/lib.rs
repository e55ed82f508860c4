//! jsonfs tree store
//!
//! Holds a JSON document as a tree of directories and leaves:
//! - `Node`: a directory (JSON object) or a leaf (any other JSON value)
//! - `Path`: slash-separated entry names from the root
//! - `Tree`: path resolution, auto-vivification and structural mutation
//! - `Storage`: where the serialized document is persisted
//! - `TreeStore`: a tree bound to its storage with write-through persistence
//!
//! # Example
//!
//! ```rust
//! use jsonfs_tree_store::{path, Tree};
//!
//! let tree = Tree::load(br#"{"users": {"alice": {"age": 30}}}"#).unwrap();
//! let age = tree.resolve(&path!("/users/alice/age")).unwrap();
//! assert_eq!(age.as_leaf().unwrap().render(), "30");
//! ```

mod error;
mod node;
mod path;
mod storage;
mod store;
mod tree;

pub use error::Error;
pub use node::{Entries, Leaf, Node};
pub use path::Path;
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use store::TreeStore;
pub use tree::{Tree, DEFAULT_INDENT};
