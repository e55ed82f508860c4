//! Path resolution and structural mutation over the document tree.

use indexmap::map::Entry;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{Error, Leaf, Node, Path};

/// Indentation used for the persisted document.
pub const DEFAULT_INDENT: usize = 4;

/// A document tree whose root is always a directory.
///
/// The tree is a strict hierarchy: each directory exclusively owns its
/// children, and every lookup walks from the root by entry name. Nothing holds
/// a reference into the tree across calls.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// An empty document (`{}`).
    pub fn new() -> Self {
        Tree {
            root: Node::directory(),
        }
    }

    /// Build a tree from a parsed JSON document.
    pub fn from_json(value: JsonValue) -> Result<Self, Error> {
        match value {
            JsonValue::Object(_) => Ok(Tree {
                root: Node::from(value),
            }),
            _ => Err(Error::RootNotObject),
        }
    }

    /// Parse a persisted document.
    pub fn load(bytes: &[u8]) -> Result<Self, Error> {
        let value: JsonValue = serde_json::from_slice(bytes)?;
        Self::from_json(value)
    }

    /// Render the document with the default indentation.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        self.serialize_with_indent(DEFAULT_INDENT)
    }

    /// Render the document, indenting each level by `indent` spaces.
    ///
    /// Keys appear in insertion order, so the same tree always renders to the
    /// same bytes.
    pub fn serialize_with_indent(&self, indent: usize) -> Result<Vec<u8>, Error> {
        let indent = vec![b' '; indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.root.serialize(&mut serializer)?;
        Ok(out)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Find the node at `path`.
    pub fn resolve(&self, path: &Path) -> Result<&Node, Error> {
        let mut cursor = &self.root;
        for (depth, name) in path.iter().enumerate() {
            cursor = match cursor {
                Node::Directory(entries) => entries.get(name).ok_or_else(|| Error::NotFound {
                    path: path.prefix(depth + 1),
                })?,
                Node::Leaf(_) => {
                    return Err(Error::NotADirectory {
                        path: path.prefix(depth),
                    })
                }
            };
        }
        Ok(cursor)
    }

    /// Find the node at `path` for mutation.
    pub fn resolve_mut(&mut self, path: &Path) -> Result<&mut Node, Error> {
        let mut cursor = &mut self.root;
        for (depth, name) in path.iter().enumerate() {
            cursor = match cursor {
                Node::Directory(entries) => {
                    entries.get_mut(name).ok_or_else(|| Error::NotFound {
                        path: path.prefix(depth + 1),
                    })?
                }
                Node::Leaf(_) => {
                    return Err(Error::NotADirectory {
                        path: path.prefix(depth),
                    })
                }
            };
        }
        Ok(cursor)
    }

    /// Walk to `path`, creating an empty directory for every missing segment.
    ///
    /// Fails with `NotADirectory` when the walk meets a leaf before the end of
    /// the path. Segments are only ever created below directories that were
    /// themselves just created or already existed, so a failed walk leaves the
    /// tree unchanged.
    pub fn resolve_or_create_dirs(&mut self, path: &Path) -> Result<&mut Node, Error> {
        let mut cursor = &mut self.root;
        for (depth, name) in path.iter().enumerate() {
            cursor = match cursor {
                Node::Directory(entries) => match entries.entry(name.clone()) {
                    Entry::Occupied(entry) => entry.into_mut(),
                    Entry::Vacant(entry) => {
                        log::debug!("Creating intermediate directory {}", path.prefix(depth + 1));
                        entry.insert(Node::directory())
                    }
                },
                Node::Leaf(_) => {
                    return Err(Error::NotADirectory {
                        path: path.prefix(depth),
                    })
                }
            };
        }
        Ok(cursor)
    }

    /// Insert `node` as `name` under `parent`, creating missing parents.
    ///
    /// Fails with `AlreadyExists` if `name` is already taken.
    pub fn insert(&mut self, parent: &Path, name: &str, node: Node) -> Result<&mut Node, Error> {
        let entries = self
            .resolve_or_create_dirs(parent)?
            .as_dir_mut()
            .ok_or_else(|| Error::NotADirectory {
                path: parent.clone(),
            })?;

        match entries.entry(name.to_string()) {
            Entry::Occupied(_) => Err(Error::AlreadyExists {
                path: parent.child(name),
            }),
            Entry::Vacant(entry) => Ok(entry.insert(node)),
        }
    }

    /// The leaf at `path`, inserting an empty one (and any missing parents)
    /// if nothing is there yet.
    ///
    /// Unlike [`Tree::insert`], an existing leaf is returned rather than
    /// rejected.
    pub fn leaf_or_insert(&mut self, path: &Path) -> Result<&mut Leaf, Error> {
        let (parent, name) = path.split_parent().ok_or_else(|| Error::IsADirectory {
            path: Path::root(),
        })?;

        let entries = self
            .resolve_or_create_dirs(&parent)?
            .as_dir_mut()
            .ok_or_else(|| Error::NotADirectory {
                path: parent.clone(),
            })?;

        entries
            .entry(name.to_string())
            .or_insert_with(Node::empty_file)
            .as_leaf_mut()
            .ok_or_else(|| Error::IsADirectory { path: path.clone() })
    }

    /// Detach and return the entry `name` under `parent`.
    ///
    /// The parent must already exist; remaining siblings keep their order.
    pub fn remove(&mut self, parent: &Path, name: &str) -> Result<Node, Error> {
        let entries = self
            .resolve_mut(parent)?
            .as_dir_mut()
            .ok_or_else(|| Error::NotADirectory {
                path: parent.clone(),
            })?;

        entries.shift_remove(name).ok_or_else(|| Error::NotFound {
            path: parent.child(name),
        })
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use serde_json::json;

    fn sample() -> Tree {
        Tree::from_json(json!({
            "one": 1,
            "nest_1": {
                "three": 3,
                "nest_2": {
                    "four": 4,
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn look_up_root() {
        let tree = sample();
        assert!(tree.resolve(&path!("/")).unwrap().is_dir());
    }

    #[test]
    fn look_up_nested_leaf() {
        let tree = sample();
        let node = tree.resolve(&path!("/nest_1/nest_2/four")).unwrap();
        assert_eq!(node.as_leaf().unwrap().render(), "4");
    }

    #[test]
    fn missing_entry_is_not_found() {
        let tree = sample();
        match tree.resolve(&path!("/nest_1/missing/deeper")) {
            Err(Error::NotFound { path }) => assert_eq!(path, path!("/nest_1/missing")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn descending_through_leaf_is_not_a_directory() {
        let tree = sample();
        match tree.resolve(&path!("/one/two")) {
            Err(Error::NotADirectory { path }) => assert_eq!(path, path!("/one")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(matches!(
            Tree::from_json(json!([1, 2])),
            Err(Error::RootNotObject)
        ));
        assert!(matches!(Tree::load(b"\"text\""), Err(Error::RootNotObject)));
    }

    #[test]
    fn malformed_document_is_a_json_error() {
        assert!(matches!(Tree::load(b"{\"a\": "), Err(Error::Json(_))));
    }

    #[test]
    fn vivify_intermediate_directories() {
        let mut tree = Tree::new();
        assert!(tree.resolve_or_create_dirs(&path!("/a/b/c")).unwrap().is_dir());
        assert!(tree.resolve(&path!("/a")).unwrap().is_dir());
        assert!(tree.resolve(&path!("/a/b")).unwrap().is_dir());
    }

    #[test]
    fn vivify_never_goes_through_leaf() {
        let mut tree = sample();
        let before = tree.clone();
        assert!(matches!(
            tree.resolve_or_create_dirs(&path!("/one/x")),
            Err(Error::NotADirectory { .. })
        ));
        assert_eq!(tree, before);
    }

    #[test]
    fn insert_rejects_existing_names() {
        let mut tree = sample();
        assert!(matches!(
            tree.insert(&path!("/"), "one", Node::empty_file()),
            Err(Error::AlreadyExists { .. })
        ));
        tree.insert(&path!("/"), "two", Node::empty_file()).unwrap();
        assert!(tree.resolve(&path!("/two")).is_ok());
    }

    #[test]
    fn insert_under_leaf_is_not_a_directory() {
        let mut tree = sample();
        assert!(matches!(
            tree.insert(&path!("/one"), "x", Node::empty_file()),
            Err(Error::NotADirectory { .. })
        ));
    }

    #[test]
    fn leaf_or_insert_returns_existing_leaf() {
        let mut tree = sample();
        let leaf = tree.leaf_or_insert(&path!("/nest_1/three")).unwrap();
        assert_eq!(leaf.render(), "3");
    }

    #[test]
    fn leaf_or_insert_refuses_directories() {
        let mut tree = sample();
        assert!(matches!(
            tree.leaf_or_insert(&path!("/nest_1")),
            Err(Error::IsADirectory { .. })
        ));
        assert!(matches!(
            tree.leaf_or_insert(&path!("/")),
            Err(Error::IsADirectory { .. })
        ));
    }

    #[test]
    fn remove_keeps_sibling_order() {
        let mut tree = Tree::from_json(json!({"a": 1, "b": 2, "c": 3})).unwrap();
        tree.remove(&path!("/"), "b").unwrap();
        let names: Vec<_> = tree.root().as_dir().unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut tree = sample();
        assert!(matches!(
            tree.remove(&path!("/"), "nope"),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            tree.remove(&path!("/nope"), "x"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn serialize_uses_four_space_indent() {
        let tree = Tree::from_json(json!({"b": {"c": 1}, "a": "x"})).unwrap();
        let text = String::from_utf8(tree.serialize().unwrap()).unwrap();
        assert_eq!(text, "{\n    \"b\": {\n        \"c\": 1\n    },\n    \"a\": \"x\"\n}");
    }

    #[test]
    fn serialize_round_trips() {
        let tree = sample();
        let bytes = tree.serialize().unwrap();
        assert_eq!(Tree::load(&bytes).unwrap(), tree);
    }

    #[test]
    fn empty_directory_serializes_as_empty_object() {
        let tree = Tree::new();
        assert_eq!(tree.serialize().unwrap(), b"{}");
    }
}
