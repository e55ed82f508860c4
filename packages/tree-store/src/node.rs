//! The node model: directories and leaves.
//!
//! JSON objects map to [`Node::Directory`]; every other JSON value (string,
//! number, boolean, null, array) is a [`Leaf`] whose file content is its
//! textual rendering.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

/// Children of a directory, in insertion order.
pub type Entries = IndexMap<String, Node>;

/// A node in the document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Directory(Entries),
    Leaf(Leaf),
}

impl Node {
    /// An empty directory.
    pub fn directory() -> Self {
        Node::Directory(Entries::new())
    }

    /// A leaf holding the empty string.
    pub fn empty_file() -> Self {
        Node::Leaf(Leaf::text(String::new()))
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    pub fn as_dir(&self) -> Option<&Entries> {
        match self {
            Node::Directory(entries) => Some(entries),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_dir_mut(&mut self) -> Option<&mut Entries> {
        match self {
            Node::Directory(entries) => Some(entries),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Directory(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Directory(_) => None,
        }
    }
}

impl From<JsonValue> for Node {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => Node::Directory(
                map.into_iter()
                    .map(|(name, child)| (name, Node::from(child)))
                    .collect(),
            ),
            other => Node::Leaf(Leaf(other)),
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Directory(entries) => serializer.collect_map(entries.iter()),
            Node::Leaf(leaf) => leaf.0.serialize(serializer),
        }
    }
}

/// A file in the tree: any JSON value except an object.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf(JsonValue);

impl Leaf {
    /// A string leaf.
    pub fn text(s: impl Into<String>) -> Self {
        Leaf(JsonValue::String(s.into()))
    }

    pub fn value(&self) -> &JsonValue {
        &self.0
    }

    /// The file content of this leaf.
    ///
    /// Strings render as their raw text. Everything else renders as compact
    /// JSON, so `42`, `true`, `null` and `[1,"a"]` read back as written in the
    /// document.
    pub fn render(&self) -> Cow<'_, str> {
        match &self.0 {
            JsonValue::String(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Length in bytes of the rendering.
    pub fn len(&self) -> usize {
        self.render().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the content with `data`. The leaf becomes a string.
    pub fn replace(&mut self, data: &str) {
        self.0 = JsonValue::String(data.to_string());
    }

    /// Append `data` to the rendering. The leaf becomes a string.
    pub fn append(&mut self, data: &str) {
        match &mut self.0 {
            JsonValue::String(s) => s.push_str(data),
            other => {
                let mut s = other.to_string();
                s.push_str(data);
                *other = JsonValue::String(s);
            }
        }
    }

    /// Keep at most the first `len` bytes of the rendering.
    ///
    /// A cut inside a multi-byte character moves back to the previous
    /// character boundary. Lengths at or past the end leave the leaf
    /// untouched (no zero-extension); a shorter cut turns it into a string.
    pub fn truncate(&mut self, len: usize) {
        let mut s = self.render().into_owned();
        if len >= s.len() {
            return;
        }
        let mut cut = len;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        self.0 = JsonValue::String(s);
    }
}
