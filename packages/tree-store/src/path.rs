//! Slash-separated paths into the document tree.

use std::fmt;

/// A path from the document root to a node.
///
/// A path is the sequence of entry names walked from the root. Empty segments
/// are dropped while parsing, so `/`, `` and `//` all name the root and
/// `/a//b/` is the same path as `a/b`.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub components: Vec<String>,
}

impl Path {
    /// The root path.
    pub fn root() -> Self {
        Path {
            components: Vec::new(),
        }
    }

    /// Parse a path string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonfs_tree_store::Path;
    ///
    /// let path = Path::parse("/users/alice/name");
    /// assert_eq!(path.len(), 3);
    ///
    /// assert!(Path::parse("/").is_root());
    /// assert_eq!(Path::parse("a//b/"), Path::parse("/a/b"));
    /// ```
    pub fn parse(s: &str) -> Self {
        Path {
            components: s
                .split('/')
                .filter(|c| !c.is_empty())
                .map(|c| c.to_string())
                .collect(),
        }
    }

    /// Check if this is the root path.
    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// Split into the parent path and the final entry name.
    ///
    /// Returns `None` for the root, which has no parent.
    pub fn split_parent(&self) -> Option<(Path, &str)> {
        let (name, parent) = self.components.split_last()?;
        Some((
            Path {
                components: parent.to_vec(),
            },
            name.as_str(),
        ))
    }

    /// Join a single entry name onto this path.
    #[must_use]
    pub fn child(&self, name: &str) -> Path {
        let mut components = self.components.clone();
        components.push(name.to_string());
        Path { components }
    }

    /// The path made of the first `len` components.
    pub fn prefix(&self, len: usize) -> Path {
        Path {
            components: self.components[..len].to_vec(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.components.join("/"))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl std::ops::Index<usize> for Path {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}

/// Build a [`Path`] from a string literal.
///
/// ```rust
/// use jsonfs_tree_store::path;
///
/// let p = path!("/users/alice");
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s)
    };
}
