//! File attributes reported for tree nodes.

use serde::Serialize;

use jsonfs_tree_store::Node;

/// Kind of a filesystem entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Directory,
    File,
}

/// Attributes of a single entry, shaped like a `stat` result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileAttr {
    pub kind: FileKind,
    /// File type bits and permission bits, as in `st_mode`.
    pub mode: u32,
    pub nlink: u32,
    /// Byte length of the leaf's rendering; 0 for directories.
    pub size: u64,
    pub uid: u32,
    pub gid: u32,
}

impl FileAttr {
    /// Permission bits only.
    pub fn perm(&self) -> u32 {
        self.mode & 0o7777
    }
}

/// The fixed attribute policy applied to every entry.
///
/// There is no per-entry ownership or permission state: every directory gets
/// `dir_perm` and every file gets `file_perm`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrPolicy {
    pub dir_perm: u32,
    pub file_perm: u32,
    pub uid: u32,
    pub gid: u32,
}

impl AttrPolicy {
    pub const DEFAULT_DIR_PERM: u32 = 0o777;
    pub const DEFAULT_FILE_PERM: u32 = 0o666;

    /// Default permissions, owned by the invoking process's user and group.
    pub fn current_process() -> Self {
        // SAFETY: getuid and getgid have no preconditions and cannot fail.
        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };
        AttrPolicy {
            dir_perm: Self::DEFAULT_DIR_PERM,
            file_perm: Self::DEFAULT_FILE_PERM,
            uid,
            gid,
        }
    }

    pub fn attr_for(&self, node: &Node) -> FileAttr {
        match node {
            Node::Directory(_) => FileAttr {
                kind: FileKind::Directory,
                mode: libc::S_IFDIR as u32 | (self.dir_perm & 0o7777),
                nlink: 2,
                size: 0,
                uid: self.uid,
                gid: self.gid,
            },
            Node::Leaf(leaf) => FileAttr {
                kind: FileKind::File,
                mode: libc::S_IFREG as u32 | (self.file_perm & 0o7777),
                nlink: 1,
                size: leaf.len() as u64,
                uid: self.uid,
                gid: self.gid,
            },
        }
    }
}

impl Default for AttrPolicy {
    fn default() -> Self {
        Self::current_process()
    }
}
