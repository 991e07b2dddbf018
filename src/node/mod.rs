//! Virtual node hierarchy
//!
//! This module projects the repository's object graph onto a path-addressed
//! tree. Every position in that tree is a [`Node`]: a closed set of variants
//! behind one capability surface (describe, look up a child, enumerate
//! children, open content). Nodes are constructed fresh for each resolution
//! step and dropped when the operation finishes; nothing is cached between
//! calls and nothing ever writes to the store.
//!
//! # Layout
//!
//! ```text
//! /                     RootDir      fixed name table
//! ├── head/             TreeDir      tree of the HEAD commit
//! ├── tags/             RefsDir      refs/tags/*
//! ├── branches/         RefsDir      refs/heads/*
//! ├── remotes/          RemotesDir   one RefsDir per configured remote
//! │   └── origin/       RefsDir      refs/remotes/origin/*
//! └── objects/          VirtualDir   reserved, enumeration rejected
//! ```
//!
//! Inside a tree, children are ordinary [`TreeDir`] and [`BlobFile`] nodes
//! resolved by native entry lookup.

mod refs;
mod root;
mod tree;

pub use refs::{RefsDir, RemotesDir};
pub use root::{RootDir, VirtualDir};
pub use tree::{BlobFile, TreeChildren, TreeDir};

use git2::Repository;
use thiserror::Error;

use crate::file::BlobReader;
use crate::info::ResourceInfo;

/// failures raised inside the node hierarchy
///
/// These are internal conditions; the facade translates them into the public
/// error taxonomy at its boundary.
#[derive(Debug, Error)]
pub enum NodeError {
    /// no child with this name
    #[error("no such child: {0}")]
    NotFound(String),

    /// a child operation was invoked on a file node
    #[error("not a directory")]
    NotADirectory,

    /// a content operation was invoked on a directory node
    #[error("not a file")]
    NotAFile,

    /// the namespace is reserved and cannot be enumerated
    #[error("reserved namespace")]
    Reserved,

    /// error from the underlying object store
    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

/// result type alias for node operations
pub type NodeResult<T> = Result<T, NodeError>;

/// one position in the virtual hierarchy
///
/// A closed enum rather than a trait object: the set of node kinds is fixed,
/// and variants that don't support an operation report a typed kind-mismatch
/// instead of relying on a dynamic "not implemented" escape.
pub enum Node<'repo> {
    /// the single entry point
    Root(RootDir<'repo>),
    /// a directory with no backing store object (the reserved `objects`
    /// namespace)
    Virtual(VirtualDir),
    /// a named set of refs (tags, branches, or one remote's refs)
    Refs(RefsDir<'repo>),
    /// the configured remotes
    Remotes(RemotesDir<'repo>),
    /// a store tree bound to the commit it was reached through
    Tree(TreeDir<'repo>),
    /// a store blob; terminal
    Blob(BlobFile<'repo>),
}

impl<'repo> Node<'repo> {
    /// the root node for a repository
    pub fn root(repo: &'repo Repository) -> Self {
        Node::Root(RootDir::new(repo))
    }

    /// whether this node is a directory kind
    pub fn is_dir(&self) -> bool {
        !matches!(self, Node::Blob(_))
    }

    /// snapshot this node's resource information
    pub fn info(&self) -> ResourceInfo {
        match self {
            Node::Root(dir) => dir.info(),
            Node::Virtual(dir) => dir.info(),
            Node::Refs(dir) => dir.info(),
            Node::Remotes(dir) => dir.info(),
            Node::Tree(dir) => dir.info(),
            Node::Blob(file) => file.info(),
        }
    }

    /// resolve a direct child by name
    pub fn child(&self, name: &str) -> NodeResult<Node<'repo>> {
        match self {
            Node::Root(dir) => dir.child(name),
            Node::Virtual(_) => Err(NodeError::NotFound(name.to_string())),
            Node::Refs(dir) => dir.child(name),
            Node::Remotes(dir) => dir.child(name),
            Node::Tree(dir) => dir.child(name),
            Node::Blob(_) => Err(NodeError::NotADirectory),
        }
    }

    /// enumerate this node's children as resource information
    pub fn children(&self) -> NodeResult<Children<'_>> {
        match self {
            Node::Root(dir) => Ok(Children::Fixed(dir.children().into_iter())),
            Node::Virtual(_) => Err(NodeError::Reserved),
            Node::Refs(dir) => Ok(Children::Fixed(dir.children()?.into_iter())),
            Node::Remotes(dir) => Ok(Children::Fixed(dir.children()?.into_iter())),
            Node::Tree(dir) => Ok(Children::Tree(dir.children())),
            Node::Blob(_) => Err(NodeError::NotADirectory),
        }
    }

    /// open this node's content as a read-only stream
    pub fn open(&self) -> NodeResult<BlobReader> {
        match self {
            Node::Blob(file) => Ok(file.open()),
            _ => Err(NodeError::NotAFile),
        }
    }
}

/// iterator over a node's child descriptors
///
/// Collection directories synthesize their (small) child lists up front;
/// tree directories stay lazy so that paged scans never touch the object
/// database for entries they skip.
pub enum Children<'a> {
    Fixed(std::vec::IntoIter<ResourceInfo>),
    Tree(TreeChildren<'a>),
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeResult<ResourceInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::Fixed(iter) => iter.next().map(Ok),
            Children::Tree(iter) => iter.next(),
        }
    }
}

/// resolve a slash-separated path to a node, starting from the root
///
/// The path is trimmed of leading/trailing separators; an empty remainder is
/// the root itself. Any failure while walking a segment (an unknown name, a
/// child lookup on a file, or a store error) normalizes to
/// [`NodeError::NotFound`] carrying the full path. Kind mismatches only
/// surface from the operation applied to the resolved terminal node, never
/// from resolution itself.
pub fn resolve<'repo>(repo: &'repo Repository, path: &str) -> NodeResult<Node<'repo>> {
    let trimmed = path.trim_matches('/');
    let mut node = Node::root(repo);
    if trimmed.is_empty() {
        return Ok(node);
    }
    for segment in trimmed.split('/') {
        node = node.child(segment).map_err(|err| {
            tracing::trace!(path, segment, %err, "path did not resolve");
            NodeError::NotFound(path.to_string())
        })?;
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_repo;

    #[test]
    fn test_resolve_root() {
        let (_dir, repo) = sample_repo();
        let node = resolve(&repo, "/").unwrap();
        assert!(node.is_dir());
        assert_eq!(node.info().name(), "");

        // separators on either side are ignored
        assert!(resolve(&repo, "").is_ok());
        assert!(resolve(&repo, "///").is_ok());
    }

    #[test]
    fn test_resolve_walks_segments() {
        let (_dir, repo) = sample_repo();

        let node = resolve(&repo, "/head/src/main.rs").unwrap();
        assert!(!node.is_dir());
        assert_eq!(node.info().name(), "main.rs");

        let node = resolve(&repo, "head/src/").unwrap();
        assert!(node.is_dir());
        assert_eq!(node.info().name(), "src");
    }

    #[test]
    fn test_resolve_failures_normalize_to_not_found() {
        let (_dir, repo) = sample_repo();
        let paths = [
            "/nope",
            "/head/nope",
            "/head/src/nope",
            "/branches/nope",
            "/remotes/nope",
            "/remotes/origin/nope",
            "/head//src",
            "/objects/deadbeef",
        ];
        for path in paths {
            match resolve(&repo, path) {
                Err(NodeError::NotFound(reported)) => assert_eq!(reported, path),
                Err(err) => panic!("expected NotFound for {}, got {}", path, err),
                Ok(_) => panic!("expected NotFound for {}, but it resolved", path),
            }
        }
    }

    #[test]
    fn test_child_of_file_is_not_found() {
        let (_dir, repo) = sample_repo();
        // a present-but-wrong-kind intermediate segment is still NotFound
        assert!(matches!(
            resolve(&repo, "/head/LICENSE/sub"),
            Err(NodeError::NotFound(_))
        ));
    }

    #[test]
    fn test_open_on_directory_is_not_a_file() {
        let (_dir, repo) = sample_repo();
        let node = resolve(&repo, "/head").unwrap();
        assert!(matches!(node.open(), Err(NodeError::NotAFile)));
    }

    #[test]
    fn test_children_on_blob_is_not_a_directory() {
        let (_dir, repo) = sample_repo();
        let node = resolve(&repo, "/head/LICENSE").unwrap();
        assert!(matches!(node.children(), Err(NodeError::NotADirectory)));
    }

    #[test]
    fn test_reserved_namespace_rejects_enumeration() {
        let (_dir, repo) = sample_repo();
        let node = resolve(&repo, "/objects").unwrap();
        assert!(node.is_dir());
        assert!(matches!(node.children(), Err(NodeError::Reserved)));
    }
}
