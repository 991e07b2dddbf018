//! Root directory and virtual directories
//!
//! The root exposes a fixed, ordered table mapping well-known names to child
//! constructors. Unknown names fail by table lookup, never by a stray panic
//! or store error.

use git2::Repository;

use crate::info::{ResourceInfo, DIR_MODE};
use crate::node::refs::{RefsDir, RemotesDir};
use crate::node::tree::TreeDir;
use crate::node::{Node, NodeError, NodeResult};

/// constructor for one of the root's fixed children
type ChildCtor = for<'repo> fn(&'repo Repository) -> NodeResult<Node<'repo>>;

fn head_node(repo: &Repository) -> NodeResult<Node<'_>> {
    Ok(Node::Tree(TreeDir::for_head(repo)?))
}

fn tags_node(repo: &Repository) -> NodeResult<Node<'_>> {
    Ok(Node::Refs(RefsDir::tags(repo)))
}

fn branches_node(repo: &Repository) -> NodeResult<Node<'_>> {
    Ok(Node::Refs(RefsDir::branches(repo)))
}

fn remotes_node(repo: &Repository) -> NodeResult<Node<'_>> {
    Ok(Node::Remotes(RemotesDir::new(repo)))
}

fn objects_node(_repo: &Repository) -> NodeResult<Node<'_>> {
    Ok(Node::Virtual(VirtualDir::new("objects")))
}

/// the root's child table, in declared order
const ROOT_CHILDREN: &[(&str, ChildCtor)] = &[
    ("head", head_node),
    ("tags", tags_node),
    ("branches", branches_node),
    ("remotes", remotes_node),
    ("objects", objects_node),
];

/// the single entry point of the hierarchy
///
/// Stateless beyond the repository handle; the child table is static.
pub struct RootDir<'repo> {
    repo: &'repo Repository,
}

impl<'repo> RootDir<'repo> {
    pub(crate) fn new(repo: &'repo Repository) -> Self {
        Self { repo }
    }

    /// the root descriptor; synthetic nodes have an empty name
    pub fn info(&self) -> ResourceInfo {
        ResourceInfo::directory("", DIR_MODE)
    }

    /// look up one of the fixed top-level names
    pub fn child(&self, name: &str) -> NodeResult<Node<'repo>> {
        let (_, ctor) = ROOT_CHILDREN
            .iter()
            .find(|(child, _)| *child == name)
            .ok_or_else(|| NodeError::NotFound(name.to_string()))?;
        ctor(self.repo)
    }

    /// descriptors for the fixed child set, in declared order
    ///
    /// Synthesized from the table alone, so listing the root works even
    /// before the repository has its first commit.
    pub fn children(&self) -> Vec<ResourceInfo> {
        ROOT_CHILDREN
            .iter()
            .map(|(name, _)| ResourceInfo::directory(*name, DIR_MODE))
            .collect()
    }
}

/// a directory node with no backing store object
///
/// Carries only a name. Its sole current occupant is the reserved `objects`
/// namespace: stat succeeds, child lookups fail NotFound, and enumeration is
/// rejected at the dispatch layer rather than returning an empty listing.
pub struct VirtualDir {
    name: String,
}

impl VirtualDir {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn info(&self) -> ResourceInfo {
        ResourceInfo::directory(self.name.clone(), DIR_MODE)
    }
}
