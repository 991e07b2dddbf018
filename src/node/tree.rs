//! Tree and blob nodes
//!
//! A [`TreeDir`] wraps one store tree together with the name it was reached
//! through; a [`BlobFile`] wraps one blob with its entry name and mode.
//! Children resolve by native entry lookup inside the tree. Submodule
//! (commit-kind) entries are not projected: looking one up reports NotFound
//! and enumeration skips them.

use git2::{Blob, ObjectType, Repository, Tree, TreeEntry, TreeIter};

use crate::file::BlobReader;
use crate::info::{ResourceInfo, DIR_MODE};
use crate::node::{Node, NodeError, NodeResult};

fn entry_name(entry: &TreeEntry<'_>) -> String {
    match entry.name() {
        Some(name) => name.to_string(),
        None => String::from_utf8_lossy(entry.name_bytes()).into_owned(),
    }
}

/// a store tree bound to a position in the hierarchy
pub struct TreeDir<'repo> {
    repo: &'repo Repository,
    name: String,
    tree: Tree<'repo>,
    mode: u32,
}

impl<'repo> TreeDir<'repo> {
    /// the root tree of the current HEAD commit, named `head`
    pub(crate) fn for_head(repo: &'repo Repository) -> NodeResult<Self> {
        let commit = repo.head()?.peel_to_commit()?;
        Ok(Self::from_commit_tree(repo, "head", commit.tree()?))
    }

    /// a commit's root tree, named after the ref it was reached through
    pub(crate) fn from_commit_tree(repo: &'repo Repository, name: &str, tree: Tree<'repo>) -> Self {
        Self {
            repo,
            name: name.to_string(),
            tree,
            mode: DIR_MODE,
        }
    }

    pub fn info(&self) -> ResourceInfo {
        ResourceInfo::directory(self.name.clone(), self.mode)
    }

    /// resolve a direct child by native entry lookup
    pub fn child(&self, name: &str) -> NodeResult<Node<'repo>> {
        let entry = self
            .tree
            .get_name(name)
            .ok_or_else(|| NodeError::NotFound(name.to_string()))?;
        match entry.kind() {
            Some(ObjectType::Tree) => {
                let tree = self.repo.find_tree(entry.id())?;
                Ok(Node::Tree(TreeDir {
                    repo: self.repo,
                    name: entry_name(&entry),
                    tree,
                    mode: entry.filemode() as u32,
                }))
            }
            Some(ObjectType::Blob) => {
                let blob = self.repo.find_blob(entry.id())?;
                Ok(Node::Blob(BlobFile {
                    name: entry_name(&entry),
                    blob,
                    mode: entry.filemode() as u32,
                }))
            }
            // submodules and other entry kinds are not projected
            _ => Err(NodeError::NotFound(name.to_string())),
        }
    }

    /// lazy iterator over child descriptors, sub-trees before blobs
    pub fn children(&self) -> TreeChildren<'_> {
        TreeChildren {
            repo: self.repo,
            dirs: self.tree.iter(),
            blobs: self.tree.iter(),
        }
    }
}

/// child enumeration for one tree
///
/// Two passes over the same tree: sub-trees first, then blobs, store order
/// within each group. Blob sizes come from the object database only when the
/// entry is actually yielded, so a paged scan never pays for skipped ones.
pub struct TreeChildren<'a> {
    repo: &'a Repository,
    dirs: TreeIter<'a>,
    blobs: TreeIter<'a>,
}

impl<'a> Iterator for TreeChildren<'a> {
    type Item = NodeResult<ResourceInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.dirs.by_ref() {
            if entry.kind() == Some(ObjectType::Tree) {
                return Some(Ok(ResourceInfo::directory(
                    entry_name(&entry),
                    entry.filemode() as u32,
                )));
            }
        }
        for entry in self.blobs.by_ref() {
            if entry.kind() == Some(ObjectType::Blob) {
                let size = match self.repo.find_blob(entry.id()) {
                    Ok(blob) => blob.size() as u64,
                    Err(err) => return Some(Err(NodeError::Git(err))),
                };
                return Some(Ok(ResourceInfo::file(
                    entry_name(&entry),
                    size,
                    entry.filemode() as u32,
                )));
            }
        }
        None
    }
}

/// a store blob; the only node kind with content
pub struct BlobFile<'repo> {
    name: String,
    blob: Blob<'repo>,
    mode: u32,
}

impl<'repo> BlobFile<'repo> {
    pub fn info(&self) -> ResourceInfo {
        ResourceInfo::file(self.name.clone(), self.blob.size() as u64, self.mode)
    }

    /// materialize the blob's bytes into an owned read-only stream
    pub fn open(&self) -> BlobReader {
        BlobReader::new(self.blob.content().to_vec())
    }
}
