//! Ref and remote collection directories
//!
//! A [`RefsDir`] projects one ref prefix (`refs/tags/`, `refs/heads/`, or
//! `refs/remotes/<remote>/`) as a directory whose children are the root
//! trees of the commits those refs point to. A [`RemotesDir`] projects the
//! configured remotes, each as a [`RefsDir`] scoped to that remote.

use git2::Repository;

use crate::info::{ResourceInfo, DIR_MODE};
use crate::node::tree::TreeDir;
use crate::node::{Node, NodeError, NodeResult};

/// a named set of refs under one prefix
pub struct RefsDir<'repo> {
    repo: &'repo Repository,
    name: String,
    prefix: String,
}

impl<'repo> RefsDir<'repo> {
    /// the `tags` collection
    pub(crate) fn tags(repo: &'repo Repository) -> Self {
        Self {
            repo,
            name: "tags".to_string(),
            prefix: "refs/tags/".to_string(),
        }
    }

    /// the `branches` collection (local heads)
    pub(crate) fn branches(repo: &'repo Repository) -> Self {
        Self {
            repo,
            name: "branches".to_string(),
            prefix: "refs/heads/".to_string(),
        }
    }

    /// the refs tracked for one remote
    pub(crate) fn remote(repo: &'repo Repository, remote: &str) -> Self {
        Self {
            repo,
            name: remote.to_string(),
            prefix: format!("refs/remotes/{}/", remote),
        }
    }

    pub fn info(&self) -> ResourceInfo {
        ResourceInfo::directory(self.name.clone(), DIR_MODE)
    }

    /// resolve a ref name to the root tree of its commit
    ///
    /// Annotated tags peel through the tag object to the commit. The
    /// resulting tree inherits the ref's name, since store trees carry no
    /// name of their own.
    pub fn child(&self, name: &str) -> NodeResult<Node<'repo>> {
        let reference = self
            .repo
            .find_reference(&format!("{}{}", self.prefix, name))
            .map_err(|_| NodeError::NotFound(name.to_string()))?;
        let commit = reference.peel_to_commit()?;
        let tree = commit.tree()?;
        Ok(Node::Tree(TreeDir::from_commit_tree(self.repo, name, tree)))
    }

    /// descriptors for every ref under the prefix, in store iteration order
    ///
    /// Names are reported relative to the prefix, so `refs/heads/feature/x`
    /// lists as `feature/x`. Commits are not peeled here; a ref child is a
    /// directory by definition.
    pub fn children(&self) -> NodeResult<Vec<ResourceInfo>> {
        let glob = format!("{}*", self.prefix);
        let mut references = self.repo.references_glob(&glob)?;
        let mut out = Vec::new();
        for name in references.names() {
            let name = name?;
            if let Some(short) = name.strip_prefix(&self.prefix) {
                out.push(ResourceInfo::directory(short, DIR_MODE));
            }
        }
        Ok(out)
    }
}

/// the configured remotes, each child a ref collection
pub struct RemotesDir<'repo> {
    repo: &'repo Repository,
}

impl<'repo> RemotesDir<'repo> {
    pub(crate) fn new(repo: &'repo Repository) -> Self {
        Self { repo }
    }

    pub fn info(&self) -> ResourceInfo {
        ResourceInfo::directory("remotes", DIR_MODE)
    }

    /// scope a ref collection to a configured remote
    pub fn child(&self, name: &str) -> NodeResult<Node<'repo>> {
        self.repo
            .find_remote(name)
            .map_err(|_| NodeError::NotFound(name.to_string()))?;
        Ok(Node::Refs(RefsDir::remote(self.repo, name)))
    }

    /// descriptors for the configured remotes, in store iteration order
    pub fn children(&self) -> NodeResult<Vec<ResourceInfo>> {
        let remotes = self.repo.remotes()?;
        Ok(remotes
            .iter()
            .flatten()
            .map(|name| ResourceInfo::directory(name, DIR_MODE))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_repo;

    #[test]
    fn test_tags_listing() {
        let (_dir, repo) = sample_repo();
        let tags = RefsDir::tags(&repo);
        let names: Vec<String> = tags
            .children()
            .unwrap()
            .into_iter()
            .map(|info| info.name().to_string())
            .collect();
        assert!(names.contains(&"v1.0".to_string()));
        assert!(names.contains(&"v2.0".to_string()));
    }

    #[test]
    fn test_lightweight_and_annotated_tags_resolve() {
        let (_dir, repo) = sample_repo();
        let tags = RefsDir::tags(&repo);

        for tag in ["v1.0", "v2.0"] {
            let node = tags.child(tag).unwrap();
            assert!(node.is_dir());
            assert_eq!(node.info().name(), tag);
        }
    }

    #[test]
    fn test_branch_resolves_to_commit_tree() {
        let (_dir, repo) = sample_repo();
        let branches = RefsDir::branches(&repo);
        let dev = branches.child("dev").unwrap();
        assert_eq!(dev.info().name(), "dev");
        assert!(dev.child("LICENSE").is_ok());
    }

    #[test]
    fn test_unknown_ref_is_not_found() {
        let (_dir, repo) = sample_repo();
        let branches = RefsDir::branches(&repo);
        assert!(matches!(
            branches.child("missing"),
            Err(NodeError::NotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_nested_branch_names_list_relative_to_prefix() {
        let (_dir, repo) = sample_repo();
        {
            let head = repo.head().unwrap().peel_to_commit().unwrap();
            repo.branch("feature/x", &head, false).unwrap();
        }

        let branches = RefsDir::branches(&repo);
        let names: Vec<String> = branches
            .children()
            .unwrap()
            .into_iter()
            .map(|info| info.name().to_string())
            .collect();
        assert!(names.contains(&"feature/x".to_string()));
    }

    #[test]
    fn test_remotes_listing_and_lookup() {
        let (_dir, repo) = sample_repo();
        let remotes = RemotesDir::new(&repo);

        let names: Vec<String> = remotes
            .children()
            .unwrap()
            .into_iter()
            .map(|info| info.name().to_string())
            .collect();
        assert_eq!(names, ["origin"]);

        let origin = remotes.child("origin").unwrap();
        let main = origin.child("main").unwrap();
        assert!(main.is_dir());
        assert_eq!(main.info().name(), "main");
    }

    #[test]
    fn test_unknown_remote_is_not_found() {
        let (_dir, repo) = sample_repo();
        let remotes = RemotesDir::new(&repo);
        assert!(matches!(
            remotes.child("upstream"),
            Err(NodeError::NotFound(_))
        ));
    }
}
