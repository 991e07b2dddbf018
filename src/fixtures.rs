//! Shared test fixtures
//!
//! Builds throwaway repositories with a known shape so the node, facade and
//! opener tests can assert against the same layout:
//!
//! ```text
//! HEAD
//! ├── docs/guide.md
//! ├── src/main.rs
//! ├── src/run.sh        (executable)
//! ├── LICENSE
//! └── README.md
//! branch  dev
//! tags    v1.0 (lightweight), v2.0 (annotated)
//! remote  origin with refs/remotes/origin/main
//! ```

use git2::{Repository, Signature};
use tempfile::TempDir;

pub(crate) const LICENSE_TEXT: &str = "MIT License\n\nCopyright (c) 2024 Example Authors\n";

/// a repository with one commit, a branch, both tag flavors and a remote ref
pub(crate) fn sample_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    {
        let sig = Signature::now("Test", "test@example.com").unwrap();

        let license = repo.blob(LICENSE_TEXT.as_bytes()).unwrap();
        let readme = repo.blob(b"# sample\n").unwrap();
        let main_rs = repo.blob(b"fn main() {}\n").unwrap();
        let run_sh = repo.blob(b"#!/bin/sh\nexit 0\n").unwrap();
        let guide = repo.blob(b"# guide\n").unwrap();

        let mut src = repo.treebuilder(None).unwrap();
        src.insert("main.rs", main_rs, 0o100644).unwrap();
        src.insert("run.sh", run_sh, 0o100755).unwrap();
        let src_id = src.write().unwrap();

        let mut docs = repo.treebuilder(None).unwrap();
        docs.insert("guide.md", guide, 0o100644).unwrap();
        let docs_id = docs.write().unwrap();

        let mut root = repo.treebuilder(None).unwrap();
        root.insert("LICENSE", license, 0o100644).unwrap();
        root.insert("README.md", readme, 0o100644).unwrap();
        root.insert("docs", docs_id, 0o040000).unwrap();
        root.insert("src", src_id, 0o040000).unwrap();
        let root_id = root.write().unwrap();

        let tree = repo.find_tree(root_id).unwrap();
        let commit_id = repo
            .commit(Some("HEAD"), &sig, &sig, "initial import", &tree, &[])
            .unwrap();
        let commit = repo.find_commit(commit_id).unwrap();

        repo.branch("dev", &commit, false).unwrap();
        repo.reference("refs/tags/v1.0", commit_id, false, "tag v1.0")
            .unwrap();
        repo.tag("v2.0", commit.as_object(), &sig, "release v2.0", false)
            .unwrap();
        repo.remote("origin", "https://example.com/sample.git")
            .unwrap();
        repo.reference("refs/remotes/origin/main", commit_id, false, "remote main")
            .unwrap();
    }
    (dir, repo)
}

/// a repository with no commits (unborn HEAD)
pub(crate) fn empty_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    (dir, repo)
}
