//! gitvfs - a read-only virtual filesystem over a Git repository
//!
//! This crate projects a repository's object graph (commits, trees, blobs,
//! branches, tags, remotes) as a path-addressable filesystem. Callers list
//! directories, stat resources and stream file contents with ordinary
//! slash-separated paths; the content-addressable object model stays hidden.
//!
//! The top-level namespace is fixed:
//!
//! ```text
//! /head/<tree-path>                    tree of the current HEAD commit
//! /tags/<tag>/<tree-path>              tree at a tag's commit
//! /branches/<branch>/<tree-path>       tree at a branch's commit
//! /remotes/<remote>/<ref>/<tree-path>  tree at a remote ref's commit
//! /objects                             reserved
//! ```
//!
//! # Example
//!
//! ```no_run
//! use gitvfs::GitVfs;
//!
//! let vfs = GitVfs::open("./some-repo").unwrap();
//! for name in vfs.listdir("/head").unwrap() {
//!     println!("{}", name);
//! }
//! let license = vfs.readtext("/head/LICENSE").unwrap();
//! ```
//!
//! The projection is permanently read-only: the four mutating operations
//! fail unconditionally, descriptors report every field as non-writable,
//! and opened streams reject writes.

pub mod errors;
pub mod file;
pub mod fs;
pub mod info;
pub mod node;
pub mod opener;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export public API
pub use errors::{VfsError, VfsResult};
pub use file::BlobReader;
pub use fs::{FsMeta, GitVfs};
pub use info::{Permissions, ResourceInfo, ResourceType};
pub use node::{Node, NodeError, NodeResult};
pub use opener::{open_fs, registry, OpenFn, OpenerError, Registry};
