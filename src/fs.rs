//! Filesystem facade
//!
//! [`GitVfs`] is the single entry point implementing the filesystem contract
//! over the node hierarchy: existence checks, resource information,
//! directory listing and scanning with optional paging, binary opens, and
//! the four mutating operations that always fail. Every operation resolves
//! its path fresh; the facade holds no state beyond the repository handle.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use git2::Repository;
use parking_lot::Mutex;
use serde::Serialize;

use crate::errors::{VfsError, VfsResult};
use crate::file::BlobReader;
use crate::info::ResourceInfo;
use crate::node::{self, Node, NodeError};

/// static metadata describing the filesystem's behavior
#[derive(Debug, Clone, Serialize)]
pub struct FsMeta {
    pub case_insensitive: bool,
    pub invalid_path_chars: &'static str,
    pub max_path_length: Option<usize>,
    pub max_sys_path_length: Option<usize>,
    pub network: bool,
    pub read_only: bool,
    pub supports_rename: bool,
    pub thread_safe: bool,
    pub unicode_paths: bool,
    pub is_virtual: bool,
}

impl Default for FsMeta {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            invalid_path_chars: "\0",
            max_path_length: None,
            max_sys_path_length: None,
            network: false,
            read_only: true,
            supports_rename: false,
            thread_safe: true,
            unicode_paths: true,
            is_virtual: false,
        }
    }
}

/// read-only filesystem over a repository's object graph
///
/// Clone this to share across threads; clones share one repository handle.
/// Operations serialize on that handle (libgit2 repository handles must not
/// be used from two threads at once), so any number of callers may run
/// concurrently without further coordination.
#[derive(Clone)]
pub struct GitVfs {
    inner: Arc<GitVfsInner>,
}

struct GitVfsInner {
    repo: Mutex<Repository>,
    path: PathBuf,
}

impl GitVfs {
    /// open an existing repository
    pub fn open(path: impl AsRef<Path>) -> VfsResult<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path)
            .map_err(|_| VfsError::InvalidRepository(path.to_path_buf()))?;
        tracing::debug!(path = %path.display(), "opened repository");

        Ok(Self {
            inner: Arc::new(GitVfsInner {
                repo: Mutex::new(repo),
                path: path.to_path_buf(),
            }),
        })
    }

    /// the repository location this filesystem was opened from
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// static filesystem metadata
    pub fn meta(&self) -> FsMeta {
        FsMeta::default()
    }

    /// execute a function with access to the repository handle
    fn with_repo<F, T>(&self, f: F) -> VfsResult<T>
    where
        F: FnOnce(&Repository) -> VfsResult<T>,
    {
        let repo = self.inner.repo.lock();
        f(&repo)
    }

    fn resolve<'r>(repo: &'r Repository, path: &str) -> VfsResult<Node<'r>> {
        node::resolve(repo, path).map_err(|_| VfsError::NotFound(path.to_string()))
    }

    /// translate a child-enumeration failure at the listing boundary
    fn enumerate_error(err: NodeError, path: &str) -> VfsError {
        match err {
            NodeError::NotADirectory => VfsError::DirectoryExpected(path.to_string()),
            NodeError::Reserved => {
                VfsError::Unsupported(format!("reserved namespace: {}", path))
            }
            _ => VfsError::NotFound(path.to_string()),
        }
    }

    /// check if a path maps to a resource
    ///
    /// Resolution can only fail NotFound (the hierarchy normalizes every
    /// walk failure), so a `false` here never hides an unrelated error.
    pub fn exists(&self, path: &str) -> bool {
        self.getinfo(path).is_ok()
    }

    /// get resource information for a path
    ///
    /// All three namespaces (basic, details, access) are always populated;
    /// they are cheap to derive from a resolved node.
    pub fn getinfo(&self, path: &str) -> VfsResult<ResourceInfo> {
        self.with_repo(|repo| Ok(Self::resolve(repo, path)?.info()))
    }

    /// list the names of a directory's resources
    pub fn listdir(&self, path: &str) -> VfsResult<Vec<String>> {
        Ok(self
            .scandir(path, None)?
            .into_iter()
            .map(|info| info.basic.name)
            .collect())
    }

    /// scan a directory, yielding full resource information
    ///
    /// `page` is an optional `(start, end)` window over the enumeration
    /// order. The window is applied to the lazy child sequence, so skipped
    /// entries are never materialized from the store. The listing either
    /// fully succeeds or fails without yielding anything.
    pub fn scandir(
        &self,
        path: &str,
        page: Option<(usize, usize)>,
    ) -> VfsResult<Vec<ResourceInfo>> {
        self.with_repo(|repo| {
            let node = Self::resolve(repo, path)?;
            let children = node
                .children()
                .map_err(|err| Self::enumerate_error(err, path))?;

            let (skip, take) = match page {
                Some((start, end)) => (start, end.saturating_sub(start)),
                None => (0, usize::MAX),
            };

            let mut out = Vec::new();
            for item in children.skip(skip).take(take) {
                out.push(item.map_err(|_| VfsError::NotFound(path.to_string()))?);
            }
            Ok(out)
        })
    }

    /// open a file's content as a read-only binary stream
    ///
    /// The blob is materialized in full at open time; the returned stream
    /// owns its bytes and stays valid independently of the filesystem.
    pub fn openbin(&self, path: &str) -> VfsResult<BlobReader> {
        self.with_repo(|repo| {
            let node = Self::resolve(repo, path)?;
            tracing::debug!(path, "opening blob stream");
            node.open().map_err(|err| match err {
                NodeError::NotAFile => VfsError::FileExpected(path.to_string()),
                _ => VfsError::NotFound(path.to_string()),
            })
        })
    }

    /// read a file's full content
    pub fn read(&self, path: &str) -> VfsResult<Vec<u8>> {
        Ok(self.openbin(path)?.into_bytes())
    }

    /// read a file's full content as UTF-8 text
    pub fn readtext(&self, path: &str) -> VfsResult<String> {
        Ok(String::from_utf8(self.read(path)?)?)
    }

    /// always fails: the projection is read-only
    pub fn makedir(&self, path: &str) -> VfsResult<()> {
        Err(VfsError::ReadOnly(path.to_string()))
    }

    /// always fails: the projection is read-only
    pub fn remove(&self, path: &str) -> VfsResult<()> {
        Err(VfsError::ReadOnly(path.to_string()))
    }

    /// always fails: the projection is read-only
    pub fn removedir(&self, path: &str) -> VfsResult<()> {
        Err(VfsError::ReadOnly(path.to_string()))
    }

    /// always fails: the projection is read-only
    pub fn setinfo(&self, path: &str, _info: &ResourceInfo) -> VfsResult<()> {
        Err(VfsError::ReadOnly(path.to_string()))
    }
}

impl fmt::Display for GitVfs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<gitvfs '{}'>", self.inner.path.display())
    }
}

impl fmt::Debug for GitVfs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitVfs")
            .field("path", &self.inner.path)
            .finish()
    }
}
